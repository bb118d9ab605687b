//! Record identifier generation.
//!
//! Record construction takes the generator as a dependency so tests can pin
//! ids; production code uses [`UuidV4Generator`].

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of fresh record ids. Implementations must be safe to call from
/// several threads at once.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Uuid;
}

/// Random (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic ids: `00000000-0000-0000-0000-000000000001`, then `...02`, and so on.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    last: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first generated id will be `start + 1`.
    pub fn starting_after(start: u64) -> Self {
        SequentialIdGenerator {
            last: AtomicU64::new(start),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> Uuid {
        let n = self.last.fetch_add(1, Ordering::Relaxed) + 1;
        Uuid::from_u128(u128::from(n))
    }
}
