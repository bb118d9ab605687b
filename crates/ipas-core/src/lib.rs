//! ipas Core Library
//!
//! Identity and storage naming for uploaded mobile application packages
//! (ipa and apk). A parser hands over a [`Package`]; this crate classifies it,
//! builds the [`AppInfo`] record with a fresh id and computes the storage keys
//! under which the binary and its icon are kept. It performs no I/O.

pub mod config;
pub mod error;
pub mod id;
pub mod keys;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::PackageConfig;
pub use error::{LogLevel, PackageError, PackageResult};
pub use id::{IdGenerator, SequentialIdGenerator, UuidV4Generator};
pub use models::{
    format_size, group_by_identifier, sort_by_recency, AppGroup, AppInfo, MetaData, Package,
    PackageKind,
};
pub use validation::validate_package;
