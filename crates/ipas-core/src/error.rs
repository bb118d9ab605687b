//! Error types module
//!
//! Record construction, classification and the storage-name accessors are
//! total. `PackageError` covers the fallible edges around them: checked
//! construction, upload validation and record (de)serialization.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected rejections such as validation failures
    Debug,
    /// Client-caused problems worth noticing (oversized uploads)
    Warn,
    /// Unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("Unsupported package kind: {0}")]
    UnsupportedKind(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Package too large: {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { size: i64, limit: u64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PackageError {
    /// HTTP status code an outer API layer should answer with
    pub fn http_status_code(&self) -> u16 {
        match self {
            PackageError::UnsupportedKind(_) => 415,
            PackageError::InvalidInput(_) => 400,
            PackageError::PayloadTooLarge { .. } => 413,
            PackageError::Serialization(_) => 500,
        }
    }

    /// Machine-readable error code (e.g., "UNSUPPORTED_KIND")
    pub fn error_code(&self) -> &'static str {
        match self {
            PackageError::UnsupportedKind(_) => "UNSUPPORTED_KIND",
            PackageError::InvalidInput(_) => "INVALID_INPUT",
            PackageError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            PackageError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            PackageError::UnsupportedKind(_) | PackageError::InvalidInput(_) => LogLevel::Debug,
            PackageError::PayloadTooLarge { .. } => LogLevel::Warn,
            PackageError::Serialization(_) => LogLevel::Error,
        }
    }
}

pub type PackageResult<T> = Result<T, PackageError>;
