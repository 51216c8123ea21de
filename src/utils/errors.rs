use thiserror::Error;

/// Unified error type for governance hashing and cycle estimation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GovError {
    #[error("Incomplete snapshot: {0} is missing")]
    IncompleteSnapshot(&'static str),

    #[error("Index out of range: {index} (available: {available})")]
    IndexOutOfRange { index: i64, available: usize },

    #[error("Hash primitive unavailable: {0}")]
    PrimitiveUnavailable(String),

    #[error("Degenerate interval: {0}")]
    DegenerateInterval(String),

    #[error("Invalid timestamp: {0} ms")]
    InvalidTimestamp(i64),

    #[error("Truncated input: needed {needed} bytes, had {available}")]
    Truncated { needed: usize, available: usize },

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Convenience alias
pub type Result<T> = std::result::Result<T, GovError>;
