use thiserror::Error;

/// Error type for the I/O-bearing edges of the crate (storage, sinks, config).
///
/// The form engine itself never fails: validation problems are returned as data
/// and unknown ids are ignored.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Sink rejected the request: {0}")]
    Sink(String),
}
