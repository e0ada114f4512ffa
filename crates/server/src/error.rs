use thiserror::Error;

/// Errors from running a transport.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Transport I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Outgoing frame failed to serialize.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
