use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Transient backend error: {0}")]
    TransientBackend(String),

    #[error("Permanent backend error: {0}")]
    PermanentBackend(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Retryable conditions: rate limits, timeouts, 5xx responses.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::TransientBackend(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
