//! Error types for Modelshelf

/// Result type alias using Modelshelf's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Modelshelf operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Archive location unreachable, missing, or transfer interrupted
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Archive content does not match the expected model schema, or the
    /// requested predictor kind is unknown
    #[error("archive error: {0}")]
    Archive(String),

    /// The predictor rejected a malformed input record
    #[error("inference error: {0}")]
    Inference(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a new archive error
    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }
}
