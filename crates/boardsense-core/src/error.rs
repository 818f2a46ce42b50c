//! Error types for Boardsense

/// Result type alias using Boardsense's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Boardsense operations
///
/// The `Display` output of [`Error::Validation`] and [`Error::ModelNotFound`]
/// is written verbatim into the `error` field of a response document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed board input
    #[error("{0}")]
    Validation(String),

    /// Unknown alias, or no candidate artifact resolved
    #[error("model '{0}' not found")]
    ModelNotFound(String),

    /// Artifact could not be decoded or failed structural checks
    #[error("artifact error: {0}")]
    Artifact(String),

    /// A model operation failed on the given input
    #[error("inference error: {0}")]
    Inference(String),

    /// Command-line misuse
    #[error("{0}")]
    Usage(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new model-not-found error
    pub fn model_not_found(alias: impl Into<String>) -> Self {
        Self::ModelNotFound(alias.into())
    }

    /// Create a new artifact error
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new usage error
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
