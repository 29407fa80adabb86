use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Application-level failures: configuration, artifact loading, server startup.
/// These occur before the service accepts requests and abort the process.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to load artifact: {0}")]
    ArtifactError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

/// Failures of a single recommendation lookup. The `Display` form of each
/// variant is the exact message clients see; the HTTP layer renders every
/// variant as a 200-status JSON body with an `error` key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// The input matched no catalog row after trim + lowercase.
    /// Carries the original, un-normalized input.
    #[error("Product '{0}' not found")]
    ProductNotFound(String),

    /// The loaded catalog has no combined-features column at all.
    #[error("Data is missing 'combined_features' column. Run preprocessing again.")]
    MissingFeatures,

    /// Anything else that goes wrong between lookup and response assembly.
    #[error("{0}")]
    Internal(String),
}
