use thiserror::Error;

/// Errors produced by scroll store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Route paths must start with `/`.
    #[error("invalid route path: {path:?}")]
    InvalidRoute { path: String },

    /// Offsets must be finite and not negative.
    #[error("invalid scroll offset: {offset}")]
    InvalidOffset { offset: f64 },
}
