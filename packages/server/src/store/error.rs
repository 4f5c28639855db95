use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field is missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The operation would violate a uniqueness rule.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Document IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
