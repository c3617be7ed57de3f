use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Cannot merge fields into non-object value at {0}")]
    NotAnObject(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Seed error: {0}")]
    Seed(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
