use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Task failed: {0}")]
    TaskFailed(String),
}
