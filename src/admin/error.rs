use thiserror::Error;

use super::prompt::messages;
use crate::store::StoreError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdminError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Admin is not signed in")]
    Unauthenticated,
    #[error("A save is already in progress")]
    SaveInProgress,
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl AdminError {
    /// Generic localized text for the alert; never names the underlying cause.
    pub fn user_message(&self) -> &'static str {
        match self {
            AdminError::Validation(_) => messages::REQUIRED_FIELDS,
            AdminError::Unauthenticated => messages::LOGIN_REQUIRED,
            AdminError::SaveInProgress => messages::SAVING,
            AdminError::Store(_) => messages::SAVE_FAILED,
        }
    }
}
