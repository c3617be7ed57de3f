//! Admin sign-in.
//!
//! [`AuthSession`] tracks whether an admin is signed in and publishes that on
//! a watch channel; the [`IdentityProvider`] behind it checks credentials.

mod error;
mod local;
mod rest;
mod session;

pub use error::AuthError;
pub use local::{hash_password, LocalIdentityProvider};
pub use rest::RestIdentityProvider;
pub use session::AuthSession;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub uid: String,
    pub email: String,
}

/// Session as seen by the admin screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<AdminUser>,
    /// True until the session has been resolved once.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AdminUser, AuthError>;

    async fn sign_out(&self, _user: &AdminUser) -> Result<(), AuthError> {
        Ok(())
    }
}
