use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use tracing::{instrument, warn};

use super::{AdminUser, AuthError, IdentityProvider};

/// A single admin account checked against an argon2 hash.
#[derive(Debug, Clone)]
pub struct LocalIdentityProvider {
    email: String,
    password_hash: String,
}

impl LocalIdentityProvider {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
        if !email.trim().eq_ignore_ascii_case(&self.email) {
            return Err(AuthError::InvalidCredentials);
        }
        let parsed = PasswordHash::new(&self.password_hash).map_err(|e| {
            warn!(error = %e, "Configured admin password hash is unreadable");
            AuthError::Hash(e.to_string())
        })?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthError::InvalidCredentials)?;

        Ok(AdminUser {
            uid: format!("local:{}", self.email),
            email: self.email.clone(),
        })
    }
}
