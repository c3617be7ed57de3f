use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, instrument, warn};

use super::{AdminUser, AuthError, AuthState, IdentityProvider};

/// Shared admin session. Clones observe the same state.
#[derive(Clone)]
pub struct AuthSession {
    provider: Arc<dyn IdentityProvider>,
    state: Arc<watch::Sender<AuthState>>,
}

impl AuthSession {
    /// Starts in the loading state until [`AuthSession::resolve`] runs.
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            provider,
            state: Arc::new(state),
        }
    }

    /// Finishes the initial session check with whatever session was restored.
    pub fn resolve(&self, restored: Option<AdminUser>) {
        self.state.send_replace(AuthState {
            user: restored,
            loading: false,
        });
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        match self.provider.sign_in(email, password).await {
            Ok(user) => {
                info!(uid = %user.uid, "Admin signed in");
                self.state.send_replace(AuthState {
                    user: Some(user.clone()),
                    loading: false,
                });
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Sign-in failed");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AuthError> {
        let Some(user) = self.current_user() else {
            return Ok(());
        };
        self.provider.sign_out(&user).await?;
        self.state.send_replace(AuthState {
            user: None,
            loading: false,
        });
        info!(uid = %user.uid, "Admin signed out");
        Ok(())
    }

    pub fn current_user(&self) -> Option<AdminUser> {
        self.state.borrow().user.clone()
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// The signed-in admin, or [`AuthError::NotSignedIn`].
    pub fn require_user(&self) -> Result<AdminUser, AuthError> {
        self.current_user().ok_or(AuthError::NotSignedIn)
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession").field("state", &*self.state.borrow()).finish()
    }
}
