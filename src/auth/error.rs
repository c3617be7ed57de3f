use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("No admin is signed in")]
    NotSignedIn,
    #[error("Identity provider rejected the request: {0}")]
    Rejected(String),
    #[error("Identity provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Password hash error: {0}")]
    Hash(String),
}

impl AuthError {
    /// Text shown under the login form.
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::NotSignedIn => "يجب تسجيل الدخول أولاً",
            _ => "البريد الإلكتروني أو كلمة المرور غير صحيحة",
        }
    }
}
