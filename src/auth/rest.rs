use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::{AdminUser, AuthError, IdentityProvider};

/// Email+password sign-in against a hosted identity toolkit.
#[derive(Debug, Clone)]
pub struct RestIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

const CREDENTIAL_ERRORS: &[&str] = &[
    "EMAIL_NOT_FOUND",
    "INVALID_PASSWORD",
    "INVALID_EMAIL",
    "INVALID_LOGIN_CREDENTIALS",
    "USER_DISABLED",
];

impl RestIdentityProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn sign_in_url(&self) -> String {
        format!("{}/v1/accounts:signInWithPassword", self.base_url)
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
        debug!("Sending request");
        let response = self
            .http
            .post(self.sign_in_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&SignInRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| format!("status {status}"));
            // Messages may carry a suffix, e.g. "TOO_MANY_ATTEMPTS_TRY_LATER : ...".
            let code = message.split(':').next().unwrap_or_default().trim();
            if CREDENTIAL_ERRORS.contains(&code) {
                return Err(AuthError::InvalidCredentials);
            }
            warn!(%status, %message, "Sign-in rejected");
            return Err(AuthError::Rejected(message));
        }

        let body: SignInResponse = response.json().await?;
        Ok(AdminUser {
            uid: body.local_id,
            email: body.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn successful_sign_in_returns_the_account() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .and(query_param("key", "api-key"))
            .and(body_partial_json(json!({ "email": "admin@mehran.ps", "returnSecureToken": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "localId": "uid-1",
                "email": "admin@mehran.ps",
                "idToken": "token"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = RestIdentityProvider::new(server.uri(), "api-key");
        let user = provider.sign_in("admin@mehran.ps", "pw").await.unwrap();

        assert_eq!(user.uid, "uid-1");
    }

    #[tokio::test]
    async fn credential_errors_map_to_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 400, "message": "INVALID_LOGIN_CREDENTIALS" }
            })))
            .mount(&server)
            .await;

        let provider = RestIdentityProvider::new(server.uri(), "api-key");
        let err = provider.sign_in("admin@mehran.ps", "bad").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn other_errors_are_rejections() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "message": "TOO_MANY_ATTEMPTS_TRY_LATER : Access disabled" }
            })))
            .mount(&server)
            .await;

        let provider = RestIdentityProvider::new(server.uri(), "api-key");
        let err = provider.sign_in("admin@mehran.ps", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::Rejected(ref m) if m.starts_with("TOO_MANY_ATTEMPTS")));
    }
}
