//! GoTrue client: the only code in the service that talks to the identity provider.
//!
//! Endpoints live under `{AUTH_URL}/auth/v1`. Every request carries the
//! project's anon key in the `apikey` header; user-scoped calls add the
//! caller's access token as a bearer token. Calls are not retried: a failed
//! sign-in is reported back to the user, not replayed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{AuthSession, Identity, IdentityError, IdentityProvider, SignUpOutcome};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
struct RecoverRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    id: Uuid,
    email: Option<String>,
}

impl From<UserBody> for Identity {
    fn from(body: UserBody) -> Self {
        Identity {
            id: body.id,
            email: body.email,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    user: UserBody,
}

impl From<SessionBody> for AuthSession {
    fn from(body: SessionBody) -> Self {
        AuthSession {
            access_token: body.access_token,
            refresh_token: body.refresh_token,
            expires_in: body.expires_in,
            identity: body.user.into(),
        }
    }
}

/// GoTrue reports errors under several keys depending on the endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

#[derive(Clone)]
pub struct GoTrueClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl GoTrueClient {
    pub fn new(auth_url: &str, anon_key: String) -> Result<Self, IdentityError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: format!("{}/auth/v1", auth_url.trim_end_matches('/')),
            anon_key,
        })
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
    }

    /// Sends the request and turns non-success statuses into `IdentityError`s.
    async fn send(&self, request: RequestBuilder, scope: Scope) -> Result<Response, IdentityError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status.is_server_error() {
            warn!("Identity provider returned {}: {}", status, body);
        }
        Err(failure(status, &body, scope))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        scope: Scope,
    ) -> Result<T, IdentityError> {
        let response = self.send(request, scope).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Whether a call authenticates with the caller's access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// Only the anon key: signup, token grants, recover.
    Public,
    /// Bearer token of the signed-in user: user lookup, logout.
    User,
}

/// A 401/403 only means the access token is bad on user-scoped calls.
/// Everywhere else the provider's own message is kept.
fn failure(status: StatusCode, body: &str, scope: Scope) -> IdentityError {
    let refused = status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN;
    if refused && scope == Scope::User {
        debug!("Identity provider refused token: {}", status);
        return IdentityError::InvalidToken;
    }
    IdentityError::Rejected {
        status: status.as_u16(),
        message: error_message(body),
    }
}

/// Picks the human-readable message out of a GoTrue error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            if body.is_empty() {
                "Request was rejected".to_string()
            } else {
                body.to_string()
            }
        })
}

/// `/signup` answers with a full session when autoconfirm is on and with the
/// bare user object when the email still has to be confirmed.
fn parse_sign_up(body: Value) -> Result<SignUpOutcome, IdentityError> {
    if body.get("access_token").is_some() {
        let session: AuthSession = serde_json::from_value::<SessionBody>(body)?.into();
        return Ok(SignUpOutcome {
            identity: session.identity.clone(),
            session: Some(session),
        });
    }

    let user = match body.get("user") {
        Some(user) if !user.is_null() => user.clone(),
        _ => body,
    };
    if user.get("id").is_none() {
        return Err(IdentityError::MissingField("user id"));
    }
    let identity: Identity = serde_json::from_value::<UserBody>(user)?.into();
    Ok(SignUpOutcome {
        identity,
        session: None,
    })
}

#[async_trait]
impl IdentityProvider for GoTrueClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, IdentityError> {
        let body: Value = self
            .send_json(
                self.post("/signup").json(&Credentials { email, password }),
                Scope::Public,
            )
            .await?;
        let outcome = parse_sign_up(body)?;
        debug!(
            "Signed up identity {} (session issued: {})",
            outcome.identity.id,
            outcome.session.is_some()
        );
        Ok(outcome)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError> {
        let body: SessionBody = self
            .send_json(
                self.post("/token")
                    .query(&[("grant_type", "password")])
                    .json(&Credentials { email, password }),
                Scope::Public,
            )
            .await?;
        Ok(body.into())
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, IdentityError> {
        let body: SessionBody = self
            .send_json(
                self.post("/token")
                    .query(&[("grant_type", "refresh_token")])
                    .json(&RefreshRequest { refresh_token }),
                Scope::Public,
            )
            .await?;
        Ok(body.into())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        self.send(self.post("/logout").bearer_auth(access_token), Scope::User)
            .await?;
        Ok(())
    }

    async fn reset_password(&self, email: &str, redirect_to: &str) -> Result<(), IdentityError> {
        self.send(
            self.post("/recover")
                .query(&[("redirect_to", redirect_to)])
                .json(&RecoverRequest { email }),
            Scope::Public,
        )
        .await?;
        Ok(())
    }

    async fn user(&self, access_token: &str) -> Result<Identity, IdentityError> {
        let body: UserBody = self
            .send_json(self.get("/user").bearer_auth(access_token), Scope::User)
            .await?;
        Ok(body.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_prefers_description() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(error_message(body), "Invalid login credentials");
    }

    #[test]
    fn test_error_message_reads_msg_key() {
        let body = r#"{"code":422,"msg":"User already registered"}"#;
        assert_eq!(error_message(body), "User already registered");
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("bad gateway"), "bad gateway");
        assert_eq!(error_message(""), "Request was rejected");
    }

    #[test]
    fn test_forbidden_signup_keeps_provider_message() {
        let err = failure(
            StatusCode::FORBIDDEN,
            r#"{"code":403,"msg":"Signups not allowed for this instance"}"#,
            Scope::Public,
        );
        assert!(matches!(
            err,
            IdentityError::Rejected { status: 403, ref message } if message == "Signups not allowed for this instance"
        ));
    }

    #[test]
    fn test_unauthorized_token_grant_is_rejected_not_invalid_token() {
        let err = failure(StatusCode::UNAUTHORIZED, r#"{"error_description":"Invalid API key"}"#, Scope::Public);
        assert!(matches!(err, IdentityError::Rejected { status: 401, .. }));
    }

    #[test]
    fn test_refused_user_call_is_invalid_token() {
        assert!(matches!(
            failure(StatusCode::UNAUTHORIZED, "", Scope::User),
            IdentityError::InvalidToken
        ));
        assert!(matches!(
            failure(StatusCode::FORBIDDEN, "", Scope::User),
            IdentityError::InvalidToken
        ));
    }

    #[test]
    fn test_other_user_call_failures_keep_message() {
        let err = failure(StatusCode::UNPROCESSABLE_ENTITY, r#"{"msg":"bad"}"#, Scope::User);
        assert!(matches!(err, IdentityError::Rejected { status: 422, ref message } if message == "bad"));
    }

    #[test]
    fn test_sign_up_with_session() {
        let id = Uuid::new_v4();
        let body = json!({
            "access_token": "a",
            "refresh_token": "r",
            "expires_in": 3600,
            "token_type": "bearer",
            "user": { "id": id, "email": "new@example.com" }
        });
        let outcome = parse_sign_up(body).unwrap();
        assert_eq!(outcome.identity.id, id);
        assert_eq!(outcome.session.unwrap().access_token, "a");
    }

    #[test]
    fn test_sign_up_pending_confirmation_returns_bare_user() {
        let id = Uuid::new_v4();
        let body = json!({ "id": id, "email": "new@example.com", "confirmation_sent_at": "2026-01-01T00:00:00Z" });
        let outcome = parse_sign_up(body).unwrap();
        assert_eq!(outcome.identity.id, id);
        assert!(outcome.session.is_none());
    }

    #[test]
    fn test_sign_up_without_user_id_is_an_error() {
        let outcome = parse_sign_up(json!({ "email": "x@example.com" }));
        assert!(matches!(outcome, Err(IdentityError::MissingField(_))));
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let client = GoTrueClient::new("https://auth.example.com/", "anon".to_string()).unwrap();
        assert_eq!(client.base_url, "https://auth.example.com/auth/v1");
    }
}
