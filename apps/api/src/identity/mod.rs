//! Identity provider boundary.
//!
//! Sign-up, sign-in, sign-out, token refresh, password reset and the
//! token-to-identity lookup all go through `IdentityProvider`. The production
//! implementation is `GoTrueClient`; tests swap in an in-memory provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod gotrue;

pub use gotrue::GoTrueClient;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered and refused: bad credentials, duplicate email, etc.
    #[error("Provider rejected request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Access token is invalid or expired")]
    InvalidToken,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Provider response missing {0}")]
    MissingField(&'static str),
}

/// Who a session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Tokens issued by the provider for a signed-in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub identity: Identity,
}

/// Result of a sign-up. `session` is absent when the provider requires the
/// email address to be confirmed before the first sign-in.
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub identity: Identity,
    pub session: Option<AuthSession>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, IdentityError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError>;

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, IdentityError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError>;

    async fn reset_password(&self, email: &str, redirect_to: &str) -> Result<(), IdentityError>;

    /// Looks up the identity behind an access token.
    async fn user(&self, access_token: &str) -> Result<Identity, IdentityError>;
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// In-memory provider: access tokens map straight to identities.
    #[derive(Default)]
    pub struct FakeIdentityProvider {
        tokens: Mutex<HashMap<String, Identity>>,
        accounts: Mutex<HashMap<String, (String, Identity)>>,
    }

    impl FakeIdentityProvider {
        pub fn with_token(self, token: &str, id: Uuid) -> Self {
            self.tokens.lock().unwrap().insert(
                token.to_string(),
                Identity {
                    id,
                    email: Some(format!("{id}@example.com")),
                },
            );
            self
        }

        fn issue(&self, identity: &Identity) -> AuthSession {
            let token = format!("token-{}", identity.id);
            self.tokens
                .lock()
                .unwrap()
                .insert(token.clone(), identity.clone());
            AuthSession {
                access_token: token,
                refresh_token: format!("refresh-{}", identity.id),
                expires_in: 3600,
                identity: identity.clone(),
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeIdentityProvider {
        async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, IdentityError> {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(IdentityError::Rejected {
                    status: 422,
                    message: "User already registered".to_string(),
                });
            }
            let identity = Identity {
                id: Uuid::new_v4(),
                email: Some(email.to_string()),
            };
            accounts.insert(email.to_string(), (password.to_string(), identity.clone()));
            drop(accounts);
            let session = self.issue(&identity);
            Ok(SignUpOutcome {
                identity,
                session: Some(session),
            })
        }

        async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, IdentityError> {
            let identity = {
                let accounts = self.accounts.lock().unwrap();
                match accounts.get(email) {
                    Some((stored, identity)) if stored == password => identity.clone(),
                    _ => {
                        return Err(IdentityError::Rejected {
                            status: 400,
                            message: "Invalid login credentials".to_string(),
                        })
                    }
                }
            };
            Ok(self.issue(&identity))
        }

        async fn refresh_session(&self, _refresh_token: &str) -> Result<AuthSession, IdentityError> {
            Err(IdentityError::InvalidToken)
        }

        async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
            self.tokens.lock().unwrap().remove(access_token);
            Ok(())
        }

        async fn reset_password(&self, _email: &str, _redirect_to: &str) -> Result<(), IdentityError> {
            Ok(())
        }

        async fn user(&self, access_token: &str) -> Result<Identity, IdentityError> {
            self.tokens
                .lock()
                .unwrap()
                .get(access_token)
                .cloned()
                .ok_or(IdentityError::InvalidToken)
        }
    }
}
