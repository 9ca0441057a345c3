use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::Identity;
use crate::models::profile::{EmployerProfile, Profile, Role, SeekerProfile};
use crate::session::role::{resolve_role, RoleResolution};
use crate::shell::guard::AuthState;
use crate::state::AppState;

/// The signed-in caller: identity and resolved profile.
/// Handlers that need a caller take this as an extractor argument.
#[derive(Debug, Clone)]
pub struct Session {
    pub identity: Identity,
    pub profile: Profile,
}

impl Session {
    pub fn user_id(&self) -> Uuid {
        self.identity.id
    }

    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState::Authenticated(self.role())
    }

    pub fn seeker(&self) -> Result<&SeekerProfile, AppError> {
        match &self.profile {
            Profile::Seeker(profile) => Ok(profile),
            Profile::Employer(_) => Err(AppError::Forbidden(
                "Only job seekers can do this".to_string(),
            )),
        }
    }

    pub fn employer(&self) -> Result<&EmployerProfile, AppError> {
        match &self.profile {
            Profile::Employer(profile) => Ok(profile),
            Profile::Seeker(_) => Err(AppError::Forbidden(
                "Only employers can do this".to_string(),
            )),
        }
    }
}

/// Extracts the token from `Authorization: Bearer <token>`.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolves a token into a full session. An identity with no profile is a
/// session-fatal error, not an anonymous caller.
pub async fn load_session(state: &AppState, access_token: &str) -> Result<Session, AppError> {
    let identity = state.identity.user(access_token).await?;
    match resolve_role(state.profiles.as_ref(), identity.id).await? {
        RoleResolution::Resolved(profile) => Ok(Session { identity, profile }),
        RoleResolution::Undetermined => Err(AppError::RoleUndetermined(identity.id)),
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        load_session(state, token).await
    }
}

/// Like `Session`, but a request without a bearer token is anonymous instead of
/// rejected. A token that is present but invalid is still an error.
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

impl MaybeSession {
    pub fn auth_state(&self) -> AuthState {
        self.0
            .as_ref()
            .map(Session::auth_state)
            .unwrap_or(AuthState::Anonymous)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match bearer_token(parts) {
            Some(token) => Ok(MaybeSession(Some(load_session(state, token).await?))),
            None => Ok(MaybeSession(None)),
        }
    }
}

/// Just the bearer token, without resolving it. Lets a caller whose identity
/// has no profile still sign out.
#[derive(Debug, Clone)]
pub struct AccessToken(pub String);

#[async_trait]
impl FromRequestParts<AppState> for AccessToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        bearer_token(parts)
            .map(|token| AccessToken(token.to_string()))
            .ok_or(AppError::Unauthorized)
    }
}
