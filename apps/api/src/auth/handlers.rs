use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::password::{check_new_password, PasswordStrength};
use crate::errors::AppError;
use crate::identity::AuthSession;
use crate::models::profile::{Profile, Role};
use crate::profiles::repository as profile_repo;
use crate::session::{resolve_role, AccessToken, RoleResolution};
use crate::shell::guard::{guard, AuthState};
use crate::shell::page::{Page, PageParams, PageState};
use crate::shell::registry::page_to_path;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    /// Full name for seekers, company name for employers.
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Where the client should go once the call succeeds.
#[derive(Debug, Serialize)]
pub struct NextPage {
    pub state: PageState,
    pub path: String,
}

impl NextPage {
    fn for_role(requested: Page, role: Role) -> Self {
        let page = guard(requested, AuthState::Authenticated(role));
        let state = PageState::new(page, PageParams::default());
        let path = page_to_path(&state);
        NextPage { state, path }
    }
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub user_id: Uuid,
    pub role: Role,
    pub password_strength: PasswordStrength,
    /// Absent when the provider wants the email confirmed first.
    pub session: Option<AuthSession>,
    pub next: NextPage,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub session: AuthSession,
    pub profile: Profile,
    pub next: NextPage,
}

fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// POST /api/v1/auth/signup
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), AppError> {
    require(&req.email, "email")?;
    require(&req.name, "name")?;
    let password_strength = check_new_password(&req.password, &req.confirm_password)?;

    let outcome = state
        .identity
        .sign_up(req.email.trim(), &req.password)
        .await?;
    let user_id = outcome.identity.id;
    let name = req.name.trim();

    let created = match req.role {
        Role::Seeker => profile_repo::create_seeker_profile(&state.db, user_id, name)
            .await
            .map(|_| ()),
        Role::Employer => profile_repo::create_employer_profile(&state.db, user_id, name)
            .await
            .map(|_| ()),
    };
    if let Err(e) = created {
        // The identity now exists without a profile; it will surface as
        // ROLE_UNDETERMINED on its next request.
        error!(user_id = %user_id, "Profile creation failed after sign-up: {e}");
        return Err(e);
    }

    info!(user_id = %user_id, role = req.role.as_str(), "Account created");

    let landing = match req.role {
        Role::Seeker => Page::Dashboard,
        Role::Employer => Page::EmployerDashboard,
    };
    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            user_id,
            role: req.role,
            password_strength,
            session: outcome.session,
            next: NextPage::for_role(landing, req.role),
        }),
    ))
}

/// POST /api/v1/auth/signin
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, AppError> {
    require(&req.email, "email")?;
    require(&req.password, "password")?;

    let session = state.identity.sign_in(req.email.trim(), &req.password).await?;
    let profile = match resolve_role(state.profiles.as_ref(), session.identity.id).await? {
        RoleResolution::Resolved(profile) => profile,
        RoleResolution::Undetermined => {
            return Err(AppError::RoleUndetermined(session.identity.id))
        }
    };

    info!(user_id = %session.identity.id, role = profile.role().as_str(), "Signed in");
    let next = NextPage::for_role(Page::Dashboard, profile.role());
    Ok(Json(SignInResponse {
        session,
        profile,
        next,
    }))
}

/// POST /api/v1/auth/refresh
pub async fn handle_refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<AuthSession>, AppError> {
    require(&req.refresh_token, "refresh_token")?;
    let session = state.identity.refresh_session(&req.refresh_token).await?;
    Ok(Json(session))
}

/// POST /api/v1/auth/signout
pub async fn handle_sign_out(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
) -> Result<StatusCode, AppError> {
    state.identity.sign_out(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/password-reset
/// The reset email links back to the site root.
pub async fn handle_password_reset(
    State(state): State<AppState>,
    Json(req): Json<PasswordResetRequest>,
) -> Result<StatusCode, AppError> {
    require(&req.email, "email")?;
    state
        .identity
        .reset_password(req.email.trim(), &state.config.site_url)
        .await?;
    Ok(StatusCode::ACCEPTED)
}
