use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::credentials::{CertificationRow, EducationRow, Proficiency, UserSkillRow};
use crate::models::job::SkillRow;
use crate::models::profile::{EmployerProfileUpdate, Profile, Role, SeekerProfile, SeekerProfileUpdate};
use crate::profiles::completion::{compute_completion, CredentialCounts, ProfileCompletion};
use crate::profiles::repository::{self, CredentialTable, NewCertification, NewEducation};
use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SeekerCredentials {
    pub skills: Vec<UserSkillRow>,
    pub education: Vec<EducationRow>,
    pub certifications: Vec<CertificationRow>,
}

impl SeekerCredentials {
    fn counts(&self) -> CredentialCounts {
        CredentialCounts {
            skills: self.skills.len(),
            education: self.education.len(),
            certifications: self.certifications.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<ProfileCompletion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<SeekerCredentials>,
}

#[derive(Debug, Deserialize)]
pub struct AddSkillRequest {
    pub skill_id: Uuid,
    pub proficiency: Proficiency,
}

async fn load_credentials(state: &AppState, user_id: Uuid) -> Result<SeekerCredentials, AppError> {
    Ok(SeekerCredentials {
        skills: repository::list_user_skills(&state.db, user_id).await?,
        education: repository::list_education(&state.db, user_id).await?,
        certifications: repository::list_certifications(&state.db, user_id).await?,
    })
}

/// Shapes a seeker response from the stored row. The stored percentage is
/// reported as-is; only write paths change it.
fn seeker_view(profile: SeekerProfile, credentials: SeekerCredentials) -> ProfileResponse {
    let completion = compute_completion(&profile, credentials.counts());
    ProfileResponse {
        profile: Profile::Seeker(profile),
        completion: Some(completion),
        credentials: Some(credentials),
    }
}

/// After a write: recomputes completion and stores it when it drifted.
async fn refreshed_seeker_response(state: &AppState, mut profile: SeekerProfile) -> Result<ProfileResponse, AppError> {
    let credentials = load_credentials(state, profile.id).await?;
    let percent = compute_completion(&profile, credentials.counts()).percent;
    if percent != profile.profile_completion {
        repository::set_completion(&state.db, profile.id, percent).await?;
        profile.profile_completion = percent;
    }
    Ok(seeker_view(profile, credentials))
}

async fn current_seeker_response(state: &AppState, session: &Session) -> Result<ProfileResponse, AppError> {
    let seeker = session.seeker()?;
    let fresh = state
        .profiles
        .seeker_profile(seeker.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    refreshed_seeker_response(state, fresh).await
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ProfileResponse>, AppError> {
    let response = match session.profile {
        Profile::Seeker(profile) => {
            let credentials = load_credentials(&state, profile.id).await?;
            seeker_view(profile, credentials)
        }
        Profile::Employer(profile) => ProfileResponse {
            profile: Profile::Employer(profile),
            completion: None,
            credentials: None,
        },
    };
    Ok(Json(response))
}

/// PUT /api/v1/profile
///
/// The accepted body depends on the caller's role, so it is decoded only
/// after the session is known.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<Value>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user_id = session.user_id();
    let response = match session.role() {
        Role::Seeker => {
            let update: SeekerProfileUpdate = serde_json::from_value(body)
                .map_err(|e| AppError::Validation(e.to_string()))?;
            if matches!(update.years_experience, Some(y) if y < 0) {
                return Err(AppError::Validation(
                    "years_experience cannot be negative".to_string(),
                ));
            }
            let profile = repository::update_seeker_profile(&state.db, user_id, &update).await?;
            refreshed_seeker_response(&state, profile).await?
        }
        Role::Employer => {
            let update: EmployerProfileUpdate = serde_json::from_value(body)
                .map_err(|e| AppError::Validation(e.to_string()))?;
            if matches!(update.company_name.as_deref(), Some(name) if name.trim().is_empty()) {
                return Err(AppError::Validation("company_name cannot be empty".to_string()));
            }
            let profile = repository::update_employer_profile(&state.db, user_id, &update).await?;
            ProfileResponse {
                profile: Profile::Employer(profile),
                completion: None,
                credentials: None,
            }
        }
    };

    info!(user_id = %user_id, role = session.role().as_str(), "Profile updated");
    Ok(Json(response))
}

/// GET /api/v1/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Result<Json<Vec<SkillRow>>, AppError> {
    Ok(Json(repository::list_skill_catalogue(&state.db).await?))
}

/// POST /api/v1/profile/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<AddSkillRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let seeker = session.seeker()?;
    repository::add_user_skill(&state.db, seeker.id, req.skill_id, req.proficiency).await?;
    let response = current_seeker_response(&state, &session).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/profile/education
pub async fn handle_add_education(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<NewEducation>,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let seeker = session.seeker()?;
    if [&req.degree, &req.field, &req.institution]
        .iter()
        .any(|v| v.trim().is_empty())
    {
        return Err(AppError::Validation(
            "degree, field and institution are required".to_string(),
        ));
    }
    repository::add_education(&state.db, seeker.id, &req).await?;
    let response = current_seeker_response(&state, &session).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/profile/certifications
pub async fn handle_add_certification(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<NewCertification>,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let seeker = session.seeker()?;
    if req.name.trim().is_empty() || req.issuing_organization.trim().is_empty() {
        return Err(AppError::Validation(
            "name and issuing_organization are required".to_string(),
        ));
    }
    if let (Some(issued), Some(expires)) = (req.issue_date, req.expiry_date) {
        if expires < issued {
            return Err(AppError::Validation(
                "expiry_date cannot be before issue_date".to_string(),
            ));
        }
    }
    repository::add_certification(&state.db, seeker.id, &req).await?;
    let response = current_seeker_response(&state, &session).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn remove(
    state: &AppState,
    session: &Session,
    table: CredentialTable,
    id: Uuid,
) -> Result<Json<ProfileResponse>, AppError> {
    let seeker = session.seeker()?;
    repository::remove_credential(&state.db, table, seeker.id, id).await?;
    Ok(Json(current_seeker_response(state, session).await?))
}

/// DELETE /api/v1/profile/skills/:id
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<Json<ProfileResponse>, AppError> {
    remove(&state, &session, CredentialTable::UserSkills, id).await
}

/// DELETE /api/v1/profile/education/:id
pub async fn handle_remove_education(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<Json<ProfileResponse>, AppError> {
    remove(&state, &session, CredentialTable::Education, id).await
}

/// DELETE /api/v1/profile/certifications/:id
pub async fn handle_remove_certification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<Json<ProfileResponse>, AppError> {
    remove(&state, &session, CredentialTable::Certifications, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::fixtures;
    use crate::profiles::completion::SIGNUP_COMPLETION;

    fn no_credentials() -> SeekerCredentials {
        SeekerCredentials {
            skills: Vec::new(),
            education: Vec::new(),
            certifications: Vec::new(),
        }
    }

    fn stored_percent(response: &ProfileResponse) -> i32 {
        match &response.profile {
            Profile::Seeker(p) => p.profile_completion,
            Profile::Employer(_) => panic!("expected seeker"),
        }
    }

    #[test]
    fn test_fresh_signup_view_agrees_with_stored_completion() {
        let response = seeker_view(fixtures::seeker(Uuid::new_v4(), "Arjun Rao"), no_credentials());
        let computed = response.completion.as_ref().map(|c| c.percent);
        assert_eq!(computed, Some(SIGNUP_COMPLETION));
        assert_eq!(stored_percent(&response), SIGNUP_COMPLETION);
    }

    #[test]
    fn test_view_reports_stored_percent_untouched() {
        let profile = SeekerProfile {
            profile_completion: 55,
            ..fixtures::seeker(Uuid::new_v4(), "Arjun Rao")
        };
        let response = seeker_view(profile, no_credentials());
        assert_eq!(stored_percent(&response), 55);
        assert_eq!(response.completion.map(|c| c.percent), Some(SIGNUP_COMPLETION));
    }
}
