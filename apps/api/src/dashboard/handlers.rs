use axum::{extract::State, Json};
use serde::Serialize;

use crate::applications::repository as application_repo;
use crate::dashboard::stats::EmployerStats;
use crate::errors::AppError;
use crate::jobs::repository as job_repo;
use crate::models::application::{ApplicationStatus, ApplicationSummary};
use crate::models::job::{JobListing, JobRow};
use crate::models::profile::{EmployerProfile, Profile};
use crate::session::Session;
use crate::state::AppState;

const RECENT_APPLICATIONS: i64 = 5;
const RECOMMENDED_JOBS: i64 = 3;

#[derive(Debug, Serialize)]
pub struct SeekerDashboard {
    pub full_name: String,
    pub profile_completion: i32,
    pub recent_applications: Vec<ApplicationSummary>,
    pub shortlisted: i64,
    pub recommended_jobs: Vec<JobListing>,
}

#[derive(Debug, Serialize)]
pub struct EmployerDashboard {
    pub employer: EmployerProfile,
    pub jobs: Vec<JobRow>,
    pub stats: EmployerStats,
}

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DashboardResponse {
    Seeker(SeekerDashboard),
    Employer(EmployerDashboard),
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<DashboardResponse>, AppError> {
    let response = match session.profile {
        Profile::Seeker(profile) => {
            let recent_applications =
                application_repo::list_seeker_applications(&state.db, profile.id, RECENT_APPLICATIONS).await?;
            let shortlisted = application_repo::count_seeker_applications(
                &state.db,
                profile.id,
                ApplicationStatus::Shortlisted,
            )
            .await?;
            let recommended_jobs = job_repo::list_active_jobs(&state.db, Some(RECOMMENDED_JOBS)).await?;

            DashboardResponse::Seeker(SeekerDashboard {
                full_name: profile.full_name,
                profile_completion: profile.profile_completion,
                recent_applications,
                shortlisted,
                recommended_jobs,
            })
        }
        Profile::Employer(employer) => {
            let jobs = job_repo::list_employer_jobs(&state.db, employer.id).await?;
            let statuses = application_repo::employer_application_statuses(&state.db, employer.id).await?;
            let stats = EmployerStats::compute(&jobs, &statuses);

            DashboardResponse::Employer(EmployerDashboard {
                employer,
                jobs,
                stats,
            })
        }
    };
    Ok(Json(response))
}
