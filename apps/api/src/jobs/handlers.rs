use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::filter::{filter_jobs, SearchCriteria, SearchQuery};
use crate::jobs::posting::{validate, NewJob};
use crate::jobs::repository;
use crate::models::job::{JobListing, JobRow, JobSkillView, JobStatus};
use crate::models::profile::{EmployerProfile, Role};
use crate::session::{MaybeSession, Session};
use crate::state::AppState;

#[derive(Serialize)]
pub struct JobSearchResponse {
    pub criteria: SearchCriteria,
    pub total: usize,
    pub jobs: Vec<JobListing>,
}

#[derive(Serialize)]
pub struct JobDetailResponse {
    pub job: JobRow,
    pub employer: Option<EmployerProfile>,
    pub skills: Vec<JobSkillView>,
    /// Only reported for seekers; other callers cannot apply.
    pub has_applied: Option<bool>,
}

/// GET /api/v1/jobs
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<JobSearchResponse>, AppError> {
    let criteria = SearchCriteria::try_from(query)?;
    let listings = repository::list_active_jobs(&state.db, None).await?;
    let jobs = filter_jobs(listings, &criteria);
    Ok(Json(JobSearchResponse {
        criteria,
        total: jobs.len(),
        jobs,
    }))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: MaybeSession,
) -> Result<Json<JobDetailResponse>, AppError> {
    let job = repository::get_job(&state.db, id).await?;
    let employer = state.profiles.employer_profile(job.employer_id).await?;
    let skills = repository::job_skills(&state.db, id).await?;

    let has_applied = match &session.0 {
        Some(s) if s.role() == Role::Seeker => {
            Some(repository::has_applied(&state.db, id, s.user_id()).await?)
        }
        _ => None,
    };

    Ok(Json(JobDetailResponse {
        job,
        employer,
        skills,
        has_applied,
    }))
}

/// POST /api/v1/jobs
pub async fn handle_post_job(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<NewJob>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let employer = session.employer()?;
    let job = validate(req)?;
    let row = repository::create_job(&state.db, employer.id, &job).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// POST /api/v1/jobs/:id/toggle-status
pub async fn handle_toggle_job_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<Json<JobRow>, AppError> {
    let employer = session.employer()?;
    let job = repository::get_owned_job(&state.db, id, employer.id).await?;
    let current: JobStatus = job
        .status
        .parse()
        .map_err(|e: String| AppError::Internal(anyhow::anyhow!(e)))?;
    let row = repository::set_job_status(&state.db, id, current.toggled()).await?;
    Ok(Json(row))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<StatusCode, AppError> {
    let employer = session.employer()?;
    repository::get_owned_job(&state.db, id, employer.id).await?;
    repository::delete_job(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
