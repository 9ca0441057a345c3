use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::applications::repository;
use crate::applications::screening::{screen, StatusCounts, StatusFilter};
use crate::errors::AppError;
use crate::jobs::repository as jobs;
use crate::models::application::{ApplicantRow, ApplicationStatus, JobApplicationRow};
use crate::models::job::JobStatus;
use crate::session::Session;
use crate::state::AppState;

#[derive(Deserialize, Default)]
pub struct ApplyRequest {
    pub cover_letter: Option<String>,
}

#[derive(Deserialize)]
pub struct ApplicantsQuery {
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct ApplicantsResponse {
    pub job_id: Uuid,
    pub job_title: String,
    pub counts: StatusCounts,
    pub applications: Vec<ApplicantRow>,
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

#[derive(Deserialize)]
pub struct NotesUpdate {
    pub notes: Option<String>,
}

/// POST /api/v1/jobs/:id/applications
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    session: Session,
    Json(req): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<JobApplicationRow>), AppError> {
    let seeker = session.seeker()?;
    let job = jobs::get_job(&state.db, job_id).await?;
    if job.status != JobStatus::Active.as_str() {
        return Err(AppError::Conflict(
            "This job is no longer accepting applications".to_string(),
        ));
    }

    let cover_letter = req
        .cover_letter
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let row = repository::insert_application(
        &state.db,
        job_id,
        seeker.id,
        seeker.resume_url.as_deref(),
        cover_letter,
    )
    .await?
    .ok_or_else(|| AppError::Conflict("You have already applied to this job".to_string()))?;

    info!("Seeker {} applied to job {job_id}", seeker.id);
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/jobs/:id/applicants
pub async fn handle_list_applicants(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    session: Session,
    Query(query): Query<ApplicantsQuery>,
) -> Result<Json<ApplicantsResponse>, AppError> {
    let employer = session.employer()?;
    let filter = StatusFilter::parse(query.status.as_deref())?;
    let job = jobs::get_owned_job(&state.db, job_id, employer.id).await?;

    let applicants = repository::list_applicants(&state.db, job_id).await?;
    let (counts, applications) = screen(applicants, filter);

    Ok(Json(ApplicantsResponse {
        job_id,
        job_title: job.title,
        counts,
        applications,
    }))
}

/// Loads an application and checks the caller owns the job it was made to.
async fn owned_application(
    state: &AppState,
    session: &Session,
    id: Uuid,
) -> Result<(JobApplicationRow, String), AppError> {
    let employer = session.employer()?;
    let application = repository::get_application(&state.db, id).await?;
    let job = jobs::get_owned_job(&state.db, application.job_id, employer.id).await?;
    Ok((application, job.title))
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
    Json(req): Json<StatusUpdate>,
) -> Result<Json<JobApplicationRow>, AppError> {
    let (application, job_title) = owned_application(&state, &session, id).await?;
    let row = repository::update_status(&state.db, &application, &job_title, req.status).await?;
    Ok(Json(row))
}

/// PATCH /api/v1/applications/:id/notes
pub async fn handle_update_notes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
    Json(req): Json<NotesUpdate>,
) -> Result<Json<JobApplicationRow>, AppError> {
    owned_application(&state, &session, id).await?;
    let row = repository::update_notes(&state.db, id, req.notes.as_deref()).await?;
    Ok(Json(row))
}
