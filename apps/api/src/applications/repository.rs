use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{
    ApplicantRow, ApplicationStatus, ApplicationSummary, JobApplicationRow,
};

/// Inserts an application unless the seeker already applied to the job.
/// Returns `None` for a duplicate.
pub async fn insert_application(
    pool: &PgPool,
    job_id: Uuid,
    user_id: Uuid,
    resume_url: Option<&str>,
    cover_letter: Option<&str>,
) -> Result<Option<JobApplicationRow>, AppError> {
    let row = sqlx::query_as(
        r#"
        INSERT INTO job_applications (job_id, user_id, resume_url, cover_letter, status)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (job_id, user_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(job_id)
    .bind(user_id)
    .bind(resume_url)
    .bind(cover_letter)
    .bind(ApplicationStatus::Applied.as_str())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn get_application(pool: &PgPool, id: Uuid) -> Result<JobApplicationRow, AppError> {
    sqlx::query_as("SELECT * FROM job_applications WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))
}

/// Applications to a job, newest first, with applicant profile and skills.
pub async fn list_applicants(pool: &PgPool, job_id: Uuid) -> Result<Vec<ApplicantRow>, AppError> {
    let rows = sqlx::query_as(
        r#"
        SELECT a.*,
               p.full_name, p.phone, p.location, p.years_experience, p.bio,
               ARRAY(
                   SELECT s.name FROM user_skills us
                   JOIN skills s ON s.id = us.skill_id
                   WHERE us.user_id = a.user_id
                   ORDER BY s.name
               ) AS skills
        FROM job_applications a
        LEFT JOIN user_profiles p ON p.id = a.user_id
        WHERE a.job_id = $1
        ORDER BY a.created_at DESC
        "#,
    )
    .bind(job_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Changes the status and tells the seeker about it, atomically.
pub async fn update_status(
    pool: &PgPool,
    application: &JobApplicationRow,
    job_title: &str,
    status: ApplicationStatus,
) -> Result<JobApplicationRow, AppError> {
    let mut tx = pool.begin().await?;

    let row: JobApplicationRow = sqlx::query_as(
        "UPDATE job_applications SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(status.as_str())
    .bind(application.id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO notifications (user_id, type, title, message, link)
        VALUES ($1, 'application_status', $2, $3, $4)
        "#,
    )
    .bind(application.user_id)
    .bind("Application update")
    .bind(format!("Your application for {job_title} is now {status}"))
    .bind(format!("/jobs/{}", application.job_id))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    info!("Application {} moved to {status}", application.id);
    Ok(row)
}

pub async fn update_notes(pool: &PgPool, id: Uuid, notes: Option<&str>) -> Result<JobApplicationRow, AppError> {
    let row = sqlx::query_as(
        "UPDATE job_applications SET employer_notes = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(notes)
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// A seeker's own applications, newest first.
pub async fn list_seeker_applications(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<ApplicationSummary>, AppError> {
    let rows = sqlx::query_as(
        r#"
        SELECT a.id, a.job_id, a.status, a.created_at,
               j.title AS job_title, e.company_name
        FROM job_applications a
        JOIN jobs j ON j.id = a.job_id
        LEFT JOIN employers e ON e.id = j.employer_id
        WHERE a.user_id = $1
        ORDER BY a.created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Statuses of every application to any of the employer's jobs.
pub async fn employer_application_statuses(pool: &PgPool, employer_id: Uuid) -> Result<Vec<String>, AppError> {
    let statuses = sqlx::query_scalar(
        r#"
        SELECT a.status
        FROM job_applications a
        JOIN jobs j ON j.id = a.job_id
        WHERE j.employer_id = $1
        "#,
    )
    .bind(employer_id)
    .fetch_all(pool)
    .await?;
    Ok(statuses)
}

pub async fn count_seeker_applications(
    pool: &PgPool,
    user_id: Uuid,
    status: ApplicationStatus,
) -> Result<i64, AppError> {
    let count = sqlx::query_scalar(
        "SELECT COUNT(*) FROM job_applications WHERE user_id = $1 AND status = $2",
    )
    .bind(user_id)
    .bind(status.as_str())
    .fetch_one(pool)
    .await?;
    Ok(count)
}
