use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::posting::ValidatedJob;
use crate::models::job::{JobListing, JobRow, JobSkillView, JobStatus};

const LISTING_SELECT: &str = r#"
    SELECT j.*, e.company_name, e.company_logo, e.location AS company_location
    FROM jobs j
    LEFT JOIN employers e ON e.id = j.employer_id
"#;

/// Active jobs, newest first, with the posting company's summary.
pub async fn list_active_jobs(pool: &PgPool, limit: Option<i64>) -> Result<Vec<JobListing>, AppError> {
    let sql = format!(
        "{LISTING_SELECT} WHERE j.status = $1 ORDER BY j.created_at DESC LIMIT $2"
    );
    let rows = sqlx::query_as(&sql)
        .bind(JobStatus::Active.as_str())
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_job(pool: &PgPool, job_id: Uuid) -> Result<Option<JobRow>, AppError> {
    let row = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn get_job(pool: &PgPool, job_id: Uuid) -> Result<JobRow, AppError> {
    find_job(pool, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

/// Loads a job and checks that `employer_id` posted it.
pub async fn get_owned_job(pool: &PgPool, job_id: Uuid, employer_id: Uuid) -> Result<JobRow, AppError> {
    let job = get_job(pool, job_id).await?;
    if job.employer_id != employer_id {
        return Err(AppError::Forbidden(
            "This job belongs to another employer".to_string(),
        ));
    }
    Ok(job)
}

pub async fn job_skills(pool: &PgPool, job_id: Uuid) -> Result<Vec<JobSkillView>, AppError> {
    let rows = sqlx::query_as(
        r#"
        SELECT s.id AS skill_id, s.name, js.required
        FROM job_skills js
        JOIN skills s ON s.id = js.skill_id
        WHERE js.job_id = $1
        ORDER BY js.required DESC, s.name
        "#,
    )
    .bind(job_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn has_applied(pool: &PgPool, job_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
    let applied: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM job_applications WHERE job_id = $1 AND user_id = $2)",
    )
    .bind(job_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(applied)
}

/// Catalogue names are unique ignoring case. An existing entry keeps its
/// spelling and its id is returned.
const SKILL_UPSERT: &str = r#"
    INSERT INTO skills (name, category) VALUES ($1, 'technical')
    ON CONFLICT ((lower(name))) DO UPDATE SET name = skills.name
    RETURNING id
"#;

/// Inserts the job, its skills and the job-skill links in one transaction.
/// Nothing is written if any step fails.
pub async fn create_job(pool: &PgPool, employer_id: Uuid, job: &ValidatedJob) -> Result<JobRow, AppError> {
    let mut tx = pool.begin().await?;

    let row: JobRow = sqlx::query_as(
        r#"
        INSERT INTO jobs
            (employer_id, title, description, industry_category, job_role, location,
             job_type, shift_type, experience_min, experience_max, salary_min, salary_max,
             salary_currency, is_urgent, is_featured, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        RETURNING *
        "#,
    )
    .bind(employer_id)
    .bind(&job.title)
    .bind(&job.description)
    .bind(&job.industry_category)
    .bind(&job.job_role)
    .bind(&job.location)
    .bind(&job.job_type)
    .bind(&job.shift_type)
    .bind(job.experience_min)
    .bind(job.experience_max)
    .bind(job.salary_min)
    .bind(job.salary_max)
    .bind(&job.salary_currency)
    .bind(job.is_urgent)
    .bind(job.is_featured)
    .bind(JobStatus::Active.as_str())
    .fetch_one(&mut *tx)
    .await?;

    for name in &job.skills {
        let skill_id: Uuid = sqlx::query_scalar(SKILL_UPSERT)
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO job_skills (job_id, skill_id, required) VALUES ($1, $2, TRUE) ON CONFLICT DO NOTHING",
        )
        .bind(row.id)
        .bind(skill_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!(
        "Employer {employer_id} posted job {} with {} skills",
        row.id,
        job.skills.len()
    );
    Ok(row)
}

pub async fn set_job_status(pool: &PgPool, job_id: Uuid, status: JobStatus) -> Result<JobRow, AppError> {
    let row = sqlx::query_as(
        "UPDATE jobs SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(status.as_str())
    .bind(job_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn delete_job(pool: &PgPool, job_id: Uuid) -> Result<(), AppError> {
    sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(job_id)
        .execute(pool)
        .await?;
    info!("Deleted job {job_id}");
    Ok(())
}

/// All jobs an employer posted, newest first.
pub async fn list_employer_jobs(pool: &PgPool, employer_id: Uuid) -> Result<Vec<JobRow>, AppError> {
    let rows = sqlx::query_as("SELECT * FROM jobs WHERE employer_id = $1 ORDER BY created_at DESC")
        .bind(employer_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
