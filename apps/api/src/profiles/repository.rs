use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::credentials::{CertificationRow, EducationRow, Proficiency, UserSkillRow};
use crate::models::job::SkillRow;
use crate::models::profile::{
    EmployerProfile, EmployerProfileUpdate, SeekerProfile, SeekerProfileUpdate,
};
use crate::profiles::completion::SIGNUP_COMPLETION;

pub async fn create_seeker_profile(pool: &PgPool, id: Uuid, full_name: &str) -> Result<SeekerProfile, AppError> {
    let row = sqlx::query_as(
        "INSERT INTO user_profiles (id, full_name, profile_completion) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(id)
    .bind(full_name)
    .bind(SIGNUP_COMPLETION)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn create_employer_profile(
    pool: &PgPool,
    id: Uuid,
    company_name: &str,
) -> Result<EmployerProfile, AppError> {
    let row = sqlx::query_as(
        "INSERT INTO employers (id, company_name, verified) VALUES ($1, $2, FALSE) RETURNING *",
    )
    .bind(id)
    .bind(company_name)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Applies the fields present in `update`; absent fields keep their value.
pub async fn update_seeker_profile(
    pool: &PgPool,
    id: Uuid,
    update: &SeekerProfileUpdate,
) -> Result<SeekerProfile, AppError> {
    let row = sqlx::query_as(
        r#"
        UPDATE user_profiles SET
            full_name = COALESCE($2, full_name),
            phone = COALESCE($3, phone),
            location = COALESCE($4, location),
            preferred_job_type = COALESCE($5, preferred_job_type),
            preferred_shift = COALESCE($6, preferred_shift),
            years_experience = COALESCE($7, years_experience),
            bio = COALESCE($8, bio),
            resume_url = COALESCE($9, resume_url),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&update.full_name)
    .bind(&update.phone)
    .bind(&update.location)
    .bind(&update.preferred_job_type)
    .bind(&update.preferred_shift)
    .bind(update.years_experience)
    .bind(&update.bio)
    .bind(&update.resume_url)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn update_employer_profile(
    pool: &PgPool,
    id: Uuid,
    update: &EmployerProfileUpdate,
) -> Result<EmployerProfile, AppError> {
    let row = sqlx::query_as(
        r#"
        UPDATE employers SET
            company_name = COALESCE($2, company_name),
            company_logo = COALESCE($3, company_logo),
            company_size = COALESCE($4, company_size),
            industry_type = COALESCE($5, industry_type),
            website = COALESCE($6, website),
            description = COALESCE($7, description),
            location = COALESCE($8, location),
            contact_email = COALESCE($9, contact_email),
            contact_phone = COALESCE($10, contact_phone),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&update.company_name)
    .bind(&update.company_logo)
    .bind(&update.company_size)
    .bind(&update.industry_type)
    .bind(&update.website)
    .bind(&update.description)
    .bind(&update.location)
    .bind(&update.contact_email)
    .bind(&update.contact_phone)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn set_completion(pool: &PgPool, id: Uuid, percent: i32) -> Result<(), AppError> {
    sqlx::query("UPDATE user_profiles SET profile_completion = $1 WHERE id = $2")
        .bind(percent)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list_skill_catalogue(pool: &PgPool) -> Result<Vec<SkillRow>, AppError> {
    let rows = sqlx::query_as("SELECT * FROM skills ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn list_user_skills(pool: &PgPool, user_id: Uuid) -> Result<Vec<UserSkillRow>, AppError> {
    let rows = sqlx::query_as(
        r#"
        SELECT us.id, us.user_id, us.skill_id, us.proficiency, s.name AS skill_name, us.created_at
        FROM user_skills us
        JOIN skills s ON s.id = us.skill_id
        WHERE us.user_id = $1
        ORDER BY s.name
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn list_education(pool: &PgPool, user_id: Uuid) -> Result<Vec<EducationRow>, AppError> {
    let rows = sqlx::query_as(
        "SELECT * FROM education WHERE user_id = $1 ORDER BY year_completed DESC NULLS LAST",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn list_certifications(pool: &PgPool, user_id: Uuid) -> Result<Vec<CertificationRow>, AppError> {
    let rows = sqlx::query_as(
        "SELECT * FROM certifications WHERE user_id = $1 ORDER BY issue_date DESC NULLS LAST",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Adds a skill, or updates the proficiency if the seeker already lists it.
pub async fn add_user_skill(
    pool: &PgPool,
    user_id: Uuid,
    skill_id: Uuid,
    proficiency: Proficiency,
) -> Result<(), AppError> {
    let known: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM skills WHERE id = $1)")
        .bind(skill_id)
        .fetch_one(pool)
        .await?;
    if !known {
        return Err(AppError::NotFound(format!("Skill {skill_id} not found")));
    }

    sqlx::query(
        r#"
        INSERT INTO user_skills (user_id, skill_id, proficiency) VALUES ($1, $2, $3)
        ON CONFLICT (user_id, skill_id) DO UPDATE SET proficiency = EXCLUDED.proficiency
        "#,
    )
    .bind(user_id)
    .bind(skill_id)
    .bind(proficiency.as_str())
    .execute(pool)
    .await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct NewEducation {
    pub degree: String,
    pub field: String,
    pub institution: String,
    pub year_completed: Option<i32>,
}

pub async fn add_education(pool: &PgPool, user_id: Uuid, entry: &NewEducation) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO education (user_id, degree, field, institution, year_completed) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user_id)
    .bind(&entry.degree)
    .bind(&entry.field)
    .bind(&entry.institution)
    .bind(entry.year_completed)
    .execute(pool)
    .await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct NewCertification {
    pub name: String,
    pub issuing_organization: String,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub credential_id: Option<String>,
}

pub async fn add_certification(pool: &PgPool, user_id: Uuid, entry: &NewCertification) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO certifications
            (user_id, name, issuing_organization, issue_date, expiry_date, credential_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(user_id)
    .bind(&entry.name)
    .bind(&entry.issuing_organization)
    .bind(entry.issue_date)
    .bind(entry.expiry_date)
    .bind(&entry.credential_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Tables a seeker may delete their own rows from.
#[derive(Debug, Clone, Copy)]
pub enum CredentialTable {
    UserSkills,
    Education,
    Certifications,
}

impl CredentialTable {
    fn name(&self) -> &'static str {
        match self {
            CredentialTable::UserSkills => "user_skills",
            CredentialTable::Education => "education",
            CredentialTable::Certifications => "certifications",
        }
    }
}

/// Deletes one of the seeker's own rows. Rows of other users are not found.
pub async fn remove_credential(
    pool: &PgPool,
    table: CredentialTable,
    user_id: Uuid,
    id: Uuid,
) -> Result<(), AppError> {
    let sql = format!("DELETE FROM {} WHERE id = $1 AND user_id = $2", table.name());
    let result = sqlx::query(&sql)
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Entry {id} not found")));
    }
    Ok(())
}
