use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Active,
    Paused,
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Paused => "paused",
            JobStatus::Closed => "closed",
        }
    }

    /// The status an employer's pause/activate switch moves to.
    /// Anything that is not active becomes active again.
    pub fn toggled(self) -> JobStatus {
        match self {
            JobStatus::Active => JobStatus::Paused,
            JobStatus::Paused | JobStatus::Closed => JobStatus::Active,
        }
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(JobStatus::Active),
            "paused" => Ok(JobStatus::Paused),
            "closed" => Ok(JobStatus::Closed),
            other => Err(format!("unknown job status '{other}'")),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of `jobs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub title: String,
    pub description: String,
    pub industry_category: String,
    pub job_role: Option<String>,
    pub location: String,
    pub job_type: String,
    pub shift_type: Option<String>,
    pub experience_min: i32,
    pub experience_max: Option<i32>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub salary_currency: String,
    pub is_urgent: bool,
    pub is_featured: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AsRef<JobRow> for JobRow {
    fn as_ref(&self) -> &JobRow {
        self
    }
}

/// A job joined with the posting company's summary, as shown in search results.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub job: JobRow,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub company_location: Option<String>,
}

impl AsRef<JobRow> for JobListing {
    fn as_ref(&self) -> &JobRow {
        &self.job
    }
}

/// Row of `skills`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// A skill attached to a job through `job_skills`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobSkillView {
    pub skill_id: Uuid,
    pub name: String,
    pub required: bool,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_pauses_active_job() {
        assert_eq!(JobStatus::Active.toggled(), JobStatus::Paused);
    }

    #[test]
    fn test_toggle_reactivates_paused_and_closed_jobs() {
        assert_eq!(JobStatus::Paused.toggled(), JobStatus::Active);
        assert_eq!(JobStatus::Closed.toggled(), JobStatus::Active);
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert_eq!("paused".parse::<JobStatus>(), Ok(JobStatus::Paused));
        assert!("archived".parse::<JobStatus>().is_err());
    }
}
