//! Validation for new job postings.

use serde::Deserialize;

use crate::errors::AppError;

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_JOB_TYPE: &str = "full-time";

#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub industry_category: String,
    pub job_role: Option<String>,
    #[serde(default)]
    pub location: String,
    pub job_type: Option<String>,
    pub shift_type: Option<String>,
    #[serde(default)]
    pub experience_min: i32,
    pub experience_max: Option<i32>,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub salary_currency: Option<String>,
    #[serde(default)]
    pub is_urgent: bool,
    #[serde(default)]
    pub is_featured: bool,
    /// Skill names; unknown names are added to the catalogue.
    #[serde(default)]
    pub skills: Vec<String>,
}

/// A posting that passed validation, with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedJob {
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
    pub skills: Vec<String>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trims names, drops blanks and keeps the first spelling of each skill.
/// Duplicates are detected ignoring case.
pub fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    let mut out = Vec::new();
    for skill in skills {
        let name = skill.trim();
        if name.is_empty() {
            continue;
        }
        let key = name.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(name.to_string());
    }
    out
}

pub fn validate(job: NewJob) -> Result<ValidatedJob, AppError> {
    let title = job.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Validation("Job title is required".to_string()));
    }
    let description = job.description.trim().to_string();
    if description.is_empty() {
        return Err(AppError::Validation("Job description is required".to_string()));
    }
    if job.experience_min < 0 {
        return Err(AppError::Validation(
            "Minimum experience cannot be negative".to_string(),
        ));
    }
    if let Some(max) = job.experience_max {
        if max < job.experience_min {
            return Err(AppError::Validation(
                "Maximum experience must not be below the minimum".to_string(),
            ));
        }
    }
    if let (Some(min), Some(max)) = (job.salary_min, job.salary_max) {
        if max < min {
            return Err(AppError::Validation(
                "Maximum salary must not be below the minimum".to_string(),
            ));
        }
    }

    Ok(ValidatedJob {
        title,
        description,
        industry_category: job.industry_category.trim().to_string(),
        job_role: trimmed(job.job_role),
        location: job.location.trim().to_string(),
        job_type: trimmed(job.job_type).unwrap_or_else(|| DEFAULT_JOB_TYPE.to_string()),
        shift_type: trimmed(job.shift_type),
        experience_min: job.experience_min,
        experience_max: job.experience_max,
        salary_min: job.salary_min,
        salary_max: job.salary_max,
        salary_currency: trimmed(job.salary_currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        is_urgent: job.is_urgent,
        is_featured: job.is_featured,
        skills: normalize_skills(job.skills),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_job() -> NewJob {
        NewJob {
            title: "  Maintenance Fitter ".to_string(),
            description: "Keep the presses running".to_string(),
            industry_category: "Mechanical".to_string(),
            job_role: None,
            location: "Nashik".to_string(),
            job_type: None,
            shift_type: Some("".to_string()),
            experience_min: 2,
            experience_max: Some(5),
            salary_min: None,
            salary_max: None,
            salary_currency: None,
            is_urgent: false,
            is_featured: false,
            skills: vec![],
        }
    }

    #[test]
    fn test_valid_job_gets_defaults() {
        let job = validate(new_job()).unwrap();
        assert_eq!(job.title, "Maintenance Fitter");
        assert_eq!(job.job_type, DEFAULT_JOB_TYPE);
        assert_eq!(job.salary_currency, DEFAULT_CURRENCY);
        assert_eq!(job.shift_type, None);
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let job = NewJob {
            title: "   ".to_string(),
            ..new_job()
        };
        assert!(matches!(validate(job), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_inverted_experience_range_is_rejected() {
        let job = NewJob {
            experience_min: 6,
            experience_max: Some(3),
            ..new_job()
        };
        assert!(matches!(validate(job), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_inverted_salary_range_is_rejected() {
        let job = NewJob {
            salary_min: Some(50_000),
            salary_max: Some(20_000),
            ..new_job()
        };
        assert!(matches!(validate(job), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_skills_are_trimmed_and_deduplicated() {
        let skills = vec![
            " Welding ".to_string(),
            "welding".to_string(),
            "".to_string(),
            "AutoCAD".to_string(),
        ];
        assert_eq!(normalize_skills(skills), vec!["Welding", "AutoCAD"]);
    }
}
