//! Job Search Filter: narrows an in-memory job list. Pure and order-preserving.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::JobRow;

/// All criteria are optional; an absent criterion imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Case-insensitive substring of title or description.
    pub text: Option<String>,
    /// Case-insensitive substring of location.
    pub location: Option<String>,
    pub industry: Option<String>,
    pub job_type: Option<String>,
    pub shift_type: Option<String>,
    pub experience_min: Option<i32>,
    pub experience_max: Option<i32>,
}

/// Raw search form values as they arrive in the query string. Empty strings
/// mean "not set".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub job_type: Option<String>,
    pub shift_type: Option<String>,
    pub experience_min: Option<String>,
    pub experience_max: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_years(field: &str, value: Option<String>) -> Result<Option<i32>, AppError> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{field} must be a whole number of years"))),
    }
}

impl TryFrom<SearchQuery> for SearchCriteria {
    type Error = AppError;

    fn try_from(query: SearchQuery) -> Result<Self, Self::Error> {
        Ok(SearchCriteria {
            text: non_empty(query.q),
            location: non_empty(query.location),
            industry: non_empty(query.industry),
            job_type: non_empty(query.job_type),
            shift_type: non_empty(query.shift_type),
            experience_min: parse_years("experience_min", query.experience_min)?,
            experience_max: parse_years("experience_max", query.experience_max)?,
        })
    }
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        *self == SearchCriteria::default()
    }

    /// Every active criterion must hold.
    pub fn matches(&self, job: &JobRow) -> bool {
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            if !contains_ignore_case(&job.title, &needle) && !contains_ignore_case(&job.description, &needle) {
                return false;
            }
        }

        if let Some(location) = &self.location {
            if !contains_ignore_case(&job.location, &location.to_lowercase()) {
                return false;
            }
        }

        if let Some(industry) = &self.industry {
            if job.industry_category != *industry {
                return false;
            }
        }

        if let Some(job_type) = &self.job_type {
            if job.job_type != *job_type {
                return false;
            }
        }

        if let Some(shift_type) = &self.shift_type {
            if job.shift_type.as_deref() != Some(shift_type.as_str()) {
                return false;
            }
        }

        if let Some(min) = self.experience_min {
            if job.experience_min < min {
                return false;
            }
        }

        // A job without an upper bound counts as 0 and so stays in.
        if let Some(max) = self.experience_max {
            if job.experience_max.unwrap_or(0) > max {
                return false;
            }
        }

        true
    }
}

/// Keeps the jobs matching `criteria`, in input order.
pub fn filter_jobs<T: AsRef<JobRow>>(jobs: Vec<T>, criteria: &SearchCriteria) -> Vec<T> {
    if criteria.is_empty() {
        return jobs;
    }
    jobs.into_iter()
        .filter(|job| criteria.matches(job.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::fixtures::job;

    fn with_industry(title: &str, industry: &str) -> JobRow {
        JobRow {
            industry_category: industry.to_string(),
            ..job(title)
        }
    }

    fn titles(jobs: &[JobRow]) -> Vec<&str> {
        jobs.iter().map(|j| j.title.as_str()).collect()
    }

    #[test]
    fn test_no_criteria_returns_input_unchanged() {
        let jobs = vec![job("Welder"), job("Fitter"), job("Electrician")];
        let result = filter_jobs(jobs.clone(), &SearchCriteria::default());
        assert_eq!(result, jobs);
    }

    #[test]
    fn test_industry_is_exact_match() {
        let jobs = vec![
            with_industry("Press Operator", "Manufacturing"),
            with_industry("Lineman", "Electrical"),
        ];
        let criteria = SearchCriteria {
            industry: Some("Manufacturing".to_string()),
            ..Default::default()
        };
        let result = filter_jobs(jobs, &criteria);
        assert_eq!(titles(&result), vec!["Press Operator"]);

        let partial = SearchCriteria {
            industry: Some("Manufact".to_string()),
            ..Default::default()
        };
        assert!(filter_jobs(vec![with_industry("x", "Manufacturing")], &partial).is_empty());
    }

    #[test]
    fn test_experience_min() {
        let jobs = vec![
            JobRow { experience_min: 3, ..job("Junior") },
            JobRow { experience_min: 7, ..job("Senior") },
        ];
        let criteria = SearchCriteria {
            experience_min: Some(5),
            ..Default::default()
        };
        assert_eq!(titles(&filter_jobs(jobs, &criteria)), vec!["Senior"]);
    }

    #[test]
    fn test_experience_max_keeps_open_ended_jobs() {
        let jobs = vec![
            JobRow { experience_max: Some(4), ..job("Bounded") },
            JobRow { experience_max: Some(10), ..job("Too senior") },
            JobRow { experience_max: None, ..job("Open ended") },
        ];
        let criteria = SearchCriteria {
            experience_max: Some(5),
            ..Default::default()
        };
        assert_eq!(
            titles(&filter_jobs(jobs, &criteria)),
            vec!["Bounded", "Open ended"]
        );
    }

    #[test]
    fn test_negative_experience_max_drops_open_ended_jobs() {
        let jobs = vec![JobRow { experience_max: None, ..job("Open ended") }];
        let criteria = SearchCriteria {
            experience_max: Some(-1),
            ..Default::default()
        };
        assert!(filter_jobs(jobs, &criteria).is_empty());
    }

    #[test]
    fn test_criteria_are_conjunctive() {
        let jobs = vec![
            JobRow { job_type: "full-time".to_string(), ..with_industry("Both", "Manufacturing") },
            JobRow { job_type: "contract".to_string(), ..with_industry("Industry only", "Manufacturing") },
            JobRow { job_type: "full-time".to_string(), ..with_industry("Type only", "Civil") },
        ];
        let criteria = SearchCriteria {
            industry: Some("Manufacturing".to_string()),
            job_type: Some("full-time".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&filter_jobs(jobs, &criteria)), vec!["Both"]);
    }

    #[test]
    fn test_text_matches_title_or_description_ignoring_case() {
        let jobs = vec![
            job("CNC Machinist"),
            JobRow { description: "Operate cnc lathes".to_string(), ..job("Operator") },
            job("Painter"),
        ];
        let criteria = SearchCriteria {
            text: Some("CnC".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&filter_jobs(jobs, &criteria)), vec!["CNC Machinist", "Operator"]);
    }

    #[test]
    fn test_location_substring_ignoring_case() {
        let jobs = vec![
            JobRow { location: "Chennai, Tamil Nadu".to_string(), ..job("A") },
            JobRow { location: "Pune, Maharashtra".to_string(), ..job("B") },
        ];
        let criteria = SearchCriteria {
            location: Some("chennai".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&filter_jobs(jobs, &criteria)), vec!["A"]);
    }

    #[test]
    fn test_shift_type_requires_a_value() {
        let jobs = vec![
            JobRow { shift_type: Some("night".to_string()), ..job("Night") },
            JobRow { shift_type: None, ..job("Unspecified") },
        ];
        let criteria = SearchCriteria {
            shift_type: Some("night".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&filter_jobs(jobs, &criteria)), vec!["Night"]);
    }

    #[test]
    fn test_query_with_empty_strings_is_empty_criteria() {
        let query = SearchQuery {
            q: Some(String::new()),
            industry: Some(String::new()),
            experience_min: Some(String::new()),
            ..Default::default()
        };
        let criteria = SearchCriteria::try_from(query).unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_query_with_non_numeric_years_is_rejected() {
        let query = SearchQuery {
            experience_max: Some("ten".to_string()),
            ..Default::default()
        };
        assert!(matches!(SearchCriteria::try_from(query), Err(AppError::Validation(_))));
    }
}
