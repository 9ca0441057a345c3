use serde::Serialize;

use crate::models::application::ApplicationStatus;
use crate::models::job::{JobRow, JobStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmployerStats {
    pub total_jobs: usize,
    pub active_jobs: usize,
    pub total_applications: usize,
    pub shortlisted: usize,
}

impl EmployerStats {
    /// `application_statuses` holds one entry per application across all of
    /// the employer's jobs.
    pub fn compute(jobs: &[JobRow], application_statuses: &[String]) -> Self {
        EmployerStats {
            total_jobs: jobs.len(),
            active_jobs: jobs
                .iter()
                .filter(|j| j.status == JobStatus::Active.as_str())
                .count(),
            total_applications: application_statuses.len(),
            shortlisted: count_status(application_statuses, ApplicationStatus::Shortlisted),
        }
    }
}

pub fn count_status(statuses: &[String], status: ApplicationStatus) -> usize {
    statuses.iter().filter(|s| *s == status.as_str()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::fixtures::job;

    fn with_status(title: &str, status: JobStatus) -> JobRow {
        let mut row = job(title);
        row.status = status.as_str().to_string();
        row
    }

    #[test]
    fn test_empty_employer_has_zero_stats() {
        assert_eq!(EmployerStats::compute(&[], &[]), EmployerStats::default());
    }

    #[test]
    fn test_counts_active_jobs_and_shortlisted_applications() {
        let jobs = vec![
            with_status("Cook", JobStatus::Active),
            with_status("Driver", JobStatus::Paused),
            with_status("Cashier", JobStatus::Active),
            with_status("Guard", JobStatus::Closed),
        ];
        let statuses: Vec<String> = ["applied", "shortlisted", "viewed", "shortlisted", "rejected"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let stats = EmployerStats::compute(&jobs, &statuses);
        assert_eq!(stats.total_jobs, 4);
        assert_eq!(stats.active_jobs, 2);
        assert_eq!(stats.total_applications, 5);
        assert_eq!(stats.shortlisted, 2);
    }

    #[test]
    fn test_count_status_ignores_unknown_values() {
        let statuses = vec!["hired".to_string(), "applied".to_string()];
        assert_eq!(count_status(&statuses, ApplicationStatus::Applied), 1);
        assert_eq!(count_status(&statuses, ApplicationStatus::Rejected), 0);
    }
}
