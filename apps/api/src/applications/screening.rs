//! Applicant screening helpers: status tabs and their counts.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::application::{ApplicantRow, ApplicationStatus};

/// The tab an employer is looking at: everything, or one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ApplicationStatus),
}

impl StatusFilter {
    pub fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value {
            None | Some("") | Some("all") => Ok(StatusFilter::All),
            Some(other) => other
                .parse::<ApplicationStatus>()
                .map(StatusFilter::Only)
                .map_err(AppError::Validation),
        }
    }

    pub fn admits(&self, status: &str) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted.as_str() == status,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub all: usize,
    pub applied: usize,
    pub viewed: usize,
    pub shortlisted: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts = StatusCounts::default();
        for status in statuses {
            counts.all += 1;
            match status.parse::<ApplicationStatus>() {
                Ok(ApplicationStatus::Applied) => counts.applied += 1,
                Ok(ApplicationStatus::Viewed) => counts.viewed += 1,
                Ok(ApplicationStatus::Shortlisted) => counts.shortlisted += 1,
                Ok(ApplicationStatus::Rejected) => counts.rejected += 1,
                Err(_) => {}
            }
        }
        counts
    }
}

/// Counts every applicant, then keeps the ones on the selected tab.
pub fn screen(applicants: Vec<ApplicantRow>, filter: StatusFilter) -> (StatusCounts, Vec<ApplicantRow>) {
    let counts = StatusCounts::tally(applicants.iter().map(|a| a.application.status.as_str()));
    let shown = applicants
        .into_iter()
        .filter(|a| filter.admits(&a.application.status))
        .collect();
    (counts, shown)
}
