//! Page Registry: the fixed mapping between pages and URL paths.
//!
//! Job-bearing pages carry the job id in the path, so a reload keeps it.

use tracing::warn;
use uuid::Uuid;

use crate::shell::page::{Page, PageParams, PageState};

/// Pages whose path has no variable segment.
const STATIC_ROUTES: &[(Page, &str)] = &[
    (Page::Landing, "/"),
    (Page::Login, "/login"),
    (Page::Signup, "/signup"),
    (Page::ForgotPassword, "/forgot-password"),
    (Page::Dashboard, "/dashboard"),
    (Page::Profile, "/profile"),
    (Page::Notifications, "/notifications"),
    (Page::Jobs, "/jobs"),
    (Page::EmployerDashboard, "/employer"),
    (Page::PostJob, "/employer/jobs/new"),
];

fn static_path(page: Page) -> Option<&'static str> {
    STATIC_ROUTES
        .iter()
        .find(|(p, _)| *p == page)
        .map(|(_, path)| *path)
}

/// The URL path for a page state.
///
/// A job page without a job id is a caller bug; the path degrades to the
/// matching list page so the URL stays loadable.
pub fn page_to_path(state: &PageState) -> String {
    match (state.page, state.params.job_id) {
        (Page::JobDetail, Some(id)) => format!("/jobs/{id}"),
        (Page::Applicants, Some(id)) => format!("/employer/jobs/{id}/applicants"),
        (Page::JobDetail, None) => {
            warn!("job-detail requested without a job id");
            "/jobs".to_string()
        }
        (Page::Applicants, None) => {
            warn!("applicants requested without a job id");
            "/employer".to_string()
        }
        (page, _) => static_path(page).unwrap_or("/").to_string(),
    }
}

/// The page state a URL path names, or `None` for paths outside the table.
/// Query strings, fragments and trailing slashes are ignored.
pub fn path_to_page(path: &str) -> Option<PageState> {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');
    let path = if path.is_empty() { "/" } else { path };

    if let Some((page, _)) = STATIC_ROUTES.iter().find(|(_, p)| *p == path) {
        return Some(PageState::new(*page, PageParams::default()));
    }

    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    match segments.as_slice() {
        ["jobs", id] => parse_job_id(id).map(|id| PageState::new(Page::JobDetail, PageParams::job(id))),
        ["employer", "jobs", id, "applicants"] => {
            parse_job_id(id).map(|id| PageState::new(Page::Applicants, PageParams::job(id)))
        }
        _ => None,
    }
}

fn parse_job_id(segment: &str) -> Option<Uuid> {
    Uuid::parse_str(segment).ok()
}
