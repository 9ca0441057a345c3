use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Landing,
    Login,
    Signup,
    ForgotPassword,
    Dashboard,
    Profile,
    Notifications,
    Jobs,
    JobDetail,
    EmployerDashboard,
    PostJob,
    Applicants,
}

impl Page {
    pub const ALL: [Page; 12] = [
        Page::Landing,
        Page::Login,
        Page::Signup,
        Page::ForgotPassword,
        Page::Dashboard,
        Page::Profile,
        Page::Notifications,
        Page::Jobs,
        Page::JobDetail,
        Page::EmployerDashboard,
        Page::PostJob,
        Page::Applicants,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Landing => "landing",
            Page::Login => "login",
            Page::Signup => "signup",
            Page::ForgotPassword => "forgot-password",
            Page::Dashboard => "dashboard",
            Page::Profile => "profile",
            Page::Notifications => "notifications",
            Page::Jobs => "jobs",
            Page::JobDetail => "job-detail",
            Page::EmployerDashboard => "employer-dashboard",
            Page::PostJob => "post-job",
            Page::Applicants => "applicants",
        }
    }

    /// Parses a page identifier. Unknown identifiers yield `None`.
    pub fn parse(s: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|p| p.as_str() == s)
    }

    /// Pages that show one particular job and need its id.
    pub fn takes_job_id(&self) -> bool {
        matches!(self, Page::JobDetail | Page::Applicants)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    pub job_id: Option<Uuid>,
}

impl PageParams {
    pub fn job(job_id: Uuid) -> Self {
        Self {
            job_id: Some(job_id),
        }
    }
}

/// The page currently shown plus its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub page: Page,
    pub params: PageParams,
}

impl PageState {
    /// Builds a state, dropping a job id the page has no use for.
    pub fn new(page: Page, params: PageParams) -> Self {
        let params = if page.takes_job_id() {
            params
        } else {
            PageParams::default()
        };
        Self { page, params }
    }

    pub fn landing() -> Self {
        Self::new(Page::Landing, PageParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_parses_from_its_identifier() {
        for page in Page::ALL {
            assert_eq!(Page::parse(page.as_str()), Some(page));
        }
    }

    #[test]
    fn test_unknown_identifier_does_not_parse() {
        assert_eq!(Page::parse("settings"), None);
        assert_eq!(Page::parse(""), None);
    }

    #[test]
    fn test_serde_uses_kebab_case_identifiers() {
        let json = serde_json::to_string(&Page::EmployerDashboard).unwrap();
        assert_eq!(json, "\"employer-dashboard\"");
    }

    #[test]
    fn test_job_id_only_kept_for_job_pages() {
        let id = Uuid::new_v4();
        assert_eq!(PageState::new(Page::Jobs, PageParams::job(id)).params.job_id, None);
        assert_eq!(
            PageState::new(Page::JobDetail, PageParams::job(id)).params.job_id,
            Some(id)
        );
    }
}
