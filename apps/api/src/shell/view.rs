//! View Composition: picks the concrete view for a page state.

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::models::profile::Role;
use crate::shell::guard::AuthState;
use crate::shell::page::{Page, PageState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Landing,
    Login,
    Signup,
    ForgotPassword,
    SeekerDashboard,
    EmployerDashboard,
    Profile,
    Notifications,
    JobSearch,
    JobDetail,
    PostJob,
    Applicants,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum NavTarget {
    Page(Page),
    SignOut,
}

/// One entry of the header menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub target: NavTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewDescriptor {
    pub view: View,
    pub job_id: Option<Uuid>,
    /// Header and footer are hidden on the sign-in and sign-up screens.
    pub show_chrome: bool,
    pub nav: Vec<NavLink>,
    /// API endpoint the view loads its data from, if any.
    pub data_endpoint: Option<String>,
}

/// Maps a page state to its view. `dashboard` is the one page whose view
/// depends on the role; job pages without a job id fall back to landing.
pub fn compose(state: &PageState, auth: AuthState) -> ViewDescriptor {
    let job_id = state.params.job_id;
    let view = match (state.page, job_id) {
        (Page::Landing, _) => View::Landing,
        (Page::Login, _) => View::Login,
        (Page::Signup, _) => View::Signup,
        (Page::ForgotPassword, _) => View::ForgotPassword,
        (Page::Dashboard, _) if auth.role() == Some(Role::Employer) => View::EmployerDashboard,
        (Page::Dashboard, _) => View::SeekerDashboard,
        (Page::EmployerDashboard, _) => View::EmployerDashboard,
        (Page::Profile, _) => View::Profile,
        (Page::Notifications, _) => View::Notifications,
        (Page::Jobs, _) => View::JobSearch,
        (Page::PostJob, _) => View::PostJob,
        (Page::JobDetail, Some(_)) => View::JobDetail,
        (Page::Applicants, Some(_)) => View::Applicants,
        (page @ (Page::JobDetail | Page::Applicants), None) => {
            warn!("{} has no job id; showing landing", page.as_str());
            View::Landing
        }
    };
    let job_id = match view {
        View::JobDetail | View::Applicants => job_id,
        _ => None,
    };

    ViewDescriptor {
        view,
        job_id,
        show_chrome: !matches!(view, View::Login | View::Signup),
        nav: header_links(auth),
        data_endpoint: data_endpoint(view, job_id),
    }
}

/// Header menu for the caller: browse and sign-in links when anonymous,
/// dashboard/notifications/profile/sign-out once signed in.
pub fn header_links(auth: AuthState) -> Vec<NavLink> {
    let link = |label: &'static str, page: Page| NavLink {
        label,
        target: NavTarget::Page(page),
    };
    match auth {
        AuthState::Anonymous => vec![
            link("Find Jobs", Page::Jobs),
            link("Sign In", Page::Login),
            link("Get Started", Page::Signup),
        ],
        AuthState::Authenticated(role) => {
            let dashboard = match role {
                Role::Seeker => Page::Dashboard,
                Role::Employer => Page::EmployerDashboard,
            };
            vec![
                link("Jobs", Page::Jobs),
                link("Dashboard", dashboard),
                link("Notifications", Page::Notifications),
                link("Profile", Page::Profile),
                NavLink {
                    label: "Sign Out",
                    target: NavTarget::SignOut,
                },
            ]
        }
    }
}

fn data_endpoint(view: View, job_id: Option<Uuid>) -> Option<String> {
    match (view, job_id) {
        (View::SeekerDashboard | View::EmployerDashboard, _) => Some("/api/v1/dashboard".to_string()),
        (View::Profile, _) => Some("/api/v1/profile".to_string()),
        (View::Notifications, _) => Some("/api/v1/notifications".to_string()),
        (View::JobSearch, _) => Some("/api/v1/jobs".to_string()),
        (View::PostJob, _) => Some("/api/v1/skills".to_string()),
        (View::JobDetail, Some(id)) => Some(format!("/api/v1/jobs/{id}")),
        (View::Applicants, Some(id)) => Some(format!("/api/v1/jobs/{id}/applicants")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::page::PageParams;

    fn state(page: Page) -> PageState {
        PageState::new(page, PageParams::default())
    }

    #[test]
    fn test_dashboard_depends_on_role() {
        let employer = compose(&state(Page::Dashboard), AuthState::Authenticated(Role::Employer));
        let seeker = compose(&state(Page::Dashboard), AuthState::Authenticated(Role::Seeker));
        assert_eq!(employer.view, View::EmployerDashboard);
        assert_eq!(seeker.view, View::SeekerDashboard);
    }

    #[test]
    fn test_job_detail_carries_id_and_endpoint() {
        let id = Uuid::new_v4();
        let descriptor = compose(
            &PageState::new(Page::JobDetail, PageParams::job(id)),
            AuthState::Anonymous,
        );
        assert_eq!(descriptor.view, View::JobDetail);
        assert_eq!(descriptor.job_id, Some(id));
        assert_eq!(descriptor.data_endpoint, Some(format!("/api/v1/jobs/{id}")));
    }

    #[test]
    fn test_job_page_without_id_falls_back_to_landing() {
        let descriptor = compose(&state(Page::Applicants), AuthState::Authenticated(Role::Employer));
        assert_eq!(descriptor.view, View::Landing);
        assert_eq!(descriptor.job_id, None);
        assert_eq!(descriptor.data_endpoint, None);
    }

    #[test]
    fn test_chrome_hidden_on_login_and_signup_only() {
        for page in Page::ALL {
            let descriptor = compose(&state(page), AuthState::Anonymous);
            let hidden = matches!(page, Page::Login | Page::Signup);
            assert_eq!(descriptor.show_chrome, !hidden, "{page:?}");
        }
    }

    #[test]
    fn test_header_dashboard_link_follows_role() {
        let links = header_links(AuthState::Authenticated(Role::Employer));
        assert!(links.contains(&NavLink {
            label: "Dashboard",
            target: NavTarget::Page(Page::EmployerDashboard),
        }));
        assert_eq!(links.last().map(|l| l.target), Some(NavTarget::SignOut));
    }

    #[test]
    fn test_anonymous_header_offers_sign_in() {
        let links = header_links(AuthState::Anonymous);
        assert_eq!(links.len(), 3);
        assert!(links.iter().all(|l| l.target != NavTarget::SignOut));
    }
}
