//! Authorization Guard: the policy every navigation passes through.

use serde::{Deserialize, Serialize};

use crate::models::profile::Role;
use crate::shell::page::Page;

/// What the guard knows about the caller. An authenticated identity always has
/// a role here; identities without a profile are rejected before navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "role", rename_all = "snake_case")]
pub enum AuthState {
    Anonymous,
    Authenticated(Role),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated(role) => Some(*role),
        }
    }
}

/// Pages reachable without signing in.
const PUBLIC_PAGES: &[Page] = &[
    Page::Landing,
    Page::Login,
    Page::Signup,
    Page::ForgotPassword,
    Page::Jobs,
    Page::JobDetail,
];

/// Pages only employers may open.
const EMPLOYER_PAGES: &[Page] = &[Page::EmployerDashboard, Page::PostJob, Page::Applicants];

pub fn is_public(page: Page) -> bool {
    PUBLIC_PAGES.contains(&page)
}

pub fn is_employer_only(page: Page) -> bool {
    EMPLOYER_PAGES.contains(&page)
}

/// Returns the page the caller actually gets when asking for `requested`.
///
/// 1. anonymous + non-public page -> login
/// 2. employer-only page + not an employer -> dashboard
/// 3. otherwise the requested page
pub fn guard(requested: Page, auth: AuthState) -> Page {
    if !auth.is_authenticated() && !is_public(requested) {
        return Page::Login;
    }
    if is_employer_only(requested) && auth.role() != Some(Role::Employer) {
        return Page::Dashboard;
    }
    requested
}
