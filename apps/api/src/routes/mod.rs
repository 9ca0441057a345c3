pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::auth::handlers as auth;
use crate::dashboard::handlers as dashboard;
use crate::jobs::handlers as jobs;
use crate::notifications::handlers as notifications;
use crate::profiles::handlers as profiles;
use crate::shell::handlers as shell;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/v1/auth/signup", post(auth::handle_sign_up))
        .route("/api/v1/auth/signin", post(auth::handle_sign_in))
        .route("/api/v1/auth/refresh", post(auth::handle_refresh))
        .route("/api/v1/auth/signout", post(auth::handle_sign_out))
        .route(
            "/api/v1/auth/password-reset",
            post(auth::handle_password_reset),
        )
        // Shell navigation
        .route("/api/v1/shell/navigate", post(shell::handle_navigate))
        .route("/api/v1/shell/location", get(shell::handle_location))
        // Jobs
        .route(
            "/api/v1/jobs",
            get(jobs::handle_search_jobs).post(jobs::handle_post_job),
        )
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job).delete(jobs::handle_delete_job),
        )
        .route(
            "/api/v1/jobs/:id/toggle-status",
            post(jobs::handle_toggle_job_status),
        )
        // Applications
        .route(
            "/api/v1/jobs/:id/applications",
            post(applications::handle_apply),
        )
        .route(
            "/api/v1/jobs/:id/applicants",
            get(applications::handle_list_applicants),
        )
        .route(
            "/api/v1/applications/:id/status",
            patch(applications::handle_update_status),
        )
        .route(
            "/api/v1/applications/:id/notes",
            patch(applications::handle_update_notes),
        )
        // Profiles
        .route(
            "/api/v1/profile",
            get(profiles::handle_get_profile).put(profiles::handle_update_profile),
        )
        .route("/api/v1/profile/skills", post(profiles::handle_add_skill))
        .route(
            "/api/v1/profile/skills/:id",
            delete(profiles::handle_remove_skill),
        )
        .route(
            "/api/v1/profile/education",
            post(profiles::handle_add_education),
        )
        .route(
            "/api/v1/profile/education/:id",
            delete(profiles::handle_remove_education),
        )
        .route(
            "/api/v1/profile/certifications",
            post(profiles::handle_add_certification),
        )
        .route(
            "/api/v1/profile/certifications/:id",
            delete(profiles::handle_remove_certification),
        )
        .route("/api/v1/skills", get(profiles::handle_list_skills))
        // Dashboards and notifications
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        .route(
            "/api/v1/notifications",
            get(notifications::handle_list_notifications),
        )
        .route(
            "/api/v1/notifications/:id/read",
            post(notifications::handle_mark_read),
        )
        .with_state(state)
}
