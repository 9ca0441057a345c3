use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::MaybeSession;
use crate::shell::navigator::{HistoryEntry, NavigationOutcome, Navigator, RecordedHistory};
use crate::shell::page::{Page, PageParams, PageState};
use crate::shell::view::{compose, ViewDescriptor};

#[derive(Deserialize)]
pub struct NavigateRequest {
    pub page: String,
    pub job_id: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct LocationQuery {
    pub path: String,
}

#[derive(Serialize)]
pub struct ShellResponse {
    #[serde(flatten)]
    pub outcome: NavigationOutcome,
    pub history: Vec<HistoryEntry>,
    pub view: ViewDescriptor,
}

fn respond(
    outcome: NavigationOutcome,
    navigator: Navigator<RecordedHistory>,
    session: &MaybeSession,
) -> ShellResponse {
    let view = compose(navigator.state(), session.auth_state());
    ShellResponse {
        outcome,
        history: navigator.into_history().entries,
        view,
    }
}

/// POST /api/v1/shell/navigate
pub async fn handle_navigate(
    session: MaybeSession,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<ShellResponse>, AppError> {
    let page = Page::parse(&req.page).unwrap_or_else(|| {
        warn!("Unknown page '{}' requested; using landing", req.page);
        Page::Landing
    });

    let mut navigator = Navigator::new(RecordedHistory::default());
    let outcome = navigator.navigate(
        page,
        PageParams { job_id: req.job_id },
        session.auth_state(),
    );
    Ok(Json(respond(outcome, navigator, &session)))
}

/// GET /api/v1/shell/location?path=
/// Back/forward navigation and direct URL loads.
pub async fn handle_location(
    session: MaybeSession,
    Query(query): Query<LocationQuery>,
) -> Result<Json<ShellResponse>, AppError> {
    let mut navigator = Navigator::with_state(PageState::landing(), RecordedHistory::default());
    let outcome = navigator.on_external_navigation(&query.path, session.auth_state());
    Ok(Json(respond(outcome, navigator, &session)))
}
