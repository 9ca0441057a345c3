use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::notification::NotificationRow;
use crate::notifications::repository;
use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct NotificationList {
    pub unread: usize,
    pub notifications: Vec<NotificationRow>,
}

/// GET /api/v1/notifications
pub async fn handle_list_notifications(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<NotificationList>, AppError> {
    let notifications = repository::list_notifications(&state.db, session.user_id()).await?;
    let unread = notifications.iter().filter(|n| !n.read).count();
    Ok(Json(NotificationList {
        unread,
        notifications,
    }))
}

/// POST /api/v1/notifications/:id/read
pub async fn handle_mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<Json<NotificationRow>, AppError> {
    let row = repository::mark_read(&state.db, session.user_id(), id).await?;
    Ok(Json(row))
}
