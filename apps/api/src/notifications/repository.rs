use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::notification::NotificationRow;

pub async fn list_notifications(pool: &PgPool, user_id: Uuid) -> Result<Vec<NotificationRow>, AppError> {
    let rows = sqlx::query_as(
        "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Marks one of the user's own notifications read. Idempotent.
pub async fn mark_read(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<NotificationRow, AppError> {
    let row: Option<NotificationRow> = sqlx::query_as(
        "UPDATE notifications SET read = TRUE WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    row.ok_or_else(|| AppError::NotFound(format!("Notification {id} not found")))
}
