use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::identity::IdentityError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The identity provider rejected the credentials or the request.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The identity exists but owns neither a seeker nor an employer profile.
    #[error("No profile found for identity {0}")]
    RoleUndetermined(uuid::Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Identity provider unavailable: {0}")]
    IdentityUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Rejected { message, .. } => AppError::Authentication(message),
            IdentityError::InvalidToken => AppError::Unauthorized,
            other => AppError::IdentityUnavailable(other.to_string()),
        }
    }
}

impl AppError {
    /// Whether the client may reasonably retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Database(_) | AppError::IdentityUnavailable(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let retryable = self.is_retryable();
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Authentication(msg) => (
                StatusCode::UNAUTHORIZED,
                "AUTHENTICATION_FAILED",
                msg.clone(),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::RoleUndetermined(id) => {
                tracing::error!("Identity {id} has neither a seeker nor an employer profile");
                (
                    StatusCode::CONFLICT,
                    "ROLE_UNDETERMINED",
                    "Your account has no profile. Please contact support.".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::IdentityUnavailable(msg) => {
                tracing::error!("Identity provider error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "IDENTITY_UNAVAILABLE",
                    "The sign-in service is unavailable".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "retryable": retryable
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_identity_error_becomes_authentication() {
        let err: AppError = IdentityError::Rejected {
            status: 400,
            message: "Invalid login credentials".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Authentication(ref m) if m == "Invalid login credentials"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_invalid_token_becomes_unauthorized() {
        let err: AppError = IdentityError::InvalidToken.into();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn test_role_undetermined_maps_to_conflict() {
        let resp = AppError::RoleUndetermined(uuid::Uuid::nil()).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_unavailable_provider_is_retryable() {
        let err = AppError::IdentityUnavailable("timeout".to_string());
        assert!(err.is_retryable());
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
