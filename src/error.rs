use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure raised by a repository call.
///
/// `code()` is the numeric diagnostic echoed back to the client by the
/// write endpoints, next to the `Display` message.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    pub fn code(&self) -> i64 {
        match self {
            RepositoryError::NotFound { .. } => 404,
            RepositoryError::Conflict(_) => 409,
            RepositoryError::Validation(_) => 422,
            RepositoryError::Database(_) => 0,
        }
    }
}

/// Read-path error surfaced to the HTTP layer without local recovery.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Repository(RepositoryError::NotFound { .. }) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_error_kind() {
        let not_found = RepositoryError::NotFound { entity: "Group", id: "5".into() };
        assert_eq!(not_found.code(), 404);
        assert_eq!(not_found.to_string(), "Group not found: 5");
        assert_eq!(RepositoryError::Conflict("taken".into()).code(), 409);
        assert_eq!(RepositoryError::Validation("name is required".into()).code(), 422);
        assert_eq!(RepositoryError::Database(sqlx::Error::RowNotFound).code(), 0);
    }

    #[test]
    fn not_found_maps_to_404_response() {
        let err = AppError::from(RepositoryError::NotFound { entity: "Group", id: "x".into() });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err = AppError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
