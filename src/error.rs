use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::error::ErrorKind;

/// Every failure a handler can report to a client.
///
/// Repository functions return this directly so that the mapping to a status
/// code happens in exactly one place (`IntoResponse` below).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("database error: {0}")]
    Internal(#[source] sqlx::Error),
}

impl ApiError {
    pub fn player_not_found() -> Self {
        ApiError::NotFound { entity: "Player" }
    }

    pub fn game_not_found() -> Self {
        ApiError::NotFound { entity: "Game" }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct NotFoundResponse {
    error: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    status: u16,
    reason: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            ApiError::NotFound { entity } => {
                let body = Json(NotFoundResponse {
                    error: format!("{entity} not found"),
                });
                (status, body).into_response()
            }
            ApiError::Internal(err) => {
                // Driver messages stay in the log, never in the response.
                tracing::error!(error = %err, "Database failure while handling request");
                let body = Json(ErrorResponse {
                    status: status.as_u16(),
                    reason: "internal server error".to_string(),
                });
                (status, body).into_response()
            }
            ApiError::Conflict(reason) | ApiError::Validation(reason) => {
                let body = Json(ErrorResponse {
                    status: status.as_u16(),
                    reason,
                });
                (status, body).into_response()
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    return ApiError::Conflict(format!("unique constraint violated: {}", db_err.message()));
                }
                ErrorKind::ForeignKeyViolation => {
                    return ApiError::Validation("foreign key constraint violated".to_string());
                }
                ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                    return ApiError::Validation(db_err.message().to_string());
                }
                _ => {}
            }
        }

        ApiError::Internal(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
