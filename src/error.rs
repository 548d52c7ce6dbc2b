use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum VaultError {
    #[error("username is already taken")]
    DuplicateUsername,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("authentication required")]
    Unauthenticated,

    #[error("resource not found")]
    NotFound,

    #[error("access to this resource is forbidden")]
    Forbidden,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Password hashing error: {0}")]
    HashError(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl VaultError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            VaultError::DuplicateUsername => StatusCode::CONFLICT,
            VaultError::InvalidCredentials | VaultError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            VaultError::NotFound => StatusCode::NOT_FOUND,
            VaultError::Forbidden => StatusCode::FORBIDDEN,
            VaultError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            VaultError::DatabaseError(_)
            | VaultError::HashError(_)
            | VaultError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for VaultError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let (code, message) = match &self {
            VaultError::DuplicateUsername => ("DUPLICATE_USERNAME", self.to_string()),
            VaultError::InvalidCredentials => ("INVALID_CREDENTIALS", self.to_string()),
            VaultError::Unauthenticated => ("UNAUTHENTICATED", self.to_string()),
            VaultError::NotFound => ("NOT_FOUND", self.to_string()),
            VaultError::Forbidden => ("FORBIDDEN", self.to_string()),
            VaultError::InvalidArgument(reason) => ("INVALID_ARGUMENT", reason.clone()),
            VaultError::DatabaseError(_)
            | VaultError::HashError(_)
            | VaultError::UnexpectedError(_) => {
                error!(error = %self, "request failed with internal error");
                (
                    "INTERNAL_ERROR",
                    "An internal server error occurred.".to_string(),
                )
            }
        };
        let body = ApiErrorBody {
            code: code.to_string(),
            message,
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Undecodable request bodies are reported in the same shape as other errors.
impl From<JsonRejection> for VaultError {
    fn from(rejection: JsonRejection) -> Self {
        VaultError::InvalidArgument(rejection.body_text())
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_client_statuses() {
        assert_eq!(
            VaultError::DuplicateUsername.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            VaultError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(VaultError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(VaultError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            VaultError::InvalidArgument("length".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn internal_errors_hide_details() {
        let resp = VaultError::HashError("salt failure".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
