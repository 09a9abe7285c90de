use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use gamecatalog_core::auth::AuthError;
use gamecatalog_core::catalog::{ValidationError, Violation};
use gamecatalog_core::pagination::PaginationError;
use gamecatalog_core::storage::{repository_error_to_status_code, RepositoryError};

/// Error returned by API handlers. Renders as `{"error": "<message>"}`.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Validation(ValidationError),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    Unavailable(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Validation(err) => err.to_string(),
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unavailable(msg)
            | ApiError::Internal(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "API error");
        } else {
            tracing::warn!(status = %status, message = %message, "API error");
        }

        let body = match &self {
            ApiError::Validation(err) if !err.violations().is_empty() => json!({
                "error": message,
                "violations": err.violations(),
            }),
            _ => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let code = repository_error_to_status_code(&err);
        let message = err.to_string();
        match code {
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            400 => ApiError::BadRequest(message),
            503 => ApiError::Unavailable(message),
            _ => ApiError::Internal(message),
        }
    }
}

impl From<PaginationError> for ApiError {
    fn from(err: PaginationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<Vec<Violation>> for ApiError {
    fn from(violations: Vec<Violation>) -> Self {
        ApiError::Validation(ValidationError::Invalid(violations))
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden => ApiError::Forbidden(err.to_string()),
            AuthError::MissingToken | AuthError::InvalidToken(_) => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::InvalidCredentials => ApiError::Unauthorized("Invalid credentials".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_limit_too_high_is_bad_request() {
        let (status, body) = body_json(PaginationError::LimitTooHigh(101).into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "The limit parameter must be lower than 100");
    }

    #[tokio::test]
    async fn test_validation_lists_violations() {
        let error: ApiError = vec![Violation::new("title", "too short")].into();

        let (status, body) = body_json(error).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["violations"][0]["field"], "title");
        assert_eq!(body["violations"][0]["message"], "too short");
    }

    #[tokio::test]
    async fn test_password_mismatch_has_no_violations() {
        let (status, body) = body_json(ValidationError::PasswordMismatch.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Passwords do not match");
        assert!(body.get("violations").is_none());
    }

    #[test]
    fn test_repository_errors_keep_status() {
        let not_found: ApiError = RepositoryError::NotFound {
            entity_type: "Editor",
            id: "3".into(),
        }
        .into();
        let conflict: ApiError = RepositoryError::AlreadyExists {
            entity_type: "User",
            id: "a@b.c".into(),
        }
        .into();
        let invalidation: ApiError = RepositoryError::CacheInvalidation("down".into()).into();

        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
        assert_eq!(invalidation.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_auth_errors() {
        assert_eq!(
            ApiError::from(AuthError::Forbidden).to_string(),
            "Access denied"
        );
        assert_eq!(
            ApiError::from(AuthError::MissingToken).status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
