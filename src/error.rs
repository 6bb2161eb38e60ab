use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
///
/// Each kind maps to its own status and code so clients can tell
/// "fix your input" from "try again later" from "server bug".
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not authorized")]
    Unauthorized,

    #[error("Missing attribute: {0}")]
    MissingAttribute(String),

    #[error("No jobs available")]
    EmptyPool,

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable status code and machine-readable error code for this kind
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::MissingAttribute(_) => (StatusCode::BAD_REQUEST, "MISSING_ATTRIBUTE"),
            AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            AppError::EmptyPool => (StatusCode::NOT_FOUND, "EMPTY_POOL"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::ExternalService(_) | AppError::HttpClient(_) => {
                (StatusCode::BAD_GATEWAY, "EXTERNAL_SERVICE_ERROR")
            }
            AppError::StorageUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "STORAGE_UNAVAILABLE")
            }
            AppError::InvalidArgument(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_ARGUMENT"),
            AppError::Database(_) | AppError::Cache(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Unauthorized => "Not authorized".to_string(),
            AppError::EmptyPool => "No jobs available".to_string(),
            AppError::MissingAttribute(msg)
            | AppError::InvalidInput(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
            // Upstream and storage details stay in the logs
            AppError::ExternalService(_) | AppError::HttpClient(_) => {
                "Embedding service unavailable, try again later".to_string()
            }
            AppError::StorageUnavailable(_) => "Storage unavailable, try again later".to_string(),
            AppError::InvalidArgument(_)
            | AppError::Database(_)
            | AppError::Cache(_)
            | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self, code = code, "Request failed");
        } else {
            tracing::debug!(error = %self, code = code, "Request rejected");
        }

        let body = Json(json!({
            "error": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Connection-level failures mean the store cannot be reached; anything
/// else is a failed query
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let unreachable = matches!(
            err,
            sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::WorkerCrashed
        );

        if unreachable {
            AppError::StorageUnavailable(err.to_string())
        } else {
            AppError::Database(err)
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_4xx() {
        assert_eq!(
            AppError::Unauthorized.status_and_code(),
            (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
        );
        assert_eq!(
            AppError::MissingAttribute("skills".to_string()).status_and_code(),
            (StatusCode::BAD_REQUEST, "MISSING_ATTRIBUTE")
        );
        assert_eq!(
            AppError::EmptyPool.status_and_code(),
            (StatusCode::NOT_FOUND, "EMPTY_POOL")
        );
    }

    #[test]
    fn test_upstream_and_bug_errors_are_distinct() {
        let (upstream, _) = AppError::ExternalService("timeout".to_string()).status_and_code();
        let (storage, _) = AppError::StorageUnavailable("down".to_string()).status_and_code();
        let (bug, code) = AppError::InvalidArgument("len".to_string()).status_and_code();

        assert_eq!(upstream, StatusCode::BAD_GATEWAY);
        assert_eq!(storage, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(bug, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INVALID_ARGUMENT");
    }

    #[test]
    fn test_unreachable_database_is_storage_unavailable() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::StorageUnavailable(_)));
        assert_eq!(err.status_and_code().0, StatusCode::SERVICE_UNAVAILABLE);

        let err = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(
            err.status_and_code(),
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL")
        );
    }

    #[tokio::test]
    async fn test_into_response_body_shape() {
        let response = AppError::MissingAttribute("Missing user skills".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "MISSING_ATTRIBUTE");
        assert_eq!(body["message"], "Missing user skills");
    }
}
