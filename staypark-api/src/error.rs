use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use staypark_admin::AdminError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::ServiceUnavailable(msg) => {
                tracing::error!("Document store unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "Document store unavailable".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<AdminError> for AppError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::InvalidArgument(_) => AppError::ValidationError(err.to_string()),
            AdminError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            AdminError::InvalidTransition { .. } => AppError::ConflictError(err.to_string()),
            AdminError::StoreUnavailable(_) => AppError::ServiceUnavailable(err.to_string()),
        }
    }
}
