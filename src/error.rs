use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failure reported by a resource model. The HTTP layer never interprets
/// these beyond mapping them to a server error.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("stored document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("`{0}` is not a valid identifier")]
    InvalidId(String),

    /// The request body could not be read as JSON; keeps axum's status.
    #[error("{}", .0.body_text())]
    Body(#[from] JsonRejection),

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Model(err) => {
                tracing::error!("Model call failed: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
