use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tastemap_core::DiscoveryError;
use tracing::warn;

#[derive(Debug)]
pub enum ApiError {
    Discovery(DiscoveryError),
    BadRequest(String),
}

impl From<DiscoveryError> for ApiError {
    fn from(error: DiscoveryError) -> Self {
        ApiError::Discovery(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Discovery(error) if error.is_precondition() => {
                (StatusCode::BAD_REQUEST, error.to_string())
            }
            ApiError::Discovery(error) => {
                warn!(error = %error, "upstream failure");
                (StatusCode::BAD_GATEWAY, error.to_string())
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
