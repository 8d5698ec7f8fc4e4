use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use recipebank_core::{ServiceError, StorageError};
use thiserror::Error;

use super::{ErrorDetail, ErrorResponse};

/// Every way a request can fail. Converted to the `{success: false, error}` envelope.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("invalid query parameter: {0}")]
    InvalidQueryParam(&'static str),

    #[error("malformed query string: {0}")]
    MalformedQuery(String),

    #[error("missing path parameter: {0}")]
    MissingPathParam(&'static str),

    #[error("request body too large")]
    RequestTooLarge,

    #[error("no route for request")]
    RouteNotFound,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::InvalidJson(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_json",
                "The request body contains invalid JSON".to_string(),
            ),
            Self::InvalidQueryParam(name) => (
                StatusCode::BAD_REQUEST,
                "invalid_query_params",
                format!("Invalid query parameter: {}", name),
            ),
            Self::MalformedQuery(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_query_params",
                "One or more query parameters are invalid".to_string(),
            ),
            Self::MissingPathParam(name) => (
                StatusCode::BAD_REQUEST,
                "missing_path_param",
                format!("Missing required path parameter: {}", name),
            ),
            Self::RequestTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "request_too_large",
                "The request body exceeds the maximum allowed size".to_string(),
            ),
            Self::RouteNotFound => (
                StatusCode::NOT_FOUND,
                "not_found",
                "The requested resource was not found".to_string(),
            ),
            Self::Service(err) => service_parts(err),
        }
    }
}

fn service_parts(err: &ServiceError) -> (StatusCode, &'static str, String) {
    match err {
        ServiceError::Validation(e) => (StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
        ServiceError::InvalidInput(_) => (
            StatusCode::BAD_REQUEST,
            "invalid_input",
            "The provided input data is invalid or incomplete".to_string(),
        ),
        ServiceError::AiUnsupported => (
            StatusCode::BAD_REQUEST,
            "ai_unsupported",
            "AI processing is not supported/enabled".to_string(),
        ),
        ServiceError::Ai(_) => (
            StatusCode::BAD_REQUEST,
            "ai_error",
            "An error occurred while processing the AI request".to_string(),
        ),
        ServiceError::Storage(StorageError::InvalidId(_)) => (
            StatusCode::BAD_REQUEST,
            "invalid_id",
            "The provided ID is invalid or malformed".to_string(),
        ),
        ServiceError::Storage(StorageError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            "not_found",
            "The requested recipe was not found".to_string(),
        ),
        ServiceError::Storage(StorageError::Database(_) | StorageError::Timeout(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "An internal server error occurred".to_string(),
        ),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        // Logged inside the request span, which carries method and path.
        if status.is_server_error() {
            tracing::error!(code, error = %self, "Request failed");
        } else {
            tracing::warn!(code, error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}
