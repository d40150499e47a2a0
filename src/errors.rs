use actix_web::{error, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;
use crate::models::ErrorResponse;

/// Errors surfaced by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        message: String,
        required: Option<Vec<String>>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("System initialization failed. Please try again later.")]
    InitializationFailed,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            required: None,
        }
    }

    pub fn missing_fields(required: &[&str]) -> Self {
        ApiError::Validation {
            message: "Missing required fields".to_string(),
            required: Some(required.iter().map(|f| f.to_string()).collect()),
        }
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InitializationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation { message, required } => ErrorResponse {
                error: message.clone(),
                required: required.clone(),
            },
            other => ErrorResponse {
                error: other.to_string(),
                required: None,
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// JSON error response for extractor payload errors
#[derive(Debug, Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

impl JsonError {
    /// 400 for a body that is present but not the expected JSON
    pub fn invalid_body(detail: impl std::fmt::Display) -> Self {
        JsonError {
            error: "Invalid request body".to_string(),
            message: format!("Invalid JSON: {}", detail),
            status_code: 400,
        }
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError::invalid_body(err).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    JsonError {
        error: "Invalid query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}
