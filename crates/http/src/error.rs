//! Error handling for the bookshelf HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::{Timestamp, Uuid};

/// Body field carrying the message unless a handler picks another one.
pub const DEFAULT_BODY_KEY: &str = "error";

/// Application error types that map to HTTP responses
///
/// Every variant renders as a single-field JSON object, `{"<key>": "<message>"}`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {message}")]
    BadRequest {
        message: String,
        code: &'static str,
        key: &'static str,
    },

    #[error("not found: {message}")]
    NotFound {
        message: String,
        code: &'static str,
        key: &'static str,
    },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request",
            key: DEFAULT_BODY_KEY,
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found",
            key: DEFAULT_BODY_KEY,
        }
    }

    /// Render the message under `key` instead of `"error"`.
    pub fn keyed(mut self, new_key: &'static str) -> Self {
        match &mut self {
            AppError::BadRequest { key, .. } | AppError::NotFound { key, .. } => *key = new_key,
            AppError::Internal(_) => {}
        }
        self
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v7(Timestamp::now(uuid::NoContext));
        let status = self.status();

        let (error_code, key, message) = match self {
            AppError::BadRequest { message, code, key }
            | AppError::NotFound { message, code, key } => (code, key, message),
            AppError::Internal(e) => ("internal_error", DEFAULT_BODY_KEY, e.to_string()),
        };

        tracing::error!(
            error_id = %error_id,
            error_code = %error_code,
            status_code = %status.as_u16(),
            message = %message,
            "Request error"
        );

        // Internal details stay in the logs for release builds
        let message = if cfg!(not(debug_assertions)) && status == StatusCode::INTERNAL_SERVER_ERROR
        {
            "An internal server error occurred".to_string()
        } else {
            message
        };

        let mut body = Map::new();
        body.insert(key.to_string(), Value::String(message));

        (status, Json(Value::Object(body))).into_response()
    }
}
