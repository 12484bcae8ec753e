//! Error types and HTTP error mapping for the gateway

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// An upstream resource or a local record does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// An upstream payload violates the expected contract
    #[error("Shape error: {message}")]
    Shape { message: String },

    /// Network failure or an unexpected upstream status
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// User supplied input violates a constraint
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl GatewayError {
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn shape<S: Into<String>>(message: S) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }

    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status this error maps to
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::NotFound { .. } => StatusCode::NOT_FOUND,
            GatewayError::Validation { .. } => StatusCode::BAD_REQUEST,
            GatewayError::Shape { .. }
            | GatewayError::Upstream { .. }
            | GatewayError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short, non-sensitive message safe to hand to a client
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::NotFound { message } | GatewayError::Validation { message } => {
                message.clone()
            }
            GatewayError::Shape { .. }
            | GatewayError::Upstream { .. }
            | GatewayError::Config { .. } => "Internal server error".to_string(),
        }
    }
}

/// Error response sent to HTTP clients as `{"error": <message>}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new<S: Into<String>>(status: StatusCode, message: S) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        // Full detail stays server side, the client only sees user_message().
        let status = err.status_code();
        if status.is_server_error() {
            tracing::error!(error = %err, "request failed");
        } else {
            tracing::warn!(error = %err, "request rejected");
        }
        Self::new(status, err.user_message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
        }));

        (self.status, body).into_response()
    }
}
