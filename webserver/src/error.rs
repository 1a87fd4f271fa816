//! WebServer-specific error types

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::SharedError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Entries file unavailable: {path}")]
    EntriesUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid action: {0}")]
    InvalidAction(#[from] SharedError),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("Client not found: {0}")]
    ClientNotFound(Uuid),

    #[error("Static file not found: {path}")]
    StaticFileNotFound { path: String },

    #[error("Access denied: {path}")]
    AccessDenied { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WebServerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn websocket(message: impl Into<String>) -> Self {
        Self::WebSocket(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status reported when this error ends a request
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidAction(_) | Self::Json(_) => StatusCode::BAD_REQUEST,
            Self::StaticFileNotFound { .. } | Self::ClientNotFound(_) => StatusCode::NOT_FOUND,
            Self::AccessDenied { .. } => StatusCode::FORBIDDEN,
            Self::EntriesUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
