use std::sync::Arc;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Shared handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

pub const INTERNAL_MESSAGE: &str = "Erro interno do servidor";

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{message}")]
    Internal {
        message: &'static str,
        cause: Arc<anyhow::Error>,
    },
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Internal failure with the generic client-facing message.
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::internal_with(INTERNAL_MESSAGE, err)
    }

    /// Internal failure with a specific client-facing message; `err` is only logged.
    pub fn internal_with(message: &'static str, err: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            message,
            cause: Arc::new(err.into()),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::Internal { .. } => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        tracing::debug!(error = %value, "rejected request body");
        Self::invalid("Corpo da requisição inválido")
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: String,
    pub code: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal { message, cause } = &self {
            tracing::error!(error = ?cause, "{message}");
        }
        let body = ErrorBody {
            error: self.to_string(),
            code: self.code(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// `{"message": ...}` acknowledgement for operations without a payload.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

impl MessageBody {
    pub fn new(message: &'static str) -> Json<Self> {
        Json(Self { message })
    }
}

/// Parse a numeric path segment, mapping garbage to a 400.
pub fn parse_id(raw: &str) -> ApiResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::invalid("ID inválido"))
}
