use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request body: {0}")]
    InvalidBody(anyhow::Error),

    #[error("Not found: {message}")]
    NotFound {
        message: String,
        context: Vec<(&'static str, String)>,
    },

    #[error("{operation}: {source}")]
    DatabaseError {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("Service Unavailable")]
    ServiceUnavailable,

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    /// A 404 whose body carries the identifiers that failed to resolve.
    pub fn not_found(message: impl Into<String>, context: Vec<(&'static str, String)>) -> Self {
        AppError::NotFound {
            message: message.into(),
            context,
        }
    }

    /// A store failure, reported to the caller as `operation`.
    pub fn database(operation: &'static str, source: impl Into<anyhow::Error>) -> Self {
        AppError::DatabaseError {
            operation,
            source: source.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseError { .. }
            | AppError::InternalError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::database("Database error", err)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(flatten)]
    context: Map<String, Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (error, details, context) = match self {
            AppError::InvalidBody(err) => (
                "Invalid request body".to_string(),
                Some(err.to_string()),
                Vec::new(),
            ),
            AppError::NotFound { message, context } => (message, None, context),
            AppError::DatabaseError { operation, source } => {
                tracing::error!(operation, error = %source, "Document store request failed");
                (operation.to_string(), Some(source.to_string()), Vec::new())
            }
            AppError::ServiceUnavailable => {
                ("Service unavailable".to_string(), None, Vec::new())
            }
            AppError::InternalError(err) => {
                tracing::error!(error = ?err, "Internal server error");
                (
                    "Internal server error".to_string(),
                    Some(format!("{:#}", err)),
                    Vec::new(),
                )
            }
            AppError::ConfigError(err) => (
                "Configuration error".to_string(),
                Some(err.to_string()),
                Vec::new(),
            ),
        };

        let context = context
            .into_iter()
            .map(|(key, value)| (key.to_string(), Value::String(value)))
            .collect();

        (
            status,
            Json(ErrorResponse {
                error,
                details,
                context,
            }),
        )
            .into_response()
    }
}
