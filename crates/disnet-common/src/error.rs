use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Invalid argument: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed input{}: {reason}", row_suffix(.row))]
    MalformedInput { row: Option<usize>, reason: String },

    #[error("Network data not loaded")]
    NotReady,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn row_suffix(row: &Option<usize>) -> String {
    row.map(|r| format!(" at row {r}")).unwrap_or_default()
}

impl NetworkError {
    pub fn malformed(row: Option<usize>, reason: impl Into<String>) -> Self {
        NetworkError::MalformedInput { row, reason: reason.into() }
    }

    /// Short machine-readable kind, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            NetworkError::Validation(_) => "validation_error",
            NetworkError::NotFound(_) => "not_found",
            NetworkError::MalformedInput { .. } => "malformed_input",
            NetworkError::NotReady => "not_ready",
            NetworkError::Io(_) => "io_error",
            NetworkError::Serialization(_) => "serialization_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;

/// Error returned from HTTP handlers.
#[derive(Debug)]
pub struct ApiError(pub NetworkError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            NetworkError::Validation(_) => StatusCode::BAD_REQUEST,
            NetworkError::NotFound(_) => StatusCode::NOT_FOUND,
            NetworkError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            NetworkError::MalformedInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            NetworkError::Io(_) | NetworkError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<NetworkError> for ApiError {
    fn from(err: NetworkError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() && !matches!(self.0, NetworkError::NotReady) {
            tracing::error!("Request failed: {}", self.0);
        }

        let body = Json(serde_json::json!({
            "error": self.0.kind(),
            "detail": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
