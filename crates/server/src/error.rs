use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::tls::TlsError;

/// Errors that can occur when running the webhook host.
///
/// Solver failures are not in here: they are reported inside the
/// `ChallengePayload` response with HTTP 200.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A startup configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TLS material could not be loaded.
    #[error("tls error: {0}")]
    Tls(#[from] TlsError),

    /// The request body was not a usable challenge payload.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Unknown API group or solver.
    #[error("not found: {0}")]
    NotFound(String),
}

impl ServerError {
    fn reason(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BadRequest",
            Self::NotFound(_) => "NotFound",
            Self::Config(_) | Self::Io(_) | Self::Tls(_) => "InternalError",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Config(_) | Self::Io(_) | Self::Tls(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    /// Errors are rendered as Kubernetes `Status` objects so the API server
    /// can relay them to the controller unchanged.
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "kind": "Status",
            "apiVersion": "v1",
            "metadata": {},
            "status": "Failure",
            "message": self.to_string(),
            "reason": self.reason(),
            "code": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
