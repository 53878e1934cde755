//! Request-level failures and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Ways a form submission can end without reaching dispatch.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("honeypot field was filled")]
    SpamRejected,
    #[error("missing required fields: {}", missing.join(", "))]
    ValidationFailed { missing: Vec<String> },
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

/// JSON body shared by every form response.
#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub ok: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
}

impl IntakeResponse {
    pub fn received() -> Self {
        Self {
            ok: true,
            message: "Received",
            missing: None,
        }
    }

    pub fn server_error() -> Self {
        Self {
            ok: false,
            message: "Server error",
            missing: None,
        }
    }
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            IntakeError::SpamRejected => (
                StatusCode::BAD_REQUEST,
                IntakeResponse {
                    ok: false,
                    message: "Spam detected",
                    missing: None,
                },
            ),
            IntakeError::ValidationFailed { missing } => (
                StatusCode::BAD_REQUEST,
                IntakeResponse {
                    ok: false,
                    message: "Missing fields",
                    missing: Some(missing),
                },
            ),
            IntakeError::Unexpected(detail) => {
                // Detail stays server-side.
                error!(error = %detail, "form_unexpected_error");
                (StatusCode::INTERNAL_SERVER_ERROR, IntakeResponse::server_error())
            }
        };

        (status, Json(body)).into_response()
    }
}
