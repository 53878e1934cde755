//! Form endpoint handlers.
//!
//! Both form routes funnel into [`handle_form`]:
//! 1. Reject filled honeypots and missing fields
//! 2. Compose the notification email
//! 3. Attempt delivery once, logging any failure
//! 4. Return 200 whatever the delivery outcome

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::error::{IntakeError, IntakeResponse};
use crate::intake::{evaluate, Addressing, RouteConfig, SubmissionFields, LEAD, QUOTE};
use crate::mail::{dispatch, DispatchOutcome, MailTransport};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub addressing: Arc<Addressing>,
    /// Absent when SMTP is not fully configured
    pub mailer: Option<Arc<dyn MailTransport>>,
}

impl AppState {
    pub fn new(config: Config, mailer: Option<Arc<dyn MailTransport>>) -> Self {
        let addressing = Addressing {
            from_name: config.from_name.clone(),
            from_email: config.from_email.clone(),
            to_email: config.to_email.clone(),
        };

        Self {
            config: Arc::new(config),
            addressing: Arc::new(addressing),
            mailer,
        }
    }

    fn mail_timeout(&self) -> Duration {
        Duration::from_millis(self.config.mail_timeout_ms)
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

// =============================================================================
// Form Routes
// =============================================================================

/// `POST /api/lead`
pub async fn lead(
    State(state): State<AppState>,
    fields: SubmissionFields,
) -> Result<Json<IntakeResponse>, IntakeError> {
    handle_form(&state, &LEAD, fields).await
}

/// `POST /api/quote`
pub async fn quote(
    State(state): State<AppState>,
    fields: SubmissionFields,
) -> Result<Json<IntakeResponse>, IntakeError> {
    handle_form(&state, &QUOTE, fields).await
}

/// Shared pipeline behind every form route.
pub async fn handle_form(
    state: &AppState,
    route: &RouteConfig,
    fields: SubmissionFields,
) -> Result<Json<IntakeResponse>, IntakeError> {
    info!(route = route.name, field_count = fields.len(), "form_received");

    let message = evaluate(&fields, route, &state.addressing)?;

    let outcome = dispatch(state.mailer.as_deref(), &message, state.mail_timeout()).await;
    let delivery = match &outcome {
        DispatchOutcome::Sent => "sent",
        DispatchOutcome::Failed(_) => "failed",
        DispatchOutcome::TimedOut => "timed_out",
        DispatchOutcome::Unconfigured => "unconfigured",
    };

    info!(route = route.name, delivery = delivery, "form_processed");

    Ok(Json(IntakeResponse::received()))
}
