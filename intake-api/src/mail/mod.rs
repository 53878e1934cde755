//! Outbound mail delivery.
//!
//! The transport is optional: it exists only when SMTP is fully configured.
//! [`dispatch`] never fails. It reports a [`DispatchOutcome`] which the caller
//! logs and drops.

pub mod smtp;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::intake::OutboundMessage;

pub use smtp::SmtpMailer;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid email address {address}: {reason}")]
    Address { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Transport(String),
}

/// Something that can deliver an [`OutboundMessage`].
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<(), MailError>;
}

/// Result of a single best-effort delivery attempt.
#[derive(Debug)]
pub enum DispatchOutcome {
    Sent,
    Failed(MailError),
    TimedOut,
    /// No transport configured; the message was only logged.
    Unconfigured,
}

/// Attempt delivery once, bounded by `limit`.
pub async fn dispatch(
    transport: Option<&dyn MailTransport>,
    message: &OutboundMessage,
    limit: Duration,
) -> DispatchOutcome {
    let Some(transport) = transport else {
        info!(
            subject = %message.subject,
            text = %message.body,
            "mail_not_sent_no_smtp"
        );
        return DispatchOutcome::Unconfigured;
    };

    match timeout(limit, transport.send(message)).await {
        Ok(Ok(())) => {
            info!(subject = %message.subject, to = %message.to, "mail_sent");
            DispatchOutcome::Sent
        }
        Ok(Err(e)) => {
            error!(error = %e, subject = %message.subject, "mail_send_failed");
            DispatchOutcome::Failed(e)
        }
        Err(_) => {
            warn!(
                timeout_ms = limit.as_millis() as u64,
                subject = %message.subject,
                "mail_send_timed_out"
            );
            DispatchOutcome::TimedOut
        }
    }
}
