//! SMTP delivery through lettre's async transport.

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use super::{MailError, MailTransport};
use crate::config::SmtpSettings;
use crate::intake::OutboundMessage;

/// Port on which the server expects TLS from the first byte.
const IMPLICIT_TLS_PORT: u16 = 465;

/// Pooled async SMTP client, built once at startup.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build the transport. No connection is made until the first send.
    ///
    /// Port 465 uses implicit TLS; any other port upgrades with STARTTLS when
    /// the server offers it.
    pub fn new(settings: &SmtpSettings, timeout: Duration) -> Result<Self, MailError> {
        let params = TlsParameters::new(settings.host.clone())
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let tls = if settings.port == IMPLICIT_TLS_PORT {
            Tls::Wrapper(params)
        } else {
            Tls::Opportunistic(params)
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(settings.host.as_str())
            .port(settings.port)
            .tls(tls)
            .credentials(Credentials::new(
                settings.user.clone(),
                settings.pass.clone(),
            ))
            .timeout(Some(timeout))
            .build();

        info!(
            host = %settings.host,
            port = settings.port,
            implicit_tls = settings.port == IMPLICIT_TLS_PORT,
            "smtp_transport_created"
        );

        Ok(Self { transport })
    }
}

/// Turn an [`OutboundMessage`] into a plain-text lettre message.
pub fn build_message(message: &OutboundMessage) -> Result<Message, MailError> {
    Message::builder()
        .from(parse_mailbox(&message.from)?)
        .to(parse_mailbox(&message.to)?)
        .subject(message.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, message: &OutboundMessage) -> Result<(), MailError> {
        let email = build_message(message)?;

        self.transport
            .send(email)
            .await
            .map(|_| ())
            .map_err(|e| MailError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(from: &str, to: &str) -> OutboundMessage {
        OutboundMessage {
            subject: "Quote request — Web app".to_string(),
            body: "New submission\n\nName: Bob".to_string(),
            to: to.to_string(),
            from: from.to_string(),
        }
    }

    #[test]
    fn test_build_message_headers() {
        let email = build_message(&message(
            "\"Breaking Dev Lab\" <noreply@example.com>",
            "sales@example.com",
        ))
        .unwrap();

        let raw = String::from_utf8(email.formatted()).unwrap();
        assert!(raw.contains("Breaking Dev Lab"));
        assert!(raw.contains("<noreply@example.com>"));
        assert!(raw.contains("To: sales@example.com"));
        assert!(raw.contains("Content-Type: text/plain"));
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let err = build_message(&message("noreply@example.com", "not an address")).unwrap_err();
        assert!(matches!(err, MailError::Address { ref address, .. } if address == "not an address"));
    }

    #[tokio::test]
    async fn test_new_does_not_connect() {
        let settings = SmtpSettings {
            host: "smtp.invalid".to_string(),
            port: 465,
            user: "user".to_string(),
            pass: "pass".to_string(),
        };
        assert!(SmtpMailer::new(&settings, Duration::from_secs(1)).is_ok());
    }
}
