//! Payload normalization and outbound message composition.

use super::fields::SubmissionFields;
use super::route::RouteConfig;

/// Submission reduced to the four values the message is built from.
///
/// Every value is a plain string, empty when the submitter left it out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedPayload {
    pub name: String,
    pub contact: String,
    pub message: String,
    pub selected_service: String,
}

impl NormalizedPayload {
    /// `contact` prefers `email` over `contact`; `message` prefers `message`
    /// over `project`. Empty sources fall through to the next one.
    pub fn from_fields(fields: &SubmissionFields) -> Self {
        let first = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| fields.non_empty(name))
                .unwrap_or_default()
                .to_string()
        };

        Self {
            name: first(&["name"]),
            contact: first(&["email", "contact"]),
            message: first(&["message", "project"]),
            selected_service: first(&["selected_service"]),
        }
    }
}

/// Fully addressed plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub subject: String,
    pub body: String,
    pub to: String,
    /// Mailbox string, e.g. `"Breaking Dev Lab" <noreply@example.com>`
    pub from: String,
}

impl OutboundMessage {
    pub fn compose(
        payload: &NormalizedPayload,
        route: &RouteConfig,
        from_name: &str,
        from_email: &str,
        to: &str,
    ) -> Self {
        Self {
            subject: subject_line(route, &payload.selected_service),
            body: body_text(payload),
            to: to.to_string(),
            from: format!("\"{from_name}\" <{from_email}>"),
        }
    }
}

fn subject_line(route: &RouteConfig, selected_service: &str) -> String {
    if selected_service.is_empty() {
        route.subject_prefix.to_string()
    } else {
        format!("{} — {}", route.subject_prefix, selected_service)
    }
}

fn body_text(payload: &NormalizedPayload) -> String {
    format!(
        "New submission\n\nName: {}\nContact: {}\nService: {}\n\nMessage:\n{}",
        payload.name, payload.contact, payload.selected_service, payload.message
    )
}
