//! Form intake core.
//!
//! One shared pipeline serves every form route. A route is a [`RouteConfig`]
//! value, not a type:
//!
//! ```text
//! fields → honeypot → required fields → normalize → compose → OutboundMessage
//! ```
//!
//! Dispatch and response shaping live in `web`.

pub mod compose;
pub mod fields;
pub mod route;
pub mod validate;

use tracing::{info, warn};

use crate::error::IntakeError;

pub use compose::{NormalizedPayload, OutboundMessage};
pub use fields::SubmissionFields;
pub use route::{RouteConfig, LEAD, QUOTE};
pub use validate::{honeypot_tripped, missing_fields};

/// Addresses every outbound message is stamped with.
#[derive(Debug, Clone)]
pub struct Addressing {
    pub from_name: String,
    pub from_email: String,
    pub to_email: String,
}

/// Run the checks for `route` and build the message to relay.
///
/// A filled honeypot short-circuits before required fields are looked at.
pub fn evaluate(
    fields: &SubmissionFields,
    route: &RouteConfig,
    addressing: &Addressing,
) -> Result<OutboundMessage, IntakeError> {
    if honeypot_tripped(fields, route) {
        warn!(route = route.name, honeypot = route.honeypot, "form_spam_rejected");
        return Err(IntakeError::SpamRejected);
    }

    let missing = missing_fields(fields, route);
    if !missing.is_empty() {
        info!(route = route.name, missing = ?missing, "form_missing_fields");
        return Err(IntakeError::ValidationFailed { missing });
    }

    let payload = NormalizedPayload::from_fields(fields);
    let message = OutboundMessage::compose(
        &payload,
        route,
        &addressing.from_name,
        &addressing.from_email,
        &addressing.to_email,
    );

    info!(
        route = route.name,
        subject = %message.subject,
        has_service = !payload.selected_service.is_empty(),
        "form_accepted"
    );

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addressing() -> Addressing {
        Addressing {
            from_name: "Breaking Dev Lab".to_string(),
            from_email: "noreply@example.com".to_string(),
            to_email: "sales@example.com".to_string(),
        }
    }

    fn fields(pairs: &[(&str, &str)]) -> SubmissionFields {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_spam_short_circuits_validation() {
        let result = evaluate(&fields(&[("hp_page", "filled")]), &QUOTE, &addressing());
        assert!(matches!(result, Err(IntakeError::SpamRejected)));
    }

    #[test]
    fn test_spam_regardless_of_valid_fields() {
        let submitted = fields(&[
            ("name", "Bob"),
            ("email", "bob@x.com"),
            ("hp_page", "filled"),
        ]);
        assert!(matches!(
            evaluate(&submitted, &QUOTE, &addressing()),
            Err(IntakeError::SpamRejected)
        ));
    }

    #[test]
    fn test_missing_fields_reported() {
        let result = evaluate(
            &fields(&[("contact", "alice@x.com"), ("hp_inline", "")]),
            &LEAD,
            &addressing(),
        );
        match result {
            Err(IntakeError::ValidationFailed { missing }) => assert_eq!(missing, vec!["name"]),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_valid_quote_composes_message() {
        let message = evaluate(
            &fields(&[
                ("name", "Bob"),
                ("email", "bob@x.com"),
                ("project", "Shop rebuild"),
                ("selected_service", "E-commerce"),
            ]),
            &QUOTE,
            &addressing(),
        )
        .unwrap();

        assert_eq!(message.subject, "Quote request — E-commerce");
        assert_eq!(message.to, "sales@example.com");
        assert_eq!(message.from, "\"Breaking Dev Lab\" <noreply@example.com>");
        assert!(message.body.contains("Contact: bob@x.com"));
        assert!(message.body.ends_with("Message:\nShop rebuild"));
    }

    #[test]
    fn test_lead_normalizes_email_over_contact() {
        let message = evaluate(
            &fields(&[
                ("name", "Alice"),
                ("contact", "+31 6 1234"),
                ("email", "alice@x.com"),
            ]),
            &LEAD,
            &addressing(),
        )
        .unwrap();

        assert!(message.body.contains("Contact: alice@x.com"));
        assert_eq!(message.subject, "Lead form");
    }
}
