//! Form intake API - lead and quote forms relayed by email.
//!
//! This library provides the modules behind the `intake-api` binary:
//! - `intake`: honeypot and required-field checks, normalization, composition
//! - `mail`: optional SMTP transport and best-effort dispatch
//! - `web`: axum router, handlers and middleware
//!
//! ## Request Flow
//!
//! ```text
//! POST /api/{lead,quote} → checks → compose → dispatch (best effort) → JSON reply
//! ```

pub mod config;
pub mod error;
pub mod intake;
pub mod mail;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::{IntakeError, IntakeResponse};
pub use intake::{evaluate, OutboundMessage, RouteConfig, SubmissionFields, LEAD, QUOTE};
pub use mail::{dispatch, DispatchOutcome, MailError, MailTransport, SmtpMailer};
pub use web::{router, AppState};
