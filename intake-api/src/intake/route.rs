//! Per-route parameters for the shared form handler.

/// Fixed parameters distinguishing one form endpoint from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteConfig {
    /// Short route name used in log events
    pub name: &'static str,
    /// Fields that must be present and non-blank, in reporting order
    pub required: &'static [&'static str],
    /// Hidden decoy field real users never fill
    pub honeypot: &'static str,
    /// Leading part of the outbound subject line
    pub subject_prefix: &'static str,
}

/// `POST /api/lead`
pub const LEAD: RouteConfig = RouteConfig {
    name: "lead",
    required: &["name", "contact"],
    honeypot: "hp_inline",
    subject_prefix: "Lead form",
};

/// `POST /api/quote`
pub const QUOTE: RouteConfig = RouteConfig {
    name: "quote",
    required: &["name", "email"],
    honeypot: "hp_page",
    subject_prefix: "Quote request",
};
