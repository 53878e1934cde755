//! Configuration module for environment variable parsing.
//!
//! Everything is read once at startup into an immutable [`Config`] snapshot.
//! Empty variables are treated the same as unset ones.

use std::env;
use tracing::warn;

/// Recipient used when neither `TO_EMAIL` nor `SMTP_USER` is set.
pub const FALLBACK_RECIPIENT: &str = "hello@breakingdevlab.example";

/// Display name placed on the outbound "from" mailbox by default.
pub const DEFAULT_FROM_NAME: &str = "Breaking Dev Lab";

/// SMTP credentials. Only constructed when all four parts are present.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("pass", &"[redacted]")
            .finish()
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// CORS origin; `None` allows any origin
    pub allowed_origin: Option<String>,

    /// SMTP transport settings; `None` disables delivery
    pub smtp: Option<SmtpSettings>,

    /// Address submissions are relayed to
    pub to_email: String,

    /// Address placed in the "from" header
    pub from_email: String,

    /// Display name placed in the "from" header
    pub from_name: String,

    /// Port for the web server to listen on
    pub port: u16,

    /// Upper bound for a single delivery attempt, in milliseconds
    pub mail_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let smtp_user = var("SMTP_USER");

        let to_email = var("TO_EMAIL")
            .or_else(|| smtp_user.clone())
            .unwrap_or_else(|| FALLBACK_RECIPIENT.to_string());

        let from_email = var("SMTP_FROM").unwrap_or_else(|| to_email.clone());

        let smtp = match (var("SMTP_HOST"), var("SMTP_PORT"), smtp_user, var("SMTP_PASS")) {
            (Some(host), Some(port), Some(user), Some(pass)) => match port.trim().parse::<u16>() {
                Ok(port) => Some(SmtpSettings {
                    host,
                    port,
                    user,
                    pass,
                }),
                Err(_) => {
                    warn!(env_var = "SMTP_PORT", value = %port, "Invalid port, mail transport disabled");
                    None
                }
            },
            _ => None,
        };

        Config {
            allowed_origin: var("ALLOWED_ORIGIN").filter(|v| v.trim() != "*"),

            smtp,

            to_email,

            from_email,

            from_name: var("SMTP_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),

            port: parse_or("PORT", var("PORT"), 10000),

            mail_timeout_ms: parse_or("MAIL_TIMEOUT_MS", var("MAIL_TIMEOUT_MS"), 10_000),
        }
    }
}

/// Parse a numeric variable, falling back to `default` when unset or invalid.
fn parse_or<T: std::str::FromStr>(name: &str, raw: Option<String>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid number, using default");
            default
        }
    }
}
