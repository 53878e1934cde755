//! Honeypot and required-field checks.

use super::fields::SubmissionFields;
use super::route::RouteConfig;

/// True when the route's decoy field carries anything besides whitespace.
pub fn honeypot_tripped(fields: &SubmissionFields, route: &RouteConfig) -> bool {
    fields
        .get(route.honeypot)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false)
}

/// Every required field that is absent or blank, in the route's declared order.
///
/// Checks the raw field names only; the `email`/`contact` fallback used during
/// normalization does not apply here.
pub fn missing_fields(fields: &SubmissionFields, route: &RouteConfig) -> Vec<String> {
    route
        .required
        .iter()
        .filter(|name| {
            fields
                .get(name)
                .map(|v| v.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|name| name.to_string())
        .collect()
}
