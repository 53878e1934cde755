//! Raw submission fields and body decoding.
//!
//! Forms arrive either URL-encoded or as a flat JSON object. Both are reduced
//! to a plain name → string map before any validation runs.

use std::collections::HashMap;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::Value;
use tracing::warn;

use crate::error::IntakeError;

/// Field name → value, verbatim from the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFields(HashMap<String, String>);

impl SubmissionFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Value of `name` unless absent or empty.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode a JSON object body.
    ///
    /// Strings are kept as-is, numbers and `true` take their textual form.
    /// `null`, `false` and zero count as absent, the same way a blank form
    /// field would. Nested arrays or objects are rejected.
    pub fn from_json(body: &[u8]) -> Result<Self, IntakeError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| IntakeError::Unexpected(format!("invalid JSON body: {e}")))?;

        let Value::Object(object) = value else {
            return Err(IntakeError::Unexpected(
                "JSON body is not an object".to_string(),
            ));
        };

        let mut fields = HashMap::with_capacity(object.len());
        for (name, value) in object {
            let text = match value {
                Value::Null | Value::Bool(false) => continue,
                Value::Number(n) if n.as_f64() == Some(0.0) => continue,
                Value::String(s) => s,
                Value::Bool(true) => "true".to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(IntakeError::Unexpected(format!(
                        "field {name} is not a scalar"
                    )));
                }
            };
            fields.insert(name, text);
        }

        Ok(Self(fields))
    }

    /// Decode an `application/x-www-form-urlencoded` body. Later duplicates win.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        form_urlencoded::parse(body).into_owned().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for SubmissionFields
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[async_trait]
impl<S> FromRequest<S> for SubmissionFields
where
    S: Send + Sync,
{
    type Rejection = IntakeError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or("").trim().to_ascii_lowercase())
            .unwrap_or_default();

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| IntakeError::Unexpected(format!("failed to read body: {e}")))?;

        match content_type.as_str() {
            "application/json" => Self::from_json(&body),
            "application/x-www-form-urlencoded" => Ok(Self::from_urlencoded(&body)),
            other => {
                // Unparsed bodies behave as an empty form.
                warn!(content_type = %other, body_length = body.len(), "form_body_ignored");
                Ok(Self::default())
            }
        }
    }
}
