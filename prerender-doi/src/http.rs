//! HTTP registrar client.
//!
//! Sends `POST <endpoint>` with `{"prefix": "<prefix>"}` and accepts either a
//! plain-text body holding the resolver URL or a JSON object with a `doi` or
//! `url` field.

use serde_json::Value;

use crate::error::RegistrarError;
use crate::registrar::{validate_prefix, Registrar};

#[derive(Clone)]
pub struct HttpRegistrar {
    endpoint: String,
    agent: ureq::Agent,
}

impl std::fmt::Debug for HttpRegistrar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRegistrar")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl HttpRegistrar {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Registrar for HttpRegistrar {
    fn register(&self, prefix: &str) -> Result<String, RegistrarError> {
        validate_prefix(prefix)?;
        tracing::debug!(endpoint = %self.endpoint, prefix, "requesting identifier");
        let response = self
            .agent
            .post(&self.endpoint)
            .send_json(serde_json::json!({ "prefix": prefix }))
            .map_err(Box::new)?;
        let body = response.into_string().map_err(|e| RegistrarError::Io {
            endpoint: self.endpoint.clone(),
            source: e,
        })?;
        url_from_body(&body)
    }
}

/// Pull the resolver URL out of a registrar response body.
pub(crate) fn url_from_body(body: &str) -> Result<String, RegistrarError> {
    let trimmed = body.trim();
    if trimmed.starts_with('{') {
        let parsed: Value =
            serde_json::from_str(trimmed).map_err(|_| unexpected(body))?;
        return ["doi", "url"]
            .iter()
            .find_map(|key| parsed.get(*key).and_then(Value::as_str))
            .map(str::to_owned)
            .ok_or_else(|| unexpected(body));
    }
    if trimmed.is_empty() {
        return Err(unexpected(body));
    }
    Ok(trimmed.to_owned())
}

fn unexpected(body: &str) -> RegistrarError {
    RegistrarError::UnexpectedResponse {
        response: body.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://doi.org/10.1/x\n", "https://doi.org/10.1/x")]
    #[case(r#"{"doi": "https://doi.org/10.1/x"}"#, "https://doi.org/10.1/x")]
    #[case(r#"{"url": "https://doi.org/10.1/y", "status": "ok"}"#, "https://doi.org/10.1/y")]
    fn accepted_bodies(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(url_from_body(body).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   \n")]
    #[case(r#"{"status": "ok"}"#)]
    #[case("{not json")]
    fn rejected_bodies(#[case] body: &str) {
        let err = url_from_body(body).unwrap_err();
        assert!(matches!(err, RegistrarError::UnexpectedResponse { .. }), "got: {err}");
    }
}
