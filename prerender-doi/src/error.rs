//! Error types for prerender-doi.

use thiserror::Error;

/// All errors that can arise while obtaining an identifier.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// The namespace prefix was empty or contained whitespace.
    #[error("invalid DOI prefix '{0}'")]
    InvalidPrefix(String),

    /// Transport failure or non-2xx status from an HTTP registrar.
    #[error("registrar request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    /// The response body could not be read.
    #[error("failed to read registrar response from {endpoint}: {source}")]
    Io {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// The registrar answered with something that is not a resolver URL.
    #[error("unexpected registrar response: {response:?}")]
    UnexpectedResponse { response: String },
}
