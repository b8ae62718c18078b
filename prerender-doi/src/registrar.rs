//! The registrar seam and the resolver-prefix adapter.
//!
//! Registrars answer with a resolver URL (`https://doi.org/10.59350/abcd`).
//! Only the part after [`DOI_RESOLVER`] is stored in metadata, and
//! [`register_identifier`] is the one place that strips it.

use prerender_core::types::Doi;

use crate::error::RegistrarError;

/// Resolver prefix every registrar response must start with.
pub const DOI_RESOLVER: &str = "https://doi.org/";

/// Something that mints a new identifier under a namespace prefix.
///
/// Every call consumes an identifier, so callers must only register when a
/// record genuinely lacks one.
pub trait Registrar {
    /// Register a new identifier under `prefix` and return its resolver URL.
    fn register(&self, prefix: &str) -> Result<String, RegistrarError>;
}

impl<R: Registrar + ?Sized> Registrar for &R {
    fn register(&self, prefix: &str) -> Result<String, RegistrarError> {
        (**self).register(prefix)
    }
}

impl<R: Registrar + ?Sized> Registrar for Box<R> {
    fn register(&self, prefix: &str) -> Result<String, RegistrarError> {
        (**self).register(prefix)
    }
}

/// Register one identifier and return it without the resolver prefix.
pub fn register_identifier<R: Registrar + ?Sized>(
    registrar: &R,
    prefix: &str,
) -> Result<Doi, RegistrarError> {
    validate_prefix(prefix)?;
    let url = registrar.register(prefix)?;
    let doi = strip_resolver(&url)?;
    tracing::info!(doi = %doi, "registered identifier");
    Ok(doi)
}

/// `https://doi.org/10.59350/abcd` → `10.59350/abcd`.
pub fn strip_resolver(url: &str) -> Result<Doi, RegistrarError> {
    let trimmed = url.trim();
    match trimmed.strip_prefix(DOI_RESOLVER) {
        Some(suffix) if !suffix.is_empty() => Ok(Doi::from(suffix)),
        _ => Err(RegistrarError::UnexpectedResponse {
            response: url.to_owned(),
        }),
    }
}

pub(crate) fn validate_prefix(prefix: &str) -> Result<(), RegistrarError> {
    if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
        return Err(RegistrarError::InvalidPrefix(prefix.to_owned()));
    }
    Ok(())
}
