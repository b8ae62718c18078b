//! # prerender-doi
//!
//! Identifier registration behind the [`Registrar`] trait.
//!
//! - [`LocalMinter`] mints checksummed identifiers without any network call.
//! - [`HttpRegistrar`] asks a remote service.
//! - [`register_identifier`] strips the `https://doi.org/` resolver and hands
//!   back a bare [`Doi`](prerender_core::Doi).

pub mod error;
pub mod http;
pub mod local;
pub mod registrar;

pub use error::RegistrarError;
pub use http::HttpRegistrar;
pub use local::LocalMinter;
pub use registrar::{register_identifier, strip_resolver, Registrar, DOI_RESOLVER};
