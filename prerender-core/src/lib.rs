//! Prerender core library: post types, metadata sidecar I/O, post discovery,
//! configuration.
//!
//! - [`types`]: newtypes and the [`MetadataRecord`] variant
//! - [`metadata`]: ensure / load / render `_metadata.yml`
//! - [`locator`]: find post directories
//! - [`config`]: `prerender.yaml`
//! - [`error`]: [`CoreError`]

pub mod config;
pub mod error;
pub mod locator;
pub mod metadata;
pub mod types;

pub use config::{BuildFailurePolicy, Config, RegistrarKind};
pub use error::CoreError;
pub use types::{Doi, MetadataRecord, PostDir, PostMetadata};
