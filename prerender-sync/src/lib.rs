//! # prerender-sync
//!
//! Metadata reconciliation and the pre-build pipeline.
//!
//! Call [`reconcile`] to bring a single post's sidecar up to date, or
//! [`pipeline::run`] to process every post and then run the build.

pub mod build;
pub mod error;
pub mod pipeline;
pub mod reconcile;
pub mod writer;

pub use build::{BuildCommand, BuildOutcome};
pub use error::SyncError;
pub use pipeline::{RunMode, RunSummary, Settings};
pub use reconcile::{reconcile, Fix, ReconcileOptions, ReconcileOutcome};
