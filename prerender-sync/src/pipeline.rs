//! Pre-build pipeline entrypoint used by the CLI.
//!
//! find posts → create missing sidecars → reconcile each → build once.

use std::path::PathBuf;

use prerender_core::{locator, metadata, BuildFailurePolicy, Config};
use prerender_doi::Registrar;

use crate::build::{self, BuildCommand, BuildOutcome};
use crate::reconcile::{reconcile, ReconcileOptions, ReconcileOutcome};
use crate::SyncError;

/// Whether a run may touch the filesystem, the registrar, and the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Apply,
    /// Report what would change; no writes, no registrations, no build.
    DryRun,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Project root; the build runs here and `posts_dir` is resolved against it.
    pub root: PathBuf,
    pub posts_dir: PathBuf,
    pub metadata_file: String,
    pub doi_prefix: String,
    /// `None` skips the build step.
    pub build: Option<BuildCommand>,
    pub on_build_failure: BuildFailurePolicy,
}

impl Settings {
    /// Settings with the configured build command, which must not be empty.
    pub fn from_config(root: PathBuf, config: &Config) -> Result<Self, SyncError> {
        let build = BuildCommand::from_argv(&config.build.command)?;
        Ok(Self {
            build: Some(build),
            ..Self::without_build(root, config)
        })
    }

    /// Settings for runs that never build. The build command is not validated.
    pub fn without_build(root: PathBuf, config: &Config) -> Self {
        Self {
            posts_dir: config.posts_path(&root),
            root,
            metadata_file: config.metadata_file.clone(),
            doi_prefix: config.doi_prefix.clone(),
            build: None,
            on_build_failure: config.build.on_failure,
        }
    }
}

/// Everything a run did, in post order.
#[derive(Debug)]
pub struct RunSummary {
    pub posts: Vec<ReconcileOutcome>,
    /// Empty sidecars created during discovery.
    pub created: usize,
    pub build: BuildOutcome,
}

/// Run the pipeline.
///
/// Any I/O or registration failure aborts the run before the build starts.
pub fn run<R: Registrar + ?Sized>(
    settings: &Settings,
    registrar: &R,
    mode: RunMode,
) -> Result<RunSummary, SyncError> {
    let dry_run = mode == RunMode::DryRun;
    let posts = locator::find_posts(&settings.posts_dir)?;
    tracing::info!(count = posts.len(), dir = %settings.posts_dir.display(), "found posts");

    let mut created = 0;
    if !dry_run {
        for post in &posts {
            if metadata::ensure_record_exists(post, &settings.metadata_file)? {
                created += 1;
            }
        }
    }

    let opts = ReconcileOptions {
        metadata_file: &settings.metadata_file,
        doi_prefix: &settings.doi_prefix,
        dry_run,
    };
    let mut outcomes = Vec::with_capacity(posts.len());
    for post in &posts {
        outcomes.push(reconcile(post, registrar, &opts)?);
    }

    let build = match (&settings.build, dry_run) {
        (Some(command), false) => build::invoke(command, &settings.root, settings.on_build_failure)?,
        _ => BuildOutcome::Skipped,
    };

    Ok(RunSummary {
        posts: outcomes,
        created,
        build,
    })
}
