//! Metadata reconciliation.
//!
//! Brings one post's `_metadata.yml` into shape:
//!
//! | parsed record              | action                                   |
//! |----------------------------|------------------------------------------|
//! | absent (empty file)        | write `{date, doi}`                      |
//! | not a mapping              | warn, leave the file alone               |
//! | date current, doi present  | nothing                                  |
//! | anything else              | fill `doi` if missing, fix `date`, write |
//!
//! A present `doi` key is never replaced, even when its value is null or
//! blank. Identifiers are registered only when the key is missing, and never
//! in dry-run mode.

use serde_yaml::Value;

use prerender_core::{metadata, MetadataRecord, PostDir, PostMetadata};
use prerender_doi::{register_identifier, Registrar};

use crate::error::SyncError;
use crate::writer::atomic_write;

/// Fields a reconciliation pass (re)wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fix {
    /// The record was absent and has been populated from scratch.
    pub populated: bool,
    pub date: bool,
    pub doi: bool,
}

impl Fix {
    fn any(&self) -> bool {
        self.populated || self.date || self.doi
    }
}

/// Outcome of reconciling a single post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The metadata file was rewritten.
    Written { post: PostDir, fix: Fix },
    /// Dry-run: the file *would* have been rewritten.
    WouldWrite { post: PostDir, fix: Fix },
    /// Already consistent; no I/O beyond the read.
    Unchanged { post: PostDir },
    /// The file holds something other than a mapping and was left untouched.
    SkippedMalformed { post: PostDir },
}

impl ReconcileOutcome {
    pub fn post(&self) -> &PostDir {
        match self {
            ReconcileOutcome::Written { post, .. }
            | ReconcileOutcome::WouldWrite { post, .. }
            | ReconcileOutcome::Unchanged { post }
            | ReconcileOutcome::SkippedMalformed { post } => post,
        }
    }
}

/// Knobs shared by every post in a run.
#[derive(Debug, Clone, Copy)]
pub struct ReconcileOptions<'a> {
    /// Sidecar file name inside the post directory.
    pub metadata_file: &'a str,
    /// Namespace prefix passed to the registrar.
    pub doi_prefix: &'a str,
    pub dry_run: bool,
}

/// Reconcile the metadata file of `post`.
///
/// Performs at most one write. Outside dry-run the file must exist (see
/// [`prerender_core::metadata::ensure_record_exists`]); in dry-run a missing
/// file is treated as an empty one.
pub fn reconcile<R: Registrar + ?Sized>(
    post: &PostDir,
    registrar: &R,
    opts: &ReconcileOptions<'_>,
) -> Result<ReconcileOutcome, SyncError> {
    let path = post.metadata_path(opts.metadata_file);
    let record = if opts.dry_run && !path.exists() {
        MetadataRecord::Absent
    } else {
        metadata::load_record(&path)?
    };

    let date = post.date_token();
    if post.calendar_date().is_none() {
        tracing::warn!(post = %post, token = %date, "post name does not start with a YYYY-MM-DD date");
    }

    let (mut meta, fix) = match record {
        MetadataRecord::Absent => (
            PostMetadata::default(),
            Fix {
                populated: true,
                date: true,
                doi: true,
            },
        ),
        MetadataRecord::Malformed(_) => {
            tracing::warn!(post = %post, "non-mapping metadata; skipping");
            return Ok(ReconcileOutcome::SkippedMalformed { post: post.clone() });
        }
        MetadataRecord::Valid(meta) => {
            let fix = Fix {
                populated: false,
                date: !meta.date_matches(&date),
                doi: !meta.has_doi(),
            };
            (meta, fix)
        }
    };

    if !fix.any() {
        tracing::debug!(post = %post, "metadata up to date");
        return Ok(ReconcileOutcome::Unchanged { post: post.clone() });
    }

    if opts.dry_run {
        tracing::info!(post = %post, "[dry-run] would update metadata");
        return Ok(ReconcileOutcome::WouldWrite {
            post: post.clone(),
            fix,
        });
    }

    if fix.doi {
        let doi = register_identifier(registrar, opts.doi_prefix)?;
        meta.doi = Some(Value::String(doi.0));
    }
    if fix.date {
        meta.date = Some(Value::String(date));
    }

    let yaml = metadata::render_record(&meta)?;
    atomic_write(&path, &yaml)?;
    tracing::info!(post = %post, date = fix.date, doi = fix.doi, "metadata updated");

    Ok(ReconcileOutcome::Written {
        post: post.clone(),
        fix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;

    use prerender_core::metadata::DEFAULT_METADATA_FILE;
    use prerender_doi::RegistrarError;
    use tempfile::TempDir;

    struct Failing {
        calls: Cell<usize>,
    }

    impl Registrar for Failing {
        fn register(&self, _prefix: &str) -> Result<String, RegistrarError> {
            self.calls.set(self.calls.get() + 1);
            Err(RegistrarError::UnexpectedResponse {
                response: "down".into(),
            })
        }
    }

    fn opts(dry_run: bool) -> ReconcileOptions<'static> {
        ReconcileOptions {
            metadata_file: DEFAULT_METADATA_FILE,
            doi_prefix: "10.59350",
            dry_run,
        }
    }

    fn post_with(tmp: &TempDir, contents: Option<&str>) -> PostDir {
        let dir = tmp.path().join("2024").join("06").join("2024-06-01_my-post");
        fs::create_dir_all(&dir).unwrap();
        if let Some(contents) = contents {
            fs::write(dir.join(DEFAULT_METADATA_FILE), contents).unwrap();
        }
        PostDir(dir)
    }

    #[test]
    fn registration_failure_propagates_and_leaves_file() {
        let tmp = TempDir::new().unwrap();
        let post = post_with(&tmp, Some(""));
        let registrar = Failing { calls: Cell::new(0) };
        let err = reconcile(&post, &registrar, &opts(false)).unwrap_err();
        assert!(matches!(err, SyncError::Registrar(_)), "got: {err}");
        assert_eq!(registrar.calls.get(), 1);
        assert_eq!(fs::read_to_string(post.metadata_path(DEFAULT_METADATA_FILE)).unwrap(), "");
    }

    #[test]
    fn date_only_fix_never_calls_registrar() {
        let tmp = TempDir::new().unwrap();
        let post = post_with(&tmp, Some("date: 2020-01-01\ndoi: 10.59350/abcd\n"));
        let registrar = Failing { calls: Cell::new(0) };
        let outcome = reconcile(&post, &registrar, &opts(false)).unwrap();
        assert!(matches!(
            outcome,
            ReconcileOutcome::Written {
                fix: Fix { date: true, doi: false, populated: false },
                ..
            }
        ));
        assert_eq!(registrar.calls.get(), 0);
    }

    #[test]
    fn dry_run_on_missing_file_reports_populate() {
        let tmp = TempDir::new().unwrap();
        let post = post_with(&tmp, None);
        let registrar = Failing { calls: Cell::new(0) };
        let outcome = reconcile(&post, &registrar, &opts(true)).unwrap();
        match outcome {
            ReconcileOutcome::WouldWrite { fix, .. } => assert!(fix.populated),
            other => panic!("expected WouldWrite, got {other:?}"),
        }
        assert_eq!(registrar.calls.get(), 0);
        assert!(!post.metadata_path(DEFAULT_METADATA_FILE).exists());
    }

    #[test]
    fn missing_file_outside_dry_run_is_error() {
        let tmp = TempDir::new().unwrap();
        let post = post_with(&tmp, None);
        let registrar = Failing { calls: Cell::new(0) };
        let err = reconcile(&post, &registrar, &opts(false)).unwrap_err();
        assert!(matches!(err, SyncError::Core(_)), "got: {err}");
    }

    #[test]
    fn blank_doi_with_current_date_is_left_alone() {
        let tmp = TempDir::new().unwrap();
        let post = post_with(&tmp, Some("date: 2024-06-01\ndoi: \"\"\n"));
        let registrar = Failing { calls: Cell::new(0) };
        let outcome = reconcile(&post, &registrar, &opts(false)).unwrap();
        assert!(matches!(outcome, ReconcileOutcome::Unchanged { .. }));
        assert_eq!(registrar.calls.get(), 0);
        assert_eq!(
            fs::read_to_string(post.metadata_path(DEFAULT_METADATA_FILE)).unwrap(),
            "date: 2024-06-01\ndoi: \"\"\n"
        );
    }

    #[test]
    fn outcome_exposes_post() {
        let post = PostDir::from("a/b/c");
        let outcome = ReconcileOutcome::Unchanged { post: post.clone() };
        assert_eq!(outcome.post(), &post);
    }
}
