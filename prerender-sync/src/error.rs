//! Error types for prerender-sync.

use std::path::PathBuf;

use thiserror::Error;

use prerender_core::CoreError;
use prerender_doi::RegistrarError;

/// All errors that can abort a reconciliation run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Metadata load, parse, or post discovery failed.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// The identifier registrar failed or answered with garbage.
    #[error("identifier registration failed: {0}")]
    Registrar(#[from] RegistrarError),

    /// An I/O error while writing, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured build command has no program.
    #[error("build command is empty")]
    EmptyBuildCommand,

    /// The build program could not be started.
    #[error("failed to start build command `{command}`: {source}")]
    BuildSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The build ran and exited unsuccessfully.
    #[error("build command `{command}` failed ({})", describe_exit(.code))]
    BuildFailed { command: String, code: Option<i32> },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}

pub(crate) fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_owned(),
    }
}
