//! Build invocation.
//!
//! Runs the site build once, after every post has been reconciled. The child
//! inherits stdin/stdout/stderr and runs in the project root.

use std::fmt;
use std::path::Path;
use std::process::Command;

use prerender_core::BuildFailurePolicy;

use crate::error::{describe_exit, SyncError};

/// Program plus arguments, e.g. `make` or `quarto render`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl BuildCommand {
    /// Split an argv vector into program and arguments.
    pub fn from_argv(argv: &[String]) -> Result<Self, SyncError> {
        match argv.split_first() {
            Some((program, args)) if !program.trim().is_empty() => Ok(Self {
                program: program.clone(),
                args: args.to_vec(),
            }),
            _ => Err(SyncError::EmptyBuildCommand),
        }
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// What happened to the build step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Exited with status 0.
    Succeeded,
    /// Exited unsuccessfully under [`BuildFailurePolicy::Warn`].
    FailedTolerated { code: Option<i32> },
    /// Not run: dry-run or explicitly skipped.
    Skipped,
}

/// Run `command` in `root` and apply `policy` to its exit status.
pub fn invoke(
    command: &BuildCommand,
    root: &Path,
    policy: BuildFailurePolicy,
) -> Result<BuildOutcome, SyncError> {
    tracing::info!(command = %command, "running build");
    let status = Command::new(&command.program)
        .args(&command.args)
        .current_dir(root)
        .status()
        .map_err(|e| SyncError::BuildSpawn {
            command: command.to_string(),
            source: e,
        })?;

    if status.success() {
        return Ok(BuildOutcome::Succeeded);
    }

    let code = status.code();
    match policy {
        BuildFailurePolicy::Fail => Err(SyncError::BuildFailed {
            command: command.to_string(),
            code,
        }),
        BuildFailurePolicy::Warn => {
            tracing::warn!(command = %command, "build failed ({}); continuing", describe_exit(&code));
            Ok(BuildOutcome::FailedTolerated { code })
        }
    }
}
