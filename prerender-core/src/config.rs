//! Project configuration (`prerender.yaml`).
//!
//! # Layout
//!
//! ```yaml
//! posts_dir: posts
//! metadata_file: _metadata.yml
//! doi_prefix: "10.59350"
//! registrar:
//!   kind: local        # or http
//!   endpoint: null     # required for http
//! build:
//!   command: [make]
//!   on_failure: fail   # or warn
//! ```
//!
//! Every key is optional. A missing file means all defaults. Command-line
//! flags are layered on top by the binary.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{io_err, CoreError};
use crate::metadata::DEFAULT_METADATA_FILE;

/// Config file name, looked up in the project root.
pub const CONFIG_FILE: &str = "prerender.yaml";

/// Namespace prefix handed to the registrar.
pub const DEFAULT_DOI_PREFIX: &str = "10.59350";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which identifier registrar to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RegistrarKind {
    /// Mint identifiers locally.
    #[default]
    Local,
    /// Ask a remote registrar over HTTP.
    Http,
}

impl fmt::Display for RegistrarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrarKind::Local => write!(f, "local"),
            RegistrarKind::Http => write!(f, "http"),
        }
    }
}

impl FromStr for RegistrarKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "http" => Ok(Self::Http),
            other => Err(format!("unknown registrar '{other}'; expected: local, http")),
        }
    }
}

/// What to do when the build command exits non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildFailurePolicy {
    /// Abort the run with a non-zero exit status.
    #[default]
    Fail,
    /// Log a warning and finish successfully.
    Warn,
}

impl fmt::Display for BuildFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildFailurePolicy::Fail => write!(f, "fail"),
            BuildFailurePolicy::Warn => write!(f, "warn"),
        }
    }
}

impl FromStr for BuildFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "warn" => Ok(Self::Warn),
            other => Err(format!("unknown build failure policy '{other}'; expected: fail, warn")),
        }
    }
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrarConfig {
    pub kind: RegistrarKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Program followed by its arguments.
    pub command: Vec<String>,
    pub on_failure: BuildFailurePolicy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            command: vec!["make".to_owned()],
            on_failure: BuildFailurePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Posts base directory, relative to the project root unless absolute.
    pub posts_dir: PathBuf,
    pub metadata_file: String,
    pub doi_prefix: String,
    pub registrar: RegistrarConfig,
    pub build: BuildConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("posts"),
            metadata_file: DEFAULT_METADATA_FILE.to_owned(),
            doi_prefix: DEFAULT_DOI_PREFIX.to_owned(),
            registrar: RegistrarConfig::default(),
            build: BuildConfig::default(),
        }
    }
}

impl Config {
    /// `posts_dir` resolved against `root`.
    pub fn posts_path(&self, root: &Path) -> PathBuf {
        root.join(&self.posts_dir)
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// `<root>/prerender.yaml`. Pure, no I/O.
pub fn config_path_at(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Load `<root>/prerender.yaml`, falling back to defaults when absent or empty.
///
/// Returns `CoreError::Parse` (with path + line context) on malformed YAML or
/// unknown keys.
pub fn load_at(root: &Path) -> Result<Config, CoreError> {
    let path = config_path_at(root);
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| CoreError::Parse { path, source: e })
}
