//! Project location and config layering shared by `run` and `status`.
//!
//! Precedence: flag / env var > `prerender.yaml` > built-in default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use prerender_core::{config, Config};

#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Project root holding `prerender.yaml`; the build runs here.
    #[arg(long, env = "PRERENDER_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Posts directory, relative to the root (default: posts).
    #[arg(long, env = "PRERENDER_POSTS_DIR", value_name = "DIR")]
    pub posts_dir: Option<PathBuf>,

    /// Metadata sidecar file name inside each post (default: _metadata.yml).
    #[arg(long, env = "PRERENDER_METADATA_FILE", value_name = "NAME")]
    pub metadata_file: Option<String>,

    /// Emit a machine-readable JSON report on stdout.
    #[arg(long)]
    pub json: bool,
}

impl ProjectArgs {
    /// Canonical project root.
    pub fn root(&self) -> Result<PathBuf> {
        self.root
            .canonicalize()
            .with_context(|| format!("cannot resolve project root '{}'", self.root.display()))
    }

    /// Load `prerender.yaml` from `root` and apply the flags on top.
    pub fn load_config(&self, root: &std::path::Path) -> Result<Config> {
        let mut config = config::load_at(root).with_context(|| {
            format!(
                "failed to load {}",
                config::config_path_at(root).display()
            )
        })?;
        if let Some(posts_dir) = &self.posts_dir {
            config.posts_dir = posts_dir.clone();
        }
        if let Some(metadata_file) = &self.metadata_file {
            config.metadata_file = metadata_file.clone();
        }
        tracing::debug!(root = %root.display(), posts_dir = %config.posts_dir.display(), "resolved configuration");
        Ok(config)
    }
}
