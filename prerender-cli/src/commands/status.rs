//! `prerender status`: dry-run view of what `run` would change.

use anyhow::{Context, Result};
use clap::Args;

use prerender_doi::LocalMinter;
use prerender_sync::pipeline::{self, RunMode, Settings};

use super::{project::ProjectArgs, report};

/// Arguments for `prerender status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let root = self.project.root()?;
        let config = self.project.load_config(&root)?;
        let settings = Settings::without_build(root, &config);

        // Dry runs never register, so the registrar choice is irrelevant here.
        let summary = pipeline::run(&settings, &LocalMinter::new(), RunMode::DryRun)
            .context("prerender status failed")?;

        if self.project.json {
            report::print_json(&summary, true)?;
        } else {
            report::print_human(&summary, true);
        }
        Ok(())
    }
}
