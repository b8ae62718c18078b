//! `prerender run`: reconcile every post's metadata, then build.

use anyhow::{bail, Context, Result};
use clap::Args;

use prerender_core::{config::RegistrarConfig, BuildFailurePolicy, RegistrarKind};
use prerender_doi::{HttpRegistrar, LocalMinter, Registrar};
use prerender_sync::pipeline::{self, RunMode, Settings};

use super::{project::ProjectArgs, report};

/// Arguments for `prerender run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// DOI namespace prefix (default: 10.59350).
    #[arg(long, env = "PRERENDER_DOI_PREFIX", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Identifier registrar: local | http.
    #[arg(long, value_name = "KIND")]
    pub registrar: Option<RegistrarKind>,

    /// Endpoint for the http registrar.
    #[arg(long, env = "PRERENDER_REGISTRAR_URL", value_name = "URL")]
    pub registrar_url: Option<String>,

    /// What a failing build does to the run: fail | warn.
    #[arg(long, value_name = "POLICY")]
    pub on_build_failure: Option<BuildFailurePolicy>,

    /// Reconcile metadata but do not run the build.
    #[arg(long)]
    pub skip_build: bool,

    /// Show what would change without writing files, registering DOIs, or building.
    #[arg(long)]
    pub dry_run: bool,

    /// Build command and its arguments (default: make).
    #[arg(last = true, value_name = "BUILD_CMD")]
    pub build: Vec<String>,
}

impl RunArgs {
    pub fn run(self) -> Result<()> {
        let root = self.project.root()?;
        let mut config = self.project.load_config(&root)?;

        if let Some(prefix) = &self.prefix {
            config.doi_prefix = prefix.clone();
        }
        if let Some(kind) = self.registrar {
            config.registrar.kind = kind;
        }
        if let Some(url) = &self.registrar_url {
            config.registrar.endpoint = Some(url.clone());
        }
        if let Some(policy) = self.on_build_failure {
            config.build.on_failure = policy;
        }
        if !self.build.is_empty() {
            config.build.command = self.build.clone();
        }

        let settings = if self.skip_build {
            Settings::without_build(root, &config)
        } else {
            Settings::from_config(root, &config).context("invalid build configuration")?
        };
        let registrar = make_registrar(&config.registrar)?;

        let mode = if self.dry_run { RunMode::DryRun } else { RunMode::Apply };
        let summary = pipeline::run(&settings, registrar.as_ref(), mode)
            .context("prerender run failed")?;

        if self.project.json {
            report::print_json(&summary, self.dry_run)?;
        } else {
            report::print_human(&summary, self.dry_run);
        }
        Ok(())
    }
}

fn make_registrar(config: &RegistrarConfig) -> Result<Box<dyn Registrar>> {
    match config.kind {
        RegistrarKind::Local => Ok(Box::new(LocalMinter::new())),
        RegistrarKind::Http => {
            let Some(endpoint) = config.endpoint.clone() else {
                bail!("the http registrar needs an endpoint; pass --registrar-url or set registrar.endpoint");
            };
            Ok(Box::new(HttpRegistrar::new(endpoint)))
        }
    }
}
