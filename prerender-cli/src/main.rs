//! Prerender: post metadata pre-build helper.
//!
//! # Usage
//!
//! ```text
//! prerender run [--root <dir>] [--posts-dir <dir>] [--prefix <p>]
//!               [--registrar local|http] [--registrar-url <url>]
//!               [--on-build-failure fail|warn] [--skip-build] [--dry-run] [--json]
//!               [-- <build command>...]
//! prerender status [--root <dir>] [--posts-dir <dir>] [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{run::RunArgs, status::StatusArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "prerender",
    version,
    about = "Fill in post metadata (date, DOI) and run the site build",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile every post's metadata, then run the build once.
    Run(RunArgs),

    /// Show what `run` would change, without writing or registering anything.
    Status(StatusArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => args.run(),
        Commands::Status(args) => args.run(),
    }
}

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
