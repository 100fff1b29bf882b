//! plunk — keep tutorial files in sync with plnkr plunks.
//!
//! # Usage
//!
//! ```text
//! plunk init <web_path> --description <text>
//! plunk sync <web_path> --dir <dir> [--token <sessid>] [--incremental] [--dry-run]
//! plunk diff <web_path> --dir <dir>
//! plunk url <web_path>
//! plunk zip <web_path> [--output <file>]
//! plunk status [--json]
//! ```
//!
//! Remote calls are only made when `PLNKR_ENABLED` is set; otherwise plunks
//! get local stub ids.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    diff::DiffArgs, init::InitArgs, status::StatusArgs, sync::SyncArgs, url::UrlArgs,
    zip::ZipArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "plunk",
    version,
    about = "Sync tutorial files to plnkr plunks",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a tutorial in the local store.
    Init(InitArgs),

    /// Reconcile a tutorial with a directory and push it to plnkr.
    Sync(SyncArgs),

    /// Show unified diff of what sync would push for a tutorial.
    Diff(DiffArgs),

    /// Print the share URL of a tutorial's plunk.
    Url(UrlArgs),

    /// Package a tutorial's stored files as a zip archive.
    Zip(ZipArgs),

    /// List registered tutorials and their plunks.
    Status(StatusArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Sync(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Url(args) => args.run(),
        Commands::Zip(args) => args.run(),
        Commands::Status(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
