//! fsstamp — re-upload the LittleFS image only when `data/` changed.
//!
//! # Usage
//!
//! ```text
//! fsstamp run    -e <env> [--project-dir DIR] [--build-dir DIR] [--always] [--dry-run]
//! fsstamp status -e <env> [--project-dir DIR] [--build-dir DIR] [--json]
//! fsstamp hash   <dir>
//! ```
//!
//! Register `fsstamp run` as a PlatformIO post-action on the `upload` target;
//! the build context is read from `$PROJECT_DIR`, `$BUILD_DIR` and `$PIOENV`
//! when the flags are omitted.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{hash::HashArgs, run::RunArgs, status::StatusArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "fsstamp",
    version,
    about = "Re-upload a LittleFS image only when its data directory changed",
    long_about = None,
)]
struct Cli {
    /// Log decisions and file-level hashing details to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Post-upload hook: run `pio ... -t uploadfs` if data/ changed.
    Run(RunArgs),

    /// Show whether data/ differs from the last uploaded image.
    Status(StatusArgs),

    /// Print the fingerprint of a directory.
    Hash(HashArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Run(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Hash(args) => args.run(),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
