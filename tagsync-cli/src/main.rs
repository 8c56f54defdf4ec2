//! tagsync: merge the latest origin tag into the current branch and push it
//! to a destination remote.
//!
//! # Usage
//!
//! ```text
//! tagsync sync [--origin <url>] [--remote <name>] [--ensure-remote --destination-url <url>]
//!              [--repo <dir>] [--dry-run] [--json]
//! tagsync latest [--origin <url>] [--json]
//! tagsync tags [--origin <url>] [--json]
//! tagsync config init --origin <url> [--remote <name>] [--force]
//! tagsync config show
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    config::ConfigCommand, latest::LatestArgs, sync::SyncArgs, tags::TagsArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "tagsync",
    version,
    about = "Sync the latest tag of one git remote into another",
    long_about = None,
)]
struct Cli {
    /// Log every git invocation (same as RUST_LOG=debug).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the latest origin tag, merge it with --no-ff and push the branch.
    Sync(SyncArgs),

    /// Print the tag `sync` would pick and its commit.
    Latest(LatestArgs),

    /// List every tag on the origin.
    Tags(TagsArgs),

    /// Manage ~/.tagsync/config.yaml.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Latest(args) => args.run(),
        Commands::Tags(args) => args.run(),
        Commands::Config { command } => commands::config::run(command),
    }
}

/// Progress goes to stderr so `--json` output on stdout stays clean.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
