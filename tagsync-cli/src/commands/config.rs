//! `tagsync config`: write and inspect the YAML config.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use colored::Colorize;
use tagsync_core::{config, RemoteName, RemoteSetup, RepoUrl, SyncConfig};

use super::SourceArgs;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write ~/.tagsync/config.yaml.
    Init {
        /// Origin repository to read tags from.
        #[arg(long, value_name = "URL")]
        origin: String,

        /// Destination remote name.
        #[arg(long, value_name = "NAME")]
        remote: Option<String>,

        /// URL for the destination remote (needed with --ensure-remote).
        #[arg(long, value_name = "URL")]
        destination_url: Option<String>,

        /// Register the destination remote on every sync instead of requiring it.
        #[arg(long)]
        ensure_remote: bool,

        /// git program to invoke.
        #[arg(long, value_name = "PROGRAM")]
        git: Option<String>,

        /// Working copy to sync; stored as an absolute path.
        #[arg(long, value_name = "DIR")]
        repo: Option<PathBuf>,

        /// Overwrite an existing config.
        #[arg(long)]
        force: bool,
    },

    /// Print the effective config as YAML.
    Show {
        #[command(flatten)]
        source: SourceArgs,
    },
}

pub fn run(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init {
            origin,
            remote,
            destination_url,
            ensure_remote,
            git,
            repo,
            force,
        } => {
            let home = dirs::home_dir().context("could not determine home directory")?;
            let path = config::config_path_at(&home);
            if path.exists() && !force {
                bail!(
                    "config already exists at {}; pass --force to overwrite",
                    path.display()
                );
            }

            let mut cfg = SyncConfig::new(origin);
            if let Some(remote) = remote {
                cfg.destination_remote = RemoteName::from(remote);
            }
            cfg.destination_url = destination_url.map(RepoUrl::from);
            if ensure_remote {
                cfg.remote_setup = RemoteSetup::Ensure;
            }
            if let Some(git) = git {
                cfg.git = git;
            }
            cfg.repo_dir = repo
                .map(|dir| {
                    dir.canonicalize()
                        .with_context(|| format!("cannot resolve --repo {}", dir.display()))
                })
                .transpose()?;
            cfg.validate()?;

            let written = config::save_at(&home, &cfg)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{} wrote {}", "✓".green(), written.display());
            Ok(())
        }
        ConfigCommand::Show { source } => {
            let cfg = source.resolve()?;
            print!("{}", serde_yaml::to_string(&cfg).context("failed to render config")?);
            Ok(())
        }
    }
}
