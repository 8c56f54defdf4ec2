pub mod config;
pub mod latest;
pub mod sync;
pub mod tags;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use tagsync_core::{config as config_file, RepoUrl, SyncConfig};
use tagsync_sync::GitRunner;

/// Where the sync config comes from. Shared by every command that talks to git.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// YAML config file to use instead of ~/.tagsync/config.yaml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Origin repository to read tags from (overrides the config file).
    #[arg(long, value_name = "URL")]
    pub origin: Option<String>,
}

impl SourceArgs {
    /// Config file (explicit or default) with `--origin` applied on top.
    pub fn resolve(&self) -> Result<SyncConfig> {
        let loaded = match &self.config {
            Some(path) => Some(
                config_file::load_from(path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
            ),
            None => load_default()?,
        };

        match (loaded, &self.origin) {
            (Some(mut cfg), Some(origin)) => {
                cfg.origin = RepoUrl::from(origin.as_str());
                Ok(cfg)
            }
            (Some(cfg), None) => Ok(cfg),
            (None, Some(origin)) => Ok(SyncConfig::new(origin.as_str())),
            (None, None) => {
                bail!("no origin configured; pass --origin or run `tagsync config init`")
            }
        }
    }
}

fn load_default() -> Result<Option<SyncConfig>> {
    let Some(home) = dirs::home_dir() else {
        return Ok(None);
    };
    config_file::load_at(&home).context("failed to load ~/.tagsync/config.yaml")
}

pub fn runner_for(cfg: &SyncConfig) -> GitRunner {
    match &cfg.repo_dir {
        Some(dir) => GitRunner::in_dir(dir),
        None => GitRunner::new(),
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("failed to serialize output")?
    );
    Ok(())
}
