//! `tagsync latest`: show the tag a sync would pick.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tagsync_sync::TagSync;

use super::{print_json, runner_for, SourceArgs};

/// Arguments for `tagsync latest`.
#[derive(Args, Debug)]
pub struct LatestArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Emit `{ "tag": …, "commit": … }` as JSON.
    #[arg(long)]
    pub json: bool,
}

impl LatestArgs {
    pub fn run(self) -> Result<()> {
        let cfg = self.source.resolve()?;
        let origin = cfg.origin.clone();
        let resolved = TagSync::new(runner_for(&cfg), cfg)
            .resolve_latest()
            .with_context(|| format!("could not resolve latest tag of {origin}"))?;

        if self.json {
            return print_json(&resolved);
        }
        println!("{} {}", resolved.tag.as_str().bold(), resolved.commit);
        Ok(())
    }
}
