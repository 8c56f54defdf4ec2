//! `tagsync sync`: merge the latest origin tag and push to the destination.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tagsync_core::{RemoteName, RemoteSetup, RepoUrl};
use tagsync_sync::{SyncReport, TagSync};

use super::{print_json, runner_for, SourceArgs};

/// Arguments for `tagsync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Name of the destination remote in the working copy.
    #[arg(long, value_name = "NAME")]
    pub remote: Option<String>,

    /// URL registered for the destination remote with `--ensure-remote`.
    #[arg(long, value_name = "URL")]
    pub destination_url: Option<String>,

    /// Run `git remote add` for the destination first, ignoring failures.
    #[arg(long)]
    pub ensure_remote: bool,

    /// Working copy to sync (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Resolve tag, commit and branch but skip fetch, merge and push.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the sync report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let mut cfg = self.source.resolve()?;
        if let Some(remote) = self.remote {
            cfg.destination_remote = RemoteName::from(remote);
        }
        if let Some(url) = self.destination_url {
            cfg.destination_url = Some(RepoUrl::from(url));
        }
        if self.ensure_remote {
            cfg.remote_setup = RemoteSetup::Ensure;
        }
        if self.repo.is_some() {
            cfg.repo_dir = self.repo;
        }

        let origin = cfg.origin.clone();
        let report = TagSync::new(runner_for(&cfg), cfg)
            .dry_run(self.dry_run)
            .run()
            .with_context(|| format!("sync from {origin} failed"))?;

        if self.json {
            return print_json(&report);
        }
        print_report(&report);
        Ok(())
    }
}

fn print_report(report: &SyncReport) {
    if report.dry_run {
        println!(
            "[dry-run] would sync {} ({}) into {} and push to {}",
            report.tag.as_str().bold(),
            report.commit.as_str().dimmed(),
            report.branch,
            report.destination_remote
        );
        return;
    }
    println!(
        "{} synced {} ({}) from {} → {} branch {}",
        "✓".green(),
        report.tag.as_str().bold(),
        report.commit.as_str().dimmed(),
        report.origin,
        report.destination_remote,
        report.branch
    );
}
