//! `tagsync tags`: list origin tags in remote order.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};
use tagsync_sync::{RemoteTag, TagSync};

use super::{print_json, runner_for, SourceArgs};

/// Arguments for `tagsync tags`.
#[derive(Args, Debug)]
pub struct TagsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct TagJson<'a> {
    tag: &'a str,
    commit: &'a str,
    latest: bool,
}

#[derive(Tabled)]
struct TagTableRow {
    #[tabled(rename = "tag")]
    tag: String,
    #[tabled(rename = "commit")]
    commit: String,
    #[tabled(rename = "latest")]
    latest: String,
}

impl TagsArgs {
    pub fn run(self) -> Result<()> {
        let cfg = self.source.resolve()?;
        let origin = cfg.origin.clone();
        let tags = TagSync::new(runner_for(&cfg), cfg)
            .remote_tags()
            .with_context(|| format!("could not list tags of {origin}"))?;

        if self.json {
            let rows: Vec<TagJson<'_>> = tags
                .iter()
                .enumerate()
                .map(|(i, t)| TagJson {
                    tag: t.tag.as_str(),
                    commit: t.commit.as_str(),
                    latest: is_latest(i, &tags),
                })
                .collect();
            return print_json(&rows);
        }

        print_table(&tags);
        Ok(())
    }
}

/// Same rule as the sync: the last listed entry.
fn is_latest(index: usize, tags: &[RemoteTag]) -> bool {
    index + 1 == tags.len()
}

fn print_table(tags: &[RemoteTag]) {
    let rows: Vec<TagTableRow> = tags
        .iter()
        .enumerate()
        .map(|(i, t)| TagTableRow {
            tag: t.tag.to_string(),
            commit: t.commit.to_string(),
            latest: if is_latest(i, tags) {
                "✓".to_string()
            } else {
                String::new()
            },
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
