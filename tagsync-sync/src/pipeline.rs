//! The tag-sync procedure.
//!
//! ## `TagSync::run`: fixed command sequence
//!
//! 1. `git ls-remote --tags <origin>` → fail if blank.
//! 2. Keep `refs/tags/` lines, strip the prefix → fail if none remain.
//! 3. Latest tag = last of those lines.
//! 4. `git ls-remote <origin> refs/tags/<tag>` → first token is the commit;
//!    fail if there is none.
//! 5. `git rev-parse --abbrev-ref HEAD` → current branch.
//! 6. `git remote add <remote> <url>` (errors ignored; `ensure` policy only).
//! 7. `git fetch <origin> <commit>`
//! 8. `git merge --no-ff <commit>`
//! 9. `git push <remote> <branch>`
//!
//! The first failing step aborts the run. Earlier steps are not undone: a
//! failed push leaves the local merge commit in place.

use chrono::{DateTime, Utc};
use serde::Serialize;

use tagsync_core::{
    BranchName, CommitHash, RemoteName, RemoteSetup, RepoUrl, SyncConfig, TagName,
};

use crate::error::SyncError;
use crate::runner::CommandRunner;
use crate::tags::{self, RemoteTag};

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Latest tag on the origin and the commit it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTag {
    pub tag: TagName,
    pub commit: CommitHash,
}

/// Outcome of a completed [`TagSync::run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub origin: RepoUrl,
    pub tag: TagName,
    pub commit: CommitHash,
    pub branch: BranchName,
    pub destination_remote: RemoteName,
    /// `true` when fetch, merge and push were skipped.
    pub dry_run: bool,
    pub finished_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Synchronizes the latest origin tag into the current branch and pushes it.
pub struct TagSync<R> {
    runner: R,
    config: SyncConfig,
    dry_run: bool,
}

impl<R: CommandRunner> TagSync<R> {
    pub fn new(runner: R, config: SyncConfig) -> Self {
        Self {
            runner,
            config,
            dry_run: false,
        }
    }

    /// Stop after resolving the branch; nothing in the working copy or on
    /// the destination is modified.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the whole procedure.
    pub fn run(&self) -> Result<SyncReport, SyncError> {
        self.config.validate()?;
        let origin = &self.config.origin;
        let remote = &self.config.destination_remote;

        tracing::info!("fetching latest tag from {origin}");
        let ResolvedTag { tag, commit } = self.resolve_latest()?;
        tracing::info!("latest tag: {tag}");
        tracing::info!("commit hash: {commit}");

        let branch = self.current_branch()?;
        tracing::info!("current branch: {branch}");

        if self.dry_run {
            tracing::info!(
                "[dry-run] would merge {tag} ({commit}) and push {branch} to {remote}"
            );
            return Ok(self.report(tag, commit, branch));
        }

        if self.config.remote_setup == RemoteSetup::Ensure {
            self.ensure_remote()?;
        }

        self.git(&["fetch", origin.as_str(), commit.as_str()], false)?;
        tracing::info!("fetched {commit}");

        self.git(&["merge", "--no-ff", commit.as_str()], false)?;
        tracing::info!("merged {commit} into {branch}");

        self.git(&["push", remote.as_str(), branch.as_str()], false)?;
        tracing::info!("synced {tag} ({commit}) from {origin} to {remote} branch {branch}");

        Ok(self.report(tag, commit, branch))
    }

    /// Steps 1–4: pick the latest tag and resolve its commit.
    pub fn resolve_latest(&self) -> Result<ResolvedTag, SyncError> {
        let listing = self.tag_listing()?;
        let tags = tags::parse_tag_listing(&listing);
        let tag = tags::latest_tag(&tags)
            .cloned()
            .ok_or_else(|| SyncError::NoValidTags {
                origin: self.config.origin.clone(),
            })?;

        let tag_ref = tag.as_ref_path();
        let response = self.git(&["ls-remote", self.config.origin.as_str(), &tag_ref], false)?;
        let commit = tags::parse_commit_hash(&response);
        if commit.as_str().is_empty() {
            return Err(SyncError::TagNotResolved {
                tag,
                origin: self.config.origin.clone(),
            });
        }
        Ok(ResolvedTag { tag, commit })
    }

    /// Every tag on the origin in listing order, with the hash from its line.
    pub fn remote_tags(&self) -> Result<Vec<RemoteTag>, SyncError> {
        let listing = self.tag_listing()?;
        let tags = tags::list_remote_tags(&listing);
        if tags.is_empty() {
            return Err(SyncError::NoValidTags {
                origin: self.config.origin.clone(),
            });
        }
        Ok(tags)
    }

    /// Name of the checked-out branch in the working copy.
    pub fn current_branch(&self) -> Result<BranchName, SyncError> {
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"], false)
            .map(BranchName::from)
    }

    fn tag_listing(&self) -> Result<String, SyncError> {
        let origin = self.config.origin.as_str();
        let listing = self.git(&["ls-remote", "--tags", origin], false)?;
        if listing.trim().is_empty() {
            return Err(SyncError::NoTagsFound {
                origin: self.config.origin.clone(),
            });
        }
        Ok(listing)
    }

    fn ensure_remote(&self) -> Result<(), SyncError> {
        let remote = &self.config.destination_remote;
        let url = self
            .config
            .destination_url
            .as_ref()
            .map(RepoUrl::as_str)
            .unwrap_or_default();
        self.git(&["remote", "add", remote.as_str(), url], true)?;
        tracing::debug!("ensured remote {remote} -> {url}");
        Ok(())
    }

    fn git(&self, args: &[&str], ignore_error: bool) -> Result<String, SyncError> {
        let argv: Vec<String> = std::iter::once(self.config.git.as_str())
            .chain(args.iter().copied())
            .map(str::to_owned)
            .collect();
        self.runner.run(&argv, ignore_error)
    }

    fn report(&self, tag: TagName, commit: CommitHash, branch: BranchName) -> SyncReport {
        SyncReport {
            origin: self.config.origin.clone(),
            tag,
            commit,
            branch,
            destination_remote: self.config.destination_remote.clone(),
            dry_run: self.dry_run,
            finished_at: Utc::now(),
        }
    }
}
