//! Error types for tagsync-sync.

use thiserror::Error;

use tagsync_core::{ConfigError, RepoUrl, TagName};

/// All errors that can abort a sync run. None of them is retried.
#[derive(Debug, Error)]
pub enum SyncError {
    /// `git ls-remote --tags` printed nothing.
    #[error("no tags found in {origin}")]
    NoTagsFound { origin: RepoUrl },

    /// The listing had output but no line carried a `refs/tags/` ref.
    #[error("no valid tags found in {origin}")]
    NoValidTags { origin: RepoUrl },

    /// The single-ref query for the selected tag printed no commit.
    #[error("tag {tag} did not resolve to a commit in {origin}")]
    TagNotResolved { tag: TagName, origin: RepoUrl },

    /// A command exited non-zero and the call site did not ignore it.
    #[error("command failed: {command}\n{output}")]
    CommandFailed { command: String, output: String },

    /// The program could not be started at all.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The config handed to the orchestrator cannot drive a run.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
