//! Domain types shared by the sync pipeline and the CLI.
//!
//! Every value that flows between two `git` invocations gets its own newtype so
//! a tag can never be passed where a commit hash is expected.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

string_newtype!(
    /// Locator of a repository: a URL or a local path, passed verbatim to `git`.
    RepoUrl
);

string_newtype!(
    /// Name of a remote configured in the local working copy (e.g. `mma`).
    RemoteName
);

string_newtype!(
    /// Bare tag name, without the `refs/tags/` prefix.
    TagName
);

string_newtype!(
    /// Commit object id as printed by `git ls-remote`.
    CommitHash
);

string_newtype!(
    /// Name of the currently checked-out local branch.
    BranchName
);

/// Prefix of every tag ref, both in `git ls-remote` output and in queries.
pub const TAG_REF_MARKER: &str = "refs/tags/";

impl TagName {
    /// Fully qualified ref for this tag.
    pub fn as_ref_path(&self) -> String {
        format!("{TAG_REF_MARKER}{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How the destination remote comes to exist in the working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RemoteSetup {
    /// The remote must already be configured; tagsync never touches it.
    #[default]
    Precondition,
    /// Run `git remote add` before fetching and ignore its failure.
    Ensure,
}

impl fmt::Display for RemoteSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteSetup::Precondition => write!(f, "precondition"),
            RemoteSetup::Ensure => write!(f, "ensure"),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

pub const DEFAULT_DESTINATION_REMOTE: &str = "mma";
pub const DEFAULT_GIT: &str = "git";

fn default_destination_remote() -> RemoteName {
    RemoteName::from(DEFAULT_DESTINATION_REMOTE)
}

fn default_git() -> String {
    DEFAULT_GIT.to_string()
}

/// Everything a sync run needs besides the command runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Repository the tags are read from.
    pub origin: RepoUrl,
    #[serde(default = "default_destination_remote")]
    pub destination_remote: RemoteName,
    /// URL registered for `destination_remote` when `remote_setup` is `ensure`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_url: Option<RepoUrl>,
    #[serde(default)]
    pub remote_setup: RemoteSetup,
    /// Program used for every invocation.
    #[serde(default = "default_git")]
    pub git: String,
    /// Working copy to run in; the process cwd when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_dir: Option<PathBuf>,
}

impl SyncConfig {
    pub fn new(origin: impl Into<RepoUrl>) -> Self {
        Self {
            origin: origin.into(),
            destination_remote: default_destination_remote(),
            destination_url: None,
            remote_setup: RemoteSetup::default(),
            git: default_git(),
            repo_dir: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
