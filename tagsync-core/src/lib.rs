//! tagsync core library: domain types, configuration persistence, errors.
//!
//! - [`types`]: newtypes for the values passed between sync steps
//! - [`config`]: load / save / validate the YAML configuration
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use error::ConfigError;
pub use types::{
    BranchName, CommitHash, RemoteName, RemoteSetup, RepoUrl, SyncConfig, TagName, TAG_REF_MARKER,
};
