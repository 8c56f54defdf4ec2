//! # tagsync-sync
//!
//! Latest-tag synchronization between two git remotes.
//!
//! Build a [`TagSync`] from a [`CommandRunner`] and a
//! [`SyncConfig`](tagsync_core::SyncConfig), then call [`TagSync::run`].
//! [`GitRunner`] shells out to the real `git`; tests substitute their own runner.

pub mod error;
pub mod pipeline;
pub mod runner;
pub mod tags;

pub use error::SyncError;
pub use pipeline::{ResolvedTag, SyncReport, TagSync};
pub use runner::{CommandRunner, GitRunner};
pub use tags::RemoteTag;
