//! Parsing of `git ls-remote` output.
//!
//! A listing line looks like `<hash>\trefs/tags/<name>`. Annotated tags also
//! get a peeled `<name>^{}` line; it is kept as its own entry.

use serde::Serialize;

use tagsync_core::{CommitHash, TagName, TAG_REF_MARKER};

/// One tag as advertised by the remote, paired with the hash on its line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteTag {
    pub tag: TagName,
    pub commit: CommitHash,
}

/// Tag names in listing order. Lines without the marker are dropped.
pub fn parse_tag_listing(listing: &str) -> Vec<TagName> {
    listing
        .lines()
        .filter_map(|line| line.split_once(TAG_REF_MARKER))
        .map(|(_, name)| TagName::from(name))
        .collect()
}

/// The last tag in listing order.
///
/// This is whatever `git ls-remote` printed last (refname order), not the
/// highest version: `v10.0` sorts before `v9.0`.
pub fn latest_tag(tags: &[TagName]) -> Option<&TagName> {
    tags.last()
}

/// First whitespace-delimited token of a single-ref listing; empty when there is none.
pub fn parse_commit_hash(response: &str) -> CommitHash {
    CommitHash::from(response.split_whitespace().next().unwrap_or_default())
}

/// Like [`parse_tag_listing`] but keeps each line's hash.
pub fn list_remote_tags(listing: &str) -> Vec<RemoteTag> {
    listing
        .lines()
        .filter_map(|line| {
            let (_, name) = line.split_once(TAG_REF_MARKER)?;
            Some(RemoteTag {
                tag: TagName::from(name),
                commit: parse_commit_hash(line),
            })
        })
        .collect()
}
