//! Tree and repository-related DTOs.
//!
//! - `TreeEntry`: Single child of a directory listing
//! - `EntryKind`: tree / blob / other
//! - `TreeResponse`: Directory listing with the repository context it was read from
//! - `RepositoryResponse`: Repository name, requested revision, refs and commit
//! - `CommitInfo`: Basic commit info (tree header)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub path: String,
    pub kind: EntryKind,
    pub oid: String,
    pub mode: i32,
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Tree,
    Blob,
    Other,
}

impl EntryKind {
    pub fn from_object_type(kind: Option<git2::ObjectType>) -> Self {
        match kind {
            Some(git2::ObjectType::Tree) => EntryKind::Tree,
            Some(git2::ObjectType::Blob) => EntryKind::Blob,
            _ => EntryKind::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Tree => "tree",
            EntryKind::Blob => "blob",
            EntryKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    pub oid: String,
    pub message: String,
    pub author: String,
    pub timestamp: i64,
    pub relative_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryResponse {
    pub name: String,
    /// Revision as requested; empty when the default was used.
    pub revision: String,
    pub refs: Vec<String>,
    pub commit: CommitInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeResponse {
    pub repository: RepositoryResponse,
    pub path: String,
    pub entries: Vec<TreeEntry>,
}
