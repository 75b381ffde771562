use serde::{Deserialize, Serialize};

use super::{DiffStats, FileDiff, RepositoryResponse};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub oid: String,
    pub summary: String,
    pub message: String,
    pub author: AuthorInfo,
    pub committer: AuthorInfo,
    pub timestamp: i64,
    pub date: String,
    pub relative_time: String,
    pub parents: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitListResponse {
    pub repository: RepositoryResponse,
    pub commits: Vec<CommitDetail>,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitResponse {
    pub repository: RepositoryResponse,
    pub commit: CommitDetail,
    pub files: Vec<FileDiff>,
    pub stats: DiffStats,
}
