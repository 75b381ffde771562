//! Data transfer objects (DTOs) for API responses.
//!
//! These structs are serialized to JSON by the route handlers.
//! - `tree`: TreeEntry, TreeResponse, RepositoryResponse, CommitInfo
//! - `commit`: CommitDetail, CommitListResponse, CommitResponse, AuthorInfo
//! - `diff`: DiffResponse, FileDiff, DiffStats
//! - `refs`: RefInfo for branch/tag listings

pub mod commit;
pub mod diff;
pub mod refs;
pub mod tree;

pub use commit::*;
pub use diff::*;
pub use refs::*;
pub use tree::*;
