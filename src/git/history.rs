use git2::Commit;

use crate::error::Result;
use crate::git::repository::{GitRepository, commit_to_detail};
use crate::models::{CommitDetail, CommitResponse};

/// A page of first-parent history.
pub struct History {
    pub commits: Vec<CommitDetail>,
    pub has_more: bool,
}

impl GitRepository {
    /// Walk the first-parent chain from `start`, newest first, at most `limit` commits.
    pub fn first_parent_history(&self, start: &Commit, limit: usize) -> Result<History> {
        let mut commits = Vec::new();
        let mut current = Some(start.clone());

        while let Some(commit) = current {
            self.check_deadline()?;

            if commits.len() == limit {
                return Ok(History {
                    commits,
                    has_more: true,
                });
            }

            commits.push(commit_to_detail(&commit));
            current = if commit.parent_count() > 0 {
                Some(commit.parent(0)?)
            } else {
                None
            };
        }

        Ok(History {
            commits,
            has_more: false,
        })
    }

    /// A single commit with its diff against the first parent.
    pub fn commit_detail(&self, revision: &str, commit: &Commit) -> Result<CommitResponse> {
        let new_tree = commit.tree()?;
        let old_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let (files, stats) = self.diff_trees(old_tree.as_ref(), Some(&new_tree))?;

        Ok(CommitResponse {
            repository: self.repository_response(revision, commit)?,
            commit: commit_to_detail(commit),
            files,
            stats,
        })
    }
}
