use git2::{Delta, DiffOptions, Patch, Tree};

use crate::error::Result;
use crate::git::repository::GitRepository;
use crate::models::{DiffResponse, DiffStats, DiffStatus, FileDiff};

fn delta_status(delta: Delta) -> DiffStatus {
    match delta {
        Delta::Added => DiffStatus::Added,
        Delta::Deleted => DiffStatus::Deleted,
        Delta::Modified => DiffStatus::Modified,
        Delta::Renamed => DiffStatus::Renamed,
        Delta::Copied => DiffStatus::Copied,
        Delta::Typechange => DiffStatus::TypeChanged,
        _ => DiffStatus::Unmodified,
    }
}

impl GitRepository {
    /// Diff two trees, `None` standing for the empty tree. One entry per
    /// changed path, in the order libgit2 produces them.
    pub fn diff_trees(&self, old: Option<&Tree>, new: Option<&Tree>) -> Result<(Vec<FileDiff>, DiffStats)> {
        let mut opts = DiffOptions::new();
        opts.context_lines(3);

        let diff = self.repo.diff_tree_to_tree(old, new, Some(&mut opts))?;

        let mut files = Vec::new();
        let mut stats = DiffStats::default();

        for (delta_idx, delta) in diff.deltas().enumerate() {
            self.check_deadline()?;

            let old_path = delta.old_file().path().map(|p| p.to_string_lossy().to_string());
            let new_path = delta.new_file().path().map(|p| p.to_string_lossy().to_string());

            let (patch_text, is_binary, insertions, deletions) = match Patch::from_diff(&diff, delta_idx)? {
                Some(mut patch) => {
                    let (_, insertions, deletions) = patch.line_stats()?;
                    let is_binary = patch.delta().flags().is_binary();
                    let buf = patch.to_buf()?;
                    (String::from_utf8_lossy(&buf).to_string(), is_binary, insertions, deletions)
                }
                None => (String::new(), delta.flags().is_binary(), 0, 0),
            };

            stats.files_changed += 1;
            stats.insertions += insertions;
            stats.deletions += deletions;

            let file = FileDiff {
                // Added files have no old side and deleted files no new side.
                old_path: if delta.status() == Delta::Added { None } else { old_path },
                new_path: if delta.status() == Delta::Deleted { None } else { new_path },
                status: delta_status(delta.status()),
                is_binary,
                insertions,
                deletions,
                patch: patch_text,
            };
            tracing::trace!(path = file.path().unwrap_or(""), status = ?file.status, "Diff entry");
            files.push(file);
        }

        Ok((files, stats))
    }

    /// Diff between two revisions, each resolved like any other ref.
    pub fn compare(&self, from: &str, to: &str, default_branch: Option<&str>) -> Result<DiffResponse> {
        let from_commit = self.resolve(from, default_branch)?;
        let to_commit = self.resolve(to, default_branch)?;

        let from_tree = from_commit.tree()?;
        let to_tree = to_commit.tree()?;
        let (files, stats) = self.diff_trees(Some(&from_tree), Some(&to_tree))?;

        Ok(DiffResponse {
            repository: self.name.clone(),
            from: from_commit.id().to_string(),
            to: to_commit.id().to_string(),
            files,
            stats,
        })
    }
}
