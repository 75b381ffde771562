//! Repository discovery under the configured root.
//!
//! Bare repositories are recognised by the `.git` directory suffix. Listing
//! never fails: an unreadable root yields an empty list so the index page
//! keeps rendering.

use std::path::Path;

use git2::ErrorCode;

use crate::error::{AppError, Result};
use crate::git::repository::GitRepository;

pub const BARE_SUFFIX: &str = ".git";

/// Names of all bare repositories under `root`, suffix stripped, sorted.
pub fn list_repositories<P: AsRef<Path>>(root: P) -> Vec<String> {
    let root = root.as_ref();
    let read_dir = match std::fs::read_dir(root) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            tracing::warn!("Cannot read repository root {}: {}", root.display(), e);
            return Vec::new();
        }
    };

    let mut names: Vec<String> = read_dir
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let file_name = entry.file_name();
            let name = file_name.to_str()?;
            name.strip_suffix(BARE_SUFFIX)
                .filter(|stem| !stem.is_empty())
                .map(str::to_string)
        })
        .collect();

    names.sort();
    names.dedup();
    names
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Open `{root}/{name}.git`, falling back to `{root}/{name}`.
///
/// The suffixed directory comes first so a listed name always opens the
/// repository it was listed from.
pub fn open_repository<P: AsRef<Path>>(root: P, name: &str) -> Result<GitRepository> {
    if !is_valid_name(name) {
        return Err(AppError::RepoNotFound(name.to_string()));
    }

    let root = root.as_ref();
    let candidates = [root.join(format!("{}{}", name, BARE_SUFFIX)), root.join(name)];

    for candidate in &candidates {
        if !candidate.is_dir() {
            continue;
        }
        match GitRepository::open_at(name, candidate) {
            Ok(repo) => {
                tracing::debug!("Opened repository {} at {}", name, candidate.display());
                return Ok(repo);
            }
            Err(e) if e.code() == ErrorCode::NotFound => continue,
            Err(e) => return Err(AppError::Storage(e)),
        }
    }

    Err(AppError::RepoNotFound(name.to_string()))
}
