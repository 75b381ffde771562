//! Immutable server configuration, built once from the CLI at startup.
//!
//! Handlers receive it as `SharedConfig` router state. Each request derives
//! a `Deadline` from `request_timeout` that long-running git work checks.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{AppError, Result};

pub const DEFAULT_COMMIT_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the `*.git` repositories.
    pub repo_root: PathBuf,
    /// Branch used when a request carries no ref. `None` means `HEAD`.
    pub default_branch: Option<String>,
    pub request_timeout: Duration,
    /// Upper bound for `?limit=` on history views.
    pub max_commits: usize,
}

impl Config {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            default_branch: None,
            request_timeout: Duration::from_secs(10),
            max_commits: 500,
        }
    }

    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.request_timeout)
    }

    /// Clamp a requested history length into `1..=max_commits`.
    pub fn commit_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(DEFAULT_COMMIT_LIMIT)
            .clamp(1, self.max_commits.max(1))
    }
}

pub type SharedConfig = Arc<Config>;

/// Point in time after which a request's git work is abandoned.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Option<Instant>,
    budget: Duration,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now().checked_add(budget),
            budget,
        }
    }

    pub fn none() -> Self {
        Self {
            at: None,
            budget: Duration::MAX,
        }
    }

    pub fn check(&self) -> Result<()> {
        match self.at {
            Some(at) if Instant::now() >= at => Err(AppError::Timeout(self.budget)),
            _ => Ok(()),
        }
    }
}
