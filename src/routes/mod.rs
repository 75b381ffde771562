//! HTTP route handlers - maps request paths to git operations.
//!
//! Each submodule defines routes for one view:
//! - `index`: Repository listing (GET /)
//! - `tree`: Directory listing at a ref and folder
//! - `blob`: Raw file content at a ref
//! - `commits`: First-parent history
//! - `commit`: Single commit with its diff
//! - `refs`: Branch/tag/remote listing
//! - `diff`: Diff between two revisions
//!
//! Every repository request opens its own handle on the blocking pool and
//! drops it before the response is sent.

pub mod blob;
pub mod commit;
pub mod commits;
pub mod diff;
pub mod index;
pub mod refs;
pub mod tree;

use axum::Router;
use axum::http::Uri;

use crate::config::{Config, SharedConfig};
use crate::error::{AppError, Result};
use crate::git::{GitRepository, open_repository};

pub fn create_router(config: SharedConfig) -> Router {
    Router::new()
        .merge(index::routes(config.clone()))
        .merge(tree::routes(config.clone()))
        .merge(blob::routes(config.clone()))
        .merge(commits::routes(config.clone()))
        .merge(commit::routes(config.clone()))
        .merge(refs::routes(config.clone()))
        .merge(diff::routes(config))
        .fallback(unmatched_route)
}

/// URLs outside the route table get the same JSON error body as any other 404.
async fn unmatched_route(uri: Uri) -> AppError {
    AppError::PathNotFound(uri.path().to_string())
}

/// Run synchronous git work on the blocking pool, bounded by the request timeout.
///
/// The timeout only stops the wait; the work itself stops at its next
/// deadline check.
pub(crate) async fn run_blocking<F, T>(config: &SharedConfig, f: F) -> Result<T>
where
    F: FnOnce(&Config) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let timeout = config.request_timeout;
    let config = config.clone();
    let task = tokio::task::spawn_blocking(move || f(&config));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(AppError::Internal(format!("Request task failed: {}", e))),
        Err(_) => Err(AppError::Timeout(timeout)),
    }
}

/// Open repository `name` for the duration of `f`.
pub(crate) async fn with_repository<F, T>(config: &SharedConfig, name: String, f: F) -> Result<T>
where
    F: FnOnce(&Config, &GitRepository) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    run_blocking(config, move |config| {
        let repo = open_repository(&config.repo_root, &name)?.with_deadline(config.deadline());
        f(config, &repo)
    })
    .await
}
