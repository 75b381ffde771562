//! Single commit view.
//!
//! - GET /{repo}/commit
//! - GET /{repo}/commit/{ref}
//!
//! Commit metadata plus the diff against its first parent; a root commit
//! is diffed against the empty tree.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::config::SharedConfig;
use crate::error::Result;
use crate::models::CommitResponse;
use crate::routes::commits::CommitsParams;
use crate::routes::with_repository;

pub fn routes(config: SharedConfig) -> Router {
    Router::new()
        .route("/{repo}/commit", get(get_commit))
        .route("/{repo}/commit/{ref}", get(get_commit))
        .with_state(config)
}

async fn get_commit(
    State(config): State<SharedConfig>,
    Path(params): Path<CommitsParams>,
) -> Result<Json<CommitResponse>> {
    let CommitsParams { repo, rev } = params;

    let response = with_repository(&config, repo, move |config, repo| {
        let revision = rev.unwrap_or_default();
        let commit = repo.resolve(&revision, config.default_branch.as_deref())?;
        repo.commit_detail(&revision, &commit)
    })
    .await?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::DiffStatus;
    use crate::test_support::demo_repo;

    #[tokio::test]
    async fn commit_by_abbreviated_id() {
        let demo = demo_repo();
        let config = Arc::new(demo.root.config());
        let short = demo.feature.to_string()[..8].to_string();

        let Json(response) = get_commit(
            State(config),
            Path(CommitsParams {
                repo: "demo".to_string(),
                rev: Some(short),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.commit.oid, demo.feature.to_string());
        assert_eq!(response.commit.parents, vec![demo.initial.to_string()]);
        assert_eq!(response.files.len(), 1);
        assert_eq!(response.files[0].path(), Some("src/lib.rs"));
        assert_eq!(response.files[0].status, DiffStatus::Modified);
        assert_eq!(response.stats.insertions, 1);
    }
}
