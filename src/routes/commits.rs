//! First-parent history.
//!
//! - GET /{repo}/commits?limit=N
//! - GET /{repo}/commits/{ref}?limit=N
//!
//! Walks first parents from the resolved commit, newest first. `limit`
//! defaults to 50 and is clamped to the configured maximum.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::config::SharedConfig;
use crate::error::Result;
use crate::models::CommitListResponse;
use crate::routes::with_repository;

pub fn routes(config: SharedConfig) -> Router {
    Router::new()
        .route("/{repo}/commits", get(get_commits))
        .route("/{repo}/commits/{ref}", get(get_commits))
        .with_state(config)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitsParams {
    pub repo: String,
    #[serde(default, rename = "ref")]
    pub rev: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CommitsQuery {
    pub limit: Option<usize>,
}

pub(crate) async fn get_commits(
    State(config): State<SharedConfig>,
    Path(params): Path<CommitsParams>,
    Query(query): Query<CommitsQuery>,
) -> Result<Json<CommitListResponse>> {
    let CommitsParams { repo, rev } = params;
    let limit = config.commit_limit(query.limit);

    let response = with_repository(&config, repo, move |config, repo| {
        let revision = rev.unwrap_or_default();
        let start = repo.resolve(&revision, config.default_branch.as_deref())?;
        let history = repo.first_parent_history(&start, limit)?;

        Ok(CommitListResponse {
            repository: repo.repository_response(&revision, &start)?,
            commits: history.commits,
            has_more: history.has_more,
        })
    })
    .await?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::demo_repo;

    fn params(rev: Option<&str>) -> Path<CommitsParams> {
        Path(CommitsParams {
            repo: "demo".to_string(),
            rev: rev.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn default_ref_history() {
        let demo = demo_repo();
        let config = Arc::new(demo.root.config());

        let Json(response) = get_commits(State(config), params(None), Query(CommitsQuery::default()))
            .await
            .unwrap();
        let oids: Vec<&str> = response.commits.iter().map(|c| c.oid.as_str()).collect();
        assert_eq!(oids, vec![demo.second.to_string(), demo.initial.to_string()]);
        assert!(!response.has_more);
    }

    #[tokio::test]
    async fn limit_is_honoured() {
        let demo = demo_repo();
        let config = Arc::new(demo.root.config());

        let Json(response) = get_commits(
            State(config),
            params(Some("merged")),
            Query(CommitsQuery { limit: Some(1) }),
        )
        .await
        .unwrap();
        assert_eq!(response.commits.len(), 1);
        assert_eq!(response.commits[0].oid, demo.merge.to_string());
        assert!(response.has_more);
        assert_eq!(response.repository.revision, "merged");
    }
}
