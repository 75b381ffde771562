//! Directory listing.
//!
//! - GET /{repo}
//! - GET /{repo}/tree/
//! - GET /{repo}/tree/{ref}
//! - GET /{repo}/tree/{ref}/
//! - GET /{repo}/tree/{ref}/{*folder}
//!
//! All shapes share one handler; a missing ref means the default
//! branch (or HEAD), a missing folder means the root tree. Naming a file
//! here is a type mismatch, not a redirect to the blob view.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;

use crate::config::SharedConfig;
use crate::error::Result;
use crate::git::tree::normalize_path;
use crate::models::TreeResponse;
use crate::routes::with_repository;

pub fn routes(config: SharedConfig) -> Router {
    Router::new()
        .route("/{repo}", get(get_tree))
        .route("/{repo}/tree/", get(get_tree))
        .route("/{repo}/tree/{ref}", get(get_tree))
        // The catch-all never matches an empty tail.
        .route("/{repo}/tree/{ref}/", get(get_tree))
        .route("/{repo}/tree/{ref}/{*folder}", get(get_tree))
        .with_state(config)
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreeParams {
    pub repo: String,
    #[serde(default, rename = "ref")]
    pub rev: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
}

pub(crate) async fn get_tree(
    State(config): State<SharedConfig>,
    Path(params): Path<TreeParams>,
) -> Result<Json<TreeResponse>> {
    let TreeParams { repo, rev, folder } = params;

    let response = with_repository(&config, repo, move |config, repo| {
        let revision = rev.unwrap_or_default();
        let folder = folder.unwrap_or_default();

        let commit = repo.resolve(&revision, config.default_branch.as_deref())?;
        let tree = commit.tree()?;
        let entries = repo.list_directory(&tree, &folder)?;

        Ok(TreeResponse {
            repository: repo.repository_response(&revision, &commit)?,
            path: normalize_path(&folder),
            entries,
        })
    })
    .await?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;
    use crate::error::AppError;
    use crate::test_support::demo_repo;

    fn params(rev: Option<&str>, folder: Option<&str>) -> Path<TreeParams> {
        Path(TreeParams {
            repo: "demo".to_string(),
            rev: rev.map(str::to_string),
            folder: folder.map(str::to_string),
        })
    }

    fn entry_names(response: &TreeResponse) -> Vec<&str> {
        response.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[tokio::test]
    async fn repository_root_lists_default_branch() {
        let demo = demo_repo();
        let config = Arc::new(demo.root.config());

        let Json(response) = get_tree(State(config), params(None, None)).await.unwrap();
        assert_eq!(entry_names(&response), vec!["README.md", "src"]);
        assert_eq!(response.path, "");
        assert_eq!(response.repository.name, "demo");
        assert_eq!(response.repository.revision, "");
        assert_eq!(response.repository.commit.oid, demo.second.to_string());
        assert!(response.repository.refs.contains(&"master".to_string()));
    }

    #[tokio::test]
    async fn folder_at_ref() {
        let demo = demo_repo();
        let config = Arc::new(demo.root.config());

        let Json(response) = get_tree(State(config.clone()), params(Some("master"), Some("src")))
            .await
            .unwrap();
        assert_eq!(entry_names(&response), vec!["lib.rs", "main.rs"]);
        assert_eq!(response.path, "src");

        let Json(older) = get_tree(State(config), params(Some("v1.0"), Some("src/")))
            .await
            .unwrap();
        assert_eq!(entry_names(&older), vec!["lib.rs"]);
    }

    #[tokio::test]
    async fn configured_default_branch_is_used() {
        let demo = demo_repo();
        let mut config = demo.root.config();
        config.default_branch = Some("v1.0".to_string());

        let Json(response) = get_tree(State(Arc::new(config)), params(None, Some("src")))
            .await
            .unwrap();
        assert_eq!(entry_names(&response), vec!["lib.rs"]);
    }

    #[tokio::test]
    async fn unknown_ref_renders_not_found() {
        let demo = demo_repo();
        let config = Arc::new(demo.root.config());

        let err = get_tree(State(config), params(Some("doesnotexist"), None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Resolution(_)));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_repository_is_not_found() {
        let demo = demo_repo();
        let config = Arc::new(demo.root.config());

        let err = get_tree(
            State(config),
            Path(TreeParams {
                repo: "missing".to_string(),
                rev: None,
                folder: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::RepoNotFound(_)));
    }

    #[tokio::test]
    async fn file_path_is_a_type_mismatch() {
        let demo = demo_repo();
        let config = Arc::new(demo.root.config());

        let err = get_tree(State(config), params(Some("master"), Some("README.md")))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
