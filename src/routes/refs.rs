//! Reference listing.
//!
//! GET /{repo}/refs
//!
//! Every branch, tag and remote-tracking ref with its target id; the ref
//! HEAD points to is flagged.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::config::SharedConfig;
use crate::error::Result;
use crate::models::RefInfo;
use crate::routes::with_repository;

pub fn routes(config: SharedConfig) -> Router {
    Router::new()
        .route("/{repo}/refs", get(get_refs))
        .with_state(config)
}

async fn get_refs(
    State(config): State<SharedConfig>,
    Path(repo): Path<String>,
) -> Result<Json<Vec<RefInfo>>> {
    let refs = with_repository(&config, repo, |_, repo| repo.list_refs()).await?;
    Ok(Json(refs))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{TestRoot, demo_repo};

    #[tokio::test]
    async fn lists_refs_of_repository() {
        let demo = demo_repo();
        let config = Arc::new(demo.root.config());

        let Json(refs) = get_refs(State(config), Path("demo".to_string())).await.unwrap();
        let head: Vec<&str> = refs.iter().filter(|r| r.is_head).map(|r| r.name.as_str()).collect();
        assert_eq!(head, vec!["refs/heads/master"]);
    }

    #[tokio::test]
    async fn empty_repository_has_no_refs() {
        let root = TestRoot::new();
        root.init_bare("empty.git");
        let config = Arc::new(root.config());

        let Json(refs) = get_refs(State(config), Path("empty".to_string())).await.unwrap();
        assert!(refs.is_empty());
    }
}
