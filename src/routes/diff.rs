//! Diff between two revisions.
//!
//! GET /{repo}/compare/{from}/{to}
//!
//! Both sides resolve like any other ref. One unified-diff block per
//! changed path.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::config::SharedConfig;
use crate::error::Result;
use crate::models::DiffResponse;
use crate::routes::with_repository;

pub fn routes(config: SharedConfig) -> Router {
    Router::new()
        .route("/{repo}/compare/{from}/{to}", get(get_diff))
        .with_state(config)
}

async fn get_diff(
    State(config): State<SharedConfig>,
    Path((repo, from, to)): Path<(String, String, String)>,
) -> Result<Json<DiffResponse>> {
    let response = with_repository(&config, repo, move |config, repo| {
        repo.compare(&from, &to, config.default_branch.as_deref())
    })
    .await?;

    Ok(Json(response))
}
