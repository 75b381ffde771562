//! Repository index.
//!
//! GET /
//!
//! Names of the bare repositories under the root, suffix stripped. A
//! missing or unreadable root lists nothing instead of failing.

use axum::{Json, Router, extract::State, routing::get};

use crate::config::SharedConfig;
use crate::error::Result;
use crate::git::list_repositories;
use crate::routes::run_blocking;

pub fn routes(config: SharedConfig) -> Router {
    Router::new()
        .route("/", get(get_index))
        .with_state(config)
}

async fn get_index(State(config): State<SharedConfig>) -> Result<Json<Vec<String>>> {
    let names = run_blocking(&config, |config| Ok(list_repositories(&config.repo_root))).await?;
    Ok(Json(names))
}
