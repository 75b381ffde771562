//! Raw file content.
//!
//! - GET /{repo}/blob/{file}          (default ref, top-level file)
//! - GET /{repo}/blob/{ref}/{*file}
//!
//! The body is the blob's bytes. `Content-Type` is guessed from the file
//! name; unknown extensions fall back to text or octet-stream depending on
//! whether the content looks binary. `ETag` is the blob id.

use axum::{
    Router,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::config::SharedConfig;
use crate::error::Result;
use crate::git::tree::BlobContent;
use crate::routes::with_repository;

pub fn routes(config: SharedConfig) -> Router {
    Router::new()
        // `{ref}` holds the file name on this route.
        .route("/{repo}/blob/{ref}", get(get_blob_at_default))
        .route("/{repo}/blob/{ref}/{*file}", get(get_blob))
        .with_state(config)
}

fn content_type(blob: &BlobContent) -> String {
    match mime_guess::from_path(&blob.path).first() {
        Some(mime) => mime.to_string(),
        None if blob.is_binary => "application/octet-stream".to_string(),
        None => "text/plain; charset=utf-8".to_string(),
    }
}

async fn serve_blob(config: SharedConfig, repo: String, rev: String, file: String) -> Result<Response> {
    let blob = with_repository(&config, repo, move |config, repo| {
        let commit = repo.resolve(&rev, config.default_branch.as_deref())?;
        let tree = commit.tree()?;
        repo.read_file(&tree, &file)
    })
    .await?;

    let headers = [
        (header::CONTENT_TYPE, content_type(&blob)),
        (header::ETAG, format!("\"{}\"", blob.oid)),
    ];
    Ok((headers, blob.content).into_response())
}

async fn get_blob_at_default(
    State(config): State<SharedConfig>,
    Path((repo, file)): Path<(String, String)>,
) -> Result<Response> {
    serve_blob(config, repo, String::new(), file).await
}

async fn get_blob(
    State(config): State<SharedConfig>,
    Path((repo, rev, file)): Path<(String, String, String)>,
) -> Result<Response> {
    serve_blob(config, repo, rev, file).await
}
