//! suchgit - a minimal read-only browser for a directory of bare git repositories
//!
//! # Usage
//! ```bash
//! suchgit                          # Serve ./_repos on 127.0.0.1:8080
//! suchgit /srv/git --port 3000     # Serve another root
//! suchgit /srv/git --open          # Start and open browser
//! ```

mod config;
mod error;
mod git;
mod models;
mod routes;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;

/// suchgit - Browse bare git repositories over HTTP
#[derive(Parser)]
#[command(name = "suchgit")]
#[command(about = "A minimal read-only git repository browser", long_about = None)]
struct Cli {
    /// Directory containing the `*.git` repositories
    #[arg(value_name = "REPO_ROOT", default_value = "_repos")]
    repo_root: PathBuf,

    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to run the server on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Branch shown when a URL carries no ref (defaults to each repository's HEAD)
    #[arg(long, value_name = "BRANCH")]
    default_branch: Option<String>,

    /// Per-request time budget in seconds
    #[arg(long, value_name = "SECS", default_value = "10")]
    request_timeout: u64,

    /// Upper bound for the `limit` parameter of history views
    #[arg(long, default_value = "500")]
    max_commits: usize,

    /// Open browser automatically after starting
    #[arg(short, long)]
    open: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            default_branch: self.default_branch.clone(),
            request_timeout: Duration::from_secs(self.request_timeout),
            max_commits: self.max_commits,
            ..Config::new(&self.repo_root)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "suchgit=info,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if !cli.repo_root.is_dir() {
        anyhow::bail!(
            "repository root {} is not a directory",
            cli.repo_root.display()
        );
    }

    let config = Arc::new(cli.config());
    let repositories = git::list_repositories(&config.repo_root);
    tracing::info!(
        root = %config.repo_root.display(),
        repositories = repositories.len(),
        "Serving repositories"
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(config.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {} (try --port <PORT>)", addr))?;

    let url = format!("http://{}", addr);
    println!();
    println!("  suchgit");
    println!();
    println!("  Root:    {}", config.repo_root.display());
    println!("  Server:  {}", url);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    if cli.open {
        if let Err(e) = open::that(&url) {
            tracing::warn!("Could not open browser: {}", e);
        }
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutting down");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
