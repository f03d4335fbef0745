pub mod config;
pub mod conformance;
mod data_formats;
pub mod errors;
mod handlers;
pub mod logger;
pub mod models;

use anyhow::Context;
pub use anyhow::Result;
use axum::http::StatusCode;
use axum::{routing::*, Extension, Json, Router};
pub use data_formats::*;
use handlers::*;
use std::{
    net::{SocketAddr, TcpListener},
    sync::Arc,
};

pub use config::SiteConfig;
pub use models::{Article, ArticleAttributes};

pub type JsonResponse<T> = (StatusCode, Json<T>);

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

pub async fn run_app(app: Router, address: SocketAddr, site: SiteConfig) -> Result<()> {
    let app = app.layer(Extension(Arc::new(site)));
    tracing::info!(%address, "server started");
    axum::Server::try_bind(&address)
        .with_context(|| format!("Failed to bind {address}"))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

pub fn bind_addr_from_env() -> Result<SocketAddr> {
    let raw = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
    raw.parse::<SocketAddr>()
        .with_context(|| format!("BIND_ADDR {raw:?} is not a socket address"))
}

pub fn get_random_free_port() -> Result<(u16, SocketAddr)> {
    let listener = TcpListener::bind("127.0.0.1:0").context("Could not get a free port")?;
    let addr = listener.local_addr()?;
    Ok((addr.port(), addr))
}

pub fn make_router() -> Router {
    Router::new()
        .route("/check_health", get(alive))
        .route("/site", get(get_site))
        .route("/site/links/:slug", get(get_article_link))
        .route("/articles/validate", post(validate_article))
        .route("/articles/validate/batch", post(validate_articles))
        .fallback(not_found)
}
