//! HTTP boundary: validates the request shape and delegates to the cache.
//!
//! The surface is deliberately tiny: `GET /<numeric id>` is the only valid
//! request. Non-GET methods get 404, any other path shape gets 403, and
//! every build failure collapses to 404 — the upstream's reason is logged,
//! not exposed.

use std::net::SocketAddr;
use std::sync::{Arc, LazyLock};

use anyhow::Context;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use regex::Regex;

use crate::cache::FeedCache;
use crate::rss;
use crate::scraper::{linovelib, PageFetcher};

const CONTENT_TYPE_RSS: &str = "application/rss+xml";

/// Request paths must be exactly a slash and a numeric novel id.
static ID_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/[0-9]+$").unwrap());

/// Everything a request handler needs. Shared across all in-flight requests.
pub struct AppState {
    pub cache: FeedCache,
    pub fetcher: Box<dyn PageFetcher>,
}

/// Build the router. A single fallback handler owns method and path
/// validation so the status codes above stay exact.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new().fallback(handle).with_state(state)
}

/// Bind and serve until the process is killed.
pub async fn run(state: Arc<AppState>, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, app(state))
        .await
        .context("Server error")
}

async fn handle(State(state): State<Arc<AppState>>, req: Request<Body>) -> Response {
    if req.method() != Method::GET {
        return StatusCode::NOT_FOUND.into_response();
    }
    let path = req.uri().path();
    if !ID_PATH.is_match(path) {
        return StatusCode::FORBIDDEN.into_response();
    }
    let id = &path[1..];

    let result = state
        .cache
        .get_or_build(id, || async {
            let feed = linovelib::fetch_novel(state.fetcher.as_ref(), id).await?;
            Ok(rss::render_feed(&feed))
        })
        .await;

    match result {
        Ok(body) => ([(header::CONTENT_TYPE, CONTENT_TYPE_RSS)], body).into_response(),
        Err(e) => {
            tracing::warn!(id, error = %e, "feed build failed");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
