//! CLI parsing and startup: resolves the effective settings (flags over
//! config file over environment), builds the shared state, and runs the
//! server.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use crate::cache::FeedCache;
use crate::config;
use crate::scraper::HttpFetcher;
use crate::server::{self, AppState};

const DEFAULT_PORT: u16 = 9000;
/// Legacy port variable honored when neither flag nor config file sets one.
const PORT_ENV: &str = "FC_SERVER_PORT";

#[derive(Debug, Parser)]
#[command(name = "linofeed", version, about = "RSS feed server for linovelib web novels")]
pub struct Args {
    /// Port to listen on (overrides config file and FC_SERVER_PORT).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// HTTP User-Agent for upstream requests.
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Upstream request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Resolve the port: flag, config file, FC_SERVER_PORT, default 9000.
fn resolve_port(args: &Args, config: Option<&config::Config>) -> u16 {
    args.port
        .or(config.and_then(|c| c.port))
        .or_else(|| std::env::var(PORT_ENV).ok().and_then(|v| v.parse().ok()))
        .unwrap_or(DEFAULT_PORT)
}

pub async fn run(args: Args) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = config::load_config().map_err(anyhow::Error::msg)?;
    let port = resolve_port(&args, config.as_ref());

    let mut builder = HttpFetcher::builder();
    if let Some(ua) = args
        .user_agent
        .or_else(|| config.as_ref().and_then(|c| c.user_agent.clone()))
    {
        builder = builder.user_agent(ua);
    }
    if let Some(secs) = args
        .timeout_secs
        .or(config.as_ref().and_then(|c| c.timeout_secs))
    {
        builder = builder.timeout_secs(secs);
    }
    let fetcher = builder.build().context("Failed to build HTTP client")?;

    let state = Arc::new(AppState {
        cache: FeedCache::new(),
        fetcher: Box::new(fetcher),
    });
    server::run(state, port).await
}
