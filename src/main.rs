//! Pokedex - A PokeAPI text-menu client
//!
//! Pages through the location-area catalog and looks up areas and pokemon,
//! keeping recently fetched responses in a time-bounded cache.

use std::sync::Arc;

use anyhow::Context;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::repl::{self, Session};
use pokedex::{Cache, Config, HttpFetcher, PokeClient};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its reaper
/// 4. Build the HTTP fetcher and caching client
/// 5. Run the REPL on stdin/stdout until `exit` or end of input
/// 6. Stop the reaper and report cache statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs stay out of the prompt; override with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}s, base_url={}, http_timeout={}s",
        config.cache_ttl, config.base_url, config.http_timeout
    );

    let cache = Cache::new(config.cache_ttl());
    let fetcher = HttpFetcher::new(config.http_timeout()).context("failed to build HTTP client")?;
    let client = PokeClient::new(cache.clone(), Arc::new(fetcher), config.base_url.clone());

    let mut session = Session::new(client);
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    let result = repl::run(&mut session, stdin, &mut stdout).await;

    let stats = cache.stats();
    info!(
        "Cache stats: hits={}, misses={}, expired={}, entries={}, hit_rate={:.2}",
        stats.hits,
        stats.misses,
        stats.expired,
        stats.total_entries,
        stats.hit_rate()
    );
    drop(session);
    cache.shutdown().await.context("cache shutdown failed")?;

    result.context("REPL terminated")
}
