//! Ninja Radar — Binary Entrypoint
//! Boots the Axum HTTP server: pulse aggregation endpoint, health probe,
//! Prometheus metrics.

use std::sync::Arc;

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ninja_radar::aggregate::Aggregator;
use ninja_radar::api::{self, AppState};
use ninja_radar::config::RadarConfig;
use ninja_radar::metrics::Metrics;
use ninja_radar::sources::chain::LcdChainClient;
use ninja_radar::sources::community::EventsFeedClient;

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - RADAR_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("RADAR_DEV_LOG").ok().is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ninja_radar=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments. This enables
    // RADAR_CONFIG_PATH / RADAR_PROJECT_FEED_DATES from .env.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let cfg = RadarConfig::load().expect("Failed to load radar config");

    // Prometheus recorder first so every series from the first pass lands.
    let metrics = Metrics::init(cfg.poll_interval_secs);

    let chain = Arc::new(
        LcdChainClient::new(cfg.lcd_endpoint.clone(), cfg.explorer_endpoint.clone())
            .with_timeout(cfg.http_timeout_secs),
    );
    let feed = Arc::new(
        EventsFeedClient::new(cfg.events_feed_url.clone())
            .with_page_size(cfg.feed_page_size)
            .with_timeout(cfg.http_timeout_secs),
    );
    let aggregator =
        Aggregator::new(chain, feed).with_feed_date_projection(cfg.project_feed_dates);

    let state = AppState {
        aggregator: Arc::new(aggregator),
    };
    let router = api::router(state).merge(metrics.router());

    Ok(router.into())
}
