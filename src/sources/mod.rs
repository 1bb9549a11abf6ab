// src/sources/mod.rs
pub mod chain;
pub mod community;
pub mod fallback;
pub mod types;

use anyhow::Result;
use metrics::{describe_counter, describe_gauge, describe_histogram};
use once_cell::sync::OnceCell;

use crate::sources::types::{AuctionSnapshot, BlockStats, FeedItem, RawProposal};

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "pulse_aggregations_total",
            "Completed aggregation passes."
        );
        describe_counter!(
            "pulse_source_failures_total",
            "Upstream reads degraded to their default, labelled by source."
        );
        describe_counter!("feed_items_total", "Community feed records parsed.");
        describe_counter!(
            "feed_items_dropped_total",
            "Community feed records dropped during normalization."
        );
        describe_histogram!("feed_parse_ms", "Feed body parse time in milliseconds.");
        describe_gauge!(
            "pulse_last_success_ts",
            "Unix ts of the last completed aggregation pass."
        );
    });
}

/// The three independent chain reads. Each may fail on its own; callers
/// must treat every one as optional.
#[async_trait::async_trait]
pub trait ChainDataSource: Send + Sync {
    async fn auction_state(&self) -> Result<AuctionSnapshot>;
    async fn voting_proposals(&self) -> Result<Vec<RawProposal>>;
    async fn block_stats(&self) -> Result<BlockStats>;
    fn name(&self) -> &'static str;
}

/// Remote community-event feed. Non-2xx or malformed JSON is an `Err` here
/// and becomes "no community data" in the aggregator.
#[async_trait::async_trait]
pub trait CommunityFeedSource: Send + Sync {
    async fn fetch_events(&self) -> Result<Vec<FeedItem>>;
    fn name(&self) -> &'static str;
}
