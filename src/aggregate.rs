// src/aggregate.rs
//! One aggregation pass: fan out the upstream reads, degrade failures
//! independently, apply fallbacks, and assemble the pulse payload.
//! Stateless per request; the payload is rebuilt wholesale every time.

use std::sync::Arc;

use chrono::{DateTime, Datelike, TimeDelta, Utc, Weekday};
use metrics::{counter, gauge};
use rand::Rng;
use tracing::warn;

use crate::model::{CommunitySection, GovernanceSection, PulseData, PulseSummary};
use crate::sources::types::AuctionSnapshot;
use crate::sources::{
    ensure_metrics_described, fallback, ChainDataSource, CommunityFeedSource,
};
use crate::{filler, normalize};

/// Weekly burn trigger: Wednesday 14:00 UTC.
pub const BURN_TRIGGER_WEEKDAY: Weekday = Weekday::Wed;
pub const BURN_TRIGGER_HOUR_UTC: u32 = 14;

/// Shown instead of a zero bid; an exactly-zero on-chain amount means the
/// read produced nothing usable, not that the auction is empty.
pub const FALLBACK_BURN_AMOUNT: f64 = 12_450.5;
pub const FALLBACK_BLOCK_HEIGHT: u64 = 64_512_903;
pub const FALLBACK_AUCTION_ROUND: u64 = 142;

/// INJ has 18 decimals on-chain.
const INJ_SCALE: f64 = 1e18;

const TPS_ESTIMATE_MIN: u32 = 8_000;
const TPS_ESTIMATE_MAX: u32 = 15_000;

/// Next occurrence of the weekly trigger, strictly in the future. If the
/// trigger hour today has passed (or is exactly now), roll a full week.
pub fn next_burn_instant(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_ahead = (BURN_TRIGGER_WEEKDAY.num_days_from_sunday() as i64
        - now.weekday().num_days_from_sunday() as i64)
        .rem_euclid(7);
    let mut candidate = (now.date_naive() + TimeDelta::days(days_ahead))
        .and_hms_opt(BURN_TRIGGER_HOUR_UTC, 0, 0)
        .expect("trigger time in range")
        .and_utc();
    if candidate <= now {
        candidate += TimeDelta::days(7);
    }
    candidate
}

pub fn burn_countdown_secs(now: DateTime<Utc>) -> u64 {
    (next_burn_instant(now) - now).num_seconds().max(0) as u64
}

/// Raw bid → display amount. Unparsable or exactly-zero input yields the
/// fixed fallback.
pub fn burn_amount_from_bid(raw: Option<&str>) -> f64 {
    let amount = raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .map(|v| v / INJ_SCALE)
        .unwrap_or(0.0);
    if amount == 0.0 {
        FALLBACK_BURN_AMOUNT
    } else {
        amount
    }
}

pub struct Aggregator {
    chain: Arc<dyn ChainDataSource>,
    feed: Arc<dyn CommunityFeedSource>,
    project_feed_dates: bool,
}

impl Aggregator {
    pub fn new(chain: Arc<dyn ChainDataSource>, feed: Arc<dyn CommunityFeedSource>) -> Self {
        Self {
            chain,
            feed,
            project_feed_dates: true,
        }
    }

    /// Toggle the project-feed-dates-to-current-year demo policy.
    pub fn with_feed_date_projection(mut self, on: bool) -> Self {
        self.project_feed_dates = on;
        self
    }

    /// Run one aggregation pass. Infallible by construction: every upstream
    /// failure degrades to its section's default and only logs/counts.
    pub async fn assemble<R: Rng + ?Sized>(&self, now: DateTime<Utc>, rng: &mut R) -> PulseData {
        ensure_metrics_described();

        // Fan out, independently degrade: the three chain reads run
        // concurrently and none of them can sink the pass.
        let (auction, proposals_raw, blocks) = tokio::join!(
            self.chain.auction_state(),
            self.chain.voting_proposals(),
            self.chain.block_stats(),
        );

        let auction = auction.unwrap_or_else(|e| {
            warn!(error = ?e, source = self.chain.name(), read = "auction", "chain read failed");
            counter!("pulse_source_failures_total", "source" => "auction").increment(1);
            AuctionSnapshot::default()
        });
        let proposals_raw = proposals_raw.unwrap_or_else(|e| {
            warn!(error = ?e, source = self.chain.name(), read = "governance", "chain read failed");
            counter!("pulse_source_failures_total", "source" => "governance").increment(1);
            Vec::new()
        });
        let blocks = blocks.unwrap_or_else(|e| {
            warn!(error = ?e, source = self.chain.name(), read = "blocks", "chain read failed");
            counter!("pulse_source_failures_total", "source" => "blocks").increment(1);
            Default::default()
        });

        let pulse = PulseSummary {
            tps: rng.random_range(TPS_ESTIMATE_MIN..TPS_ESTIMATE_MAX),
            block_height: if blocks.latest_height > 0 {
                blocks.latest_height
            } else {
                FALLBACK_BLOCK_HEIGHT
            },
            burn_amount: burn_amount_from_bid(auction.bid_amount_raw.as_deref()),
            burn_countdown: burn_countdown_secs(now),
            auction_round: if auction.round > 0 {
                auction.round
            } else {
                FALLBACK_AUCTION_ROUND
            },
        };

        let mut proposals = normalize::proposal_summaries(proposals_raw);
        // Fallback only replaces an empty list; a partial real list stands.
        if proposals.is_empty() {
            proposals = fallback::fallback_proposals(now);
        }

        let feed_items = match self.feed.fetch_events().await {
            Ok(items) => items,
            Err(e) => {
                warn!(error = ?e, source = self.feed.name(), "community feed failed");
                counter!("pulse_source_failures_total", "source" => "community").increment(1);
                Vec::new()
            }
        };
        let (mut events, dropped) =
            normalize::community_events(feed_items, now, self.project_feed_dates);
        if dropped > 0 {
            counter!("feed_items_dropped_total").increment(dropped as u64);
        }
        if events.is_empty() {
            events = fallback::fallback_community_events(now);
        }
        // Real events first, filler strictly after.
        events.extend(filler::for_current_and_next_month(rng, now));

        counter!("pulse_aggregations_total").increment(1);
        gauge!("pulse_last_success_ts").set(now.timestamp() as f64);

        PulseData {
            pulse,
            governance: GovernanceSection {
                active_proposals: proposals.len(),
                proposals,
            },
            community: CommunitySection { events },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    const WEEK_SECS: u64 = 7 * 24 * 3600;

    #[test]
    fn countdown_targets_same_day_before_the_trigger_hour() {
        // 2025-06-04 is a Wednesday.
        let now = at("2025-06-04T13:00:00Z");
        assert_eq!(next_burn_instant(now), at("2025-06-04T14:00:00Z"));
        assert_eq!(burn_countdown_secs(now), 3600);
    }

    #[test]
    fn countdown_rolls_a_week_once_the_trigger_hour_passed() {
        let now = at("2025-06-04T15:00:00Z");
        assert_eq!(next_burn_instant(now), at("2025-06-11T14:00:00Z"));
    }

    #[test]
    fn countdown_at_the_exact_trigger_instant_is_a_full_week() {
        let now = at("2025-06-04T14:00:00Z");
        assert_eq!(burn_countdown_secs(now), WEEK_SECS);
    }

    #[test]
    fn countdown_is_always_positive_and_at_most_a_week() {
        // Sweep a week in 3h steps.
        let mut now = at("2025-06-02T00:30:00Z");
        for _ in 0..56 {
            let c = burn_countdown_secs(now);
            assert!(c > 0 && c <= WEEK_SECS, "countdown {c} out of range at {now}");
            now += TimeDelta::hours(3);
        }
    }

    #[test]
    fn burn_amount_scales_and_falls_back_on_zero_or_garbage() {
        assert_eq!(
            burn_amount_from_bid(Some("12000000000000000000")),
            12.0
        );
        assert_eq!(burn_amount_from_bid(Some("0")), FALLBACK_BURN_AMOUNT);
        assert_eq!(burn_amount_from_bid(Some("12inj")), FALLBACK_BURN_AMOUNT);
        assert_eq!(burn_amount_from_bid(None), FALLBACK_BURN_AMOUNT);
    }
}
