// tests/api_http.rs
//
// HTTP-level tests for the public Router without opening sockets; the
// router is exercised via tower::ServiceExt::oneshot. Stub sources fail
// everything, which is exactly the situation the envelope contract must
// survive: HTTP 200, success: true, fallback-populated sections.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use ninja_radar::aggregate::Aggregator;
use ninja_radar::api::{self, AppState};
use ninja_radar::sources::types::{AuctionSnapshot, BlockStats, FeedItem, RawProposal};
use ninja_radar::sources::{ChainDataSource, CommunityFeedSource};

const BODY_LIMIT: usize = 4 * 1024 * 1024; // filler makes the payload chunky

struct DownChain;

#[async_trait]
impl ChainDataSource for DownChain {
    async fn auction_state(&self) -> Result<AuctionSnapshot> {
        Err(anyhow!("auction unreachable"))
    }
    async fn voting_proposals(&self) -> Result<Vec<RawProposal>> {
        Err(anyhow!("gov unreachable"))
    }
    async fn block_stats(&self) -> Result<BlockStats> {
        Err(anyhow!("explorer unreachable"))
    }
    fn name(&self) -> &'static str {
        "down-chain"
    }
}

struct DownFeed;

#[async_trait]
impl CommunityFeedSource for DownFeed {
    async fn fetch_events(&self) -> Result<Vec<FeedItem>> {
        Err(anyhow!("feed unreachable"))
    }
    fn name(&self) -> &'static str {
        "down-feed"
    }
}

/// Build the same Router the binary uses, wired to offline stubs.
fn test_router() -> Router {
    let aggregator = Aggregator::new(Arc::new(DownChain), Arc::new(DownFeed));
    api::router(AppState {
        aggregator: Arc::new(aggregator),
    })
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let app = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let body = String::from_utf8(bytes).expect("utf8");
    assert_eq!(body.trim(), "OK", "health body should be 'OK'");
}

#[tokio::test]
async fn api_pulse_carries_the_envelope_contract() {
    let app = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/api/pulse")
        .body(Body::empty())
        .expect("build GET /api/pulse");

    let resp = app.oneshot(req).await.expect("oneshot /api/pulse");
    // Errors are in-band: the status is 200 even with every upstream dark.
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read json")
        .to_vec();
    let v: Json = serde_json::from_slice(&bytes).expect("parse pulse json");

    assert_eq!(v["success"], true);
    assert!(v.get("error").is_none(), "no error on the success arm");
    assert!(v.get("timestamp").is_some(), "missing 'timestamp'");

    let pulse = &v["data"]["pulse"];
    assert!(pulse["blockHeight"].as_u64().unwrap() > 0);
    let countdown = pulse["burnCountdown"].as_u64().expect("burnCountdown");
    assert!(countdown > 0 && countdown <= 7 * 24 * 3600);

    // Fallback sections populated, camelCase keys on the wire.
    assert_eq!(v["data"]["governance"]["activeProposals"], 2);
    let events = v["data"]["community"]["events"]
        .as_array()
        .expect("events array");
    assert!(!events.is_empty());
    assert!(events[0].get("startTime").is_some());
    assert!(events[0].get("imageUrl").is_some());
}
