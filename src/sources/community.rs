// src/sources/community.rs
//! Client for the community events CMS.
//!
//! The upstream rejects requests without browser-like headers, hence the
//! fixed User-Agent/Referer pair. Body parsing is a standalone function so
//! fixture-driven tests can exercise it without sockets.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::Client;

use crate::sources::types::{FeedItem, FeedPage};
use crate::sources::CommunityFeedSource;

const FEED_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 6.0; Nexus 5 Build/MRA58N) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Mobile Safari/537.36";
const FEED_REFERER: &str = "https://injective.com/events";

pub struct EventsFeedClient {
    client: Client,
    base_url: String,
    page_size: u32,
    timeout: Duration,
}

impl EventsFeedClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            page_size: 10,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// Parse one feed page body. Records stay raw; validation and shaping
/// happen in `normalize`.
pub fn parse_feed_page(body: &str) -> Result<Vec<FeedItem>> {
    let t0 = std::time::Instant::now();
    let page: FeedPage = serde_json::from_str(body).context("parsing events feed json")?;

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("feed_parse_ms").record(ms);
    counter!("feed_items_total").increment(page.data.len() as u64);

    Ok(page.data)
}

#[async_trait]
impl CommunityFeedSource for EventsFeedClient {
    async fn fetch_events(&self) -> Result<Vec<FeedItem>> {
        let page_size = self.page_size.to_string();
        let rsp = self
            .client
            .get(&self.base_url)
            .query(&[("page", "1"), ("pageSize", page_size.as_str())])
            .header("User-Agent", FEED_USER_AGENT)
            .header("Referer", FEED_REFERER)
            .timeout(self.timeout)
            .send()
            .await
            .context("events feed request")?;
        let rsp = rsp.error_for_status().context("events feed status")?;
        let body = rsp.text().await.context("events feed body")?;
        parse_feed_page(&body)
    }

    fn name(&self) -> &'static str {
        "events-feed"
    }
}
