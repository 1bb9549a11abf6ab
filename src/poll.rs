// src/poll.rs
//! Live polling client for the aggregation endpoint.
//!
//! Mirrors what the dashboard frontend does with its 5-second refresh: the
//! last successful payload is cached and replaced atomically, a failed poll
//! leaves it in place (stale-but-available, never cleared), and a local
//! 1-second countdown ticks between polls, re-synced to the server value on
//! every success so it cannot drift.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use reqwest::Client;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::model::{PulseData, PulseEnvelope};

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("poll_success_total", "Successful pulse polls.");
        describe_counter!(
            "poll_failures_total",
            "Failed pulse polls (transport errors or success:false envelopes)."
        );
    });
}

/// One poll against the aggregation endpoint. Implemented over HTTP in
/// production; tests script a stub.
#[async_trait]
pub trait PulseFetcher: Send + Sync {
    async fn fetch(&self) -> Result<PulseEnvelope>;
}

pub struct HttpPulseFetcher {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpPulseFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

#[async_trait]
impl PulseFetcher for HttpPulseFetcher {
    async fn fetch(&self) -> Result<PulseEnvelope> {
        let rsp = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .context("pulse request")?;
        let rsp = rsp.error_for_status().context("pulse status")?;
        rsp.json::<PulseEnvelope>().await.context("pulse body")
    }
}

/// What the presentation layer sees.
#[derive(Debug, Clone)]
pub enum PollView {
    /// No data yet.
    Loading,
    /// Every poll so far failed; nothing to show.
    Error { message: String },
    /// A payload is available. `stale` marks that the most recent poll
    /// failed and this is the retained prior success.
    Ready {
        data: PulseData,
        stale: bool,
        countdown: u64,
    },
}

#[derive(Default)]
struct PollInner {
    data: Option<PulseData>,
    stale: bool,
    last_error: Option<String>,
    countdown: u64,
}

pub struct PulsePoller {
    fetcher: Arc<dyn PulseFetcher>,
    inner: Mutex<PollInner>,
    interval: Duration,
}

impl PulsePoller {
    pub fn new(fetcher: Arc<dyn PulseFetcher>) -> Self {
        ensure_metrics_described();
        Self {
            fetcher,
            inner: Mutex::new(PollInner::default()),
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }

    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval = Duration::from_secs(secs.max(1));
        self
    }

    /// Run one poll and fold the outcome into the cached state.
    pub async fn poll_once(&self) {
        match self.fetcher.fetch().await {
            Ok(env) if env.success => match env.data {
                Some(data) => {
                    let mut inner = self.inner.lock().expect("poll state poisoned");
                    // Resync, not accumulate: the server value wins.
                    inner.countdown = data.pulse.burn_countdown;
                    inner.data = Some(data);
                    inner.stale = false;
                    inner.last_error = None;
                    counter!("poll_success_total").increment(1);
                }
                None => self.record_failure("success envelope without data".to_string()),
            },
            Ok(env) => self.record_failure(
                env.error
                    .unwrap_or_else(|| "upstream reported failure".to_string()),
            ),
            Err(e) => self.record_failure(format!("{e:#}")),
        }
    }

    /// Immediate refresh on regaining foreground focus.
    pub async fn refresh_on_focus(&self) {
        self.poll_once().await;
    }

    /// 1-second local tick; floors at zero until the next resync.
    pub fn tick_countdown(&self) {
        let mut inner = self.inner.lock().expect("poll state poisoned");
        inner.countdown = inner.countdown.saturating_sub(1);
    }

    pub fn view(&self) -> PollView {
        let inner = self.inner.lock().expect("poll state poisoned");
        if let Some(data) = &inner.data {
            PollView::Ready {
                data: data.clone(),
                stale: inner.stale,
                countdown: inner.countdown,
            }
        } else if let Some(message) = &inner.last_error {
            PollView::Error {
                message: message.clone(),
            }
        } else {
            PollView::Loading
        }
    }

    fn record_failure(&self, message: String) {
        warn!(error = %message, "pulse poll failed");
        counter!("poll_failures_total").increment(1);
        let mut inner = self.inner.lock().expect("poll state poisoned");
        if inner.data.is_some() {
            // Keep showing the prior success.
            inner.stale = true;
        } else {
            inner.last_error = Some(message);
        }
    }

    /// Spawn the poll loop and the countdown ticker. The first poll fires
    /// immediately (interval ticks at t=0).
    pub fn spawn(self: Arc<Self>) -> (JoinHandle<()>, JoinHandle<()>) {
        let poller = Arc::clone(&self);
        let poll_task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poller.interval);
            loop {
                ticker.tick().await;
                poller.poll_once().await;
            }
        });

        let poller = self;
        let tick_task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(COUNTDOWN_TICK);
            // Skip the immediate first tick so a fresh countdown is not
            // decremented before it is shown.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                poller.tick_countdown();
            }
        });

        (poll_task, tick_task)
    }
}
