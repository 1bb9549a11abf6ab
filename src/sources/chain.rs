// src/sources/chain.rs
//! REST client for the chain collaborator: auction module state, governance
//! proposals in their voting period, and latest block stats from the
//! explorer indexer.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::sources::types::{
    AuctionModuleStateResponse, AuctionSnapshot, BlockStats, ExplorerBlocksResponse,
    GovProposalsResponse, RawProposal, STATUS_VOTING,
};
use crate::sources::ChainDataSource;

pub struct LcdChainClient {
    client: Client,
    lcd_base: String,
    explorer_base: String,
    timeout: Duration,
}

impl LcdChainClient {
    pub fn new(lcd_base: impl Into<String>, explorer_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            lcd_base: trim_base(lcd_base.into()),
            explorer_base: trim_base(explorer_base.into()),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let rsp = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let rsp = rsp
            .error_for_status()
            .with_context(|| format!("GET {url} status"))?;
        rsp.json::<T>()
            .await
            .with_context(|| format!("GET {url} body"))
    }
}

fn trim_base(mut s: String) -> String {
    while s.ends_with('/') {
        s.pop();
    }
    s
}

#[async_trait]
impl ChainDataSource for LcdChainClient {
    async fn auction_state(&self) -> Result<AuctionSnapshot> {
        let url = format!("{}/injective/auction/v1beta1/module_state", self.lcd_base);
        let rsp: AuctionModuleStateResponse = self.get_json(&url).await?;
        let state = rsp.state.unwrap_or_default();
        let round = state
            .auction_round
            .as_deref()
            .and_then(|r| r.parse::<u64>().ok())
            .unwrap_or(0);
        let bid_amount_raw = state
            .highest_bid
            .and_then(|b| b.amount)
            .map(|a| a.raw().to_string());
        Ok(AuctionSnapshot {
            round,
            bid_amount_raw,
        })
    }

    async fn voting_proposals(&self) -> Result<Vec<RawProposal>> {
        let url = format!(
            "{}/cosmos/gov/v1beta1/proposals?proposal_status={STATUS_VOTING}&pagination.limit=50",
            self.lcd_base
        );
        let rsp: GovProposalsResponse = self.get_json(&url).await?;
        Ok(rsp.proposals)
    }

    async fn block_stats(&self) -> Result<BlockStats> {
        let url = format!("{}/api/explorer/v1/blocks?limit=1", self.explorer_base);
        let rsp: ExplorerBlocksResponse = self.get_json(&url).await?;
        Ok(BlockStats {
            latest_height: rsp.paging.and_then(|p| p.total).unwrap_or(0),
        })
    }

    fn name(&self) -> &'static str {
        "chain-lcd"
    }
}
