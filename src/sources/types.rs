// src/sources/types.rs
//! Raw wire types for the chain and community collaborators.
//!
//! Every field the upstreams may omit is optional here; shaping into the
//! dashboard model happens in `normalize`. LCD endpoints string-encode
//! 64-bit integers, and bid amounts arrive either as a coin object or a
//! plain string depending on module version, so both are accepted.

use std::fmt;

use serde::Deserialize;

// ---- auction module state ----

#[derive(Debug, Clone, Deserialize)]
pub struct AuctionModuleStateResponse {
    #[serde(default)]
    pub state: Option<AuctionModuleState>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuctionModuleState {
    #[serde(default)]
    pub auction_round: Option<String>,
    #[serde(default)]
    pub highest_bid: Option<HighestBid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HighestBid {
    #[serde(default)]
    pub bidder: Option<String>,
    #[serde(default)]
    pub amount: Option<BidAmount>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BidAmount {
    Coin {
        amount: String,
        #[serde(default)]
        denom: String,
    },
    Plain(String),
}

impl BidAmount {
    pub fn raw(&self) -> &str {
        match self {
            BidAmount::Coin { amount, .. } => amount,
            BidAmount::Plain(s) => s,
        }
    }
}

/// Digest of the auction read handed to the aggregator.
#[derive(Debug, Clone, Default)]
pub struct AuctionSnapshot {
    pub round: u64,
    pub bid_amount_raw: Option<String>,
}

// ---- governance ----

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GovProposalsResponse {
    #[serde(default)]
    pub proposals: Vec<RawProposal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProposal {
    // gov v1 renamed `proposal_id` to `id`
    #[serde(default, alias = "id")]
    pub proposal_id: Option<String>,
    #[serde(default)]
    pub content: Option<ProposalContent>,
    #[serde(default)]
    pub status: Option<ProposalStatus>,
    #[serde(default)]
    pub voting_end_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProposalContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub value: Option<ProposalContentValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProposalContentValue {
    #[serde(default)]
    pub title: Option<String>,
}

/// Proposal status, numeric or the LCD enum-name spelling.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProposalStatus {
    Code(i32),
    Name(String),
}

/// Status code for proposals in their voting period.
pub const STATUS_VOTING: i32 = 2;

impl ProposalStatus {
    pub fn code(&self) -> i32 {
        match self {
            ProposalStatus::Code(c) => *c,
            ProposalStatus::Name(n) => match n.as_str() {
                "PROPOSAL_STATUS_DEPOSIT_PERIOD" => 1,
                "PROPOSAL_STATUS_VOTING_PERIOD" => STATUS_VOTING,
                "PROPOSAL_STATUS_PASSED" => 3,
                "PROPOSAL_STATUS_REJECTED" => 4,
                "PROPOSAL_STATUS_FAILED" => 5,
                _ => 0,
            },
        }
    }
}

// ---- explorer ----

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExplorerBlocksResponse {
    #[serde(default)]
    pub paging: Option<ExplorerPaging>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExplorerPaging {
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BlockStats {
    pub latest_height: u64,
}

// ---- community events feed ----

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedPage {
    #[serde(default)]
    pub data: Vec<FeedItem>,
}

/// One record from the community events CMS. Field presence is not
/// guaranteed; `id` and `title` are validated downstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedItem {
    #[serde(default)]
    pub id: Option<FeedId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

impl FeedItem {
    /// Best-available image: large → medium → small → top-level url.
    pub fn best_image_url(&self) -> Option<&str> {
        fn url(v: &Option<ImageVariant>) -> Option<&str> {
            v.as_ref().and_then(|v| v.url.as_deref())
        }
        let thumb = self.thumbnail.as_ref()?;
        let from_formats = thumb
            .formats
            .as_ref()
            .and_then(|f| url(&f.large).or_else(|| url(&f.medium)).or_else(|| url(&f.small)));
        from_formats.or(thumb.url.as_deref())
    }
}

/// CMS ids arrive as numbers or strings depending on endpoint version.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FeedId {
    Num(u64),
    Text(String),
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedId::Num(n) => write!(f, "{n}"),
            FeedId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub formats: Option<ThumbnailFormats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThumbnailFormats {
    #[serde(default)]
    pub large: Option<ImageVariant>,
    #[serde(default)]
    pub medium: Option<ImageVariant>,
    #[serde(default)]
    pub small: Option<ImageVariant>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageVariant {
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bid_amount_accepts_coin_and_plain_forms() {
        let coin: BidAmount =
            serde_json::from_str(r#"{"amount":"12000000000000000000","denom":"inj"}"#).unwrap();
        assert_eq!(coin.raw(), "12000000000000000000");
        let plain: BidAmount = serde_json::from_str(r#""42""#).unwrap();
        assert_eq!(plain.raw(), "42");
    }

    #[test]
    fn proposal_status_maps_lcd_names_to_codes() {
        let s: ProposalStatus =
            serde_json::from_str(r#""PROPOSAL_STATUS_VOTING_PERIOD""#).unwrap();
        assert_eq!(s.code(), STATUS_VOTING);
        let n: ProposalStatus = serde_json::from_str("3").unwrap();
        assert_eq!(n.code(), 3);
        let unknown: ProposalStatus = serde_json::from_str(r#""WHAT""#).unwrap();
        assert_eq!(unknown.code(), 0);
    }

    #[test]
    fn best_image_url_walks_the_fallback_chain() {
        let item: FeedItem = serde_json::from_str(
            r#"{
                "id": 1,
                "title": "x",
                "thumbnail": {
                    "url": "top.png",
                    "formats": { "medium": { "url": "medium.png" } }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(item.best_image_url(), Some("medium.png"));

        let top_only: FeedItem =
            serde_json::from_str(r#"{"id": 2, "title": "y", "thumbnail": {"url": "top.png"}}"#)
                .unwrap();
        assert_eq!(top_only.best_image_url(), Some("top.png"));

        let none: FeedItem = serde_json::from_str(r#"{"id": 3, "title": "z"}"#).unwrap();
        assert_eq!(none.best_image_url(), None);
    }
}
