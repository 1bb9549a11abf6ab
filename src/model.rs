// src/model.rs
//! Wire-level data model for the pulse payload.
//!
//! Everything here serializes camelCase because the dashboard frontend and
//! the polling client read the payload as-is. Unknown category/color labels
//! coming from a newer server must degrade to a default treatment instead of
//! failing deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Placeholder used whenever an event has no usable image.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1517245386807-bb43f82c33c4?q=80&w=600&auto=format&fit=crop";

/// Artwork for the synthetic burn-auction event.
pub const AUCTION_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1620712943543-bcc4628c9757?q=80&w=600&auto=format&fit=crop";

/// Artwork for on-chain governance entries.
pub const GOVERNANCE_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1639762681485-074b7f938ba0?q=80&w=600&auto=format&fit=crop";

pub const DEFAULT_LOCATION: &str = "Global Virtual";

/// Location default for community-feed items that omit one.
pub const FEED_DEFAULT_LOCATION: &str = "Online";

/// Event category labels used across the dashboard.
///
/// The set is open-ended on the wire: anything we do not recognize maps to
/// `Other` and renders with the default (Community) treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    Governance,
    Auction,
    Hackathon,
    Community,
    Education,
    Developer,
    Upgrade,
    Other,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Governance => "Governance",
            EventCategory::Auction => "Auction",
            EventCategory::Hackathon => "Hackathon",
            EventCategory::Community => "Community",
            EventCategory::Education => "Education",
            EventCategory::Developer => "Developer",
            EventCategory::Upgrade => "Upgrade",
            // Unknown labels fold into the default visual treatment.
            EventCategory::Other => "Community",
        }
    }

    pub fn parse(label: &str) -> Self {
        match label {
            "Governance" => EventCategory::Governance,
            "Auction" => EventCategory::Auction,
            "Hackathon" => EventCategory::Hackathon,
            "Community" => EventCategory::Community,
            "Education" => EventCategory::Education,
            "Developer" => EventCategory::Developer,
            "Upgrade" => EventCategory::Upgrade,
            _ => EventCategory::Other,
        }
    }
}

impl Serialize for EventCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(EventCategory::parse(&s))
    }
}

/// Fixed presentation palette. Absent or unknown colors become purple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventColor {
    #[default]
    Purple,
    Green,
    Red,
    Blue,
    Yellow,
    Orange,
}

impl EventColor {
    /// Rotation applied to community-feed items by index.
    pub const FEED_CYCLE: [EventColor; 5] = [
        EventColor::Purple,
        EventColor::Green,
        EventColor::Red,
        EventColor::Blue,
        EventColor::Yellow,
    ];

    /// Full palette, used by the filler generator.
    pub const PALETTE: [EventColor; 6] = [
        EventColor::Purple,
        EventColor::Green,
        EventColor::Red,
        EventColor::Blue,
        EventColor::Yellow,
        EventColor::Orange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventColor::Purple => "purple",
            EventColor::Green => "green",
            EventColor::Red => "red",
            EventColor::Blue => "blue",
            EventColor::Yellow => "yellow",
            EventColor::Orange => "orange",
        }
    }

    pub fn parse(label: &str) -> Self {
        match label {
            "green" => EventColor::Green,
            "red" => EventColor::Red,
            "blue" => EventColor::Blue,
            "yellow" => EventColor::Yellow,
            "orange" => EventColor::Orange,
            _ => EventColor::Purple,
        }
    }
}

impl Serialize for EventColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(EventColor::parse(&s))
    }
}

/// The unifying calendar entity. Rebuilt wholesale on every aggregation
/// pass; ids are unique within a pass but not stable across passes for
/// synthetic entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub category: EventCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub color: EventColor,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_image_url")]
    pub image_url: String,
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_image_url() -> String {
    PLACEHOLDER_IMAGE_URL.to_string()
}

/// Live network metric block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PulseSummary {
    pub tps: u32,
    pub block_height: u64,
    pub burn_amount: f64,
    /// Seconds until the next weekly burn trigger. Always in (0, 604800].
    pub burn_countdown: u64,
    pub auction_round: u64,
}

/// Governance proposal projected for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalSummary {
    pub id: String,
    pub title: String,
    pub status: i32,
    pub voting_end_time: Option<DateTime<Utc>>,
    pub location: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceSection {
    pub active_proposals: usize,
    pub proposals: Vec<ProposalSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunitySection {
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseData {
    pub pulse: PulseSummary,
    pub governance: GovernanceSection,
    pub community: CommunitySection,
}

/// Response envelope of `GET /api/pulse`.
///
/// Errors travel in-band: both arms are HTTP 200 and consumers branch on
/// `success`. That is the wire contract the frontend was built against, so
/// it is modeled as a tagged type here rather than an HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PulseData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl PulseEnvelope {
    pub fn ok(data: PulseData, timestamp: DateTime<Utc>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp,
        }
    }

    pub fn failure(message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            timestamp,
        }
    }
}
