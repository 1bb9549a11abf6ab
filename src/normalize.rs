// src/normalize.rs
//! Shapes heterogeneous raw inputs (chain reads, community feed records)
//! into the uniform `Event` / `ProposalSummary` model. Malformed records
//! are dropped, never propagated as errors.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::model::{
    Event, EventCategory, EventColor, ProposalSummary, PulseData, PulseSummary,
    AUCTION_IMAGE_URL, FEED_DEFAULT_LOCATION, GOVERNANCE_IMAGE_URL, PLACEHOLDER_IMAGE_URL,
};
use crate::sources::types::{FeedItem, RawProposal};

/// Hour assigned to feed dates that carry no time component.
pub const FEED_DEFAULT_HOUR: u32 = 14;

/// Feed event duration when the feed gives only a start.
const FEED_EVENT_HOURS: i64 = 2;

/// Normalize display text coming from the CMS: decode HTML entities, strip
/// tags, collapse whitespace. Excerpts occasionally embed markup.
pub fn normalize_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
    out = re_tags.replace_all(&out, "").to_string();

    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("ws regex"));
    out = re_ws.replace_all(&out, " ").trim().to_string();

    // Length cap keeps tooltip payloads sane.
    if out.chars().count() > 600 {
        out = out.chars().take(600).collect();
    }
    out
}

/// Project raw governance proposals onto the dashboard shape. Items without
/// an id are dropped; a missing title falls back through the content chain
/// to "Proposal #<id>"; an unparsable voting end time becomes `None` (the
/// proposal still lists, it just never produces a calendar event).
pub fn proposal_summaries(raw: Vec<RawProposal>) -> Vec<ProposalSummary> {
    raw.into_iter()
        .filter_map(|p| {
            let id = p.proposal_id.filter(|s| !s.is_empty())?;
            let title = p
                .content
                .as_ref()
                .and_then(|c| {
                    c.title
                        .clone()
                        .or_else(|| c.value.as_ref().and_then(|v| v.title.clone()))
                })
                .unwrap_or_else(|| format!("Proposal #{id}"));
            let voting_end_time = p
                .voting_end_time
                .as_deref()
                .and_then(parse_rfc3339_utc);
            Some(ProposalSummary {
                status: p.status.as_ref().map(|s| s.code()).unwrap_or(0),
                voting_end_time,
                location: "On-chain Governance".into(),
                image_url: GOVERNANCE_IMAGE_URL.into(),
                id,
                title,
            })
        })
        .collect()
}

/// Calendar entries for proposals. Skips anything without a voting end time
/// (partial governance data is expected, not an error); the event spans the
/// final 24 hours of the voting window.
pub fn governance_events(proposals: &[ProposalSummary]) -> Vec<Event> {
    proposals
        .iter()
        .filter_map(|p| {
            let end = p.voting_end_time?;
            Some(Event {
                id: format!("prop-{}", p.id),
                title: format!("Proposal: {}", p.title),
                description: format!(
                    "Proposal #{} - Status: {}. Your vote shapes the Injective future.",
                    p.id, p.status
                ),
                start_time: end - Duration::hours(24),
                end_time: end,
                category: EventCategory::Governance,
                tags: vec!["Vote".into(), "DAO".into()],
                color: EventColor::Blue,
                location: p.location.clone(),
                image_url: p.image_url.clone(),
            })
        })
        .collect()
}

/// Synthetic burn-auction entry: a 1-hour window ending at the next burn
/// instant. Requires a live round and countdown; otherwise nothing.
pub fn auction_event(pulse: &PulseSummary, now: DateTime<Utc>) -> Option<Event> {
    if pulse.auction_round == 0 || pulse.burn_countdown == 0 {
        return None;
    }
    let end = now + Duration::seconds(pulse.burn_countdown as i64);
    Some(Event {
        id: format!("auction-{}", pulse.auction_round),
        title: format!("Burn Auction #{}", pulse.auction_round),
        description: format!(
            "Weekly INJ Burn. Amount: {:.2} INJ focused on ecosystem deflation.",
            pulse.burn_amount
        ),
        start_time: end - Duration::hours(1),
        end_time: end,
        category: EventCategory::Auction,
        tags: vec!["Deflationary".into(), "System".into()],
        color: EventColor::Orange,
        location: "Injective Burn Module".into(),
        image_url: AUCTION_IMAGE_URL.into(),
    })
}

/// Normalize community feed records. Returns the kept events and the count
/// of records dropped (missing id/title).
///
/// When `project_to_current_year` is set, the feed's stated date is shifted
/// onto `now`'s year — a documented demo policy that keeps preview data
/// feeling current. Date-only values get a 14:00 time; full timestamps keep
/// theirs.
pub fn community_events(
    items: Vec<FeedItem>,
    now: DateTime<Utc>,
    project_to_current_year: bool,
) -> (Vec<Event>, usize) {
    let mut dropped = 0usize;
    let mut out = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let (id, title) = match (&item.id, &item.title) {
            (Some(id), Some(title)) if !title.is_empty() => (id.to_string(), title.clone()),
            _ => {
                dropped += 1;
                continue;
            }
        };

        let (mut date, time) = item
            .date
            .as_deref()
            .and_then(parse_feed_date)
            .unwrap_or((now.date_naive(), None));
        if project_to_current_year {
            // Feb 29 in a non-leap target year lands on Mar 1.
            date = date.with_year(now.year()).unwrap_or_else(|| {
                NaiveDate::from_ymd_opt(now.year(), 3, 1).expect("Mar 1 exists")
            });
        }
        let time = time.unwrap_or_else(|| {
            NaiveTime::from_hms_opt(FEED_DEFAULT_HOUR, 0, 0).expect("feed default time")
        });
        let start = date.and_time(time).and_utc();

        let description = item
            .excerpt
            .as_deref()
            .map(normalize_text)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| title.clone());

        let image_url = item
            .best_image_url()
            .unwrap_or(PLACEHOLDER_IMAGE_URL)
            .to_string();

        out.push(Event {
            id: format!("comm-api-{id}"),
            description,
            start_time: start,
            end_time: start + Duration::hours(FEED_EVENT_HOURS),
            category: EventCategory::Community,
            tags: item
                .tags
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| vec!["Event".into()]),
            color: EventColor::FEED_CYCLE[index % EventColor::FEED_CYCLE.len()],
            location: item
                .location
                .clone()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| FEED_DEFAULT_LOCATION.into()),
            image_url,
            title,
        });
    }

    (out, dropped)
}

/// Client-side composition: the full calendar list for one payload, in
/// priority order — live auction entry, governance entries, then the
/// community section (which already carries real events before filler).
pub fn events_from_payload(data: &PulseData, now: DateTime<Utc>) -> Vec<Event> {
    let mut events = Vec::with_capacity(data.community.events.len() + 8);
    events.extend(auction_event(&data.pulse, now));
    events.extend(governance_events(&data.governance.proposals));
    events.extend(data.community.events.iter().cloned());
    events
}

fn parse_rfc3339_utc(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Accepts full RFC 3339 timestamps, bare `YYYY-MM-DDTHH:MM:SS`, and bare
/// `YYYY-MM-DD` dates. Anything else is a parse failure (caller falls back
/// to "today").
fn parse_feed_date(s: &str) -> Option<(NaiveDate, Option<NaiveTime>)> {
    if let Some(dt) = parse_rfc3339_utc(s) {
        return Some((dt.date_naive(), Some(dt.time())));
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some((dt.date(), Some(dt.time())));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some((d, None));
    }
    None
}
