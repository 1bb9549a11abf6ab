// src/filler.rs
//! Synthetic calendar filler.
//!
//! Real data is sparse most weeks; the dashboard pads every day of the
//! current and next month with 1–2 generated entries so the month view
//! never looks abandoned. The randomness source is injected so tests can
//! seed it and assert exact output; production passes an OS-seeded rng.

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeDelta, Utc};
use rand::Rng;

use crate::model::{Event, EventCategory, EventColor};

/// Marker tag carried by every generated entry, so filler can be filtered
/// out or styled apart from real data.
pub const FILLER_TAG: &str = "Synthetic";

/// Earliest generated start hour (inclusive).
pub const START_HOUR_MIN: u32 = 9;
/// Latest generated start hour (inclusive).
pub const START_HOUR_MAX: u32 = 20;

const TITLES: [&str; 15] = [
    "DeFi Warrior Sync",
    "Validator Community Call",
    "Ninja Pass Giveaway",
    "Rust Smart Contract Security",
    "CosmWasm Workshop",
    "Injective Flagship Space",
    "Trading Guild Meetup",
    "Volan Upgrade Prep",
    "Governance Office Hours",
    "Mito Finance Launch Party",
    "Helix Trading Competition",
    "Hydro Protocol Staking",
    "Dojo Swap AMA",
    "Black Panther Vault Update",
    "Talis Protocol NFT Drop",
];

const DESCRIPTIONS: [&str; 5] = [
    "Join us for a deep dive into the latest protocol updates.",
    "Community gathering to discuss the future of finance on Injective.",
    "Learn how to build next-gen dApps with CosmWasm.",
    "Weekly sync with the core developer team.",
    "Special guest appearance by industry leaders.",
];

const LOCATIONS: [&str; 7] = [
    "Discord Stage",
    "Twitter Space",
    "Zoom",
    "Injective Hub",
    "Metaverse",
    "Telegram Group",
    "Google Meet",
];

const IMAGES: [&str; 7] = [
    "https://images.unsplash.com/photo-1517245386807-bb43f82c33c4?q=80&w=600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1522202176988-66273c2fd55f?q=80&w=600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1540575861501-7c00117f72ad?q=80&w=600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1516321318423-f06f85e504b3?q=80&w=600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1531482615713-2afd69097998?q=80&w=600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1556761175-5973dc0f32e7?q=80&w=600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1505373877841-8d25f7d46678?q=80&w=600&auto=format&fit=crop",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &'a [&'a str]) -> &'a str {
    pool[rng.random_range(0..pool.len())]
}

/// Generate filler for one month: every day gets 1–2 entries with a start
/// hour in the 9:00–20:00 window and a 1–3 hour duration.
pub fn month_events<R: Rng + ?Sized>(rng: &mut R, year: i32, month: u32) -> Vec<Event> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let mut out = Vec::new();

    for day in 1..=days_in_month(first) {
        let per_day = rng.random_range(1..=2);
        for i in 0..per_day {
            let start_hour = rng.random_range(START_HOUR_MIN..=START_HOUR_MAX);
            let duration_hours = rng.random_range(1..=3i64);
            let title = pick(rng, &TITLES);
            let description = pick(rng, &DESCRIPTIONS);
            let location = pick(rng, &LOCATIONS);
            let image_url = pick(rng, &IMAGES);
            let color = EventColor::PALETTE[rng.random_range(0..EventColor::PALETTE.len())];

            let start = first
                .with_day(day)
                .and_then(|d| d.and_hms_opt(start_hour, 0, 0))
                .expect("generated start in range")
                .and_utc();

            out.push(Event {
                id: format!("gen-{year}-{month:02}-{day:02}-{i}"),
                title: title.to_string(),
                description: description.to_string(),
                start_time: start,
                end_time: start + TimeDelta::hours(duration_hours),
                category: EventCategory::Community,
                tags: vec![FILLER_TAG.into(), "Demo".into()],
                color,
                location: location.to_string(),
                image_url: image_url.to_string(),
            });
        }
    }
    out
}

/// Filler for the visible window: current month plus the next one.
pub fn for_current_and_next_month<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<Event> {
    let today = now.date_naive();
    let mut out = month_events(rng, today.year(), today.month());
    if let Some(next) = today.checked_add_months(Months::new(1)) {
        out.extend(month_events(rng, next.year(), next.month()));
    }
    out
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next = first
        .checked_add_months(Months::new(1))
        .expect("month arithmetic in range");
    (next - first).num_days() as u32
}
