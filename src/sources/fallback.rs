// src/sources/fallback.rs
//! Deterministic fallback data, used only when a real section comes back
//! empty. Never merged with partial real data.

use chrono::{DateTime, Duration, Utc};

use crate::model::{Event, EventCategory, EventColor, ProposalSummary};
use crate::sources::types::STATUS_VOTING;

/// Anchor an offset-day wall-clock time to `now`'s calendar.
fn at(now: DateTime<Utc>, day_offset: i64, hour: u32, minute: u32) -> DateTime<Utc> {
    (now.date_naive() + Duration::days(day_offset))
        .and_hms_opt(hour, minute, 0)
        .expect("wall-clock time in range")
        .and_utc()
}

pub fn fallback_proposals(now: DateTime<Utc>) -> Vec<ProposalSummary> {
    vec![
        ProposalSummary {
            id: "921".into(),
            title: "Enable RWA Module v2 Upgrade".into(),
            status: STATUS_VOTING,
            voting_end_time: Some(now + Duration::days(2)),
            location: "Global Consensus".into(),
            image_url:
                "https://images.unsplash.com/photo-1621416894569-0f39ed31d247?q=80&w=600&auto=format&fit=crop"
                    .into(),
        },
        ProposalSummary {
            id: "920".into(),
            title: "Ecosystem Grant: Ninja Radar Dashboard".into(),
            status: STATUS_VOTING,
            voting_end_time: Some(now + Duration::days(4)),
            location: "iBuildDAO Review".into(),
            image_url:
                "https://images.unsplash.com/photo-1551288049-bbbda536639a?q=80&w=600&auto=format&fit=crop"
                    .into(),
        },
    ]
}

pub fn fallback_community_events(now: DateTime<Utc>) -> Vec<Event> {
    vec![
        Event {
            id: "comm-1".into(),
            title: "Ninja Labs Developer Workshop".into(),
            description: "Deep dive into Injective SDK and smart contract development. \
                          Perfect for building the next big dApp."
                .into(),
            start_time: at(now, 1, 14, 0),
            end_time: at(now, 1, 17, 0),
            category: EventCategory::Developer,
            tags: vec!["Education".into(), "SDK".into()],
            color: EventColor::Purple,
            location: "Global Cosmos Hub (Virtual)".into(),
            image_url:
                "https://images.unsplash.com/photo-1517245386807-bb43f82c33c4?q=80&w=600&auto=format&fit=crop"
                    .into(),
        },
        Event {
            id: "comm-2".into(),
            title: "Ecosystem Online Sharing".into(),
            description: "Weekly call with ecosystem projects to share updates and \
                          collaborate on the future of Ninja network."
                .into(),
            start_time: at(now, -1, 10, 0),
            end_time: at(now, -1, 12, 0),
            category: EventCategory::Community,
            tags: vec!["Sharing".into(), "Projects".into()],
            color: EventColor::Green,
            location: "Injective Discord Level 3".into(),
            image_url:
                "https://images.unsplash.com/photo-1522202176988-66273c2fd55f?q=80&w=600&auto=format&fit=crop"
                    .into(),
        },
        Event {
            id: "comm-3".into(),
            title: "iBuild Hackathon: Final Demo Day".into(),
            description: "The big day! Watch the best projects pitch to judges and win grants."
                .into(),
            start_time: at(now, 5, 9, 30),
            end_time: at(now, 5, 20, 0),
            category: EventCategory::Hackathon,
            tags: vec!["Grants".into(), "Demo".into()],
            color: EventColor::Red,
            location: "OpenBuild Main Stage".into(),
            image_url:
                "https://images.unsplash.com/photo-1540575861501-7c00117f72ad?q=80&w=600&auto=format&fit=crop"
                    .into(),
        },
        Event {
            id: "comm-4".into(),
            title: "Ambassador Sync Call".into(),
            description: "Coordinate with Injective ambassadors worldwide for local \
                          community growth."
                .into(),
            start_time: at(now, 2, 16, 0),
            end_time: at(now, 2, 17, 30),
            category: EventCategory::Community,
            tags: vec!["Global".into(), "Coordination".into()],
            color: EventColor::Blue,
            location: "Zoom HQ Online".into(),
            image_url:
                "https://images.unsplash.com/photo-1516321318423-f06f85e504b3?q=80&w=600&auto=format&fit=crop"
                    .into(),
        },
        Event {
            id: "comm-5".into(),
            title: "Newbie Friendly: Injective 101".into(),
            description: "Introduction to the Injective ecosystem for new Ninjas. Learn \
                          how to stake and use DEXs."
                .into(),
            start_time: at(now, -3, 21, 0),
            end_time: at(now, -3, 22, 30),
            category: EventCategory::Education,
            tags: vec!["Newbie Friendly".into(), "Basics".into()],
            color: EventColor::Yellow,
            location: "Injective Academy".into(),
            image_url:
                "https://images.unsplash.com/photo-1531482615713-2afd69097998?q=80&w=600&auto=format&fit=crop"
                    .into(),
        },
    ]
}
