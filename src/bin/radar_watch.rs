//! Terminal watcher: polls the pulse endpoint like the dashboard frontend
//! would, then prints the HUD line and the current month grid.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ninja_radar::calendar::CalendarCursor;
use ninja_radar::config::RadarConfig;
use ninja_radar::normalize;
use ninja_radar::poll::{HttpPulseFetcher, PollView, PulsePoller};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let cfg = RadarConfig::load().unwrap_or_default();
    let fetcher = Arc::new(
        HttpPulseFetcher::new(cfg.pulse_url.clone()).with_timeout(cfg.http_timeout_secs),
    );
    let poller = Arc::new(PulsePoller::new(fetcher).with_interval(cfg.poll_interval_secs));
    let (_poll_task, _tick_task) = Arc::clone(&poller).spawn();

    for _ in 0..30 {
        tokio::time::sleep(Duration::from_secs(1)).await;
        match poller.view() {
            PollView::Loading => println!("syncing..."),
            PollView::Error { message } => println!("no data yet: {message}"),
            PollView::Ready {
                data,
                stale,
                countdown,
            } => {
                let marker = if stale { " (stale)" } else { "" };
                println!(
                    "block #{} | ~{} TPS | burn #{} ({:.2} INJ) in {}{marker}",
                    data.pulse.block_height,
                    data.pulse.tps,
                    data.pulse.auction_round,
                    data.pulse.burn_amount,
                    format_countdown(countdown),
                );
                println!(
                    "{} proposals in voting · {} calendar events",
                    data.governance.active_proposals,
                    data.community.events.len()
                );

                let now = Utc::now();
                let events = normalize::events_from_payload(&data, now);
                let cursor = CalendarCursor::new(now.date_naive());
                let grid = cursor.grid(now.date_naive(), &events);

                println!("\n{}-{:02}  (Su Mo Tu We Th Fr Sa)", grid.year, grid.month);
                for week in grid.cells.chunks(7) {
                    let row: Vec<String> = week
                        .iter()
                        .map(|c| {
                            use chrono::Datelike;
                            let day = if c.in_month {
                                format!("{:2}", c.date.day())
                            } else {
                                " .".to_string()
                            };
                            let load = c.events.len() + c.overflow;
                            let mark = if c.is_today { '*' } else if load > 0 { '\'' } else { ' ' };
                            format!("{day}{mark}")
                        })
                        .collect();
                    println!("  {}", row.join(" "));
                }
                return;
            }
        }
    }
    println!("gave up waiting for a pulse payload");
}

fn format_countdown(seconds: u64) -> String {
    let d = seconds / 86_400;
    let h = (seconds % 86_400) / 3_600;
    let m = (seconds % 3_600) / 60;
    let s = seconds % 60;
    if d > 0 {
        format!("{d}d {h}h {m}m")
    } else {
        format!("{h}h {m}m {s}s")
    }
}
