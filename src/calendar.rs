// src/calendar.rs
//! Month-view binning: bucket the aggregated event list by calendar day and
//! lay the days out as a 7-column grid, Sunday-first, padded with the
//! adjacent months' days so every row is full.
//!
//! Bucketing uses the UTC calendar date of `start_time` — the payload is
//! server-normalized, which keeps the grid independent of the viewer's
//! timezone.

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate, TimeDelta};
use serde::Serialize;

use crate::model::Event;

/// Cap on directly visible entries per day cell; the rest collapse into an
/// overflow count.
pub const MAX_VISIBLE_EVENTS_PER_DAY: usize = 3;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the leading/trailing days borrowed from adjacent months.
    pub in_month: bool,
    pub is_today: bool,
    /// At most [`MAX_VISIBLE_EVENTS_PER_DAY`], payload order preserved.
    pub events: Vec<Event>,
    /// Count of additional events beyond the visible ones.
    pub overflow: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<DayCell>,
}

/// Sunday of the week containing `d`.
pub fn start_of_week(d: NaiveDate) -> NaiveDate {
    d - TimeDelta::days(d.weekday().num_days_from_sunday() as i64)
}

/// Saturday of the week containing `d`.
pub fn end_of_week(d: NaiveDate) -> NaiveDate {
    start_of_week(d) + TimeDelta::days(6)
}

/// Build the grid for the month containing `reference`. Cells run from the
/// Sunday of the week containing the 1st through the Saturday of the week
/// containing the last day; the length is always a multiple of 7.
pub fn month_grid(reference: NaiveDate, today: NaiveDate, events: &[Event]) -> MonthGrid {
    let first = reference.with_day(1).expect("day 1 exists in every month");
    let last = first
        .checked_add_months(Months::new(1))
        .map(|n| n - TimeDelta::days(1))
        .expect("month arithmetic in range");

    let mut buckets: BTreeMap<NaiveDate, Vec<Event>> = BTreeMap::new();
    for ev in events {
        buckets
            .entry(ev.start_time.date_naive())
            .or_default()
            .push(ev.clone());
    }

    let mut cells = Vec::with_capacity(42);
    let mut day = start_of_week(first);
    let stop = end_of_week(last);
    while day <= stop {
        let mut evs = buckets.remove(&day).unwrap_or_default();
        let overflow = evs.len().saturating_sub(MAX_VISIBLE_EVENTS_PER_DAY);
        evs.truncate(MAX_VISIBLE_EVENTS_PER_DAY);
        cells.push(DayCell {
            date: day,
            in_month: day.year() == first.year() && day.month() == first.month(),
            is_today: day == today,
            events: evs,
            overflow,
        });
        day += TimeDelta::days(1);
    }

    MonthGrid {
        year: first.year(),
        month: first.month(),
        cells,
    }
}

/// Month navigation over a cached event collection. Moving the cursor only
/// recomputes the grid; it never refetches data.
#[derive(Debug, Clone, Copy)]
pub struct CalendarCursor {
    reference: NaiveDate,
}

impl CalendarCursor {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            reference: today.with_day(1).expect("day 1 exists in every month"),
        }
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn prev_month(&mut self) {
        if let Some(r) = self.reference.checked_sub_months(Months::new(1)) {
            self.reference = r;
        }
    }

    pub fn next_month(&mut self) {
        if let Some(r) = self.reference.checked_add_months(Months::new(1)) {
            self.reference = r;
        }
    }

    pub fn go_today(&mut self, today: NaiveDate) {
        self.reference = today.with_day(1).expect("day 1 exists in every month");
    }

    pub fn grid(&self, today: NaiveDate, events: &[Event]) -> MonthGrid {
        month_grid(self.reference, today, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventCategory, EventColor};
    use chrono::{DateTime, Utc, Weekday};

    fn ev(id: &str, start: &str) -> Event {
        let start: DateTime<Utc> = start.parse().unwrap();
        Event {
            id: id.into(),
            title: id.into(),
            description: id.into(),
            start_time: start,
            end_time: start + TimeDelta::hours(1),
            category: EventCategory::Community,
            tags: vec![],
            color: EventColor::Purple,
            location: "Online".into(),
            image_url: String::new(),
        }
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn grid_starts_on_sunday_and_is_a_multiple_of_seven() {
        let grid = month_grid(d("2025-08-10"), d("2025-08-10"), &[]);
        assert_eq!(grid.cells.len() % 7, 0);
        assert_eq!(grid.cells[0].date.weekday(), Weekday::Sun);
        // August 2025 starts on a Friday: the first cell is July 27.
        assert_eq!(grid.cells[0].date, d("2025-07-27"));
        assert!(!grid.cells[0].in_month);
        assert_eq!(grid.cells.last().unwrap().date.weekday(), Weekday::Sat);
    }

    #[test]
    fn events_land_in_the_cell_matching_their_start_date() {
        let events = vec![
            ev("a", "2025-08-05T09:00:00Z"),
            ev("b", "2025-08-05T18:00:00Z"),
            ev("c", "2025-08-20T12:00:00Z"),
        ];
        let grid = month_grid(d("2025-08-01"), d("2025-08-01"), &events);
        for cell in &grid.cells {
            for e in &cell.events {
                assert_eq!(e.start_time.date_naive(), cell.date);
            }
        }
        let fifth = grid.cells.iter().find(|c| c.date == d("2025-08-05")).unwrap();
        assert_eq!(fifth.events.len(), 2);
        // Payload order is preserved within a day.
        assert_eq!(fifth.events[0].id, "a");
    }

    #[test]
    fn out_of_month_cells_still_receive_their_events() {
        let events = vec![ev("prev", "2025-07-28T10:00:00Z")];
        let grid = month_grid(d("2025-08-01"), d("2025-08-01"), &events);
        let cell = grid.cells.iter().find(|c| c.date == d("2025-07-28")).unwrap();
        assert!(!cell.in_month);
        assert_eq!(cell.events.len(), 1);
    }

    #[test]
    fn overflow_splits_at_three_visible() {
        let events: Vec<_> = (0..5)
            .map(|i| ev(&format!("e{i}"), "2025-08-05T10:00:00Z"))
            .collect();
        let grid = month_grid(d("2025-08-01"), d("2025-08-01"), &events);
        let cell = grid.cells.iter().find(|c| c.date == d("2025-08-05")).unwrap();
        assert_eq!(cell.events.len(), MAX_VISIBLE_EVENTS_PER_DAY);
        assert_eq!(cell.overflow, 2);
        assert_eq!(cell.events[2].id, "e2");

        let small = month_grid(d("2025-08-01"), d("2025-08-01"), &events[..3].to_vec());
        let cell = small.cells.iter().find(|c| c.date == d("2025-08-05")).unwrap();
        assert_eq!(cell.overflow, 0);
    }

    #[test]
    fn today_is_flagged_exactly_once_when_visible() {
        let today = d("2025-08-14");
        let grid = month_grid(d("2025-08-01"), today, &[]);
        let flagged: Vec<_> = grid.cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].date, today);
    }

    #[test]
    fn cursor_navigates_and_recomputes_from_cached_events() {
        let today = d("2025-12-15");
        let events = vec![ev("jan", "2026-01-03T10:00:00Z")];
        let mut cursor = CalendarCursor::new(today);
        assert_eq!(cursor.grid(today, &events).month, 12);

        cursor.next_month();
        let grid = cursor.grid(today, &events);
        assert_eq!((grid.year, grid.month), (2026, 1));
        assert!(grid
            .cells
            .iter()
            .any(|c| c.date == d("2026-01-03") && c.events.len() == 1));

        cursor.prev_month();
        cursor.prev_month();
        assert_eq!(cursor.grid(today, &events).month, 11);

        cursor.go_today(today);
        assert_eq!(cursor.grid(today, &events).month, 12);
    }
}
