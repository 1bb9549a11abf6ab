// tests/calendar_grid.rs
//
// Grid-shape properties across many months, plus the end-to-end binning of
// a seeded filler batch.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::SeedableRng;

use ninja_radar::calendar::{month_grid, start_of_week, MAX_VISIBLE_EVENTS_PER_DAY};
use ninja_radar::filler;

#[test]
fn grid_shape_holds_for_every_month_in_a_span_of_years() {
    for year in [1999, 2020, 2024, 2025, 2026, 2031] {
        for month in 1..=12u32 {
            let reference = NaiveDate::from_ymd_opt(year, month, 15).unwrap();
            let grid = month_grid(reference, reference, &[]);

            assert_eq!(grid.cells.len() % 7, 0, "{year}-{month}: ragged grid");
            assert!(grid.cells.len() >= 28 && grid.cells.len() <= 42);

            let first_of_month = reference.with_day(1).unwrap();
            assert_eq!(grid.cells[0].date, start_of_week(first_of_month));
            assert_eq!(grid.cells[0].date.weekday(), Weekday::Sun);
            assert_eq!(grid.cells.last().unwrap().date.weekday(), Weekday::Sat);

            // Cells are contiguous days.
            for pair in grid.cells.windows(2) {
                assert_eq!(pair[1].date - pair[0].date, chrono::TimeDelta::days(1));
            }

            // Exactly the month's days are flagged in_month.
            let in_month = grid.cells.iter().filter(|c| c.in_month).count() as i64;
            let next_first = first_of_month
                .checked_add_months(chrono::Months::new(1))
                .unwrap();
            assert_eq!(in_month, (next_first - first_of_month).num_days());
        }
    }
}

#[test]
fn seeded_filler_bins_into_matching_cells_with_overflow_math() {
    let mut rng = StdRng::seed_from_u64(2025);
    // Two batches for the same month stack up to 2–4 events per day,
    // so some days overflow the 3-visible cap.
    let mut events = filler::month_events(&mut rng, 2025, 8);
    events.extend(filler::month_events(&mut rng, 2025, 8));

    let reference = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
    let grid = month_grid(reference, reference, &events);

    let mut seen = 0usize;
    for cell in &grid.cells {
        assert!(cell.events.len() <= MAX_VISIBLE_EVENTS_PER_DAY);
        for ev in &cell.events {
            assert_eq!(ev.start_time.date_naive(), cell.date);
        }
        if cell.in_month {
            let total = cell.events.len() + cell.overflow;
            assert!((2..=4).contains(&total), "day {} total {total}", cell.date);
            if total > MAX_VISIBLE_EVENTS_PER_DAY {
                assert_eq!(cell.overflow, total - MAX_VISIBLE_EVENTS_PER_DAY);
                assert_eq!(cell.events.len(), MAX_VISIBLE_EVENTS_PER_DAY);
            } else {
                assert_eq!(cell.overflow, 0);
            }
        } else {
            assert!(cell.events.is_empty(), "filler stays within its month");
        }
        seen += cell.events.len() + cell.overflow;
    }
    assert_eq!(seen, events.len(), "every event lands in exactly one cell");
}
