//! Record filtering by trailing window or explicit date range.
//!
//! The score function windows internally; these helpers serve the
//! presentation layer's date-range pickers, which filter before handing a
//! set to the ranking functions.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use geolens_core::ScrapeRecord;

/// Records with `created_at` within the trailing `days` window ending at `now`.
#[must_use]
pub fn within_window(records: &[ScrapeRecord], now: DateTime<Utc>, days: i64) -> Vec<ScrapeRecord> {
    let cutoff = now - Duration::days(days);
    records
        .iter()
        .filter(|r| r.created_at >= cutoff)
        .cloned()
        .collect()
}

/// Records whose calendar date falls in `[from, to]` (both inclusive).
#[must_use]
pub fn between(records: &[ScrapeRecord], from: NaiveDate, to: NaiveDate) -> Vec<ScrapeRecord> {
    records
        .iter()
        .filter(|r| {
            let date = r.created_at.date_naive();
            date >= from && date <= to
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{at, record};

    #[test]
    fn window_keeps_boundary_record() {
        let now = at("2025-06-30T00:00:00Z");
        let records = vec![
            record(at("2025-05-31T00:00:00Z"), false, false, &[], &[]),
            record(at("2025-05-30T23:59:59Z"), false, false, &[], &[]),
        ];
        let kept = within_window(&records, now, 30);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].created_at, at("2025-05-31T00:00:00Z"));
    }

    #[test]
    fn between_is_inclusive_on_both_ends() {
        let records = vec![
            record(at("2025-06-01T23:00:00Z"), false, false, &[], &[]),
            record(at("2025-06-05T00:00:00Z"), false, false, &[], &[]),
            record(at("2025-06-06T00:00:00Z"), false, false, &[], &[]),
        ];
        let from: NaiveDate = "2025-06-01".parse().unwrap();
        let to: NaiveDate = "2025-06-05".parse().unwrap();
        let kept = between(&records, from, to);
        assert_eq!(kept.len(), 2);
    }
}
