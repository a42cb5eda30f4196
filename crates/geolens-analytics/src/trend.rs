//! Day-granularity trend series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use geolens_core::ScrapeRecord;

use crate::domain::extract_domain;
use crate::types::{EntityKind, PerformancePoint, TrendDirection, TrendPoint};

/// Series shorter than this always report [`TrendDirection::Stable`].
const MIN_DIRECTION_POINTS: usize = 4;
/// Dead-band in percentage points around "no movement".
const DIRECTION_THRESHOLD: f64 = 2.5;

#[allow(clippy::cast_precision_loss)]
fn pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn entity_present(record: &ScrapeRecord, entity: &str, kind: EntityKind) -> bool {
    match kind {
        EntityKind::Competitor => record.candidates.iter().any(|c| c == entity),
        EntityKind::Source => record.cited_sources.iter().any(|s| s == entity),
        EntityKind::Domain => record
            .cited_sources
            .iter()
            .any(|s| extract_domain(s) == entity),
    }
}

/// Bucket records by calendar date and count how often `entity` appears.
///
/// An optional query filter restricts the set first. Each bucket's
/// percentage is mentions over the bucket's record total. Points come out
/// sorted strictly ascending by date (the buckets are a `BTreeMap`, so
/// there are no duplicate dates by construction).
///
/// An empty record set or an empty entity name yields an empty series.
#[must_use]
pub fn entity_trend(
    records: &[ScrapeRecord],
    entity: &str,
    kind: EntityKind,
    query_filter: Option<&str>,
) -> Vec<TrendPoint> {
    if records.is_empty() || entity.is_empty() {
        return Vec::new();
    }

    let mut buckets: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for record in records {
        if let Some(query) = query_filter {
            if record.query != query {
                continue;
            }
        }
        let entry = buckets.entry(record.created_at.date_naive()).or_insert((0, 0));
        entry.1 += 1;
        if entity_present(record, entity, kind) {
            entry.0 += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(date, (mentions, total))| TrendPoint {
            date,
            mentions,
            total,
            percentage: pct(mentions, total),
        })
        .collect()
}

/// Per-day mentioned% / top-ranked% series for the customer itself.
#[must_use]
pub fn daily_performance(records: &[ScrapeRecord]) -> Vec<PerformancePoint> {
    let mut buckets: BTreeMap<NaiveDate, (usize, usize, usize)> = BTreeMap::new();
    for record in records {
        let entry = buckets
            .entry(record.created_at.date_naive())
            .or_insert((0, 0, 0));
        entry.2 += 1;
        if record.customer_mentioned {
            entry.0 += 1;
        }
        if record.customer_top_ranked {
            entry.1 += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(date, (mentioned, top_ranked, total))| PerformancePoint {
            date,
            mentioned_pct: pct(mentioned, total),
            top_ranked_pct: pct(top_ranked, total),
            total,
        })
        .collect()
}

/// Classify a trend series by comparing the later half against the earlier
/// half of the mean bucket percentage, with a small dead-band.
#[must_use]
pub fn trend_direction(points: &[TrendPoint]) -> TrendDirection {
    if points.len() < MIN_DIRECTION_POINTS {
        return TrendDirection::Stable;
    }

    let mid = points.len() / 2;
    let mean = |slice: &[TrendPoint]| -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let n = slice.len() as f64;
        slice.iter().map(|p| p.percentage).sum::<f64>() / n
    };

    let delta = mean(&points[mid..]) - mean(&points[..mid]);
    if delta > DIRECTION_THRESHOLD {
        TrendDirection::Up
    } else if delta < -DIRECTION_THRESHOLD {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{at, record};

    #[test]
    fn empty_entity_name_yields_empty_series() {
        let records = vec![record(at("2025-06-01T10:00:00Z"), true, false, &["A"], &[])];
        assert!(entity_trend(&records, "", EntityKind::Competitor, None).is_empty());
    }

    #[test]
    fn empty_records_yield_empty_series() {
        assert!(entity_trend(&[], "A", EntityKind::Competitor, None).is_empty());
    }

    #[test]
    fn buckets_by_calendar_date_sorted_ascending() {
        let records = vec![
            record(at("2025-06-03T09:00:00Z"), false, false, &["A"], &[]),
            record(at("2025-06-01T09:00:00Z"), false, false, &["A"], &[]),
            record(at("2025-06-01T18:00:00Z"), false, false, &["B"], &[]),
            record(at("2025-06-02T12:00:00Z"), false, false, &[], &[]),
        ];
        let points = entity_trend(&records, "A", EntityKind::Competitor, None);
        let dates: Vec<_> = points.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-06-01", "2025-06-02", "2025-06-03"]);
        // Strictly ascending, no duplicates.
        assert!(points.windows(2).all(|w| w[0].date < w[1].date));

        assert_eq!(points[0].mentions, 1);
        assert_eq!(points[0].total, 2);
        assert_eq!(points[0].percentage, 50.0);
        assert_eq!(points[1].mentions, 0);
        assert_eq!(points[2].percentage, 100.0);
    }

    #[test]
    fn query_filter_restricts_buckets() {
        let mut a = record(at("2025-06-01T09:00:00Z"), false, false, &["A"], &[]);
        a.query = "q1".to_string();
        let mut b = record(at("2025-06-01T10:00:00Z"), false, false, &["A"], &[]);
        b.query = "q2".to_string();
        let points = entity_trend(&[a, b], "A", EntityKind::Competitor, Some("q1"));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].total, 1);
    }

    #[test]
    fn source_kind_matches_exact_url() {
        let records = vec![record(
            at("2025-06-01T09:00:00Z"),
            false,
            false,
            &[],
            &["https://example.com/a"],
        )];
        let hit = entity_trend(
            &records,
            "https://example.com/a",
            EntityKind::Source,
            None,
        );
        assert_eq!(hit[0].mentions, 1);
        let miss = entity_trend(&records, "example.com", EntityKind::Source, None);
        assert_eq!(miss[0].mentions, 0);
    }

    #[test]
    fn domain_kind_matches_extracted_host() {
        let records = vec![record(
            at("2025-06-01T09:00:00Z"),
            false,
            false,
            &[],
            &["https://www.example.com/a"],
        )];
        let points = entity_trend(&records, "example.com", EntityKind::Domain, None);
        assert_eq!(points[0].mentions, 1);
        assert_eq!(points[0].percentage, 100.0);
    }

    #[test]
    fn daily_performance_counts_both_flags() {
        let records = vec![
            record(at("2025-06-01T09:00:00Z"), true, true, &[], &[]),
            record(at("2025-06-01T11:00:00Z"), true, false, &[], &[]),
            record(at("2025-06-02T09:00:00Z"), false, false, &[], &[]),
        ];
        let points = daily_performance(&records);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].mentioned_pct, 100.0);
        assert_eq!(points[0].top_ranked_pct, 50.0);
        assert_eq!(points[0].total, 2);
        assert_eq!(points[1].mentioned_pct, 0.0);
    }

    fn point(date: &str, percentage: f64) -> TrendPoint {
        TrendPoint {
            date: date.parse().unwrap(),
            mentions: 0,
            total: 1,
            percentage,
        }
    }

    #[test]
    fn short_series_is_stable() {
        let points = vec![point("2025-06-01", 0.0), point("2025-06-02", 100.0)];
        assert_eq!(trend_direction(&points), TrendDirection::Stable);
    }

    #[test]
    fn rising_series_is_up() {
        let points = vec![
            point("2025-06-01", 10.0),
            point("2025-06-02", 20.0),
            point("2025-06-03", 60.0),
            point("2025-06-04", 80.0),
        ];
        assert_eq!(trend_direction(&points), TrendDirection::Up);
    }

    #[test]
    fn falling_series_is_down() {
        let points = vec![
            point("2025-06-01", 80.0),
            point("2025-06-02", 70.0),
            point("2025-06-03", 20.0),
            point("2025-06-04", 10.0),
        ];
        assert_eq!(trend_direction(&points), TrendDirection::Down);
    }

    #[test]
    fn flat_series_is_stable() {
        let points = vec![
            point("2025-06-01", 50.0),
            point("2025-06-02", 51.0),
            point("2025-06-03", 49.0),
            point("2025-06-04", 50.0),
        ];
        assert_eq!(trend_direction(&points), TrendDirection::Stable);
    }
}
