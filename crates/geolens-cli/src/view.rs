//! Derived-series view over a loaded record set.
//!
//! Commands that render the same aggregation more than once per run (the
//! report renders a top-3 summary and a top-10 detail from one record set)
//! go through memo caches keyed on the aggregation parameters. The caches
//! are advanced to the data store's version counter after every load, so a
//! refetch invalidates everything.

use chrono::NaiveDate;

use geolens_analytics::{
    between, rank_candidates, rank_domains, rank_sources, DomainGroup, MemoCache, RankedEntity,
    RankedSource,
};
use geolens_core::ScrapeRecord;

type RankKey = (usize, Option<NaiveDate>, Option<NaiveDate>);

/// Cached rankings for one record set at one version.
#[derive(Default)]
pub struct AnalyticsView {
    competitors: MemoCache<RankKey, Vec<RankedEntity>>,
    sources: MemoCache<RankKey, Vec<RankedSource>>,
    domains: MemoCache<RankKey, Vec<DomainGroup>>,
}

impl AnalyticsView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Point every cache at the record set's current version.
    pub fn advance_to(&mut self, version: u64) {
        self.competitors.advance_to(version);
        self.sources.advance_to(version);
        self.domains.advance_to(version);
    }

    pub fn top_competitors(
        &mut self,
        records: &[ScrapeRecord],
        top_n: usize,
        scope: DateScope,
    ) -> Vec<RankedEntity> {
        self.competitors
            .get_or_insert_with((top_n, scope.0, scope.1), || {
                rank_candidates(&date_scoped(records, scope), top_n)
            })
    }

    pub fn top_sources(
        &mut self,
        records: &[ScrapeRecord],
        top_n: usize,
        scope: DateScope,
    ) -> Vec<RankedSource> {
        self.sources
            .get_or_insert_with((top_n, scope.0, scope.1), || {
                rank_sources(&date_scoped(records, scope), top_n)
            })
    }

    pub fn top_domains(
        &mut self,
        records: &[ScrapeRecord],
        top_n: usize,
        scope: DateScope,
    ) -> Vec<DomainGroup> {
        self.domains
            .get_or_insert_with((top_n, scope.0, scope.1), || {
                rank_domains(&date_scoped(records, scope), top_n)
            })
    }
}

/// Optional inclusive `--from` / `--to` bounds.
pub type DateScope = (Option<NaiveDate>, Option<NaiveDate>);

/// Apply the date-range picker to a record set. No bounds means no copy of
/// the filter pass; a missing end is unbounded on that side.
#[must_use]
pub fn date_scoped(records: &[ScrapeRecord], (from, to): DateScope) -> Vec<ScrapeRecord> {
    if from.is_none() && to.is_none() {
        return records.to_vec();
    }
    between(
        records,
        from.unwrap_or(NaiveDate::MIN),
        to.unwrap_or(NaiveDate::MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use geolens_core::ScrapeRecord;
    use uuid::Uuid;

    fn record(created_at: &str, candidates: &[&str]) -> ScrapeRecord {
        ScrapeRecord {
            id: Uuid::new_v4(),
            customer: "acme".to_string(),
            query: "best widget".to_string(),
            created_at: created_at.parse::<DateTime<Utc>>().expect("valid timestamp"),
            customer_mentioned: false,
            customer_top_ranked: false,
            cited_sources: Vec::new(),
            candidates: candidates.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn repeated_lookup_hits_the_cache() {
        let records = vec![record("2025-06-01T00:00:00Z", &["A", "B"])];
        let mut view = AnalyticsView::new();
        view.advance_to(1);
        let first = view.top_competitors(&records, 10, (None, None));
        let again = view.top_competitors(&records, 10, (None, None));
        assert_eq!(first, again);
        assert_eq!(view.competitors.len(), 1);
    }

    #[test]
    fn summary_and_detail_cuts_are_cached_separately() {
        let records = vec![record("2025-06-01T00:00:00Z", &["A", "B", "C", "D"])];
        let mut view = AnalyticsView::new();
        view.advance_to(1);
        assert_eq!(view.top_competitors(&records, 3, (None, None)).len(), 3);
        assert_eq!(view.top_competitors(&records, 10, (None, None)).len(), 4);
        assert_eq!(view.competitors.len(), 2);
    }

    #[test]
    fn advancing_the_version_invalidates() {
        let records = vec![record("2025-06-01T00:00:00Z", &["A"])];
        let mut view = AnalyticsView::new();
        view.advance_to(1);
        view.top_competitors(&records, 10, (None, None));
        view.advance_to(2);
        assert!(view.competitors.is_empty());
    }

    #[test]
    fn date_scope_bounds_are_inclusive_and_one_sided() {
        let records = vec![
            record("2025-06-01T12:00:00Z", &["A"]),
            record("2025-06-05T12:00:00Z", &["B"]),
            record("2025-06-09T12:00:00Z", &["C"]),
        ];
        let from: NaiveDate = "2025-06-05".parse().unwrap();
        let to: NaiveDate = "2025-06-05".parse().unwrap();

        assert_eq!(date_scoped(&records, (Some(from), Some(to))).len(), 1);
        assert_eq!(date_scoped(&records, (Some(from), None)).len(), 2);
        assert_eq!(date_scoped(&records, (None, Some(to))).len(), 2);
        assert_eq!(date_scoped(&records, (None, None)).len(), 3);
    }
}
