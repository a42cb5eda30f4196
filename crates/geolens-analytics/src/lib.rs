//! Pure aggregation layer for GeoLens.
//!
//! Turns immutable [`geolens_core::ScrapeRecord`] sets into chart-ready
//! derived series: the 60/40 GEO visibility score, competitor/source/domain
//! rankings, and day-granularity trend series. Everything here is
//! synchronous and side-effect free; "now" is always a parameter so callers
//! (and tests) control the clock.

pub mod cache;
pub mod domain;
pub mod ranking;
pub mod score;
pub mod trend;
pub mod types;
pub mod window;

pub use cache::MemoCache;
pub use domain::extract_domain;
pub use ranking::{rank_candidates, rank_domains, rank_sources};
pub use score::{visibility_score, DEFAULT_WINDOW_DAYS};
pub use trend::{daily_performance, entity_trend, trend_direction};
pub use types::{
    DomainGroup, EntityKind, PerformancePoint, RankedEntity, RankedSource, ScoreSummary,
    TrendDirection, TrendPoint,
};
pub use window::{between, within_window};

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::{DateTime, Utc};
    use geolens_core::ScrapeRecord;
    use uuid::Uuid;

    /// Build a record with the given timestamp, flags, and array fields.
    pub fn record(
        created_at: DateTime<Utc>,
        mentioned: bool,
        top_ranked: bool,
        candidates: &[&str],
        cited_sources: &[&str],
    ) -> ScrapeRecord {
        ScrapeRecord {
            id: Uuid::new_v4(),
            customer: "acme".to_string(),
            query: "best widget".to_string(),
            created_at,
            customer_mentioned: mentioned,
            customer_top_ranked: top_ranked,
            cited_sources: cited_sources.iter().map(|s| (*s).to_string()).collect(),
            candidates: candidates.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    pub fn at(rfc3339: &str) -> DateTime<Utc> {
        rfc3339.parse().expect("valid RFC 3339 timestamp")
    }
}
