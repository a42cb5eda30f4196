//! Derived, never-persisted analytics types.

use chrono::NaiveDate;
use serde::Serialize;

/// The composite GEO visibility score over a trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    /// 0–100 composite: `round(mentioned_pct * 0.6 + top_ranked_pct * 0.4)`,
    /// capped at 100.
    pub score: u8,
    pub mentioned_pct: f64,
    pub top_ranked_pct: f64,
    /// Records inside the window. Never includes rows outside the filter.
    pub sample_size: usize,
}

impl ScoreSummary {
    /// The defined empty-window result: all zeros, not an error.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            score: 0,
            mentioned_pct: 0.0,
            top_ranked_pct: 0.0,
            sample_size: 0,
        }
    }
}

/// Direction of an entity's trend over the observed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Up => write!(f, "up"),
            TrendDirection::Down => write!(f, "down"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// One competitor in a ranking, ordered by mention count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntity {
    pub name: String,
    pub count: usize,
    /// Share of all flattened mentions, `count / total * 100`.
    pub share_pct: f64,
    pub direction: TrendDirection,
}

/// One cited source URL in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSource {
    pub url: String,
    pub domain: String,
    pub count: usize,
    pub share_pct: f64,
    /// Distinct queries this source appeared under, in first-seen order.
    pub queries: Vec<String>,
}

/// Cited sources re-aggregated by extracted host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainGroup {
    pub domain: String,
    pub count: usize,
    pub share_pct: f64,
    /// Distinct member URLs contributing to this host, in first-seen order.
    pub sources: Vec<String>,
}

/// Which array field an entity name is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Exact match against `candidates`.
    Competitor,
    /// Exact match against `cited_sources`.
    Source,
    /// Host equality after domain extraction of each cited source.
    Domain,
}

/// One day bucket in an entity trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub mentions: usize,
    pub total: usize,
    /// `mentions / total * 100` for the bucket.
    pub percentage: f64,
}

/// One day bucket of the customer's own mentioned/top-ranked performance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformancePoint {
    pub date: NaiveDate,
    pub mentioned_pct: f64,
    pub top_ranked_pct: f64,
    pub total: usize,
}
