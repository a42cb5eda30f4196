//! GEO visibility score over a trailing window.

use chrono::{DateTime, Duration, Utc};
use geolens_core::ScrapeRecord;

use crate::types::ScoreSummary;

/// Default trailing lookback for the score summary.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Compute the composite GEO score for records already scoped to one
/// customer and query.
///
/// Restricts to records with `created_at >= now - window_days`, then:
/// mentioned% and top-ranked% are the share of records with the respective
/// flag, and the score is `round(mentioned_pct * 0.6 + top_ranked_pct * 0.4)`
/// capped at 100. The 60/40 weighting and round-then-cap order are
/// contractual.
///
/// An empty window yields [`ScoreSummary::zero`] — a defined result, not an
/// error.
#[must_use]
pub fn visibility_score(
    records: &[ScrapeRecord],
    now: DateTime<Utc>,
    window_days: i64,
) -> ScoreSummary {
    let cutoff = now - Duration::days(window_days);
    let recent: Vec<&ScrapeRecord> = records.iter().filter(|r| r.created_at >= cutoff).collect();

    if recent.is_empty() {
        return ScoreSummary::zero();
    }

    let mentioned = recent.iter().filter(|r| r.customer_mentioned).count();
    let top_ranked = recent.iter().filter(|r| r.customer_top_ranked).count();

    #[allow(clippy::cast_precision_loss)]
    let sample = recent.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let mentioned_pct = mentioned as f64 / sample * 100.0;
    #[allow(clippy::cast_precision_loss)]
    let top_ranked_pct = top_ranked as f64 / sample * 100.0;

    let weighted = (mentioned_pct * 0.6 + top_ranked_pct * 0.4).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = weighted.min(100.0) as u8;

    ScoreSummary {
        score,
        mentioned_pct,
        top_ranked_pct,
        sample_size: recent.len(),
    }
}
