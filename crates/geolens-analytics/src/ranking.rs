//! Top-N rankings over flattened array fields.
//!
//! All three rankings share the same shape: flatten the chosen array field
//! across records, count per distinct value, compute each value's share of
//! the flattened total, sort descending by count, truncate. Ties keep
//! first-seen (flattening) order: counting goes through an insertion-ordered
//! vector and the sort is stable.

use std::collections::HashMap;

use geolens_core::ScrapeRecord;

use crate::domain::extract_domain;
use crate::trend::{entity_trend, trend_direction};
use crate::types::{DomainGroup, EntityKind, RankedEntity, RankedSource};

/// Occurrence counts in first-seen order, plus the flattened total.
struct Counts {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
    total: usize,
}

impl Counts {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            total: 0,
        }
    }

    fn add(&mut self, value: &str) -> usize {
        self.total += 1;
        match self.index.get(value) {
            Some(&i) => {
                self.entries[i].1 += 1;
                i
            }
            None => {
                let i = self.entries.len();
                self.index.insert(value.to_string(), i);
                self.entries.push((value.to_string(), 1));
                i
            }
        }
    }

    /// Stable descending sort by count; first-seen order breaks ties.
    fn ranked(mut self) -> (Vec<(String, usize)>, usize) {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        (self.entries, self.total)
    }
}

#[allow(clippy::cast_precision_loss)]
fn share_pct(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}

/// Rank competitor names by mention count across all records.
///
/// Trend direction is derived from each ranked competitor's daily series
/// over the same record set; only the truncated slice pays that cost.
#[must_use]
pub fn rank_candidates(records: &[ScrapeRecord], top_n: usize) -> Vec<RankedEntity> {
    let mut counts = Counts::new();
    for record in records {
        for name in &record.candidates {
            counts.add(name);
        }
    }
    let (entries, total) = counts.ranked();
    if total == 0 {
        return Vec::new();
    }

    entries
        .into_iter()
        .take(top_n)
        .map(|(name, count)| {
            let points = entity_trend(records, &name, EntityKind::Competitor, None);
            RankedEntity {
                share_pct: share_pct(count, total),
                direction: trend_direction(&points),
                name,
                count,
            }
        })
        .collect()
}

/// Rank cited-source URLs by citation count, tracking the distinct queries
/// each URL appeared under.
#[must_use]
pub fn rank_sources(records: &[ScrapeRecord], top_n: usize) -> Vec<RankedSource> {
    let mut counts = Counts::new();
    let mut queries: Vec<Vec<String>> = Vec::new();
    for record in records {
        for url in &record.cited_sources {
            let i = counts.add(url);
            if i == queries.len() {
                queries.push(Vec::new());
            }
            if !queries[i].contains(&record.query) {
                queries[i].push(record.query.clone());
            }
        }
    }

    // Re-pair query lists with their URLs before the sort reorders entries.
    let mut by_url: HashMap<String, Vec<String>> = HashMap::new();
    for ((url, _), qs) in counts.entries.iter().zip(queries) {
        by_url.insert(url.clone(), qs);
    }

    let (entries, total) = counts.ranked();
    if total == 0 {
        return Vec::new();
    }

    entries
        .into_iter()
        .take(top_n)
        .map(|(url, count)| RankedSource {
            domain: extract_domain(&url),
            share_pct: share_pct(count, total),
            queries: by_url.remove(&url).unwrap_or_default(),
            url,
            count,
        })
        .collect()
}

/// Re-aggregate cited sources by extracted host.
///
/// Counts every flattened source occurrence against its host and tracks the
/// distinct member URLs per host; shares are against the flattened source
/// total, so the full (non-truncated) list still sums to 100.
#[must_use]
pub fn rank_domains(records: &[ScrapeRecord], top_n: usize) -> Vec<DomainGroup> {
    let mut counts = Counts::new();
    let mut members: Vec<Vec<String>> = Vec::new();
    for record in records {
        for url in &record.cited_sources {
            let host = extract_domain(url);
            let i = counts.add(&host);
            if i == members.len() {
                members.push(Vec::new());
            }
            if !members[i].contains(url) {
                members[i].push(url.clone());
            }
        }
    }

    let mut by_host: HashMap<String, Vec<String>> = HashMap::new();
    for ((host, _), urls) in counts.entries.iter().zip(members) {
        by_host.insert(host.clone(), urls);
    }

    let (entries, total) = counts.ranked();
    if total == 0 {
        return Vec::new();
    }

    entries
        .into_iter()
        .take(top_n)
        .map(|(domain, count)| DomainGroup {
            share_pct: share_pct(count, total),
            sources: by_host.remove(&domain).unwrap_or_default(),
            domain,
            count,
        })
        .collect()
}
