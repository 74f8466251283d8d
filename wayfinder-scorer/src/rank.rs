//! Ranking of per-place scoring outcomes.
#![forbid(unsafe_code)]

use std::cmp::Ordering;

use wayfinder_core::Recommendation;

use crate::engine::PlaceOutcome;

/// Order outcomes by descending score, stable on ties.
///
/// Failed places become degraded entries (score 0, no explanations) rather
/// than disappearing, so one bad candidate never hides the rest. Ties keep
/// the original candidate order: the sort is stable and outcomes arrive in
/// input order.
///
/// # Examples
/// ```
/// use wayfinder_scorer::{PlaceOutcome, ScoredPlace, rank};
///
/// let outcomes = vec![
///     PlaceOutcome::Scored(ScoredPlace {
///         place_id: "low".into(),
///         name: "Low".into(),
///         score: 10.0,
///         matched_features: vec![],
///     }),
///     PlaceOutcome::Scored(ScoredPlace {
///         place_id: "high".into(),
///         name: "High".into(),
///         score: 90.0,
///         matched_features: vec![],
///     }),
/// ];
/// let ranked = rank(&outcomes);
/// assert_eq!(ranked.first().map(|r| r.place_id.as_str()), Some("high"));
/// ```
#[must_use]
pub fn rank(outcomes: &[PlaceOutcome]) -> Vec<Recommendation> {
    let mut entries: Vec<Recommendation> =
        outcomes.iter().map(PlaceOutcome::to_recommendation).collect();
    // Vec::sort_by is stable; equal scores keep input order.
    entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    entries
}
