//! Fixed-weight fusion of the four sub-scores into one percentage.

use serde::Serialize;

use crate::errors::ScoringError;
use crate::scoring::{ensure_finite, ScorerKind, SubScore};

/// Every scorer carries the same weight.
pub const SCORER_WEIGHT: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FusedScore {
    /// Unrounded weighted total in [0, 100]. Feedback thresholds read this.
    pub score: f64,
    /// `score` rounded to two decimals.
    pub final_score: f64,
    /// `score` rounded to the nearest integer.
    pub match_percentage: u32,
}

/// Fuses the four scores, each already on its own scale.
///
/// `tfidf` and `cosine` are in [0, 1]; `bm25_normalized` and `keyword` are
/// percentages. Inputs outside their range are clamped first.
pub fn fuse(
    tfidf: f64,
    bm25_normalized: f64,
    cosine: f64,
    keyword: f64,
) -> Result<FusedScore, ScoringError> {
    fuse_percentages([
        tfidf * 100.0,
        bm25_normalized,
        cosine * 100.0,
        keyword,
    ])
}

/// Fuses scorer outputs by kind. A kind that is absent contributes 0.
pub fn fuse_sub_scores(sub_scores: &[SubScore]) -> Result<FusedScore, ScoringError> {
    let percentage_of = |kind: ScorerKind| {
        sub_scores
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.percentage)
            .unwrap_or(0.0)
    };

    fuse_percentages(ScorerKind::ALL.map(percentage_of))
}

fn fuse_percentages(percentages: [f64; 4]) -> Result<FusedScore, ScoringError> {
    let mut total = 0.0;
    for value in percentages {
        total += ensure_finite("fusion", value)?.clamp(0.0, 100.0) * SCORER_WEIGHT;
    }

    let score = total.clamp(0.0, 100.0);
    Ok(FusedScore {
        score,
        final_score: (score * 100.0).round() / 100.0,
        match_percentage: score.round() as u32,
    })
}
