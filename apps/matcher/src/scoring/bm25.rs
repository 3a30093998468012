//! BM25 relevance: the resume token stream queried against a one-document
//! index of the job token stream.
//!
//! Raw range: [0, ∞). Short single-document indexes rarely exceed ~10 for
//! strong matches, so `raw / saturation × 100` (clamped) is the percentage.
//! The saturation point is configurable; raw scores above it cap at 100.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ScoringConfig;
use crate::errors::ScoringError;
use crate::scoring::{ensure_finite, Scorer, ScorerKind, ScoringInput, SubScore};
use crate::text::normalize;

pub const DEFAULT_K1: f64 = 1.2;
pub const DEFAULT_B: f64 = 0.75;
pub const DEFAULT_SATURATION: f64 = 10.0;

/// Raw engine score plus its 0–100 rescaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bm25Score {
    pub raw_score: f64,
    pub normalized_score: f64,
}

impl Bm25Score {
    pub const ZERO: Bm25Score = Bm25Score {
        raw_score: 0.0,
        normalized_score: 0.0,
    };
}

#[derive(Debug, Clone)]
pub struct Bm25Scorer {
    k1: f64,
    b: f64,
    saturation: f64,
}

impl Default for Bm25Scorer {
    fn default() -> Self {
        Self::new(DEFAULT_K1, DEFAULT_B, DEFAULT_SATURATION)
    }
}

impl Bm25Scorer {
    pub fn new(k1: f64, b: f64, saturation: f64) -> Self {
        Self { k1, b, saturation }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.bm25_k1, config.bm25_b, config.bm25_saturation)
    }

    /// Scores pre-normalized token streams.
    pub fn score_tokens(
        &self,
        job_tokens: &[String],
        resume_tokens: &[String],
    ) -> Result<Bm25Score, ScoringError> {
        if job_tokens.is_empty() || resume_tokens.is_empty() {
            return Ok(Bm25Score::ZERO);
        }

        let index = Bm25Index::build(&[job_tokens]);
        let raw_score = ensure_finite("bm25", index.score(0, resume_tokens, self.k1, self.b))?;
        Ok(Bm25Score {
            raw_score,
            normalized_score: self.normalize(raw_score)?,
        })
    }

    fn normalize(&self, raw_score: f64) -> Result<f64, ScoringError> {
        if raw_score > self.saturation {
            debug!(
                raw_score,
                saturation = self.saturation,
                "BM25 raw score above saturation point; capping at 100"
            );
        }
        let scaled = ensure_finite("bm25", raw_score / self.saturation * 100.0)?;
        Ok(scaled.clamp(0.0, 100.0))
    }
}

impl Scorer for Bm25Scorer {
    fn kind(&self) -> ScorerKind {
        ScorerKind::Bm25
    }

    fn score(&self, input: &ScoringInput<'_>) -> Result<SubScore, ScoringError> {
        let result = self.score_tokens(&input.job_tokens, &input.resume_tokens)?;
        Ok(SubScore::new(
            ScorerKind::Bm25,
            result.raw_score,
            result.normalized_score,
        ))
    }
}

/// Scores raw job text against raw resume text with default parameters.
/// Never fails; errors score zero.
pub fn bm25_score(job_text: &str, resume_text: &str) -> Bm25Score {
    Bm25Scorer::default()
        .score_tokens(&normalize(job_text), &normalize(resume_text))
        .unwrap_or_else(|e| {
            warn!(error = %e, "BM25 calculation failed");
            Bm25Score::ZERO
        })
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory index
// ────────────────────────────────────────────────────────────────────────────

/// Single-field index built per comparison and dropped afterwards.
struct Bm25Index<'a> {
    term_freqs: Vec<HashMap<&'a str, u32>>,
    doc_lengths: Vec<usize>,
    avg_doc_length: f64,
}

impl<'a> Bm25Index<'a> {
    fn build(docs: &[&'a [String]]) -> Self {
        let term_freqs = docs
            .iter()
            .map(|&tokens| {
                let mut tf = HashMap::new();
                for token in tokens {
                    *tf.entry(token.as_str()).or_insert(0) += 1;
                }
                tf
            })
            .collect();
        let doc_lengths: Vec<usize> = docs.iter().map(|d| d.len()).collect();
        let avg_doc_length = if doc_lengths.is_empty() {
            0.0
        } else {
            doc_lengths.iter().sum::<usize>() as f64 / doc_lengths.len() as f64
        };

        Self {
            term_freqs,
            doc_lengths,
            avg_doc_length,
        }
    }

    fn doc_count(&self) -> f64 {
        self.term_freqs.len() as f64
    }

    /// `ln(1 + (N − df + 0.5) / (df + 0.5))`
    fn idf(&self, term: &str) -> f64 {
        let df = self
            .term_freqs
            .iter()
            .filter(|tf| tf.contains_key(term))
            .count() as f64;
        (1.0 + (self.doc_count() - df + 0.5) / (df + 0.5)).ln()
    }

    /// Every query occurrence contributes, so repeated query terms add up.
    fn score(&self, doc: usize, query: &[String], k1: f64, b: f64) -> f64 {
        if self.avg_doc_length <= 0.0 {
            return 0.0;
        }
        let length_norm = 1.0 - b + b * (self.doc_lengths[doc] as f64 / self.avg_doc_length);

        query
            .iter()
            .filter_map(|term| {
                let tf = *self.term_freqs[doc].get(term.as_str())? as f64;
                Some(self.idf(term) * (tf * (k1 + 1.0)) / (tf + k1 * length_norm))
            })
            .sum()
    }
}
