//! TF-IDF overlap: the share of the job's TF-IDF mass that reappears in the resume.
//!
//! Range: [0, 1]. Job (doc 0) and resume (doc 1) form a two-document corpus, so
//! a term present in both is discounted relative to a job-only term.

use std::collections::HashMap;

use tracing::warn;

use crate::errors::ScoringError;
use crate::scoring::{ensure_finite, Scorer, ScorerKind, ScoringInput, SubScore};
use crate::text::normalize;

const JOB_DOC: usize = 0;
const RESUME_DOC: usize = 1;

pub struct TfidfScorer;

impl Scorer for TfidfScorer {
    fn kind(&self) -> ScorerKind {
        ScorerKind::Tfidf
    }

    fn score(&self, input: &ScoringInput<'_>) -> Result<SubScore, ScoringError> {
        let overlap = tfidf_overlap(&input.job_tokens, &input.resume_tokens)?;
        Ok(SubScore::new(ScorerKind::Tfidf, overlap, overlap * 100.0))
    }
}

/// Scores raw job text against raw resume text. Never fails; errors score 0.
pub fn tfidf_score(job_text: &str, resume_text: &str) -> f64 {
    tfidf_overlap(&normalize(job_text), &normalize(resume_text)).unwrap_or_else(|e| {
        warn!(error = %e, "TF-IDF calculation failed");
        0.0
    })
}

/// Term counts per document, built fresh for each comparison.
struct TwoDocCorpus<'a> {
    docs: [HashMap<&'a str, u32>; 2],
}

impl<'a> TwoDocCorpus<'a> {
    fn new(job_tokens: &'a [String], resume_tokens: &'a [String]) -> Self {
        Self {
            docs: [term_counts(job_tokens), term_counts(resume_tokens)],
        }
    }

    /// `1 + ln(N / (1 + df))`
    fn idf(&self, term: &str) -> f64 {
        let df = self.docs.iter().filter(|d| d.contains_key(term)).count() as f64;
        1.0 + (self.docs.len() as f64 / (1.0 + df)).ln()
    }

    fn tfidf(&self, term: &str, doc: usize) -> f64 {
        let tf = self.docs[doc].get(term).copied().unwrap_or(0) as f64;
        tf * self.idf(term)
    }
}

fn term_counts(tokens: &[String]) -> HashMap<&str, u32> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Walks the job token stream (repetitions included) and sums each term's job
/// weight into the denominator, and into the numerator when the resume also
/// carries the term.
pub(crate) fn tfidf_overlap(
    job_tokens: &[String],
    resume_tokens: &[String],
) -> Result<f64, ScoringError> {
    if job_tokens.is_empty() || resume_tokens.is_empty() {
        return Ok(0.0);
    }

    let corpus = TwoDocCorpus::new(job_tokens, resume_tokens);
    let mut total_score = 0.0_f64;
    let mut max_possible_score = 0.0_f64;

    for term in job_tokens {
        let job_weight = corpus.tfidf(term, JOB_DOC);
        if job_weight > 0.0 {
            max_possible_score += job_weight;
            if corpus.tfidf(term, RESUME_DOC) > 0.0 {
                total_score += job_weight;
            }
        }
    }

    let score = if max_possible_score > 0.0 {
        total_score / max_possible_score
    } else {
        0.0
    };

    Ok(ensure_finite("tfidf", score)?.clamp(0.0, 1.0))
}
