//! Cosine similarity over raw term-frequency vectors (no IDF). Range: [0, 1].

use std::collections::HashMap;

use tracing::warn;

use crate::errors::ScoringError;
use crate::scoring::{ensure_finite, Scorer, ScorerKind, ScoringInput, SubScore};
use crate::text::normalize;

pub struct CosineScorer;

impl Scorer for CosineScorer {
    fn kind(&self) -> ScorerKind {
        ScorerKind::Cosine
    }

    fn score(&self, input: &ScoringInput<'_>) -> Result<SubScore, ScoringError> {
        let similarity = cosine_similarity(&input.job_tokens, &input.resume_tokens)?;
        Ok(SubScore::new(ScorerKind::Cosine, similarity, similarity * 100.0))
    }
}

/// Scores raw job text against raw resume text. Never fails; errors score 0.
pub fn cosine_score(job_text: &str, resume_text: &str) -> f64 {
    cosine_similarity(&normalize(job_text), &normalize(resume_text)).unwrap_or_else(|e| {
        warn!(error = %e, "Cosine similarity calculation failed");
        0.0
    })
}

fn frequency_vector(tokens: &[String]) -> HashMap<&str, f64> {
    let mut vector = HashMap::new();
    for token in tokens {
        *vector.entry(token.as_str()).or_insert(0.0) += 1.0;
    }
    vector
}

fn dot_product(a: &HashMap<&str, f64>, b: &HashMap<&str, f64>) -> f64 {
    a.iter()
        .filter_map(|(term, freq)| b.get(term).map(|other| freq * other))
        .sum()
}

fn magnitude(vector: &HashMap<&str, f64>) -> f64 {
    vector.values().map(|v| v * v).sum::<f64>().sqrt()
}

pub(crate) fn cosine_similarity(
    job_tokens: &[String],
    resume_tokens: &[String],
) -> Result<f64, ScoringError> {
    if job_tokens.is_empty() || resume_tokens.is_empty() {
        return Ok(0.0);
    }

    let job_vector = frequency_vector(job_tokens);
    let resume_vector = frequency_vector(resume_tokens);

    let job_magnitude = magnitude(&job_vector);
    let resume_magnitude = magnitude(&resume_vector);
    if job_magnitude == 0.0 || resume_magnitude == 0.0 {
        return Ok(0.0);
    }

    let similarity = dot_product(&job_vector, &resume_vector) / (job_magnitude * resume_magnitude);
    Ok(ensure_finite("cosine", similarity)?.clamp(0.0, 1.0))
}
