//! Lexical scoring: four independent scorers behind one `Scorer` trait.
//!
//! Each scorer is invoked through `run_guarded`, the single fault barrier:
//! an `Err` or a panic inside one scorer becomes that scorer's zero result and
//! never reaches the other scorers or the caller.

pub mod bm25;
pub mod cosine;
pub mod feedback;
pub mod fusion;
pub mod keywords;
pub mod skills;
pub mod tfidf;

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ScoringConfig;
use crate::errors::ScoringError;
use crate::text::normalize;

use self::bm25::Bm25Scorer;
use self::cosine::CosineScorer;
use self::keywords::KeywordScorer;
use self::tfidf::TfidfScorer;

// ────────────────────────────────────────────────────────────────────────────
// Shared data models
// ────────────────────────────────────────────────────────────────────────────

/// Identifies one of the lexical scoring models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    Tfidf,
    Bm25,
    Cosine,
    Keyword,
}

impl ScorerKind {
    pub const ALL: [ScorerKind; 4] = [
        ScorerKind::Tfidf,
        ScorerKind::Bm25,
        ScorerKind::Cosine,
        ScorerKind::Keyword,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScorerKind::Tfidf => "tfidf",
            ScorerKind::Bm25 => "bm25",
            ScorerKind::Cosine => "cosine",
            ScorerKind::Keyword => "keyword",
        }
    }
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything a scorer may read for one job–resume pair.
///
/// Built once per invocation; the token streams are shared by all scorers
/// instead of being re-derived by each.
#[derive(Debug, Clone)]
pub struct ScoringInput<'a> {
    pub job_text: &'a str,
    pub resume_text: &'a str,
    pub required_skills: &'a [String],
    pub job_tokens: Vec<String>,
    pub resume_tokens: Vec<String>,
}

impl<'a> ScoringInput<'a> {
    pub fn new(job_text: &'a str, resume_text: &'a str, required_skills: &'a [String]) -> Self {
        Self {
            job_text,
            resume_text,
            required_skills,
            job_tokens: normalize(job_text),
            resume_tokens: normalize(resume_text),
        }
    }
}

/// One scorer's output.
///
/// `raw` is in the scorer's native range (documented per scorer);
/// `percentage` is the 0–100 form that fusion averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubScore {
    pub kind: ScorerKind,
    pub raw: f64,
    pub percentage: f64,
    /// Keywords found in the resume. Only the keyword scorer fills this.
    pub matched_keywords: Vec<String>,
}

impl SubScore {
    pub fn new(kind: ScorerKind, raw: f64, percentage: f64) -> Self {
        Self {
            kind,
            raw,
            percentage,
            matched_keywords: Vec::new(),
        }
    }

    /// The value a failed scorer contributes.
    pub fn zero(kind: ScorerKind) -> Self {
        Self::new(kind, 0.0, 0.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A lexical scoring model. Implementations must be pure: no state carried
/// between calls, no I/O.
pub trait Scorer: Send + Sync {
    fn kind(&self) -> ScorerKind;

    fn score(&self, input: &ScoringInput<'_>) -> Result<SubScore, ScoringError>;
}

/// The production scorer set, in fusion order.
pub fn default_scorers(config: &ScoringConfig) -> Vec<Box<dyn Scorer>> {
    vec![
        Box::new(TfidfScorer),
        Box::new(Bm25Scorer::from_config(config)),
        Box::new(CosineScorer),
        Box::new(KeywordScorer::new(config.keyword_limit)),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Fault barrier
// ────────────────────────────────────────────────────────────────────────────

/// Runs `scorer` in an isolated failure domain.
///
/// Returns the scorer's result, or `SubScore::zero` if it returned an error or
/// panicked. Failures are logged and never propagated.
pub fn run_guarded(scorer: &dyn Scorer, input: &ScoringInput<'_>) -> SubScore {
    let kind = scorer.kind();
    match panic::catch_unwind(AssertUnwindSafe(|| scorer.score(input))) {
        Ok(Ok(sub_score)) => {
            debug!(
                scorer = %kind,
                raw = sub_score.raw,
                percentage = sub_score.percentage,
                "Scorer finished"
            );
            sub_score
        }
        Ok(Err(e)) => {
            warn!(scorer = %kind, error = %e, "Scorer failed; contributing zero");
            SubScore::zero(kind)
        }
        Err(payload) => {
            let e = ScoringError::Panicked {
                stage: kind.to_string(),
                message: panic_message(payload.as_ref()),
            };
            warn!(scorer = %kind, error = %e, "Scorer panicked; contributing zero");
            SubScore::zero(kind)
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Rejects NaN and infinities before they can reach fusion.
pub(crate) fn ensure_finite(stage: &'static str, value: f64) -> Result<f64, ScoringError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::NonFinite { stage, value })
    }
}
