//! The matching pipeline.
//!
//! normalize → four guarded scorers → fusion → skill matcher → feedback.
//! `score_match` always returns a `MatchResult`: a failing scorer contributes
//! zero, and a failure anywhere else yields `MatchResult::fallback`.

use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::ScoringConfig;
use crate::errors::ScoringError;
use crate::models::{MatchRequest, MatchResult};
use crate::scoring::feedback::generate_feedback;
use crate::scoring::fusion::fuse_sub_scores;
use crate::scoring::skills::match_skills;
use crate::scoring::{
    default_scorers, ensure_finite, panic_message, run_guarded, Scorer, ScorerKind, ScoringInput,
    SubScore,
};

pub struct MatchEngine {
    config: ScoringConfig,
    scorers: Vec<Box<dyn Scorer>>,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl MatchEngine {
    pub fn new(config: ScoringConfig) -> Self {
        let scorers = default_scorers(&config);
        Self { config, scorers }
    }

    /// Engine with a custom scorer set. Kinds that no scorer reports
    /// contribute zero to the fused score.
    pub fn with_scorers(config: ScoringConfig, scorers: Vec<Box<dyn Scorer>>) -> Self {
        Self { config, scorers }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores one job posting against one resume. Never fails.
    pub fn score_match(
        &self,
        job_description: &str,
        job_requirements: &str,
        required_skills: &[String],
        resume_text: &str,
    ) -> MatchResult {
        let job_text = format!("{job_description} {job_requirements}");

        match panic::catch_unwind(AssertUnwindSafe(|| {
            self.try_score(&job_text, required_skills, resume_text)
        })) {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!(error = %e, "Match scoring failed; returning fallback result");
                MatchResult::fallback(required_skills)
            }
            Err(payload) => {
                let e = ScoringError::Panicked {
                    stage: "pipeline".to_string(),
                    message: panic_message(payload.as_ref()),
                };
                warn!(error = %e, "Match scoring panicked; returning fallback result");
                MatchResult::fallback(required_skills)
            }
        }
    }

    pub fn score_request(&self, request: &MatchRequest) -> MatchResult {
        self.score_match(
            &request.job_description,
            &request.job_requirements,
            &request.required_skills,
            &request.resume_text,
        )
    }

    /// The pipeline without the outer barrier. Scorer failures are still
    /// absorbed; fusion and result assembly errors propagate.
    pub fn try_score(
        &self,
        job_text: &str,
        required_skills: &[String],
        resume_text: &str,
    ) -> Result<MatchResult, ScoringError> {
        let input = ScoringInput::new(job_text, resume_text, required_skills);
        debug!(
            job_tokens = input.job_tokens.len(),
            resume_tokens = input.resume_tokens.len(),
            "Normalized inputs"
        );

        let sub_scores = self.run_scorers(&input);
        let fused = fuse_sub_scores(&sub_scores)?;

        let keyword = find(&sub_scores, ScorerKind::Keyword);
        let keyword_match_score = ensure_finite("keyword", keyword.map_or(0.0, |s| s.percentage))?;
        let skills = match_skills(required_skills, resume_text);
        let feedback = generate_feedback(
            fused.score,
            &skills.matched_skills,
            &skills.missing_skills,
            keyword_match_score,
        );

        Ok(MatchResult {
            tfidf_score: raw_of(&sub_scores, ScorerKind::Tfidf)?,
            bm25_score: raw_of(&sub_scores, ScorerKind::Bm25)?,
            cosine_score: raw_of(&sub_scores, ScorerKind::Cosine)?,
            keyword_match_score,
            final_score: fused.final_score,
            match_percentage: fused.match_percentage,
            matched_skills: skills.matched_skills,
            missing_skills: skills.missing_skills,
            keywords_matched: keyword.map(|s| s.matched_keywords.clone()).unwrap_or_default(),
            feedback,
        })
    }

    fn run_scorers(&self, input: &ScoringInput<'_>) -> Vec<SubScore> {
        if self.config.parallel_scorers {
            self.scorers
                .par_iter()
                .map(|scorer| run_guarded(scorer.as_ref(), input))
                .collect()
        } else {
            self.scorers
                .iter()
                .map(|scorer| run_guarded(scorer.as_ref(), input))
                .collect()
        }
    }
}

fn find(sub_scores: &[SubScore], kind: ScorerKind) -> Option<&SubScore> {
    sub_scores.iter().find(|s| s.kind == kind)
}

fn raw_of(sub_scores: &[SubScore], kind: ScorerKind) -> Result<f64, ScoringError> {
    let raw = find(sub_scores, kind).map_or(0.0, |s| s.raw);
    ensure_finite(kind.label(), raw)
}

/// Scores with the default engine. Never fails.
pub fn score_match(
    job_description: &str,
    job_requirements: &str,
    required_skills: &[String],
    resume_text: &str,
) -> MatchResult {
    MatchEngine::default().score_match(
        job_description,
        job_requirements,
        required_skills,
        resume_text,
    )
}
