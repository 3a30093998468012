//! Async seam over the synchronous engine.
//!
//! Async callers hold an `Arc<dyn MatchScorer>` and never block their runtime:
//! `LexicalMatchScorer` moves the CPU-bound pipeline onto tokio's blocking pool.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, instrument};

use crate::engine::MatchEngine;
use crate::models::{MatchRequest, MatchResult};

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A match scorer backend. Like `score_match`, `score` never fails.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, request: MatchRequest) -> MatchResult;

    /// Short backend name, for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LexicalMatchScorer
// ────────────────────────────────────────────────────────────────────────────

/// TF-IDF / BM25 / cosine / keyword backend.
#[derive(Clone, Default)]
pub struct LexicalMatchScorer {
    engine: Arc<MatchEngine>,
}

impl LexicalMatchScorer {
    pub fn new(engine: MatchEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

#[async_trait]
impl MatchScorer for LexicalMatchScorer {
    #[instrument(skip_all, fields(backend = "lexical"))]
    async fn score(&self, request: MatchRequest) -> MatchResult {
        let engine = Arc::clone(&self.engine);
        let fallback_skills = request.required_skills.clone();

        match tokio::task::spawn_blocking(move || engine.score_request(&request)).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "Scoring task did not complete");
                MatchResult::fallback(&fallback_skills)
            }
        }
    }

    fn backend(&self) -> &'static str {
        "lexical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;

    fn node_request() -> MatchRequest {
        MatchRequest::new(
            "We need a backend engineer experienced in Node.js and PostgreSQL, building REST APIs",
            "",
            vec!["Node.js".into(), "PostgreSQL".into(), "Docker".into()],
            "5 years building REST APIs with Node.js and PostgreSQL databases",
        )
    }

    #[tokio::test]
    async fn test_async_score_matches_engine() {
        let request = node_request();
        let expected = MatchEngine::default().score_request(&request);

        let scorer: Arc<dyn MatchScorer> = Arc::new(LexicalMatchScorer::default());
        let result = scorer.score(request).await;

        assert_eq!(result, expected);
        assert_eq!(scorer.backend(), "lexical");
    }

    #[tokio::test]
    async fn test_concurrent_requests_are_independent() {
        let scorer = LexicalMatchScorer::new(MatchEngine::new(ScoringConfig {
            parallel_scorers: false,
            ..ScoringConfig::default()
        }));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let scorer = scorer.clone();
                tokio::spawn(async move {
                    let mut request = node_request();
                    if i % 2 == 1 {
                        request.resume_text = "Gardener and landscaper".into();
                    }
                    scorer.score(request).await
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.unwrap();
            if i % 2 == 0 {
                assert_eq!(result.match_percentage, 45);
            } else {
                assert_eq!(result.matched_skills, Vec::<String>::new());
                assert_eq!(result.missing_skills.len(), 3);
            }
        }
    }
}
