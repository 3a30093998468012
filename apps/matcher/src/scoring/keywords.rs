//! Keyword match: a loose, substring-based coverage signal.
//!
//! Salient keywords are pulled from the raw job text, unioned with the
//! required skills, and each is looked up in the resume either as a substring
//! of the lowercased text or as a member of its normalized token stream.
//! Range: [0, 100]. The strict, user-facing enumeration lives in `skills`.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::errors::ScoringError;
use crate::scoring::{ensure_finite, Scorer, ScorerKind, ScoringInput, SubScore};
use crate::text::normalize;
use crate::text::stopwords::is_stopword;

pub const DEFAULT_KEYWORD_LIMIT: usize = 20;

/// Result of the keyword coverage check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordMatch {
    pub score: f64,
    pub matched_keywords: Vec<String>,
    pub total_keywords: usize,
}

impl KeywordMatch {
    fn empty() -> Self {
        Self {
            score: 0.0,
            matched_keywords: Vec::new(),
            total_keywords: 0,
        }
    }
}

pub struct KeywordScorer {
    limit: usize,
}

impl KeywordScorer {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORD_LIMIT)
    }
}

impl Scorer for KeywordScorer {
    fn kind(&self) -> ScorerKind {
        ScorerKind::Keyword
    }

    fn score(&self, input: &ScoringInput<'_>) -> Result<SubScore, ScoringError> {
        let result = match_keywords(
            input.job_text,
            input.resume_text,
            &input.resume_tokens,
            input.required_skills,
            self.limit,
        )?;
        Ok(SubScore {
            kind: ScorerKind::Keyword,
            raw: result.score,
            percentage: result.score,
            matched_keywords: result.matched_keywords,
        })
    }
}

/// Scores keyword coverage of raw resume text. Never fails; errors score 0.
pub fn keyword_match(job_text: &str, resume_text: &str, required_skills: &[String]) -> KeywordMatch {
    match_keywords(
        job_text,
        resume_text,
        &normalize(resume_text),
        required_skills,
        DEFAULT_KEYWORD_LIMIT,
    )
    .unwrap_or_else(|e| {
        warn!(error = %e, "Keyword matching failed");
        KeywordMatch::empty()
    })
}

fn match_keywords(
    job_text: &str,
    resume_text: &str,
    resume_tokens: &[String],
    required_skills: &[String],
    limit: usize,
) -> Result<KeywordMatch, ScoringError> {
    let mut all_keywords = extract_keywords(job_text, limit);
    for skill in required_skills {
        let skill = skill.trim().to_lowercase();
        if !skill.is_empty() && !all_keywords.contains(&skill) {
            all_keywords.push(skill);
        }
    }

    if all_keywords.is_empty() {
        return Ok(KeywordMatch::empty());
    }

    let resume_lower = resume_text.to_lowercase();
    let matched_keywords: Vec<String> = all_keywords
        .iter()
        .filter(|keyword| {
            resume_lower.contains(keyword.as_str()) || resume_tokens.contains(keyword)
        })
        .cloned()
        .collect();

    let score = matched_keywords.len() as f64 / all_keywords.len() as f64 * 100.0;

    Ok(KeywordMatch {
        score: ensure_finite("keyword", score)?.clamp(0.0, 100.0),
        matched_keywords,
        total_keywords: all_keywords.len(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword extraction
// ────────────────────────────────────────────────────────────────────────────

/// Characters kept at a candidate's edges so "c++" and "c#" survive trimming.
fn is_keyword_edge(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

/// Turns one whitespace-delimited chunk into a keyword candidate.
///
/// Surrounding punctuation is trimmed, inner punctuation kept ("node.js"),
/// and contractions/possessives cut at the apostrophe ("company's" → "company").
fn keyword_candidate(chunk: &str) -> Option<String> {
    let trimmed = chunk.trim_matches(|c: char| !is_keyword_edge(c));
    let lowered = trimmed.to_lowercase();
    let word = lowered
        .split(|c: char| c == '\'' || c == '’')
        .next()
        .unwrap_or_default();

    if word.chars().count() < 2 || is_stopword(word) {
        return None;
    }
    Some(word.to_string())
}

/// Extracts up to `limit` salient keywords from raw text.
///
/// Candidates are lowercased, stopword-free and deduplicated. They are ranked
/// by frequency; ties keep first-occurrence order, so the result is
/// deterministic for a given text.
pub fn extract_keywords(text: &str, limit: usize) -> Vec<String> {
    let mut frequencies: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for candidate in text.split_whitespace().filter_map(keyword_candidate) {
        let count = frequencies.entry(candidate.clone()).or_insert(0);
        if *count == 0 {
            order.push(candidate);
        }
        *count += 1;
    }

    // stable sort: equal frequencies stay in first-occurrence order
    order.sort_by(|a, b| frequencies[b].cmp(&frequencies[a]));
    order.truncate(limit);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_keywords_drops_stopwords_and_duplicates() {
        let keywords = extract_keywords(
            "We need a backend engineer experienced in Node.js and PostgreSQL, building REST APIs",
            20,
        );
        assert_eq!(
            keywords,
            vec![
                "need",
                "backend",
                "engineer",
                "experienced",
                "node.js",
                "postgresql",
                "building",
                "rest",
                "apis"
            ]
        );
    }

    #[test]
    fn test_extract_keywords_ranks_by_frequency() {
        assert_eq!(
            extract_keywords("Rust rust RUST tokio Tokio axum", 20),
            vec!["rust", "tokio", "axum"]
        );
    }

    #[test]
    fn test_extract_keywords_handles_symbols_and_contractions() {
        let keywords = extract_keywords(
            "We're hiring a C++ engineer (C#, .NET) who doesn't fear the company's legacy code. C++ C++ rust.",
            20,
        );
        assert_eq!(
            keywords,
            vec!["c++", "hiring", "engineer", "c#", "net", "fear", "company", "legacy", "code", "rust"]
        );
    }

    #[test]
    fn test_extract_keywords_respects_limit() {
        let text = (0..50).map(|i| format!("term{i}")).collect::<Vec<_>>().join(" ");
        assert_eq!(extract_keywords(&text, 20).len(), 20);
        assert!(extract_keywords("", 20).is_empty());
    }

    #[test]
    fn test_keyword_match_scenario() {
        let result = keyword_match(
            "We need a backend engineer experienced in Node.js and PostgreSQL, building REST APIs",
            "5 years building REST APIs with Node.js and PostgreSQL databases",
            &skills(&["Node.js", "PostgreSQL", "Docker"]),
        );
        assert_eq!(result.total_keywords, 10);
        assert_eq!(
            result.matched_keywords,
            vec!["node.js", "postgresql", "building", "rest", "apis"]
        );
        assert!((result.score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_required_skills_are_lowercased_and_deduplicated() {
        let result = keyword_match("Rust engineer", "I write rust daily", &skills(&["Tokio", "RUST"]));
        // rust, engineer, tokio
        assert_eq!(result.total_keywords, 3);
        assert_eq!(result.matched_keywords, vec!["rust"]);
        assert!((result.score - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_stemmed_token_match_counts() {
        // "happi" is not a substring of "happy", only of its stem
        let result = keyword_match("happi", "Happy customers", &[]);
        assert_eq!(result.matched_keywords, vec!["happi"]);
    }

    #[test]
    fn test_no_keywords_scores_zero() {
        let result = keyword_match("", "anything at all", &[]);
        assert_eq!(result, KeywordMatch::empty());
        let result = keyword_match("the and of", "anything", &skills(&["  "]));
        assert_eq!(result.total_keywords, 0);
    }

    #[test]
    fn test_scorer_uses_configured_limit() {
        let input = ScoringInput::new("alpha beta gamma delta", "alpha", &[]);
        let sub = KeywordScorer::new(2).score(&input).unwrap();
        // only alpha and beta are considered
        assert!((sub.percentage - 50.0).abs() < 1e-9);
        assert_eq!(sub.matched_keywords, vec!["alpha"]);
    }
}
