use serde::{Deserialize, Serialize};

pub const FALLBACK_FEEDBACK: &str = "Unable to calculate match score. Please try again later.";

/// Structured outcome of one `score_match` call.
///
/// `tfidf_score` and `cosine_score` are in [0, 1], `bm25_score` is the raw
/// (unbounded) engine score, and `keyword_match_score` and `final_score` are
/// percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub tfidf_score: f64,
    pub bm25_score: f64,
    pub cosine_score: f64,
    pub keyword_match_score: f64,
    pub final_score: f64,
    pub match_percentage: u32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub keywords_matched: Vec<String>,
    pub feedback: String,
}

impl MatchResult {
    /// Zeroed result returned when the whole pipeline fails.
    pub fn fallback(required_skills: &[String]) -> Self {
        Self {
            tfidf_score: 0.0,
            bm25_score: 0.0,
            cosine_score: 0.0,
            keyword_match_score: 0.0,
            final_score: 0.0,
            match_percentage: 0,
            matched_skills: Vec::new(),
            missing_skills: required_skills.to_vec(),
            keywords_matched: Vec::new(),
            feedback: FALLBACK_FEEDBACK.to_string(),
        }
    }
}
