use thiserror::Error;

/// Engine-internal error type.
///
/// Nothing of this type crosses `score_match`: the scorer fault barrier maps it
/// to a zeroed sub-score and the pipeline maps it to a default `MatchResult`.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("{stage} produced a non-finite value: {value}")]
    NonFinite { stage: &'static str, value: f64 },

    #[error("Invalid pattern for skill '{skill}': {source}")]
    SkillPattern {
        skill: String,
        #[source]
        source: regex::Error,
    },

    #[error("{stage} panicked: {message}")]
    Panicked { stage: String, message: String },

    #[error("Invalid scoring config: {0}")]
    InvalidConfig(String),
}

/// Errors raised at the text-extraction boundary, before any scoring happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read {0}. File may be corrupted.")]
    Unreadable(String),

    #[error("Could not extract text from resume ({length} of {minimum} required characters). Please ensure file is readable.")]
    TooShort { length: usize, minimum: usize },
}
