use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::errors::ScoringError;

/// Tunables consumed by the matching engine.
///
/// `Default` reproduces the production constants; every field can be
/// overridden through the environment (see `Config::from_env`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// BM25 raw score that maps to 100%. Raw scores above it saturate.
    pub bm25_saturation: f64,
    pub bm25_k1: f64,
    pub bm25_b: f64,
    /// Maximum number of keywords auto-extracted from the job text.
    pub keyword_limit: usize,
    /// Run the four lexical scorers on the rayon pool instead of in sequence.
    pub parallel_scorers: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bm25_saturation: 10.0,
            bm25_k1: 1.2,
            bm25_b: 0.75,
            keyword_limit: 20,
            parallel_scorers: true,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringError> {
        if !(self.bm25_saturation.is_finite() && self.bm25_saturation > 0.0) {
            return Err(ScoringError::InvalidConfig(format!(
                "bm25_saturation must be a positive number, got {}",
                self.bm25_saturation
            )));
        }
        if !(self.bm25_k1.is_finite() && self.bm25_k1 >= 0.0) {
            return Err(ScoringError::InvalidConfig(format!(
                "bm25_k1 must be non-negative, got {}",
                self.bm25_k1
            )));
        }
        if !(0.0..=1.0).contains(&self.bm25_b) {
            return Err(ScoringError::InvalidConfig(format!(
                "bm25_b must be within [0, 1], got {}",
                self.bm25_b
            )));
        }
        Ok(())
    }
}

/// Process configuration loaded from environment variables.
/// All keys are optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ScoringConfig::default();
        let scoring = ScoringConfig {
            bm25_saturation: parse_or(&lookup, "MATCHER_BM25_SATURATION", defaults.bm25_saturation)?,
            bm25_k1: parse_or(&lookup, "MATCHER_BM25_K1", defaults.bm25_k1)?,
            bm25_b: parse_or(&lookup, "MATCHER_BM25_B", defaults.bm25_b)?,
            keyword_limit: parse_or(&lookup, "MATCHER_KEYWORD_LIMIT", defaults.keyword_limit)?,
            parallel_scorers: parse_or(
                &lookup,
                "MATCHER_PARALLEL_SCORERS",
                defaults.parallel_scorers,
            )?,
        };
        scoring.validate()?;

        Ok(Config {
            scoring,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}
