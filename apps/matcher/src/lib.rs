//! Resume-to-job lexical matching.
//!
//! Scores a resume against a job posting with four classical IR models
//! (TF-IDF, BM25, cosine similarity, keyword coverage), fuses them into one
//! percentage, enumerates matched and missing skills, and writes feedback.

pub mod config;
pub mod engine;
pub mod errors;
pub mod extraction;
pub mod models;
pub mod scoring;
pub mod service;
pub mod text;

pub use engine::{score_match, MatchEngine};
pub use models::{MatchRequest, MatchResult};
