//! Skill matcher: the strict, explainable enumeration behind user feedback.
//!
//! Each required skill is escaped and wrapped in word boundaries, so "Java"
//! never matches inside "JavaScript". Boundaries are only placed on edges that
//! are word characters; "C++" and ".NET" still match next to whitespace.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::ScoringError;

/// Required skills split by presence in the resume, both in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Catalogue scanned by `extract_skills`.
const COMMON_SKILLS: &[&str] = &[
    "javascript", "python", "java", "react", "node", "nodejs", "angular", "vue", "typescript",
    "sql", "mongodb", "postgresql", "mysql", "docker", "kubernetes", "aws", "azure", "gcp", "git",
    "html", "css", "redux", "express", "django", "flask", "spring", "rest", "api", "graphql",
    "agile", "scrum", "ci/cd", "devops", "machine learning", "ml", "ai", "data science",
    "tensorflow", "pytorch", "pandas", "numpy",
];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Case-insensitive pattern for `skill` with regex metacharacters escaped.
fn build_skill_pattern(skill: &str) -> Result<Regex, ScoringError> {
    let leading = if skill.starts_with(is_word_char) { r"\b" } else { "" };
    let trailing = if skill.ends_with(is_word_char) { r"\b" } else { "" };
    let pattern = format!("{leading}{}{trailing}", regex::escape(skill));

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ScoringError::SkillPattern {
            skill: skill.to_string(),
            source,
        })
}

fn partition_skills(
    required_skills: &[String],
    resume_text: &str,
) -> Result<SkillMatch, ScoringError> {
    let mut result = SkillMatch::default();

    for skill in required_skills {
        let needle = skill.trim();
        let present = !needle.is_empty() && build_skill_pattern(needle)?.is_match(resume_text);
        if present {
            result.matched_skills.push(skill.clone());
        } else {
            result.missing_skills.push(skill.clone());
        }
    }

    Ok(result)
}

/// Splits `required_skills` into matched and missing against the resume.
///
/// Never drops a skill: if matching fails internally, every skill is reported
/// missing. Blank skills can never match and are reported missing.
pub fn match_skills(required_skills: &[String], resume_text: &str) -> SkillMatch {
    partition_skills(required_skills, resume_text).unwrap_or_else(|e| {
        warn!(error = %e, "Skill matching failed; reporting all skills missing");
        SkillMatch {
            matched_skills: Vec::new(),
            missing_skills: required_skills.to_vec(),
        }
    })
}

/// Detects well-known technology skills mentioned in free text.
///
/// Returns catalogue entries found with word-boundary matching, in catalogue
/// order. Used to infer required skills when a job record carries none.
pub fn extract_skills(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    COMMON_SKILLS
        .iter()
        .filter(|skill| match build_skill_pattern(skill) {
            Ok(pattern) => pattern.is_match(text),
            Err(e) => {
                warn!(error = %e, "Skipping catalogue skill");
                false
            }
        })
        .map(|skill| skill.to_string())
        .collect()
}
