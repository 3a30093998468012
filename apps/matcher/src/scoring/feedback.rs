//! Rule-based feedback text shown to the candidate.

use tracing::warn;

/// At most this many skills are named per sentence.
pub const FEEDBACK_SKILL_LIMIT: usize = 5;

/// Returned when the inputs cannot produce feedback. `score_match` rejects
/// non-finite scores before this point, so only direct callers can hit it.
pub const FEEDBACK_UNAVAILABLE: &str = "Unable to generate detailed feedback at this time.";

/// Band sentence for an unrounded 0–100 match score.
pub fn interpret_match(score: f64) -> &'static str {
    if score >= 80.0 {
        "Excellent match! Your resume strongly aligns with this position."
    } else if score >= 60.0 {
        "Good match. Your resume shows relevant experience for this role."
    } else if score >= 40.0 {
        "Moderate match. Some of your skills align with this position."
    } else {
        "Limited match. Consider highlighting more relevant experience."
    }
}

/// Builds the feedback paragraph. Sentences are emitted in a fixed order and
/// joined with single spaces.
///
/// `score` is the fused total before any rounding, so 59.99 still reads as a
/// moderate match even though it displays as 60%.
pub fn generate_feedback(
    score: f64,
    matched_skills: &[String],
    missing_skills: &[String],
    keyword_match_score: f64,
) -> String {
    if !score.is_finite() || !keyword_match_score.is_finite() {
        warn!(score, keyword_match_score, "Cannot build feedback from a non-finite score");
        return FEEDBACK_UNAVAILABLE.to_string();
    }

    let mut sentences = vec![interpret_match(score).to_string()];

    if !matched_skills.is_empty() {
        sentences.push(format!(
            "Your resume matches these required skills: {}.",
            list_skills(matched_skills)
        ));
    }

    if !missing_skills.is_empty() {
        sentences.push(format!(
            "Consider adding or highlighting these skills: {}.",
            list_skills(missing_skills)
        ));
    }

    if keyword_match_score < 50.0 {
        sentences.push("Try to include more keywords from the job description.".to_string());
    }

    if matched_skills.len() < 3 && !missing_skills.is_empty() {
        sentences.push("Emphasize technical skills that match the job requirements.".to_string());
    }

    if score < 60.0 {
        sentences
            .push("Consider tailoring your resume to better match this specific role.".to_string());
    }

    sentences.join(" ")
}

fn list_skills(skills: &[String]) -> String {
    skills
        .iter()
        .take(FEEDBACK_SKILL_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
