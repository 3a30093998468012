use serde::{Deserialize, Serialize};

/// One job–resume pair to score. The engine never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub job_description: String,
    #[serde(default)]
    pub job_requirements: String,
    /// Order is kept in the matched/missing lists; it does not affect scores.
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub resume_text: String,
}

impl MatchRequest {
    pub fn new(
        job_description: impl Into<String>,
        job_requirements: impl Into<String>,
        required_skills: Vec<String>,
        resume_text: impl Into<String>,
    ) -> Self {
        Self {
            job_description: job_description.into(),
            job_requirements: job_requirements.into(),
            required_skills,
            resume_text: resume_text.into(),
        }
    }

    /// Description and requirements joined by a single space.
    pub fn job_text(&self) -> String {
        format!("{} {}", self.job_description, self.job_requirements)
    }
}
