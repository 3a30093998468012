use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matcher::config::Config;
use matcher::extraction::{extract_resume_text, DocumentKind, PlainTextExtractor};
use matcher::scoring::skills::extract_skills;
use matcher::service::{LexicalMatchScorer, MatchScorer};
use matcher::{MatchEngine, MatchRequest};

/// Score a resume against a job posting and print the result as JSON.
#[derive(Debug, Parser)]
#[command(name = "matcher", version)]
struct Cli {
    /// File holding the job description.
    #[arg(long, value_name = "FILE")]
    job_description: PathBuf,

    /// File holding the job requirements.
    #[arg(long, value_name = "FILE")]
    job_requirements: Option<PathBuf>,

    /// Required skills, comma separated. Inferred from the job text when omitted.
    #[arg(long, value_delimiter = ',', env = "MATCHER_SKILLS")]
    skills: Vec<String>,

    /// Resume as plain text (.txt / .md).
    #[arg(long, value_name = "FILE")]
    resume: PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries the JSON result
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting matcher v{}", env!("CARGO_PKG_VERSION"));

    let request = build_request(&cli)?;
    info!(
        skills = request.required_skills.len(),
        resume_chars = request.resume_text.len(),
        "Scoring resume"
    );

    let scorer: Arc<dyn MatchScorer> = Arc::new(LexicalMatchScorer::new(MatchEngine::new(
        config.scoring.clone(),
    )));
    let result = scorer.score(request).await;
    info!(
        backend = scorer.backend(),
        match_percentage = result.match_percentage,
        "Scoring complete"
    );

    let json = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");

    Ok(())
}

fn build_request(cli: &Cli) -> Result<MatchRequest> {
    let job_description = read_text(&cli.job_description)?;
    let job_requirements = match &cli.job_requirements {
        Some(path) => read_text(path)?,
        None => String::new(),
    };
    let required_skills = resolve_skills(&cli.skills, &job_description, &job_requirements);
    let resume_text = load_resume(&cli.resume)?;

    Ok(MatchRequest::new(
        job_description,
        job_requirements,
        required_skills,
        resume_text,
    ))
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Explicit skills win; otherwise well-known skills are detected in the job text.
fn resolve_skills(explicit: &[String], job_description: &str, job_requirements: &str) -> Vec<String> {
    let explicit: Vec<String> = explicit
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if !explicit.is_empty() {
        return explicit;
    }

    let inferred = extract_skills(&format!("{job_description} {job_requirements}"));
    info!(skills = ?inferred, "No skills given; inferred from job text");
    inferred
}

fn load_resume(path: &Path) -> Result<String> {
    let kind = DocumentKind::from_path(path)?;
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let text = extract_resume_text(&PlainTextExtractor, &bytes, kind)
        .with_context(|| format!("Unusable resume {}", path.display()))?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_cli_parses_comma_separated_skills() {
        let cli = Cli::try_parse_from([
            "matcher",
            "--job-description",
            "jd.txt",
            "--resume",
            "cv.txt",
            "--skills",
            "Node.js,PostgreSQL,Docker",
            "--pretty",
        ])
        .unwrap();
        assert_eq!(cli.skills, vec!["Node.js", "PostgreSQL", "Docker"]);
        assert!(cli.pretty);
        assert!(cli.job_requirements.is_none());
    }

    #[test]
    fn test_resolve_skills_prefers_explicit() {
        let explicit = vec![" Rust ".to_string(), "".to_string()];
        assert_eq!(resolve_skills(&explicit, "Python developer", ""), vec!["Rust"]);
    }

    #[test]
    fn test_resolve_skills_infers_from_job_text() {
        assert_eq!(
            resolve_skills(&[], "Python developer", "Django and Docker"),
            vec!["python", "docker", "django"]
        );
    }

    #[test]
    fn test_build_request_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let jd = write_file(
            &dir,
            "jd.txt",
            "We need a backend engineer experienced in Node.js and PostgreSQL, building REST APIs",
        );
        let resume = write_file(
            &dir,
            "cv.txt",
            "5 years building REST APIs\r\nwith Node.js and PostgreSQL databases",
        );
        let cli = Cli {
            job_description: jd,
            job_requirements: None,
            skills: vec!["Node.js".into(), "Docker".into()],
            resume,
            pretty: false,
        };

        let request = build_request(&cli).unwrap();
        assert_eq!(request.job_requirements, "");
        assert_eq!(
            request.resume_text,
            "5 years building REST APIs with Node.js and PostgreSQL databases"
        );
        assert_eq!(request.required_skills, vec!["Node.js", "Docker"]);
    }

    #[test]
    fn test_short_resume_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let resume = write_file(&dir, "cv.txt", "Jane Doe");
        let err = load_resume(&resume).unwrap_err();
        assert!(format!("{err:#}").contains("Could not extract text from resume"));
    }

    #[test]
    fn test_unsupported_resume_format() {
        let dir = tempfile::tempdir().unwrap();
        let resume = write_file(&dir, "cv.pdf", "%PDF-1.7");
        assert!(load_resume(&resume).is_err());
    }
}
