use crate::core::{Candidate, DataSource, Job};
use crate::utils::error::{DebateError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// In-memory records keyed by id, optionally loaded from a TOML or JSON file.
///
/// ```toml
/// [candidates.app-1]
/// name = "Ada"
/// resume_skills = ["rust", "sql"]
/// years_experience = 4
///
/// [jobs.app-1]
/// title = "Backend Engineer"
/// required_skills = ["rust"]
/// min_years_experience = 3
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureSource {
    #[serde(default)]
    candidates: HashMap<String, Candidate>,
    #[serde(default)]
    jobs: HashMap<String, Job>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidate(mut self, id: impl Into<String>, candidate: Candidate) -> Self {
        self.candidates.insert(id.into(), candidate);
        self
    }

    pub fn with_job(mut self, id: impl Into<String>, job: Job) -> Self {
        self.jobs.insert(id.into(), job);
        self
    }

    /// `.json` files are read as JSON, anything else as TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let source: Self = if is_json {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content).map_err(|e| DebateError::ConfigValidationError {
                field: path.display().to_string(),
                message: format!("TOML parsing error: {}", e),
            })?
        };
        tracing::debug!(
            "Loaded {} candidates and {} jobs from {}",
            source.candidates.len(),
            source.jobs.len(),
            path.display()
        );
        Ok(source)
    }
}

#[async_trait]
impl DataSource for FixtureSource {
    async fn fetch_candidate(&self, id: &str) -> Result<Candidate> {
        self.candidates
            .get(id)
            .cloned()
            .ok_or_else(|| DebateError::not_found("candidate", id))
    }

    async fn fetch_job(&self, id: &str) -> Result<Job> {
        self.jobs
            .get(id)
            .cloned()
            .ok_or_else(|| DebateError::not_found("job", id))
    }
}
