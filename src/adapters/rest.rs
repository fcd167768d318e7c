//! PostgREST-style backend (e.g. Supabase) holding applications, interviews,
//! interview agent responses and jobs.
//!
//! Both lookups are keyed by application id: the candidate is the applicant
//! plus the answers from their most recent interview, the job is the one the
//! application points at.

use crate::core::{Candidate, DataSource, Job, QaPair};
use crate::utils::error::{DebateError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

pub const DEFAULT_MIN_YEARS: u32 = 2;
/// Applications carry no experience column yet.
pub const DEFAULT_YEARS_EXPERIENCE: u32 = 2;

#[derive(Debug, Clone)]
pub struct RestSource {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    default_min_years: u32,
}

impl RestSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: None,
            default_min_years: DEFAULT_MIN_YEARS,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Used when a job row has no `min_years_experience` column.
    pub fn with_default_min_years(mut self, years: u32) -> Self {
        self.default_min_years = years;
        self
    }

    async fn select(&self, table: &str, query: &[(&str, String)]) -> Result<Vec<Value>> {
        let url = format!("{}/{}", self.endpoint, table);
        tracing::debug!("Querying {} with {:?}", url, query);

        let mut request = self.client.get(&url).query(query);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request.send().await?.error_for_status()?;
        let rows: Vec<Value> = response.json().await?;
        tracing::debug!("{} returned {} rows", table, rows.len());
        Ok(rows)
    }

    async fn application(&self, app_id: &str) -> Result<Value> {
        self.select(
            "application",
            &[
                ("select", "*".to_string()),
                ("app_id", format!("eq.{}", app_id)),
            ],
        )
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DebateError::not_found("application", app_id))
    }

    async fn transcript(&self, app_id: &str) -> Result<Vec<QaPair>> {
        let latest = self
            .select(
                "interview",
                &[
                    ("select", "interview_id,created_at".to_string()),
                    ("app_id", format!("eq.{}", app_id)),
                    ("order", "created_at.desc".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        let Some(interview_id) = latest.first().and_then(|row| scalar(row, "interview_id")) else {
            tracing::debug!("No interview recorded for application {}", app_id);
            return Ok(Vec::new());
        };

        let rows = self
            .select(
                "agent",
                &[
                    ("select", "round,type,response".to_string()),
                    ("interview_id", format!("eq.{}", interview_id)),
                ],
            )
            .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let kind = scalar(row, "type").unwrap_or_else(|| "unknown".to_string());
                let round = scalar(row, "round").unwrap_or_else(|| "?".to_string());
                QaPair::new(
                    format!("{} (round {})", kind, round),
                    scalar(row, "response").unwrap_or_default(),
                )
            })
            .collect())
    }
}

/// String form of a scalar column; `None` for null or missing.
fn scalar(row: &Value, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn whole_number(row: &Value, key: &str) -> Option<u32> {
    row.get(key)?.as_u64().and_then(|n| u32::try_from(n).ok())
}

/// Accepts an array column or a comma-separated text column.
pub fn normalize_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect(),
        Some(Value::String(text)) => split_csv(text),
        Some(other) => split_csv(&other.to_string()),
    }
}

fn split_csv(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl DataSource for RestSource {
    async fn fetch_candidate(&self, id: &str) -> Result<Candidate> {
        let application = self.application(id).await?;
        let behavioral_transcript = self.transcript(id).await?;

        Ok(Candidate {
            name: scalar(&application, "name").unwrap_or_else(|| "Unknown Candidate".to_string()),
            resume_skills: normalize_list(application.get("resume_skills"))
                .into_iter()
                .collect(),
            years_experience: whole_number(&application, "years_experience")
                .unwrap_or(DEFAULT_YEARS_EXPERIENCE),
            projects: normalize_list(application.get("projects")),
            behavioral_transcript,
        })
    }

    async fn fetch_job(&self, id: &str) -> Result<Job> {
        let application = self.application(id).await?;
        let job_id = scalar(&application, "job_id")
            .ok_or_else(|| DebateError::not_found("job for application", id))?;

        let row = self
            .select(
                "job",
                &[
                    ("select", "*".to_string()),
                    ("job_id", format!("eq.{}", job_id)),
                ],
            )
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DebateError::not_found("job", job_id.as_str()))?;

        Ok(Job {
            title: scalar(&row, "title").unwrap_or_else(|| "Unknown Role".to_string()),
            required_skills: normalize_list(row.get("required_skills")),
            culture_traits: normalize_list(row.get("preferred_skills")),
            min_years_experience: whole_number(&row, "min_years_experience")
                .unwrap_or(self.default_min_years),
        })
    }
}
