use crate::config::SourceSpec;
use crate::core::coordinator::DEFAULT_JUDGE_MARGIN;
use crate::core::{ConfigProvider, QaPair};
use crate::utils::error::{DebateError, Result};
use crate::utils::validation::{self, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "hire-debate")]
#[command(about = "Runs a PRO/ANTI reviewer debate over a candidate and returns a hire verdict")]
pub struct CliConfig {
    #[arg(short, long, help = "TOML configuration file; overrides the other source/debate flags")]
    pub config: Option<String>,

    #[arg(long, help = "Candidate/job fixture file (.toml or .json)")]
    pub fixtures: Option<String>,

    #[arg(long, help = "PostgREST endpoint to load applications and jobs from")]
    pub endpoint: Option<String>,

    #[arg(long, help = "API key sent to the REST endpoint")]
    pub api_key: Option<String>,

    #[arg(long)]
    pub candidate_id: Option<String>,

    #[arg(long)]
    pub job_id: Option<String>,

    #[arg(long, default_value_t = DEFAULT_JUDGE_MARGIN)]
    pub judge_margin: f64,

    #[arg(long, default_value = "30", help = "0 waits forever for the second reviewer")]
    pub response_timeout_secs: u64,

    #[arg(long, default_value = "1000")]
    pub trigger_interval_ms: u64,

    #[arg(long, default_value = "5", help = "0 retries forever")]
    pub max_attempts: u32,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn source_spec(&self) -> Result<SourceSpec> {
        match (&self.fixtures, &self.endpoint) {
            (Some(path), None) => Ok(SourceSpec::Fixture { path: path.clone() }),
            (None, Some(endpoint)) => Ok(SourceSpec::Rest {
                endpoint: endpoint.clone(),
                api_key: self.api_key.clone(),
                default_min_years: None,
            }),
            (Some(_), Some(_)) => Err(DebateError::ConfigError {
                message: "--fixtures and --endpoint cannot be combined".to_string(),
            }),
            (None, None) => Err(DebateError::MissingConfigError {
                field: "--fixtures or --endpoint".to_string(),
            }),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_margin("--judge-margin", self.judge_margin)?;
        validation::validate_interval_ms("--trigger-interval-ms", self.trigger_interval_ms)?;
        let candidate_id = validation::require("--candidate-id", &self.candidate_id)?;
        validation::validate_record_id("--candidate-id", candidate_id)?;
        let job_id = validation::require("--job-id", &self.job_id)?;
        validation::validate_record_id("--job-id", job_id)?;
        validation::validate_source(&self.source_spec()?, "--fixtures", "--endpoint")
    }
}

impl ConfigProvider for CliConfig {
    fn candidate_id(&self) -> &str {
        self.candidate_id.as_deref().unwrap_or_default()
    }

    fn job_id(&self) -> &str {
        self.job_id.as_deref().unwrap_or_default()
    }

    fn judge_margin(&self) -> f64 {
        self.judge_margin
    }

    fn response_timeout(&self) -> Option<Duration> {
        match self.response_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    fn trigger_interval(&self) -> Duration {
        Duration::from_millis(self.trigger_interval_ms)
    }

    fn max_attempts(&self) -> Option<u32> {
        match self.max_attempts {
            0 => None,
            n => Some(n),
        }
    }

    fn transcript_override(&self) -> Option<&[QaPair]> {
        None
    }
}
