use crate::config::SourceSpec;
use crate::core::coordinator::DEFAULT_JUDGE_MARGIN;
use crate::core::{ConfigProvider, QaPair};
use crate::utils::error::{DebateError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub debate: DebateSection,
    pub source: SourceConfig,
    pub target: TargetConfig,
    /// Replaces the fetched behavioral transcript; meant for demos and tests.
    pub transcript_override: Option<Vec<QaPair>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebateSection {
    pub judge_margin: f64,
    /// 0 waits forever for the second reviewer.
    pub response_timeout_seconds: u64,
    pub trigger_interval_ms: u64,
    /// 0 retries forever.
    pub max_attempts: u32,
}

impl Default for DebateSection {
    fn default() -> Self {
        Self {
            judge_margin: DEFAULT_JUDGE_MARGIN,
            response_timeout_seconds: 30,
            trigger_interval_ms: 1000,
            max_attempts: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Fixture,
    Rest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub r#type: SourceKind,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub default_min_years: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub candidate_id: String,
    pub job_id: String,
}

impl TomlConfig {
    /// Reads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DebateError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DebateError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DebateError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn source_spec(&self) -> Result<SourceSpec> {
        match self.source.r#type {
            SourceKind::Fixture => {
                let path = validation::require("source.path", &self.source.path)?;
                Ok(SourceSpec::Fixture {
                    path: path.to_string(),
                })
            }
            SourceKind::Rest => {
                let endpoint = validation::require("source.endpoint", &self.source.endpoint)?;
                Ok(SourceSpec::Rest {
                    endpoint: endpoint.to_string(),
                    api_key: self.source.api_key.clone(),
                    default_min_years: self.source.default_min_years,
                })
            }
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_margin("debate.judge_margin", self.debate.judge_margin)?;
        validation::validate_interval_ms("debate.trigger_interval_ms", self.debate.trigger_interval_ms)?;
        validation::validate_record_id("target.candidate_id", &self.target.candidate_id)?;
        validation::validate_record_id("target.job_id", &self.target.job_id)?;
        validation::validate_source(&self.source_spec()?, "source.path", "source.endpoint")
    }
}

impl ConfigProvider for TomlConfig {
    fn candidate_id(&self) -> &str {
        &self.target.candidate_id
    }

    fn job_id(&self) -> &str {
        &self.target.job_id
    }

    fn judge_margin(&self) -> f64 {
        self.debate.judge_margin
    }

    fn response_timeout(&self) -> Option<Duration> {
        match self.debate.response_timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    fn trigger_interval(&self) -> Duration {
        Duration::from_millis(self.debate.trigger_interval_ms)
    }

    fn max_attempts(&self) -> Option<u32> {
        match self.debate.max_attempts {
            0 => None,
            n => Some(n),
        }
    }

    fn transcript_override(&self) -> Option<&[QaPair]> {
        self.transcript_override.as_deref()
    }
}
