use crate::domain::model::{Assessment, Candidate, Job, QaPair, Stance};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Supplies candidate and job records. Unknown ids fail with `DebateError::NotFound`.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_candidate(&self, id: &str) -> Result<Candidate>;
    async fn fetch_job(&self, id: &str) -> Result<Job>;
}

/// Scoring capability behind each side of the debate.
pub trait Reviewer: Send + Sync {
    fn stance(&self) -> Stance;
    fn evaluate(&self, candidate: &Candidate, job: &Job) -> Assessment;
}

pub trait ConfigProvider: Send + Sync {
    fn candidate_id(&self) -> &str;
    fn job_id(&self) -> &str;
    fn judge_margin(&self) -> f64;
    /// `None` waits for the second response forever.
    fn response_timeout(&self) -> Option<Duration>;
    fn trigger_interval(&self) -> Duration;
    /// `None` retries failed activations forever.
    fn max_attempts(&self) -> Option<u32>;
    fn transcript_override(&self) -> Option<&[QaPair]>;
}
