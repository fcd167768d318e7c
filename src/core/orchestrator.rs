use crate::core::transport::Address;
use crate::core::{DataSource, DebateId, DebateRequest, DebateResponse, QaPair};
use crate::utils::error::{DebateError, Result};

/// Result of one orchestrator trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Dispatched(DebateId),
    /// Fetching the records failed; the next trigger tries again.
    Skipped,
    AlreadyDispatched,
}

/// Starts exactly one debate: fetch, build the request, send it to both sides.
pub struct Orchestrator<D: DataSource> {
    source: D,
    candidate_id: String,
    job_id: String,
    transcript_override: Option<Vec<QaPair>>,
    pro: Address<DebateRequest>,
    anti: Address<DebateRequest>,
    judge: Address<DebateResponse>,
    dispatched: Option<DebateId>,
}

impl<D: DataSource> Orchestrator<D> {
    pub fn new(
        source: D,
        candidate_id: impl Into<String>,
        job_id: impl Into<String>,
        pro: Address<DebateRequest>,
        anti: Address<DebateRequest>,
        judge: Address<DebateResponse>,
    ) -> Self {
        Self {
            source,
            candidate_id: candidate_id.into(),
            job_id: job_id.into(),
            transcript_override: None,
            pro,
            anti,
            judge,
            dispatched: None,
        }
    }

    /// Replaces the fetched behavioral transcript before dispatch.
    pub fn with_transcript_override(mut self, transcript: Vec<QaPair>) -> Self {
        self.transcript_override = Some(transcript);
        self
    }

    pub fn dispatched(&self) -> Option<DebateId> {
        self.dispatched
    }

    /// Handles one trigger. Only the first successful one sends anything.
    ///
    /// Fetch failures are logged and reported as [`Activation::Skipped`].
    /// A closed reviewer mailbox is an error.
    pub async fn activate(&mut self) -> Result<Activation> {
        if self.dispatched.is_some() {
            return Ok(Activation::AlreadyDispatched);
        }

        tracing::info!(
            "Orchestrator kicking off debate (candidate={}, job={})",
            self.candidate_id,
            self.job_id
        );

        let records = async {
            let candidate = self.source.fetch_candidate(&self.candidate_id).await?;
            let job = self.source.fetch_job(&self.job_id).await?;
            Ok::<_, DebateError>((candidate, job))
        }
        .await;
        let (mut candidate, job) = match records {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(
                    "Failed to load data for candidate={} job={}: {}",
                    self.candidate_id,
                    self.job_id,
                    e
                );
                tracing::debug!("💡 {}", e.recovery_suggestion());
                return Ok(Activation::Skipped);
            }
        };

        if let Some(transcript) = &self.transcript_override {
            tracing::debug!("Injecting {} transcript entries", transcript.len());
            candidate = candidate.with_transcript(transcript.clone());
        }

        let request = DebateRequest {
            debate_id: DebateId::new(),
            candidate,
            job,
            reply_to: self.judge.clone(),
        };
        let debate_id = request.debate_id;

        self.pro.send(request.clone())?;
        self.anti.send(request)?;
        self.dispatched = Some(debate_id);

        tracing::info!(%debate_id, "Orchestrator sent debate request ✅");
        Ok(Activation::Dispatched(debate_id))
    }
}
