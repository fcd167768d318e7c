use crate::core::anti_reviewer::AntiReviewer;
use crate::core::coordinator::Coordinator;
use crate::core::orchestrator::{Activation, Orchestrator};
use crate::core::pro_reviewer::ProReviewer;
use crate::core::transport::{mailbox, Inbox};
use crate::core::{reviewer, ConfigProvider, DataSource, DebateOutcome, DebateRequest, Reviewer};
use crate::utils::error::{DebateError, Result};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Runs one complete debate cycle: reviewers, coordinator and orchestrator
/// each as their own task, talking only through mailboxes.
pub struct DebateEngine<D: DataSource, C: ConfigProvider> {
    source: D,
    config: C,
    pro: Arc<dyn Reviewer>,
    anti: Arc<dyn Reviewer>,
}

impl<D: DataSource, C: ConfigProvider> DebateEngine<D, C> {
    pub fn new(source: D, config: C) -> Self {
        Self {
            source,
            config,
            pro: Arc::new(ProReviewer::new()),
            anti: Arc::new(AntiReviewer::new()),
        }
    }

    /// Swaps in other scoring strategies for either side.
    pub fn with_reviewers(mut self, pro: Arc<dyn Reviewer>, anti: Arc<dyn Reviewer>) -> Self {
        self.pro = pro;
        self.anti = anti;
        self
    }

    pub async fn run(self) -> Result<DebateOutcome> {
        tracing::info!("Starting debate");

        let (pro, pro_inbox) = mailbox("pro_reviewer");
        let (anti, anti_inbox) = mailbox("anti_reviewer");
        let (judge, judge_inbox) = mailbox("judge");
        let (verdicts, mut verdict_inbox) = mailbox("verdicts");

        let coordinator = Coordinator::new(self.config.judge_margin(), self.config.response_timeout());
        let tasks: Vec<JoinHandle<()>> = vec![
            spawn_reviewer(Arc::clone(&self.pro), pro_inbox),
            spawn_reviewer(Arc::clone(&self.anti), anti_inbox),
            tokio::spawn(coordinator.run(judge_inbox, verdicts)),
        ];

        let mut orchestrator = Orchestrator::new(
            self.source,
            self.config.candidate_id(),
            self.config.job_id(),
            pro,
            anti,
            judge,
        );
        if let Some(transcript) = self.config.transcript_override() {
            orchestrator = orchestrator.with_transcript_override(transcript.to_vec());
        }

        let outcome = drive(&mut orchestrator, &self.config).await;
        let outcome = match outcome {
            // the orchestrator keeps the judge mailbox open until the outcome is in
            Ok(()) => verdict_inbox.recv().await.ok_or_else(|| DebateError::MailboxClosed {
                address: verdict_inbox.name().to_string(),
            }),
            Err(e) => Err(e),
        };

        drop(orchestrator);
        for task in tasks {
            task.abort();
        }

        let outcome = outcome?;
        match &outcome {
            DebateOutcome::Decided(verdict) => {
                tracing::info!(debate_id = %verdict.debate_id, decision = ?verdict.decision, "Debate decided")
            }
            DebateOutcome::TimedOut(stalled) => {
                tracing::warn!(debate_id = %stalled.debate_id, "Debate ended without a verdict")
            }
        }
        Ok(outcome)
    }
}

/// Triggers the orchestrator on the configured interval until it dispatches.
async fn drive<D: DataSource, C: ConfigProvider>(
    orchestrator: &mut Orchestrator<D>,
    config: &C,
) -> Result<()> {
    let mut ticker = tokio::time::interval(config.trigger_interval());
    let mut budget = AttemptBudget::new(config.max_attempts());
    loop {
        ticker.tick().await;
        match orchestrator.activate().await? {
            Activation::Dispatched(_) | Activation::AlreadyDispatched => return Ok(()),
            Activation::Skipped => {
                budget.spend()?;
                tracing::debug!("Activation {} skipped, retrying", budget.used);
            }
        }
    }
}

/// Skipped activations counted against `max_attempts`; `None` never runs out.
#[derive(Debug)]
struct AttemptBudget {
    used: u32,
    max: Option<u32>,
}

impl AttemptBudget {
    fn new(max: Option<u32>) -> Self {
        Self { used: 0, max }
    }

    fn spend(&mut self) -> Result<()> {
        self.used = self.used.saturating_add(1);
        match self.max {
            Some(max) if self.used >= max => Err(DebateError::AttemptsExhausted { attempts: self.used }),
            _ => Ok(()),
        }
    }
}

fn spawn_reviewer(side: Arc<dyn Reviewer>, inbox: Inbox<DebateRequest>) -> JoinHandle<()> {
    tokio::spawn(async move { reviewer::serve(side.as_ref(), inbox).await })
}
