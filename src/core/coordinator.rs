//! Debate coordinator (the judge).
//!
//! Keeps one PRO slot and one ANTI slot per debate id. A response fills the
//! slot for its stance, replacing whatever was there. As soon as both slots
//! of a debate are filled they are consumed, a [`Verdict`] is produced and
//! the debate goes back to empty. Responses may arrive in either order.
//!
//! ```text
//! EMPTY ──PRO──▶ PRO only ──ANTI──┐
//!   │                             ├──▶ judge ──▶ EMPTY
//!   └───ANTI──▶ ANTI only ──PRO───┘
//! ```
//!
//! With a response timeout configured, a half-filled debate is dropped once
//! the timeout has passed since its first response and reported as
//! [`DebateOutcome::TimedOut`].

use crate::core::transport::{Address, Inbox};
use crate::core::{DebateId, DebateOutcome, DebateResponse, Decision, Stance, StalledDebate, Verdict};
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// PRO must lead ANTI by at least this much to hire.
pub const DEFAULT_JUDGE_MARGIN: f64 = 0.1;

/// Hire only when PRO leads by at least `margin`. Ties reject.
pub fn judge(pro: &DebateResponse, anti: &DebateResponse, margin: f64) -> Decision {
    if pro.confidence >= anti.confidence + margin {
        Decision::Hire
    } else {
        Decision::Reject
    }
}

#[derive(Debug)]
struct PendingDebate {
    pro: Option<DebateResponse>,
    anti: Option<DebateResponse>,
    opened_at: Instant,
}

impl PendingDebate {
    fn new(opened_at: Instant) -> Self {
        Self {
            pro: None,
            anti: None,
            opened_at,
        }
    }

    fn received(&self) -> Vec<Stance> {
        let mut stances = Vec::with_capacity(2);
        if self.pro.is_some() {
            stances.push(Stance::Pro);
        }
        if self.anti.is_some() {
            stances.push(Stance::Anti);
        }
        stances
    }
}

#[derive(Debug)]
pub struct Coordinator {
    margin: f64,
    response_timeout: Option<Duration>,
    pending: HashMap<DebateId, PendingDebate>,
}

impl Coordinator {
    pub fn new(margin: f64, response_timeout: Option<Duration>) -> Self {
        Self {
            margin,
            response_timeout,
            pending: HashMap::new(),
        }
    }

    /// Stores the response and judges once its debate has both sides.
    pub fn record(&mut self, response: DebateResponse) -> Option<Verdict> {
        self.record_at(response, Instant::now())
    }

    fn record_at(&mut self, response: DebateResponse, now: Instant) -> Option<Verdict> {
        let marker = match response.stance {
            Stance::Pro => "🟩",
            Stance::Anti => "🟥",
        };
        tracing::info!(
            "\n{} {} reviewer says:\n{}\n(conf: {})\n",
            marker,
            response.stance,
            response.argument,
            response.confidence
        );

        let debate_id = response.debate_id;
        let slots = self
            .pending
            .entry(debate_id)
            .or_insert_with(|| PendingDebate::new(now));
        let slot = match response.stance {
            Stance::Pro => &mut slots.pro,
            Stance::Anti => &mut slots.anti,
        };
        if slot.replace(response).is_some() {
            tracing::debug!(%debate_id, "Replaced earlier response for the same stance");
        }

        if slots.pro.is_none() || slots.anti.is_none() {
            return None;
        }
        let PendingDebate { pro, anti, .. } = self.pending.remove(&debate_id)?;
        let (pro, anti) = (pro?, anti?);

        let verdict = Verdict {
            debate_id,
            decision: judge(&pro, &anti, self.margin),
            pro,
            anti,
            decided_at: Utc::now(),
        };
        tracing::info!(
            "\n--- 🧠 DEBATE TRANSCRIPT ---\n[PRO]: {}\n\n[ANTI]: {}\n-----------------------------\n",
            verdict.pro.argument,
            verdict.anti.argument
        );
        tracing::info!("{}", verdict.transcript());
        Some(verdict)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Stances already received for a debate that is still waiting.
    pub fn pending_stances(&self, debate_id: &DebateId) -> Vec<Stance> {
        self.pending
            .get(debate_id)
            .map(PendingDebate::received)
            .unwrap_or_default()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        let timeout = self.response_timeout?;
        self.pending
            .values()
            .map(|debate| debate.opened_at + timeout)
            .min()
    }

    /// Drops every debate whose deadline is at or before `now`.
    pub fn expire(&mut self, now: Instant) -> Vec<StalledDebate> {
        let Some(timeout) = self.response_timeout else {
            return Vec::new();
        };
        let expired: Vec<DebateId> = self
            .pending
            .iter()
            .filter(|(_, debate)| debate.opened_at + timeout <= now)
            .map(|(id, _)| *id)
            .collect();

        expired
            .into_iter()
            .filter_map(|debate_id| {
                let debate = self.pending.remove(&debate_id)?;
                let stalled = StalledDebate {
                    debate_id,
                    received: debate.received(),
                    waited: now.duration_since(debate.opened_at),
                };
                tracing::warn!(
                    %debate_id,
                    received = ?stalled.received,
                    "Debate timed out waiting for the other reviewer"
                );
                Some(stalled)
            })
            .collect()
    }

    /// Serves the coordinator mailbox until every sender is gone or the
    /// outcome sink closes.
    pub async fn run(mut self, mut inbox: Inbox<DebateResponse>, outcomes: Address<DebateOutcome>) {
        tracing::debug!("Coordinator listening on '{}'", inbox.name());
        loop {
            let deadline = self.next_deadline();
            let produced: Vec<DebateOutcome> = tokio::select! {
                message = inbox.recv() => match message {
                    Some(response) => self
                        .record(response)
                        .map(DebateOutcome::Decided)
                        .into_iter()
                        .collect(),
                    None => break,
                },
                _ = wait_until(deadline) => self
                    .expire(Instant::now())
                    .into_iter()
                    .map(DebateOutcome::TimedOut)
                    .collect(),
            };

            for outcome in produced {
                if let Err(e) = outcomes.send(outcome) {
                    tracing::warn!("Dropping debate outcome: {}", e);
                    return;
                }
            }
        }
        tracing::debug!("Coordinator mailbox closed");
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
