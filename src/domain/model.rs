use crate::core::transport::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl QaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    #[serde(default)]
    pub resume_skills: BTreeSet<String>,
    #[serde(default)]
    pub years_experience: u32,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub behavioral_transcript: Vec<QaPair>,
}

impl Candidate {
    pub fn has_skill(&self, skill: &str) -> bool {
        self.resume_skills.contains(skill)
    }

    /// Replaces the behavioral transcript, keeping everything else.
    pub fn with_transcript(self, behavioral_transcript: Vec<QaPair>) -> Self {
        Self {
            behavioral_transcript,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub culture_traits: Vec<String>,
    #[serde(default)]
    pub min_years_experience: u32,
}

/// The fixed viewpoint a reviewer argues from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stance {
    Pro,
    Anti,
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pro => write!(f, "PRO"),
            Self::Anti => write!(f, "ANTI"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebateId(Uuid);

impl DebateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DebateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DebateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One debate's input, cloned unchanged to both reviewers.
#[derive(Debug, Clone)]
pub struct DebateRequest {
    pub debate_id: DebateId,
    pub candidate: Candidate,
    pub job: Job,
    pub reply_to: Address<DebateResponse>,
}

/// Output of a reviewer's scoring step.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub argument: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateResponse {
    pub debate_id: DebateId,
    pub stance: Stance,
    pub argument: String,
    pub confidence: f64,
}

impl DebateResponse {
    pub fn from_assessment(debate_id: DebateId, stance: Stance, assessment: Assessment) -> Self {
        Self {
            debate_id,
            stance,
            argument: assessment.argument,
            confidence: assessment.confidence,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Hire,
    Reject,
}

impl Decision {
    pub fn header(&self) -> &'static str {
        match self {
            Self::Hire => "FINAL VERDICT: ✅ HIRE",
            Self::Reject => "FINAL VERDICT: ❌ REJECT / HOLD",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub debate_id: DebateId,
    pub decision: Decision,
    pub pro: DebateResponse,
    pub anti: DebateResponse,
    pub decided_at: DateTime<Utc>,
}

impl Verdict {
    pub fn is_hire(&self) -> bool {
        self.decision == Decision::Hire
    }

    pub fn transcript(&self) -> String {
        format!(
            "{}\n\n--- PRO (conf {}): ---\n{}\n\n--- ANTI (conf {}): ---\n{}\n",
            self.decision.header(),
            self.pro.confidence,
            self.pro.argument,
            self.anti.confidence,
            self.anti.argument
        )
    }
}

/// A debate dropped because its second response never arrived in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StalledDebate {
    pub debate_id: DebateId,
    pub received: Vec<Stance>,
    pub waited: Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DebateOutcome {
    Decided(Verdict),
    TimedOut(StalledDebate),
}

impl DebateOutcome {
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            Self::Decided(verdict) => Some(verdict),
            Self::TimedOut(_) => None,
        }
    }
}
