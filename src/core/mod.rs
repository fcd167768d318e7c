pub mod anti_reviewer;
pub mod coordinator;
pub mod engine;
pub mod orchestrator;
pub mod pro_reviewer;
pub mod reviewer;
pub mod transport;

pub use crate::domain::model::{
    Assessment, Candidate, DebateId, DebateOutcome, DebateRequest, DebateResponse, Decision, Job,
    QaPair, StalledDebate, Stance, Verdict,
};
pub use crate::domain::ports::{ConfigProvider, DataSource, Reviewer};
pub use crate::utils::error::Result;
