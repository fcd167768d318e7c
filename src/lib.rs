pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};
pub use config::{SourceSpec, TomlConfig};

pub use adapters::{FixtureSource, RestSource};
pub use crate::core::{
    coordinator::Coordinator, engine::DebateEngine, DebateOutcome, Decision, Stance, Verdict,
};
pub use utils::error::{DebateError, Result};
