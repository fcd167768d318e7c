#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, OutputFormat};
pub use toml_config::TomlConfig;

/// Which data source to debate from, resolved from either configuration style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    Fixture {
        path: String,
    },
    Rest {
        endpoint: String,
        api_key: Option<String>,
        default_min_years: Option<u32>,
    },
}
