use anyhow::Context;
use clap::Parser;
use hire_debate::core::{ConfigProvider, DataSource};
use hire_debate::utils::error::ErrorSeverity;
use hire_debate::utils::{logger, validation::Validate};
use hire_debate::{
    CliConfig, DebateEngine, DebateError, DebateOutcome, FixtureSource, OutputFormat, RestSource,
    SourceSpec, TomlConfig,
};

/// Exit code when the debate ended without a verdict.
const EXIT_TIMED_OUT: i32 = 4;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting hire-debate");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(path) => {
            let config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load configuration from {}", path))?;
            run(config.source_spec(), config).await
        }
        None => run(cli.source_spec(), cli.clone()).await,
    };

    match result {
        Ok(outcome) => {
            match cli.format {
                OutputFormat::Text => print_text(&outcome),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
            }
            if let DebateOutcome::TimedOut(_) = outcome {
                std::process::exit(EXIT_TIMED_OUT);
            }
        }
        Err(e) => {
            tracing::error!("❌ Debate failed: {} (Severity: {:?})", e, e.severity());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate>(
    source: Result<SourceSpec, DebateError>,
    config: C,
) -> Result<DebateOutcome, DebateError> {
    config.validate()?;

    match source? {
        SourceSpec::Fixture { path } => debate(FixtureSource::from_file(&path)?, config).await,
        SourceSpec::Rest {
            endpoint,
            api_key,
            default_min_years,
        } => {
            let mut source = RestSource::new(endpoint);
            if let Some(key) = api_key {
                source = source.with_api_key(key);
            }
            if let Some(years) = default_min_years {
                source = source.with_default_min_years(years);
            }
            debate(source, config).await
        }
    }
}

async fn debate<D: DataSource, C: ConfigProvider>(
    source: D,
    config: C,
) -> Result<DebateOutcome, DebateError> {
    DebateEngine::new(source, config).run().await
}

fn print_text(outcome: &DebateOutcome) {
    match outcome {
        DebateOutcome::Decided(verdict) => println!("{}", verdict.transcript()),
        DebateOutcome::TimedOut(stalled) => {
            let received: Vec<String> = stalled.received.iter().map(|s| s.to_string()).collect();
            println!(
                "⏱ Debate {} timed out after {:?}; only heard from [{}]",
                stalled.debate_id,
                stalled.waited,
                received.join(", ")
            );
        }
    }
}
