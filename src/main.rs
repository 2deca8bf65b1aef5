//! Latte - accessibility tree visibility and occlusion analysis.
//!
//! Entry point for the `latte` CLI.

mod cli;
mod cmd_analyze;
mod cmd_nodes;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use latte_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig, ValidationWarning};

use cli::{Cli, Commands};

/// Initialize tracing with console and file output.
///
/// Log files go to `logging.dir` with daily rotation; the console layer
/// writes to stderr so command output on stdout stays machine readable.
fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = PathBuf::from(ConfigLoader::expand_path(&config.dir));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&config.file_prefix)
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the worker alive for the program duration
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Ok(())
}

/// Load and validate the configuration, returning its warnings.
fn load_config(path: &Path) -> Result<(Config, Vec<ValidationWarning>), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_or_default(path)?;
    let warnings = ConfigValidator::validate(&config).into_result()?;
    Ok((config, warnings))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (config, warnings) = load_config(&cli.config)?;
    init_tracing(&config.logging)?;

    for warning in &warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    match cli.command {
        Commands::Analyze {
            dump,
            package,
            screenshot,
            out,
            no_overlays,
            format,
        } => {
            let mut config = config;
            if no_overlays {
                config.output.overlays = false;
            }
            let args = cmd_analyze::AnalyzeArgs {
                dump,
                package,
                screenshot,
                out,
                format,
            };
            cmd_analyze::run(&config, args)
        }
        Commands::Nodes {
            dump,
            actionable,
            data,
        } => cmd_nodes::run(&config, &dump, actionable, data),
        Commands::Check => {
            info!("Configuration {} is valid", cli.config.display());
            println!("OK ({} warning(s))", warnings.len());
            for warning in &warnings {
                println!("  {}: {}", warning.path, warning.message);
            }
            Ok(())
        }
    }
}
