//! droid-pointer-replay
//!
//! Replays a recorded pointer trace through the mouse subsystem and prints the
//! translated events as JSON lines.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use droid_pointer::config::Config;
use droid_pointer::replay;

/// Command-line arguments for droid-pointer-replay
#[derive(Parser, Debug)]
#[command(name = "droid-pointer-replay")]
#[command(version, about = "Replay Android pointer traces", long_about = None)]
pub struct Args {
    /// Trace file (JSON lines)
    pub trace: PathBuf,

    /// Configuration file path
    #[arg(short, long, env = "DROID_POINTER_CONFIG")]
    pub config: Option<String>,

    /// Cursor backend (platform|hooks)
    #[arg(short, long)]
    pub backend: Option<String>,

    /// Window width
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height
    #[arg(long)]
    pub height: Option<u32>,

    /// Write events to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Write logs to file (in addition to stderr)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default_config(),
    };
    let config = config.with_overrides(args.backend.clone(), args.width, args.height);
    config.validate()?;

    init_logging(&args, &config)?;

    info!(
        "droid-pointer-replay v{} ({} {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_DATE"),
        env!("GIT_HASH")
    );
    tracing::debug!("Config: {:?}", config);

    let entries = replay::load_trace(&args.trace)?;
    info!(
        "Loaded {} trace entries from {}",
        entries.len(),
        args.trace.display()
    );

    let summary = match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            replay::run_replay(&config, &entries, std::io::BufWriter::new(file))?
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            let summary = replay::run_replay(&config, &entries, &mut lock)?;
            lock.flush()?;
            summary
        }
    };

    info!(
        "Final pointer position: {:.1}, {:.1}",
        summary.final_position.0, summary.final_position.1
    );
    Ok(())
}

fn init_logging(args: &Args, config: &Config) -> Result<()> {
    use std::fs::File;

    let log_level = match args.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let log_format = args
        .log_format
        .as_deref()
        .unwrap_or(config.logging.format.as_str());
    let log_file = args.log_file.as_ref().or(config.logging.log_file.as_ref());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "droid_pointer={level},droid_pointer_replay={level},warn",
            level = log_level
        ))
    });

    // Events go to stdout, so logs stay on stderr
    if let Some(log_file_path) = log_file {
        let file = File::create(log_file_path)
            .with_context(|| format!("Failed to create log file: {}", log_file_path.display()))?;

        match log_format {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
        }
        info!("Logging to file: {}", log_file_path.display());
    } else {
        match log_format {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(std::io::stderr),
                    )
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(std::io::stderr),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(std::io::stderr),
                    )
                    .init();
            }
        }
    }

    Ok(())
}
