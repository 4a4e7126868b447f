//! simq CLI
//!
//! Command-line interface for dispatching simulation job queues across a
//! remote compute fleet.

mod commands;

use clap::{Parser, Subcommand};
use simq_core::DispatcherConfig;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// simq - batch-simulation job dispatcher for remote compute fleets
#[derive(Parser, Debug)]
#[command(name = "simq")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML dispatcher config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Host list file (overrides the config file)
    #[arg(long, global = true)]
    hosts: Option<PathBuf>,

    /// Status marker directory (overrides the config file)
    #[arg(long, global = true)]
    status_dir: Option<PathBuf>,

    /// Log level (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Expand a test matrix and dispatch the resulting job queue
    Run {
        /// Matrix file: a header of parameter names, one run set per line
        matrix: PathBuf,

        /// Simulation input file, forwarded as ex.file=<path>
        input: PathBuf,

        /// Case directory receiving per-run output and capture files
        case_dir: PathBuf,

        /// Remote script invoked on the selected host
        #[arg(long, default_value = "goSim.sh")]
        script: PathBuf,

        /// Milliseconds to sleep while every host is full
        #[arg(long)]
        poll_interval_ms: Option<u64>,

        /// Milliseconds to pause after each launch
        #[arg(long)]
        pause_after_launch_ms: Option<u64>,
    },

    /// Show current load and capacity for every pooled host
    Status {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Ping every pooled host and gather facts from the live ones
    Survey {
        /// Facts-gathering script executed on each live host
        #[arg(long, default_value = "getBoxInfo.sh")]
        script: PathBuf,

        /// Report file the remote script appends to
        #[arg(long, default_value = "liveBoxData.txt")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DispatcherConfig::from_file(path)?,
        None => DispatcherConfig::default(),
    };
    if let Some(hosts) = cli.hosts {
        config.hosts_file = hosts;
    }
    if let Some(status_dir) = cli.status_dir {
        config.status_dir = status_dir;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // Initialize logging
    let log_level = match config.logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match cli.command {
        Commands::Run {
            matrix,
            input,
            case_dir,
            script,
            poll_interval_ms,
            pause_after_launch_ms,
        } => {
            if let Some(ms) = poll_interval_ms {
                config.poll_interval_ms = ms;
            }
            if let Some(ms) = pause_after_launch_ms {
                config.pause_after_launch_ms = ms;
            }
            commands::run(&config, &matrix, &input, &case_dir, &script).await?;
        }
        Commands::Status { json } => {
            commands::status(&config, json)?;
        }
        Commands::Survey { script, output } => {
            commands::survey(&config, script, output).await?;
        }
    }

    Ok(())
}
