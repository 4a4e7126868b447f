//! CLI commands implementation

use anyhow::Result;
use serde::Serialize;
use simq_core::{expand_matrix, prepare_case_dir, DispatcherConfig, HostPool};
use simq_runtime::{FleetSurvey, SshLauncher, SshLauncherConfig};
use simq_scheduler::{CapacityProbe, Dispatcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Expand a matrix file and dispatch the resulting queue
pub async fn run(
    config: &DispatcherConfig,
    matrix: &Path,
    input: &Path,
    case_dir: &Path,
    script: &Path,
) -> Result<()> {
    let mut queue = expand_matrix(matrix, input, case_dir, script)?;
    if queue.is_empty() {
        println!("Matrix {} expanded to no run sets", matrix.display());
        return Ok(());
    }

    prepare_case_dir(case_dir)?;
    std::fs::create_dir_all(&config.status_dir)?;

    let pool = HostPool::load(&config.hosts_file, &config.status_dir)?;
    info!(
        jobs = queue.len(),
        hosts = pool.len(),
        hosts_file = %config.hosts_file.display(),
        "Starting dispatch"
    );

    let launcher = SshLauncher::new(SshLauncherConfig {
        working_dir: std::env::current_dir()?,
        ..Default::default()
    });

    let mut dispatcher = Dispatcher::new(
        pool,
        Arc::new(launcher),
        config.poll_interval(),
        config.pause_after_launch(),
    )?;

    let dispatched = dispatcher.dispatch_all(&mut queue).await;
    println!("Dispatched {} jobs", dispatched);

    Ok(())
}

/// Per-host load row
#[derive(Debug, Serialize)]
struct HostLoad {
    host: String,
    load: usize,
    capacity: u32,
    full: bool,
}

/// Show current load and capacity for every pooled host
pub fn status(config: &DispatcherConfig, json: bool) -> Result<()> {
    let pool = HostPool::load(&config.hosts_file, &config.status_dir)?;
    let probe = CapacityProbe::new();

    let rows: Vec<HostLoad> = pool
        .hosts()
        .iter()
        .map(|host| {
            let load = probe.current_load(host);
            HostLoad {
                host: host.name.clone(),
                load,
                capacity: host.capacity,
                full: load >= host.capacity as usize,
            }
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        println!("No hosts in pool");
    } else {
        println!("{:<30} {:<8} {:<10} {:<6}", "HOST", "LOAD", "CAPACITY", "FULL");
        println!("{}", "-".repeat(56));
        for row in rows {
            println!(
                "{:<30} {:<8} {:<10} {:<6}",
                row.host,
                row.load,
                row.capacity,
                if row.full { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}

/// Ping every pooled host and gather facts from the live ones
pub async fn survey(config: &DispatcherConfig, script: PathBuf, output: PathBuf) -> Result<()> {
    let pool = HostPool::load(&config.hosts_file, &config.status_dir)?;
    let survey = FleetSurvey::new(script, output.clone());

    let summary = survey.run(&pool).await?;

    println!(
        "{} live, {} unreachable",
        summary.live.len(),
        summary.unreachable.len()
    );
    for name in &summary.live {
        println!("  live: {}", name);
    }
    for name in &summary.unreachable {
        println!("  unreachable: {}", name);
    }
    if !summary.live.is_empty() {
        println!("Facts are gathered into {}", output.display());
    }

    Ok(())
}
