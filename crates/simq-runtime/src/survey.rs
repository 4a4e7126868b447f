//! Fleet liveness survey
//!
//! Pings every pooled host and fires a facts-gathering script on the ones
//! that answer. The remote script appends to a shared report file; this
//! side only removes a stale report up front and never waits for the
//! gatherers to finish. No scheduling logic lives here.

use simq_core::{HostPool, SimqResult};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{info, warn};

/// Outcome of one survey pass over the pool
#[derive(Debug, Default)]
pub struct SurveySummary {
    /// Hosts that answered the ping
    pub live: Vec<String>,
    /// Hosts that did not
    pub unreachable: Vec<String>,
}

/// Fleet survey probe
pub struct FleetSurvey {
    /// Facts-gathering script executed on each live host
    facts_script: PathBuf,
    /// Report file the remote script appends to
    report_path: PathBuf,
    /// Pause between hosts
    pause: Duration,
}

impl FleetSurvey {
    /// Create a new fleet survey
    pub fn new(facts_script: PathBuf, report_path: PathBuf) -> Self {
        Self {
            facts_script,
            report_path,
            pause: Duration::from_millis(200),
        }
    }

    /// Override the pause between hosts
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Survey every host in the pool, in pool order
    pub async fn run(&self, pool: &HostPool) -> SimqResult<SurveySummary> {
        if self.report_path.exists() {
            std::fs::remove_file(&self.report_path)?;
        }

        let mut summary = SurveySummary::default();

        for host in pool.hosts() {
            if self.ping(&host.name).await {
                info!(host = %host.name, "Host is live");
                self.gather_facts(&host.name).await;
                summary.live.push(host.name.clone());
                tokio::time::sleep(self.pause).await;
            } else {
                warn!(host = %host.name, "Host unreachable");
                summary.unreachable.push(host.name.clone());
            }
        }

        Ok(summary)
    }

    /// Single-packet ping with a one-second deadline
    async fn ping(&self, host_name: &str) -> bool {
        let status = Command::new("ping")
            .args(["-c1", "-w1", host_name])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        matches!(status, Ok(s) if s.success())
    }

    /// Fire the facts script on a live host without waiting for it
    async fn gather_facts(&self, host_name: &str) {
        let mut cmd = Command::new("ssh");
        cmd.arg(host_name)
            .arg(&self.facts_script)
            .arg(&self.report_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        if let Err(e) = cmd.spawn() {
            warn!(host = %host_name, error = %e, "Failed to start facts gatherer");
        }
    }
}
