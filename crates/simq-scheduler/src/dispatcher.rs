//! Round-robin dispatcher state machine
//!
//! Walks the host sequence with a cursor that persists across jobs, probing
//! capacity at each position. A full host advances the cursor; a full scan
//! of the pool parks the dispatcher in a bounded fixed-interval wait until
//! some host frees up. Jobs leave the queue only after their launch was
//! handed to the executor.

use simq_core::{Host, HostPool, Job, JobQueue, SimqError, SimqResult};
use simq_runtime::RemoteExecutor;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::capacity::CapacityProbe;

/// Dispatcher context
///
/// An explicit scheduler object rather than process-wide state, so
/// concurrent instances can coexist in tests.
pub struct Dispatcher {
    /// Hosts in round-robin order
    hosts: Vec<Host>,
    /// Index of the next host to examine; persists across jobs
    cursor: usize,
    /// Capacity probe over the shared status directory
    probe: CapacityProbe,
    /// Remote execution capability
    executor: Arc<dyn RemoteExecutor>,
    /// Sleep interval while the whole pool is full
    poll_interval: Duration,
    /// Pause after each launch, letting the remote marker surface
    pause_after_launch: Duration,
}

impl Dispatcher {
    /// Create a new dispatcher over a host pool
    pub fn new(
        pool: HostPool,
        executor: Arc<dyn RemoteExecutor>,
        poll_interval: Duration,
        pause_after_launch: Duration,
    ) -> SimqResult<Self> {
        if pool.is_empty() {
            return Err(SimqError::Config("host pool is empty".to_string()));
        }

        info!(
            hosts = pool.len(),
            executor = executor.name(),
            poll_interval_ms = poll_interval.as_millis() as u64,
            "Dispatcher initialized"
        );

        Ok(Self {
            hosts: pool.into_hosts(),
            cursor: 0,
            probe: CapacityProbe::new(),
            executor,
            poll_interval,
            pause_after_launch,
        })
    }

    /// Dispatch every queued job, front to back
    ///
    /// Blocks (in the WAITING state) while all hosts are full; returns the
    /// number of jobs dispatched once the queue is exhausted. Dispatched is
    /// the final observable state of a job here; nothing tracks completion.
    pub async fn dispatch_all(&mut self, queue: &mut JobQueue) -> usize {
        let mut dispatched = 0;

        while let Some(job) = queue.front() {
            self.dispatch_one(job).await;
            queue.pop_front();
            dispatched += 1;

            if !self.pause_after_launch.is_zero() {
                sleep(self.pause_after_launch).await;
            }
        }

        info!(dispatched = dispatched, "Job queue exhausted");
        dispatched
    }

    /// Find a host with spare capacity and hand the job to the executor
    ///
    /// One full-host encounter and one successful dispatch each advance the
    /// cursor by exactly one position. When every host in one scan reports
    /// full, sleeps the poll interval and re-probes from the current cursor
    /// without consuming the job.
    async fn dispatch_one(&mut self, job: &Job) {
        let host_count = self.hosts.len();
        let mut full_streak: usize = 0;

        loop {
            let host = &mut self.hosts[self.cursor];

            if self.probe.is_full(host) {
                host.is_full = true;
                host.was_full_previously = true;
                full_streak += 1;
                debug!(
                    host = %host.name,
                    streak = full_streak,
                    "Host is full"
                );

                self.cursor = (self.cursor + 1) % host_count;

                if full_streak >= host_count {
                    info!(
                        job = %job.name,
                        poll_interval_ms = self.poll_interval.as_millis() as u64,
                        "All hosts full, waiting for capacity"
                    );
                    sleep(self.poll_interval).await;
                }
            } else {
                host.is_full = false;

                info!(host = %host.name, job = %job.name, "Dispatching job");
                if let Err(e) = self.executor.launch(host, job).await {
                    // Not retried; the capture file is the diagnostic trail.
                    warn!(
                        host = %host.name,
                        job = %job.name,
                        error = %e,
                        "Launch failed, job counted as dispatched"
                    );
                }

                let host = &mut self.hosts[self.cursor];
                if host.was_full_previously {
                    // The host cycled from full to available mid-scan.
                    host.was_full_previously = false;
                    full_streak = full_streak.saturating_sub(1);
                }

                self.cursor = (self.cursor + 1) % host_count;
                return;
            }
        }
    }

    /// Current cursor position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Hosts in round-robin order
    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }
}
