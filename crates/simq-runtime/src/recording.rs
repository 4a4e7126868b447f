//! Recording executor for deterministic tests

use async_trait::async_trait;
use simq_core::{Host, Job, SimqResult};
use std::sync::Mutex;
use tracing::debug;

use crate::traits::RemoteExecutor;

/// One recorded launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRecord {
    /// Host the job was assigned to
    pub host: String,
    /// Job name
    pub job: String,
    /// Extra arguments the job carried
    pub extra_args: Vec<String>,
}

/// Remote executor that records launches without side effects
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    records: Mutex<Vec<LaunchRecord>>,
}

impl RecordingExecutor {
    /// Create a new recording executor
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded launches, in dispatch order
    pub fn records(&self) -> Vec<LaunchRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Number of recorded launches
    pub fn launch_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl RemoteExecutor for RecordingExecutor {
    async fn launch(&self, host: &Host, job: &Job) -> SimqResult<()> {
        debug!(host = %host.name, job = %job.name, "Recording launch");
        self.records.lock().unwrap().push(LaunchRecord {
            host: host.name.clone(),
            job: job.name.clone(),
            extra_args: job.extra_args.clone(),
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_records_in_order() {
        let executor = RecordingExecutor::new();
        let host = Host::new("alpha".to_string(), 1, PathBuf::from("runningJobs"));

        for name in ["001", "002"] {
            let job = Job::new(
                PathBuf::from("goSim.sh"),
                PathBuf::from("cases"),
                format!("out{}.txt", name),
                name.to_string(),
                Vec::new(),
            );
            executor.launch(&host, &job).await.unwrap();
        }

        let records = executor.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].job, "001");
        assert_eq!(records[1].job, "002");
        assert_eq!(records[0].host, "alpha");
    }
}
