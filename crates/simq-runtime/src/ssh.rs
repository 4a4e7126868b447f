//! ssh-based fire-and-forget launcher
//!
//! Invokes the job's remote script over ssh with the fixed positional
//! contract `<script> <workingDir> <outputFilePath> <statusDir> <jobName>
//! <extraArgs...>` and captures the invocation's stdout/stderr into the
//! job's `scrnDump` file. The spawned child is never awaited; the load
//! marker the remote script creates is the only trace of the running job.

use async_trait::async_trait;
use simq_core::{Host, Job, SimqError, SimqResult};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::traits::RemoteExecutor;

/// ssh launcher configuration
#[derive(Debug, Clone)]
pub struct SshLauncherConfig {
    /// Path to the ssh binary
    pub ssh_path: PathBuf,
    /// Working directory passed to the remote script
    pub working_dir: PathBuf,
}

impl Default for SshLauncherConfig {
    fn default() -> Self {
        Self {
            ssh_path: PathBuf::from("ssh"),
            working_dir: PathBuf::from("."),
        }
    }
}

/// ssh-based remote executor
pub struct SshLauncher {
    config: SshLauncherConfig,
}

impl SshLauncher {
    /// Create a new ssh launcher
    pub fn new(config: SshLauncherConfig) -> Self {
        Self { config }
    }

    /// Build the ssh argument list for a launch
    ///
    /// The order after the host name is the remote invocation contract;
    /// any replacement remote-side script must honor it.
    fn build_args(&self, host: &Host, job: &Job) -> Vec<String> {
        let mut args = vec![
            host.name.clone(),
            job.remote_script.display().to_string(),
            self.config.working_dir.display().to_string(),
            job.output_file_path().display().to_string(),
            host.status_dir.display().to_string(),
            job.name.clone(),
        ];
        args.extend(job.extra_args.iter().cloned());
        args
    }
}

#[async_trait]
impl RemoteExecutor for SshLauncher {
    async fn launch(&self, host: &Host, job: &Job) -> SimqResult<()> {
        info!(
            host = %host.name,
            job = %job.name,
            script = %job.remote_script.display(),
            "Launching remote job"
        );

        let capture_path = job.capture_path();
        let capture = std::fs::File::create(&capture_path).map_err(|e| {
            SimqError::Launch(format!(
                "Failed to create capture file {}: {}",
                capture_path.display(),
                e
            ))
        })?;
        let capture_err = capture.try_clone().map_err(|e| {
            SimqError::Launch(format!("Failed to clone capture handle: {}", e))
        })?;

        let mut cmd = Command::new(&self.config.ssh_path);
        cmd.args(self.build_args(host, job));
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::from(capture));
        cmd.stderr(Stdio::from(capture_err));

        match cmd.spawn() {
            Ok(child) => {
                // Fire-and-forget: the child is dropped, never awaited.
                debug!(
                    host = %host.name,
                    job = %job.name,
                    pid = child.id().unwrap_or(0),
                    "Remote invocation spawned"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    host = %host.name,
                    job = %job.name,
                    error = %e,
                    "Failed to start remote invocation"
                );
                Err(SimqError::Launch(format!(
                    "Failed to start ssh for job {}: {}",
                    job.name, e
                )))
            }
        }
    }

    fn name(&self) -> &'static str {
        "ssh"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_host() -> Host {
        Host::new(
            "node1.cluster".to_string(),
            4,
            PathBuf::from("runningJobs"),
        )
    }

    fn test_job() -> Job {
        Job::new(
            PathBuf::from("goSim.sh"),
            PathBuf::from("cases"),
            "out001.txt".to_string(),
            "001".to_string(),
            vec!["ex.file=input.dat".to_string(), "mass=10.0".to_string()],
        )
    }

    #[test]
    fn test_build_args_positional_contract() {
        let launcher = SshLauncher::new(SshLauncherConfig {
            ssh_path: PathBuf::from("ssh"),
            working_dir: PathBuf::from("/sim/run"),
        });

        let args = launcher.build_args(&test_host(), &test_job());
        assert_eq!(
            args,
            vec![
                "node1.cluster",
                "goSim.sh",
                "/sim/run",
                "cases/out001.txt",
                "runningJobs",
                "001",
                "ex.file=input.dat",
                "mass=10.0",
            ]
        );
    }

    #[tokio::test]
    async fn test_launch_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let launcher = SshLauncher::new(SshLauncherConfig {
            ssh_path: dir.path().join("no-such-ssh"),
            working_dir: PathBuf::from("."),
        });

        let host = test_host();
        let mut job = test_job();
        job.output_dir = dir.path().to_path_buf();

        let result = launcher.launch(&host, &job).await;
        assert!(matches!(result, Err(SimqError::Launch(_))));
        // The capture file exists even when the spawn fails.
        assert!(job.capture_path().exists());
    }
}
