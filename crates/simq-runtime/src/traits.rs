//! Remote executor trait definitions

use async_trait::async_trait;
use simq_core::{Host, Job, SimqResult};

/// Capability for starting a job on a remote host
///
/// Launches are fire-and-forget: a successful return means the remote
/// invocation was started, never that the job completed. The dispatcher
/// has no way to abort a launched job.
#[async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// Launch a job on the given host without waiting for completion
    async fn launch(&self, host: &Host, job: &Job) -> SimqResult<()>;

    /// Get the executor name
    fn name(&self) -> &'static str;
}
