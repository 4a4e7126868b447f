//! simq-runtime: Remote execution layer
//!
//! This crate provides the fire-and-forget remote execution seam:
//! - An ssh-based launcher for real dispatch
//! - A recording executor for deterministic tests
//! - The fleet survey probe

pub mod recording;
pub mod ssh;
pub mod survey;
pub mod traits;

pub use recording::{LaunchRecord, RecordingExecutor};
pub use ssh::{SshLauncher, SshLauncherConfig};
pub use survey::{FleetSurvey, SurveySummary};
pub use traits::RemoteExecutor;
