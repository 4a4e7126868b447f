//! Job descriptors and the FIFO job queue

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::PathBuf;
use uuid::Uuid;

/// A single simulation job awaiting dispatch
///
/// Immutable once enqueued. All paths are relative to the fixed working
/// root the dispatcher runs from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier for the job
    pub id: Uuid,
    /// Script to invoke on the remote host
    pub remote_script: PathBuf,
    /// Directory receiving the job's output and capture files
    pub output_dir: PathBuf,
    /// Simulation output file name within the output directory
    pub output_file_name: String,
    /// Job name, used for the capture file and passed to the remote script
    pub name: String,
    /// Extra arguments forwarded to the remote script verbatim
    pub extra_args: Vec<String>,
    /// Enqueue timestamp
    pub enqueued_at: DateTime<Utc>,
}

impl Job {
    /// Create a new job descriptor
    pub fn new(
        remote_script: PathBuf,
        output_dir: PathBuf,
        output_file_name: String,
        name: String,
        extra_args: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            remote_script,
            output_dir,
            output_file_name,
            name,
            extra_args,
            enqueued_at: Utc::now(),
        }
    }

    /// Full path of the simulation output file
    pub fn output_file_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file_name)
    }

    /// Name of the stdout/stderr capture file for this job
    pub fn capture_file_name(&self) -> String {
        format!("scrnDump{}.txt", self.name)
    }

    /// Full path of the stdout/stderr capture file
    ///
    /// This file is the only diagnostic trail if the remote side fails
    /// silently.
    pub fn capture_path(&self) -> PathBuf {
        self.output_dir.join(self.capture_file_name())
    }
}

/// Ordered queue of jobs, processed strictly front-to-back
///
/// A job is removed from the queue only after successful dispatch.
#[derive(Debug, Clone, Default)]
pub struct JobQueue {
    jobs: VecDeque<Job>,
}

impl JobQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a job to the back of the queue
    pub fn push_back(&mut self, job: Job) {
        self.jobs.push_back(job);
    }

    /// The job at the front of the queue, if any
    pub fn front(&self) -> Option<&Job> {
        self.jobs.front()
    }

    /// Remove and return the job at the front of the queue
    pub fn pop_front(&mut self) -> Option<Job> {
        self.jobs.pop_front()
    }

    /// Number of queued jobs
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Iterate the queued jobs front-to-back
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }
}

impl From<Vec<Job>> for JobQueue {
    fn from(jobs: Vec<Job>) -> Self {
        Self {
            jobs: jobs.into(),
        }
    }
}
