//! Host and host-pool definitions

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{SimqError, SimqResult};

/// A remote compute host with a declared concurrency limit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Host {
    /// Host name as listed in the host file (may carry a domain suffix)
    pub name: String,
    /// Maximum number of jobs this host should run at once
    pub capacity: u32,
    /// Shared directory holding the host's load markers
    pub status_dir: PathBuf,
    /// Whether the last capacity probe reported the host full
    pub is_full: bool,
    /// Whether the host was found full earlier in the current scan
    pub was_full_previously: bool,
}

impl Host {
    /// Create a new host entry
    pub fn new(name: String, capacity: u32, status_dir: PathBuf) -> Self {
        Self {
            name,
            capacity,
            status_dir,
            is_full: false,
            was_full_previously: false,
        }
    }

    /// The portion of the host name before the first `.`
    ///
    /// Load markers in the status directory are attributed to a host by
    /// matching this prefix.
    pub fn short_name(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }
}

/// Ordered pool of hosts loaded from a host list file
///
/// The file order is the round-robin order, so it directly controls
/// scheduling fairness. No deduplication is performed; a host listed twice
/// receives proportionally more dispatch attempts.
#[derive(Debug, Clone)]
pub struct HostPool {
    hosts: Vec<Host>,
}

impl HostPool {
    /// Load a pool from a plain-text host list
    ///
    /// One host per line, whitespace-separated `<hostName> <capacity>`.
    /// No comment syntax, no header. Fields beyond the first two are
    /// ignored.
    pub fn load(path: &Path, status_dir: &Path) -> SimqResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SimqError::Config(format!("Failed to read host list {}: {}", path.display(), e))
        })?;

        let mut hosts = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            let mut fields = line.split_whitespace();

            let name = fields.next().ok_or_else(|| {
                SimqError::Config(format!(
                    "{}:{}: expected `<hostName> <capacity>`",
                    path.display(),
                    lineno + 1
                ))
            })?;
            let capacity: u32 = fields
                .next()
                .and_then(|f| f.parse().ok())
                .filter(|c| *c > 0)
                .ok_or_else(|| {
                    SimqError::Config(format!(
                        "{}:{}: capacity must be a positive integer",
                        path.display(),
                        lineno + 1
                    ))
                })?;

            hosts.push(Host::new(name.to_string(), capacity, status_dir.to_path_buf()));
        }

        Ok(Self { hosts })
    }

    /// Build a pool directly from host entries, preserving order
    pub fn from_hosts(hosts: Vec<Host>) -> Self {
        Self { hosts }
    }

    /// Number of hosts in the pool
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Whether the pool is empty
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Hosts in round-robin order
    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    /// Consume the pool, yielding the host sequence
    pub fn into_hosts(self) -> Vec<Host> {
        self.hosts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_host_list(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hostList.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, "{}", content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_short_name() {
        let host = Host::new("node3.cluster.local".to_string(), 4, PathBuf::from("runningJobs"));
        assert_eq!(host.short_name(), "node3");

        let bare = Host::new("node3".to_string(), 4, PathBuf::from("runningJobs"));
        assert_eq!(bare.short_name(), "node3");
    }

    #[test]
    fn test_load_preserves_order() {
        let (_dir, path) = write_host_list("alpha.lab 2\nbeta.lab 4\ngamma.lab 1\n");
        let pool = HostPool::load(&path, Path::new("runningJobs")).unwrap();

        let names: Vec<&str> = pool.hosts().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["alpha.lab", "beta.lab", "gamma.lab"]);
        assert_eq!(pool.hosts()[1].capacity, 4);
    }

    #[test]
    fn test_load_keeps_duplicates() {
        let (_dir, path) = write_host_list("alpha 2\nalpha 2\n");
        let pool = HostPool::load(&path, Path::new("runningJobs")).unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = HostPool::load(Path::new("/nonexistent/hostList.txt"), Path::new("runningJobs"));
        assert!(matches!(result, Err(SimqError::Config(_))));
    }

    #[test]
    fn test_load_bad_capacity() {
        let (_dir, path) = write_host_list("alpha two\n");
        let result = HostPool::load(&path, Path::new("runningJobs"));
        assert!(matches!(result, Err(SimqError::Config(_))));

        let (_dir, path) = write_host_list("alpha 0\n");
        let result = HostPool::load(&path, Path::new("runningJobs"));
        assert!(matches!(result, Err(SimqError::Config(_))));
    }

    #[test]
    fn test_load_missing_capacity_field() {
        let (_dir, path) = write_host_list("alpha 2\nbeta\n");
        let err = HostPool::load(&path, Path::new("runningJobs")).unwrap_err();
        assert!(err.to_string().contains(":2"));
    }
}
