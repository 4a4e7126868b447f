//! Capacity probe over the shared status directory
//!
//! Load markers are created and deleted by the remote execution side; this
//! probe only counts them. The read is unsynchronized against the remote
//! writers, so a just-launched job's marker may not be visible yet.

use simq_core::Host;
use tracing::debug;

/// Counts the load markers attributed to a host
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityProbe;

impl CapacityProbe {
    /// Create a new capacity probe
    pub fn new() -> Self {
        Self
    }

    /// Number of markers in the host's status directory whose name begins
    /// with the host's short name
    ///
    /// An empty or inaccessible status directory reads as zero load: the
    /// probe fails open, not closed.
    pub fn current_load(&self, host: &Host) -> usize {
        let entries = match std::fs::read_dir(&host.status_dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(
                    host = %host.name,
                    status_dir = %host.status_dir.display(),
                    error = %e,
                    "Status directory inaccessible, reading as idle"
                );
                return 0;
            }
        };

        let short_name = host.short_name();
        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with(short_name)
            })
            .count()
    }

    /// Whether the host is at or beyond its declared capacity
    pub fn is_full(&self, host: &Host) -> bool {
        let load = self.current_load(host);
        debug!(
            host = %host.short_name(),
            load = load,
            capacity = host.capacity,
            "Probed host load"
        );
        load >= host.capacity as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn host_with_dir(name: &str, capacity: u32, dir: &Path) -> Host {
        Host::new(name.to_string(), capacity, dir.to_path_buf())
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn test_empty_dir_is_idle() {
        let dir = tempfile::tempdir().unwrap();
        let host = host_with_dir("alpha.lab", 2, dir.path());
        let probe = CapacityProbe::new();

        assert_eq!(probe.current_load(&host), 0);
        assert!(!probe.is_full(&host));
    }

    #[test]
    fn test_missing_dir_reads_as_idle() {
        let host = host_with_dir("alpha.lab", 2, Path::new("/nonexistent/runningJobs"));
        let probe = CapacityProbe::new();

        assert_eq!(probe.current_load(&host), 0);
    }

    #[test]
    fn test_markers_counted_by_short_name_prefix() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "alpha_001");
        touch(dir.path(), "alpha_002");
        touch(dir.path(), "beta_001");

        let probe = CapacityProbe::new();
        let alpha = host_with_dir("alpha.lab", 2, dir.path());
        let beta = host_with_dir("beta.lab", 2, dir.path());

        assert_eq!(probe.current_load(&alpha), 2);
        assert_eq!(probe.current_load(&beta), 1);
        assert!(probe.is_full(&alpha));
        assert!(!probe.is_full(&beta));
    }

    #[test]
    fn test_load_unaffected_by_other_hosts() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "beta_001");
        touch(dir.path(), "beta_002");

        let probe = CapacityProbe::new();
        let alpha = host_with_dir("alpha.lab", 1, dir.path());

        assert_eq!(probe.current_load(&alpha), 0);
    }

    #[test]
    fn test_probe_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "alpha_001");

        let probe = CapacityProbe::new();
        let alpha = host_with_dir("alpha.lab", 4, dir.path());

        assert_eq!(probe.current_load(&alpha), probe.current_load(&alpha));
    }
}
