//! Test-matrix expansion
//!
//! Turns a plain-text parameter matrix into a job queue. The first line
//! names the swept parameters; every following non-empty line is one run
//! set. The first column is a row label and is not forwarded as an
//! argument.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{Job, JobQueue, SimqError, SimqResult};

/// Expand a matrix file into a queue of jobs
///
/// Run set `k` (1-based) yields a job named with the zero-padded run
/// number, writing `out<NNN>.txt` into `case_dir`, with extra args
/// `ex.file=<input_file>` followed by `<param>=<value>` for each header
/// column after the first.
pub fn expand_matrix(
    matrix_path: &Path,
    input_file: &Path,
    case_dir: &Path,
    remote_script: &Path,
) -> SimqResult<JobQueue> {
    let content = std::fs::read_to_string(matrix_path).map_err(|e| {
        SimqError::Matrix(format!(
            "Failed to read matrix file {}: {}",
            matrix_path.display(),
            e
        ))
    })?;

    let mut lines = content.lines();
    let header: Vec<&str> = lines
        .next()
        .ok_or_else(|| {
            SimqError::Matrix(format!("{}: empty matrix file", matrix_path.display()))
        })?
        .split_whitespace()
        .collect();

    let mut queue = JobQueue::new();
    let mut run_set = 0u32;

    for (lineno, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < header.len() {
            return Err(SimqError::Matrix(format!(
                "{}:{}: row has {} fields, header names {}",
                matrix_path.display(),
                lineno + 2,
                fields.len(),
                header.len()
            )));
        }

        run_set += 1;
        let test_name = format!("{:03}", run_set);
        let out_file_name = format!("out{}.txt", test_name);

        let mut extra_args = vec![format!("ex.file={}", input_file.display())];
        for idx in 1..header.len() {
            extra_args.push(format!("{}={}", header[idx], fields[idx]));
        }

        debug!(run_set = %test_name, args = ?extra_args, "Expanded run set");

        queue.push_back(Job::new(
            remote_script.to_path_buf(),
            case_dir.to_path_buf(),
            out_file_name,
            test_name,
            extra_args,
        ));
    }

    Ok(queue)
}

/// Prepare the case directory for a fresh matrix run
///
/// Creates the directory if absent, otherwise removes the plain files it
/// contains. Subdirectories are left alone.
pub fn prepare_case_dir(case_dir: &Path) -> SimqResult<()> {
    if case_dir.exists() {
        for entry in std::fs::read_dir(case_dir)? {
            let path = entry?.path();
            if path.is_file() {
                std::fs::remove_file(&path)?;
            }
        }
    } else {
        std::fs::create_dir_all(case_dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_matrix(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, "{}", content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_expand_matrix() {
        let (_dir, path) = write_matrix("run mass drag\nr1 10.0 0.3\nr2 20.0 0.4\n");
        let queue = expand_matrix(
            &path,
            Path::new("input.dat"),
            Path::new("cases"),
            Path::new("goSim.sh"),
        )
        .unwrap();

        assert_eq!(queue.len(), 2);

        let jobs: Vec<&Job> = queue.iter().collect();
        assert_eq!(jobs[0].name, "001");
        assert_eq!(jobs[0].output_file_name, "out001.txt");
        assert_eq!(
            jobs[0].extra_args,
            vec!["ex.file=input.dat", "mass=10.0", "drag=0.3"]
        );
        assert_eq!(jobs[1].name, "002");
        assert_eq!(jobs[1].extra_args[2], "drag=0.4");
    }

    #[test]
    fn test_expand_skips_blank_rows() {
        let (_dir, path) = write_matrix("run mass\nr1 10.0\n\nr2 20.0\n");
        let queue = expand_matrix(
            &path,
            Path::new("input.dat"),
            Path::new("cases"),
            Path::new("goSim.sh"),
        )
        .unwrap();
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_expand_short_row() {
        let (_dir, path) = write_matrix("run mass drag\nr1 10.0\n");
        let err = expand_matrix(
            &path,
            Path::new("input.dat"),
            Path::new("cases"),
            Path::new("goSim.sh"),
        )
        .unwrap_err();
        assert!(matches!(err, SimqError::Matrix(_)));
        assert!(err.to_string().contains(":2"));
    }

    #[test]
    fn test_expand_empty_file() {
        let (_dir, path) = write_matrix("");
        let result = expand_matrix(
            &path,
            Path::new("input.dat"),
            Path::new("cases"),
            Path::new("goSim.sh"),
        );
        assert!(matches!(result, Err(SimqError::Matrix(_))));
    }

    #[test]
    fn test_prepare_case_dir() {
        let dir = tempfile::tempdir().unwrap();
        let case_dir = dir.path().join("cases");

        prepare_case_dir(&case_dir).unwrap();
        assert!(case_dir.is_dir());

        std::fs::write(case_dir.join("stale.txt"), "old").unwrap();
        std::fs::create_dir(case_dir.join("keep")).unwrap();

        prepare_case_dir(&case_dir).unwrap();
        assert!(!case_dir.join("stale.txt").exists());
        assert!(case_dir.join("keep").is_dir());
    }
}
