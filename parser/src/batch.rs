//! Parsing many pages at once.
//!
//! Inputs are expanded into a sorted, de-duplicated list of page files and
//! parsed on a bounded rayon pool. Every page is parsed independently, so a
//! load failure only affects its own entry.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use manpage_core::ManPage;
use tracing::info;

use crate::error::{BatchError, LoadError};

/// Result of parsing one input path.
#[derive(Debug)]
pub struct PageResult {
    pub path: PathBuf,
    pub result: Result<ManPage, LoadError>,
}

/// Expands files and directories into the list of pages to parse.
///
/// Directories contribute their `*.gz` entries (non-recursive); files are
/// taken as given regardless of extension so the loader can report them.
/// The result is sorted and free of duplicates.
///
/// # Errors
///
/// [`BatchError::InvalidInput`] when `inputs` is empty, a path does not
/// exist, or no page files were found; [`BatchError::Io`] when a directory
/// cannot be read.
pub fn collect_page_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, BatchError> {
    if inputs.is_empty() {
        return Err(BatchError::InvalidInput(
            "No man page paths were provided".to_string(),
        ));
    }

    let mut paths = BTreeSet::new();

    for input in inputs {
        if input.is_dir() {
            for entry in fs::read_dir(input)? {
                let path = entry?.path();
                if path.is_file() && is_page_file(&path) {
                    paths.insert(path);
                }
            }
            continue;
        }

        if input.is_file() {
            paths.insert(input.clone());
            continue;
        }

        return Err(BatchError::InvalidInput(format!(
            "Man page path '{}' does not exist",
            input.display()
        )));
    }

    if paths.is_empty() {
        return Err(BatchError::InvalidInput(
            "No .gz man pages found in provided paths".to_string(),
        ));
    }

    Ok(paths.into_iter().collect())
}

/// Parses every path on a pool of `jobs` threads, keeping input order.
///
/// `None` or `Some(0)` picks a default based on available parallelism.
///
/// # Errors
///
/// Only [`BatchError::ThreadPool`]; per-page failures are reported in the
/// returned [`PageResult`]s.
pub fn parse_all(paths: &[PathBuf], jobs: Option<usize>) -> Result<Vec<PageResult>, BatchError> {
    use rayon::prelude::*;

    let jobs = jobs
        .filter(|jobs| *jobs > 0)
        .unwrap_or_else(|| default_parallel_jobs(paths.len()));
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let results: Vec<PageResult> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| PageResult {
                path: path.clone(),
                result: crate::parse(path),
            })
            .collect()
    });

    let failed = results.iter().filter(|r| r.result.is_err()).count();
    info!(
        pages = results.len(),
        failed,
        jobs,
        "Parsed man page batch"
    );

    Ok(results)
}

fn default_parallel_jobs(page_count: usize) -> usize {
    let cpu_count = std::thread::available_parallelism()
        .map(|parallelism| parallelism.get())
        .unwrap_or(4);
    cpu_count.min(page_count.max(1))
}

/// Returns `true` when `path` looks like a compressed man page.
pub fn is_page_file(path: &Path) -> bool {
    path.extension() == Some(OsStr::new("gz"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;

    use super::*;

    fn write_page(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        let file = fs::File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap();
        path
    }

    #[test]
    fn test_collect_page_paths_scans_directories() {
        let dir = tempfile::tempdir().unwrap();
        write_page(dir.path(), "b.1.gz", ".SH NAME\nb\n");
        write_page(dir.path(), "a.1.gz", ".SH NAME\na\n");
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let paths = collect_page_paths(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.1.gz", "b.1.gz"]);
    }

    #[test]
    fn test_collect_page_paths_rejects_missing() {
        let err = collect_page_paths(&[PathBuf::from("/no/such/page.1.gz")]).unwrap_err();
        assert!(matches!(err, BatchError::InvalidInput(_)));
        assert!(matches!(
            collect_page_paths(&[]).unwrap_err(),
            BatchError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_collect_page_paths_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_page_paths(&[dir.path().to_path_buf()]).is_err());
    }

    #[test]
    fn test_parse_all_keeps_order_and_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_page(dir.path(), "good.1.gz", ".SH NAME\ngood \\- ok\n");
        let bad = dir.path().join("bad.1.gz");
        fs::write(&bad, "not gzip").unwrap();
        let other = write_page(dir.path(), "other.1.gz", ".SH NAME\nother \\- ok\n");

        let results = parse_all(&[good.clone(), bad.clone(), other.clone()], Some(2)).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].path, good);
        assert_eq!(results[0].result.as_ref().unwrap().name, "good");
        assert!(matches!(
            results[1].result,
            Err(LoadError::Decompress { .. })
        ));
        assert_eq!(results[2].result.as_ref().unwrap().name, "other");
    }

    #[test]
    fn test_is_page_file() {
        assert!(is_page_file(Path::new("ls.1.gz")));
        assert!(!is_page_file(Path::new("ls.1")));
    }
}
