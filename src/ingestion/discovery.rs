//! Input file discovery.
//!
//! Discovery is the only step whose failure aborts a run: if the scan directory cannot be
//! listed, the record collection cannot be computed at all.

use std::path::{Path, PathBuf};

use crate::error::DiscoveryError;

use super::unified::{IngestionFormat, SourceFile};

/// Discover spreadsheet and CSV files directly inside `dir` (not recursive).
///
/// The result is partitioned by format, spreadsheets first, and each partition is sorted
/// lexically by path, so repeated runs over the same directory see the same order.
/// Extension matching is case-sensitive (`*.csv` does not match `DATA.CSV`).
pub fn discover_sources(dir: impl AsRef<Path>) -> Result<Vec<SourceFile>, DiscoveryError> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Err(DiscoveryError::RootNotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(DiscoveryError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut sources = Vec::new();
    for format in [IngestionFormat::Excel, IngestionFormat::Csv] {
        let mut paths = Vec::new();
        for ext in format.extensions() {
            paths.extend(glob_files(dir, ext)?);
        }
        paths.sort();
        paths.dedup();
        sources.extend(paths.into_iter().map(|path| SourceFile::new(path, format)));
    }

    tracing::debug!(dir = %dir.display(), files = sources.len(), "discovered input files");
    Ok(sources)
}

fn glob_files(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let pattern = format!(
        "{}/*.{ext}",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    let entries = glob::glob(&pattern).map_err(|source| DiscoveryError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?;
        if path.is_file() {
            paths.push(path);
        }
    }
    Ok(paths)
}
