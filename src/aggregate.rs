//! Aggregation of per-file batches into one [`RecordCollection`].

use std::path::{Path, PathBuf};

use crate::error::{LaneResult, SkipReason};
use crate::ingestion::{FileOutcome, IngestionFormat, IngestionOptions, SourceFile, discover_sources, ingest_file};
use crate::types::RecordCollection;

/// What happened to one input file during a run.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub format: IngestionFormat,
    pub status: FileStatus,
}

/// Per-file status kept in the run report.
#[derive(Debug)]
pub enum FileStatus {
    /// The file contributed `rows` records, located at `header_row`.
    Loaded { rows: usize, header_row: usize },
    /// The file contributed nothing.
    Skipped(SkipReason),
}

/// The outcome of a whole run: the aggregated collection plus a report per file.
#[derive(Debug)]
pub struct IngestionRun {
    pub collection: RecordCollection,
    pub files: Vec<FileReport>,
}

impl IngestionRun {
    /// Number of files that contributed records.
    pub fn loaded_files(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Loaded { .. }))
            .count()
    }

    /// Number of files that were skipped.
    pub fn skipped_files(&self) -> usize {
        self.files.len() - self.loaded_files()
    }
}

/// Ingest `sources` in the given order and concatenate their records.
///
/// Files are processed one at a time. A skipped file never aborts the run; the collection
/// is simply empty when no file contributes.
pub fn aggregate(sources: &[SourceFile], options: &IngestionOptions) -> IngestionRun {
    let mut collection = RecordCollection::empty(options.markers.clone());
    let mut files = Vec::with_capacity(sources.len());

    for source in sources {
        let status = match ingest_file(source, options) {
            FileOutcome::Loaded(batch) => {
                let status = FileStatus::Loaded {
                    rows: batch.records.len(),
                    header_row: batch.header_row,
                };
                collection.extend_batch(batch.records);
                status
            }
            FileOutcome::Skipped(reason) => FileStatus::Skipped(reason),
        };
        files.push(FileReport {
            path: source.path.clone(),
            format: source.format,
            status,
        });
    }

    let run = IngestionRun { collection, files };
    tracing::info!(
        files = run.files.len(),
        loaded = run.loaded_files(),
        skipped = run.skipped_files(),
        records = run.collection.len(),
        "ingestion run finished"
    );
    run
}

/// Discover the inputs in `dir` and aggregate them.
///
/// Fails only when discovery itself fails (e.g. `dir` does not exist).
///
/// ```no_run
/// use lane_ingest::aggregate::ingest_dir;
/// use lane_ingest::ingestion::IngestionOptions;
///
/// # fn main() -> lane_ingest::LaneResult<()> {
/// let run = ingest_dir("./exports", &IngestionOptions::default())?;
/// println!("records={} skipped_files={}", run.collection.len(), run.skipped_files());
/// # Ok(())
/// # }
/// ```
pub fn ingest_dir(dir: impl AsRef<Path>, options: &IngestionOptions) -> LaneResult<IngestionRun> {
    let sources = discover_sources(dir)?;
    Ok(aggregate(&sources, options))
}
