//! Concurrent parsing of many message files
//!
//! Files are discovered under the input paths, then parsed on blocking tasks
//! with at most `workers` files in flight. A file that cannot be read is
//! reported and the batch continues.

use crate::app::services::parser::{Hl7Parser, ParseResult, ParseStats};
use crate::config::Config;
use crate::{Error, Result};
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Parse outcome for one file
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<ParseResult>,
}

/// Outcome of a whole batch
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Per-file outcomes, sorted by path
    pub files: Vec<FileOutcome>,
    /// Statistics over all readable files
    pub stats: ParseStats,
    pub files_failed: usize,
    pub elapsed: Duration,
}

impl BatchResult {
    pub fn files_processed(&self) -> usize {
        self.files.len() - self.files_failed
    }
}

/// Parses files concurrently with a shared parser
pub struct BatchProcessor {
    parser: Arc<Hl7Parser>,
    config: Arc<Config>,
    progress: Option<ProgressBar>,
}

impl BatchProcessor {
    pub fn new(parser: Arc<Hl7Parser>, config: Arc<Config>) -> Self {
        Self {
            parser,
            config,
            progress: None,
        }
    }

    /// Advance the given progress bar once per finished file
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Expand input paths into message files
    ///
    /// Files are taken as given; directories are walked for files with the
    /// configured extension (case-insensitive). The result is sorted and
    /// free of duplicates.
    pub fn discover_files(&self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for input in inputs {
            if input.is_file() {
                files.push(input.clone());
            } else if input.is_dir() {
                let before = files.len();
                for entry in WalkDir::new(input).follow_links(true) {
                    let entry = entry.map_err(|e| {
                        Error::configuration(format!(
                            "Failed to walk {}: {}",
                            input.display(),
                            e
                        ))
                    })?;
                    if entry.file_type().is_file() && self.has_extension(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                debug!(
                    "Found {} files under {}",
                    files.len() - before,
                    input.display()
                );
            } else {
                return Err(Error::configuration(format!(
                    "Input path does not exist: {}",
                    input.display()
                )));
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.config.file_extension))
    }

    /// Parse files concurrently and aggregate their statistics
    pub async fn process_files(&self, files: &[PathBuf]) -> BatchResult {
        info!(
            "Parsing {} files with {} workers",
            files.len(),
            self.config.workers
        );
        let start_time = Instant::now();

        let mut outcomes: Vec<FileOutcome> = stream::iter(files.iter().cloned())
            .map(|path| {
                let parser = Arc::clone(&self.parser);
                async move {
                    let task_path = path.clone();
                    let result = task::spawn_blocking(move || parser.parse_file(&task_path))
                        .await
                        .unwrap_or_else(|e| {
                            Err(Error::io(
                                format!("Parse task for {} failed", path.display()),
                                std::io::Error::other(e.to_string()),
                            ))
                        });
                    FileOutcome { path, result }
                }
            })
            .buffer_unordered(self.config.workers.max(1))
            .inspect(|_| {
                if let Some(progress) = &self.progress {
                    progress.inc(1);
                }
            })
            .collect()
            .await;

        outcomes.sort_by(|a, b| a.path.cmp(&b.path));

        let mut stats = ParseStats::new();
        let mut files_failed = 0;
        for outcome in &outcomes {
            match &outcome.result {
                Ok(result) => stats.merge(&result.stats),
                Err(e) => {
                    files_failed += 1;
                    warn!("Failed to parse {}: {}", outcome.path.display(), e);
                }
            }
        }

        let elapsed = start_time.elapsed();
        info!(
            "Batch complete: {} records from {} messages in {:.2}s",
            stats.records_parsed,
            stats.total_messages,
            elapsed.as_secs_f64()
        );

        BatchResult {
            files: outcomes,
            stats,
            files_failed,
            elapsed,
        }
    }

    /// Discover and parse in one step
    pub async fn process_paths(&self, inputs: &[PathBuf]) -> Result<BatchResult> {
        let files = self.discover_files(inputs)?;
        if files.is_empty() {
            warn!("No .{} files found", self.config.file_extension);
        }
        if let Some(progress) = &self.progress {
            progress.set_length(files.len() as u64);
        }
        Ok(self.process_files(&files).await)
    }
}
