use crate::utils::{copy_file, walk_tree};
use crate::ExtractConfig;
use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Run the whole selection-and-copy pipeline for one configuration.
///
/// Ensures the destination directory exists, walks the source tree, filters
/// by extension, and copies every matched file concurrently. A traversal
/// failure is fatal and aborts the run; per-file copy failures are collected
/// into the report without affecting sibling copies. Every dispatched copy is
/// awaited before the report is built, and only files whose copy actually
/// succeeded are listed as copied.
pub async fn run_extraction(config: &ExtractConfig) -> Result<ExtractionReport> {
    info!(
        "Starting extraction from {} into {}",
        config.source_root.display(),
        config.dest_root.display()
    );

    ensure_dest_dir(&config.dest_root);

    let mut matched: Vec<PathBuf> = Vec::new();
    walk_tree(&config.source_root, &mut |path| {
        if config.extensions.matches(path) {
            matched.push(path.to_path_buf());
        }
    })?;

    info!(
        "Matched {} files under {}",
        matched.len(),
        config.source_root.display()
    );

    if matched.is_empty() {
        return Ok(ExtractionReport::empty());
    }

    let mut tasks = JoinSet::new();
    for source in matched {
        let dest_root = config.dest_root.clone();
        tasks.spawn_blocking(move || {
            let outcome = copy_file(&source, &dest_root);
            (source, outcome)
        });
    }

    // Outcomes flow back through the JoinSet, so there is no shared mutable
    // collection between copy tasks, and the report cannot be produced
    // before every copy has finished.
    let mut report = ExtractionReport::empty();
    while let Some(joined) = tasks.join_next().await {
        let (source, outcome) = joined?;
        match outcome {
            Ok(destination) => {
                debug!(
                    "Copied {} -> {}",
                    source.display(),
                    destination.display()
                );
                report.copied_files.push(CopiedFile {
                    source: source.to_string_lossy().to_string(),
                    destination: destination.to_string_lossy().to_string(),
                });
            }
            Err(err) => {
                error!("Failed to copy {}: {}", source.display(), err);
                report.failures.push(CopyFailure {
                    source: source.to_string_lossy().to_string(),
                    error: err.to_string(),
                });
            }
        }
    }

    info!(
        "Extraction completed. Copied: {}, Failures: {}",
        report.copied_count(),
        report.failures.len()
    );

    Ok(report)
}

/// Create the destination directory if absent. A failure here is tolerated;
/// the individual copies will surface their own write errors.
fn ensure_dest_dir(dest: &Path) {
    if let Err(err) = fs::create_dir_all(dest) {
        warn!(
            "Could not create destination directory {}: {}",
            dest.display(),
            err
        );
    }
}

/// Outcome summary of one extraction run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub copied_files: Vec<CopiedFile>,
    pub failures: Vec<CopyFailure>,
}

impl ExtractionReport {
    pub fn empty() -> Self {
        Self {
            copied_files: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn copied_count(&self) -> usize {
        self.copied_files.len()
    }

    pub fn total_dispatched(&self) -> usize {
        self.copied_files.len() + self.failures.len()
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.total_dispatched();
        if total == 0 {
            0.0
        } else {
            self.copied_count() as f64 / total as f64
        }
    }
}

/// One successfully copied file, keyed by its original source path.
#[derive(Debug, Clone, Serialize)]
pub struct CopiedFile {
    pub source: String,
    pub destination: String,
}

/// One file whose copy failed, with the underlying cause.
#[derive(Debug, Clone, Serialize)]
pub struct CopyFailure {
    pub source: String,
    pub error: String,
}
