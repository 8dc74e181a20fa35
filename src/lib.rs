pub mod services;
pub mod utils;

// Re-export commonly used types
pub use services::{run_extraction, CopiedFile, CopyFailure, ExtractionReport};
pub use utils::{copy_file, walk_tree, CopyError, ExtensionSet, WalkError};

use std::path::PathBuf;

/// Immutable per-run configuration: where to scan, where to copy, and which
/// extensions to match. Built once before the pipeline starts.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    pub extensions: ExtensionSet,
}

impl ExtractConfig {
    pub fn new(
        source_root: impl Into<PathBuf>,
        dest_root: impl Into<PathBuf>,
        extensions: ExtensionSet,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            extensions,
        }
    }
}
