pub mod extraction;

pub use extraction::{run_extraction, CopiedFile, CopyFailure, ExtractionReport};
