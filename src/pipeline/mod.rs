// file: src/pipeline/mod.rs
// description: scan progress module exports
// reference: pipeline orchestration

mod progress;

pub use progress::{ProgressTracker, ScanStats};
