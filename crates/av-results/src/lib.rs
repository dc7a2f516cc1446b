//! av-results: tabular series records, exporters and the export store.

pub mod export;
pub mod hash;
pub mod store;
pub mod types;

pub use export::{parse_export, render_export};
pub use hash::compute_export_id;
pub use store::ExportStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export not found: {export_id}")]
    ExportNotFound { export_id: String },

    #[error("Unknown export format: {name}")]
    UnknownFormat { name: String },

    #[error("Animation has {frames} frames, limit is {limit}")]
    FrameLimitExceeded { frames: usize, limit: usize },

    #[error("Malformed export data at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}
