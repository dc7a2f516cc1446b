//! Content-based hashing for export IDs.

use crate::types::ExportFormat;
use av_project::schema::StudyDef;
use sha2::{Digest, Sha256};

pub fn compute_export_id(study: &StudyDef, format: ExportFormat, tool_version: &str) -> String {
    let mut hasher = Sha256::new();

    let study_json = serde_json::to_string(study).unwrap_or_default();
    hasher.update(study_json.as_bytes());

    hasher.update(format.label().as_bytes());
    hasher.update(tool_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
