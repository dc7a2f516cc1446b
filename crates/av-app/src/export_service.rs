//! Export with format fallback.
//!
//! An export first tries the requested format, then every simpler one
//! (`frames` → `json` → `csv`). Each fallback is logged and reported back to
//! the caller; only when every format fails is the export an error.

use av_project::schema::StudyDef;
use av_results::{
    ExportFormat, ExportManifest, ExportOptions, ExportStore, SeriesRecord, compute_export_id,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct ExportRequest<'a> {
    pub study: &'a StudyDef,
    pub records: &'a [SeriesRecord],
    pub preferred: ExportFormat,
    pub options: ExportOptions,
}

/// A format that was skipped and why.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackNote {
    pub format: ExportFormat,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub manifest: ExportManifest,
    pub path: PathBuf,
    pub fallbacks: Vec<FallbackNote>,
}

impl ExportOutcome {
    pub fn used_fallback(&self) -> bool {
        !self.fallbacks.is_empty()
    }
}

pub fn export_with_fallback(
    store: &ExportStore,
    request: &ExportRequest<'_>,
) -> AppResult<ExportOutcome> {
    let mut fallbacks = Vec::new();

    for &format in request.preferred.fallback_chain() {
        let manifest = ExportManifest::new(
            compute_export_id(request.study, format, TOOL_VERSION),
            &request.study.id,
            request.study.kind.label(),
            format,
            request.records.len(),
            TOOL_VERSION,
        );

        match store.save_export(&manifest, request.records, &request.options) {
            Ok(path) => {
                info!(
                    study = %request.study.id,
                    format = %format,
                    path = %path.display(),
                    "Export written"
                );
                return Ok(ExportOutcome {
                    manifest,
                    path,
                    fallbacks,
                });
            }
            Err(err) => {
                warn!(
                    study = %request.study.id,
                    format = %format,
                    error = %err,
                    "Export failed, trying a simpler format"
                );
                fallbacks.push(FallbackNote {
                    format,
                    reason: err.to_string(),
                });
            }
        }
    }

    Err(AppError::ExportFailed {
        attempts: fallbacks
            .into_iter()
            .map(|note| (note.format, note.reason))
            .collect(),
    })
}

/// Exports stored next to a scenario, most recent first.
pub fn list_exports(scenario_path: &Path) -> AppResult<Vec<ExportManifest>> {
    let store = ExportStore::for_scenario(scenario_path)?;
    Ok(store.list_exports()?)
}

pub fn load_export(
    scenario_path: &Path,
    export_id: &str,
) -> AppResult<(ExportManifest, Vec<SeriesRecord>)> {
    let store = ExportStore::for_scenario(scenario_path)?;

    let manifest = store.load_manifest(export_id)?;
    let records = store.load_records(export_id)?;

    Ok((manifest, records))
}
