//! Export storage API.

use crate::export::{parse_export, render_export};
use crate::types::{ExportManifest, ExportOptions, SeriesRecord};
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct ExportStore {
    root_dir: PathBuf,
}

impl ExportStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store next to a scenario file, under `.astroviz/exports`.
    pub fn for_scenario(scenario_path: &Path) -> ResultsResult<Self> {
        let scenario_dir = scenario_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "scenario path has no parent directory".to_string(),
            })?;
        Self::new(scenario_dir.join(".astroviz").join("exports"))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn export_dir(&self, export_id: &str) -> PathBuf {
        self.root_dir.join(export_id)
    }

    pub fn has_export(&self, export_id: &str) -> bool {
        self.export_dir(export_id).join("manifest.json").exists()
    }

    /// Render and write one export; returns the data file path.
    ///
    /// Rendering happens before anything touches the disk, and the manifest is
    /// written last, so a failed export is never listed.
    pub fn save_export(
        &self,
        manifest: &ExportManifest,
        records: &[SeriesRecord],
        options: &ExportOptions,
    ) -> ResultsResult<PathBuf> {
        let content = render_export(manifest.format, records, options)?;

        let export_dir = self.export_dir(&manifest.export_id);
        fs::create_dir_all(&export_dir)?;

        let manifest_path = export_dir.join("manifest.json");
        if manifest_path.exists() {
            fs::remove_file(&manifest_path)?;
        }

        let data_path = export_dir.join(manifest.data_file_name());
        fs::write(&data_path, content)?;

        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(manifest_path, manifest_json)?;

        Ok(data_path)
    }

    pub fn load_manifest(&self, export_id: &str) -> ResultsResult<ExportManifest> {
        let manifest_path = self.export_dir(export_id).join("manifest.json");

        if !manifest_path.exists() {
            return Err(ResultsError::ExportNotFound {
                export_id: export_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_records(&self, export_id: &str) -> ResultsResult<Vec<SeriesRecord>> {
        let manifest = self.load_manifest(export_id)?;
        let data_path = self
            .export_dir(export_id)
            .join(manifest.data_file_name());

        if !data_path.exists() {
            return Err(ResultsError::ExportNotFound {
                export_id: export_id.to_string(),
            });
        }

        let content = fs::read_to_string(data_path)?;
        parse_export(manifest.format, &content)
    }

    /// Every readable manifest in the store, most recent first.
    pub fn list_exports(&self) -> ResultsResult<Vec<ExportManifest>> {
        let mut exports = Vec::new();

        if !self.root_dir.exists() {
            return Ok(exports);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let export_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&export_id) {
                    exports.push(manifest);
                }
            }
        }

        exports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(exports)
    }

    pub fn list_for_study(&self, study_id: &str) -> ResultsResult<Vec<ExportManifest>> {
        Ok(self
            .list_exports()?
            .into_iter()
            .filter(|m| m.study_id == study_id)
            .collect())
    }

    pub fn delete_export(&self, export_id: &str) -> ResultsResult<()> {
        let export_dir = self.export_dir(export_id);
        if export_dir.exists() {
            fs::remove_dir_all(export_dir)?;
        }
        Ok(())
    }
}
