//! Scenario loading, saving, validation, and introspection.

use av_project::schema::{Scenario, StudyDef, StudyKind};
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Summary of a study for listing.
#[derive(Debug, Clone)]
pub struct StudySummary {
    pub id: String,
    pub name: String,
    pub kind: &'static str,
    /// One-line parameter digest, e.g. `P=72 d, 4..8`.
    pub detail: String,
}

/// Load a scenario from a YAML or JSON file (chosen by extension).
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    if !path.exists() {
        return Err(AppError::ScenarioFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }
    Ok(av_project::load(path)?)
}

pub fn save_scenario(path: &Path, scenario: &Scenario) -> AppResult<()> {
    Ok(av_project::save(path, scenario)?)
}

pub fn validate_scenario(scenario: &Scenario) -> AppResult<()> {
    Ok(av_project::validate_scenario(scenario)?)
}

/// List all studies in the scenario with summaries.
pub fn list_studies(scenario: &Scenario) -> Vec<StudySummary> {
    scenario
        .studies
        .iter()
        .map(|study| StudySummary {
            id: study.id.clone(),
            name: study.name.clone(),
            kind: study.kind.label(),
            detail: describe(&study.kind),
        })
        .collect()
}

pub fn get_study<'a>(scenario: &'a Scenario, study_id: &str) -> AppResult<&'a StudyDef> {
    scenario
        .studies
        .iter()
        .find(|s| s.id == study_id)
        .ok_or_else(|| AppError::StudyNotFound(study_id.to_string()))
}

fn describe(kind: &StudyKind) -> String {
    match kind {
        StudyKind::VariableStar {
            period_days,
            max_brightness,
            min_brightness,
            variant,
            ..
        } => format!(
            "P={} d, {}..{}, {}",
            period_days,
            min_brightness,
            max_brightness,
            variant.as_deref().unwrap_or("Cepheid")
        ),
        StudyKind::StellarEvolution {
            mass_msun,
            mode,
            samples,
        } => format!("M={} Msun, {:?}, {} samples", mass_msun, mode, samples),
        StudyKind::PlanetarySystem {
            star_mass_msun,
            presets,
            planets,
            duration_days,
            ..
        } => format!(
            "M*={} Msun, {} planets, {} d",
            star_mass_msun,
            presets.len() + planets.len(),
            duration_days
        ),
    }
}
