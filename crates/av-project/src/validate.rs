//! Scenario validation logic.
//!
//! Numeric ranges are checked by constructing the model objects themselves,
//! so a scenario is valid exactly when every study can be evaluated.

use crate::schema::{EvolutionModeDef, PlanetDef, Scenario, StudyDef, StudyKind};
use av_core::{MAX_SAMPLES, ModelError, TimeGrid};
use av_evolution::{ExponentialTrack, StellarTrack};
use av_orbit::{Planet, PlanetarySystem};
use av_variable::{StarVariant, VariableStar};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    let mut study_ids = HashSet::new();
    for study in &scenario.studies {
        if !study_ids.insert(&study.id) {
            return Err(ValidationError::DuplicateId {
                id: study.id.clone(),
                context: "studies".to_string(),
            });
        }
        validate_study(study)?;
    }

    Ok(())
}

pub fn validate_study(study: &StudyDef) -> Result<(), ValidationError> {
    if study.id.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: format!("study '{}' id", study.name),
            value: study.id.clone(),
            reason: "must not be empty".to_string(),
        });
    }
    if study.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: format!("study '{}' name", study.id),
            value: study.name.clone(),
            reason: "must not be empty".to_string(),
        });
    }

    let model_err = |err: ModelError| model_error(study, err);

    match &study.kind {
        StudyKind::VariableStar {
            period_days,
            max_brightness,
            min_brightness,
            variant: _,
            periods,
            step_days,
        } => {
            // The variant name is resolved leniently at evaluation time.
            let star = VariableStar::new(
                *period_days,
                *max_brightness,
                *min_brightness,
                StarVariant::default(),
            )
            .map_err(model_err)?;
            if !periods.is_finite() || *periods <= 0.0 {
                return Err(ValidationError::InvalidValue {
                    field: format!("study '{}' periods", study.id),
                    value: periods.to_string(),
                    reason: "must be positive and finite".to_string(),
                });
            }
            TimeGrid::stepped_len(*step_days, periods * star.period_days()).map_err(model_err)?;
        }
        StudyKind::StellarEvolution {
            mass_msun,
            mode,
            samples,
        } => {
            match mode {
                EvolutionModeDef::Piecewise => {
                    StellarTrack::new(*mass_msun).map_err(model_err)?;
                }
                EvolutionModeDef::Exponential => {
                    ExponentialTrack::new(*mass_msun).map_err(model_err)?;
                }
            }
            validate_sample_count(study, *samples)?;
        }
        StudyKind::PlanetarySystem {
            star_mass_msun,
            presets,
            planets,
            duration_days,
            samples,
        } => {
            PlanetarySystem::new(*star_mass_msun, Vec::new()).map_err(model_err)?;
            validate_planets(study, presets, planets)?;
            TimeGrid::linspace(0.0, *duration_days, 2).map_err(model_err)?;
            validate_sample_count(study, *samples)?;
        }
    }

    Ok(())
}

fn validate_planets(
    study: &StudyDef,
    presets: &[String],
    planets: &[PlanetDef],
) -> Result<(), ValidationError> {
    let mut tags = HashSet::new();
    for tag in presets {
        if av_orbit::preset(tag).is_none() {
            return Err(ValidationError::MissingReference {
                id: tag.clone(),
                context: format!("study '{}' presets", study.id),
            });
        }
        if !tags.insert(tag.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: tag.clone(),
                context: format!("study '{}' planets", study.id),
            });
        }
    }

    for planet in planets {
        if planet.tag.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("study '{}' planet tag", study.id),
                value: planet.tag.clone(),
                reason: "must not be empty".to_string(),
            });
        }
        if !tags.insert(planet.tag.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: planet.tag.clone(),
                context: format!("study '{}' planets", study.id),
            });
        }
        Planet::new(planet.mass, planet.period_days, planet.semi_major_axis_au)
            .map_err(|err| model_error(study, err))?;
    }

    Ok(())
}

fn validate_sample_count(study: &StudyDef, samples: usize) -> Result<(), ValidationError> {
    if samples == 0 || samples > MAX_SAMPLES {
        return Err(ValidationError::InvalidValue {
            field: format!("study '{}' samples", study.id),
            value: samples.to_string(),
            reason: format!("must be between 1 and {MAX_SAMPLES}"),
        });
    }
    Ok(())
}

fn model_error(study: &StudyDef, err: ModelError) -> ValidationError {
    match err {
        ModelError::InvalidParameter { what, value } => ValidationError::InvalidValue {
            field: format!("study '{}' {}", study.id, what),
            value: value.to_string(),
            reason: "out of range".to_string(),
        },
        ModelError::UnknownVariant { name } => ValidationError::InvalidValue {
            field: format!("study '{}' variant", study.id),
            value: name,
            reason: "unknown variant".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable_star(id: &str, min: f64) -> StudyDef {
        StudyDef {
            id: id.to_string(),
            name: "Delta Cephei".to_string(),
            kind: StudyKind::VariableStar {
                period_days: 72.0,
                max_brightness: 8.0,
                min_brightness: min,
                variant: None,
                periods: 2.0,
                step_days: 0.1,
            },
        }
    }

    fn scenario(studies: Vec<StudyDef>) -> Scenario {
        Scenario {
            version: LATEST_VERSION,
            name: "test".to_string(),
            studies,
        }
    }

    #[test]
    fn accepts_valid_variable_star() {
        validate_scenario(&scenario(vec![variable_star("v1", 4.0)])).unwrap();
    }

    #[test]
    fn rejects_inverted_brightness() {
        let err = validate_scenario(&scenario(vec![variable_star("v1", 9.0)])).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref field, .. } if field.contains("min brightness")));
    }

    #[test]
    fn rejects_duplicate_study_ids() {
        let err = validate_scenario(&scenario(vec![
            variable_star("v1", 4.0),
            variable_star("v1", 4.0),
        ]))
        .unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateId { .. }));
    }

    #[test]
    fn rejects_future_version() {
        let mut s = scenario(vec![]);
        s.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn unknown_variant_name_is_not_an_error() {
        let mut study = variable_star("v1", 4.0);
        if let StudyKind::VariableStar { variant, .. } = &mut study.kind {
            *variant = Some("mira".to_string());
        }
        validate_scenario(&scenario(vec![study])).unwrap();
    }

    #[test]
    fn rejects_zero_mass_evolution() {
        let study = StudyDef {
            id: "hr".to_string(),
            name: "Sun".to_string(),
            kind: StudyKind::StellarEvolution {
                mass_msun: 0.0,
                mode: EvolutionModeDef::Piecewise,
                samples: 100,
            },
        };
        assert!(validate_scenario(&scenario(vec![study])).is_err());
    }

    #[test]
    fn rejects_sample_counts_beyond_limit() {
        let study = StudyDef {
            id: "hr".to_string(),
            name: "Sun".to_string(),
            kind: StudyKind::StellarEvolution {
                mass_msun: 1.0,
                mode: EvolutionModeDef::Piecewise,
                samples: 1 << 50,
            },
        };
        assert!(matches!(
            validate_study(&study),
            Err(ValidationError::InvalidValue { ref field, .. }) if field.contains("samples")
        ));
    }

    #[test]
    fn rejects_tiny_time_step_without_building_grid() {
        let mut study = variable_star("v1", 4.0);
        if let StudyKind::VariableStar { step_days, .. } = &mut study.kind {
            *step_days = 1e-15;
        }
        assert!(matches!(
            validate_study(&study),
            Err(ValidationError::InvalidValue { ref field, .. }) if field.contains("sample count")
        ));
    }

    #[test]
    fn planet_system_checks_presets_and_tags() {
        let system = |presets: Vec<&str>, planets: Vec<PlanetDef>| StudyDef {
            id: "rv".to_string(),
            name: "System".to_string(),
            kind: StudyKind::PlanetarySystem {
                star_mass_msun: 1.0,
                presets: presets.into_iter().map(str::to_string).collect(),
                planets,
                duration_days: 20.0,
                samples: 1000,
            },
        };

        validate_scenario(&scenario(vec![system(vec!["Planet A", "Planet C"], vec![])])).unwrap();
        validate_scenario(&scenario(vec![system(vec![], vec![])])).unwrap();

        assert!(matches!(
            validate_scenario(&scenario(vec![system(vec!["Planet Z"], vec![])])),
            Err(ValidationError::MissingReference { .. })
        ));

        let clash = PlanetDef {
            tag: "Planet A".to_string(),
            mass: 2.0,
            period_days: 30.0,
            semi_major_axis_au: 0.2,
        };
        assert!(matches!(
            validate_scenario(&scenario(vec![system(vec!["Planet A"], vec![clash])])),
            Err(ValidationError::DuplicateId { .. })
        ));

        let bad = PlanetDef {
            tag: "Hot".to_string(),
            mass: 1.0,
            period_days: -3.0,
            semi_major_axis_au: 0.05,
        };
        assert!(matches!(
            validate_scenario(&scenario(vec![system(vec![], vec![bad])])),
            Err(ValidationError::InvalidValue { .. })
        ));
    }
}
