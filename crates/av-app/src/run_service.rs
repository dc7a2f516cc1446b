//! Study evaluation: scenario parameters in, trajectories and records out.

use av_core::{TimeGrid, Trajectory};
use std::collections::HashSet;
use av_evolution::{EvolutionSample, ExponentialTrack, StellarState, StellarTrack};
use av_orbit::{Planet, PlanetarySystem, SystemSnapshot};
use av_project::schema::{EvolutionModeDef, PlanetDef, StudyDef, StudyKind};
use av_results::SeriesRecord;
use av_variable::{StarVariant, VariableStar};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Evaluated study, one variant per model family.
#[derive(Debug, Clone)]
pub enum StudyOutput {
    VariableStar(Trajectory<f64>),
    Evolution(Trajectory<EvolutionSample>),
    ExponentialEvolution(Trajectory<StellarState>),
    PlanetarySystem(Trajectory<SystemSnapshot>),
}

impl StudyOutput {
    pub fn len(&self) -> usize {
        match self {
            StudyOutput::VariableStar(t) => t.len(),
            StudyOutput::Evolution(t) => t.len(),
            StudyOutput::ExponentialEvolution(t) => t.len(),
            StudyOutput::PlanetarySystem(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Curve shape for an optional selector. Unknown names become Cepheid.
pub fn resolve_variant(name: Option<&str>) -> StarVariant {
    let Some(name) = name else {
        return StarVariant::default();
    };
    let (variant, defaulted) = StarVariant::from_name_or_default(name);
    if defaulted {
        warn!(variant = name, fallback = %variant, "Unknown star variant, using default");
    }
    variant
}

/// Build the planetary system a study describes: presets first, then custom
/// planets, in file order.
pub fn planet_system(
    star_mass_msun: f64,
    presets: &[String],
    planets: &[PlanetDef],
) -> AppResult<PlanetarySystem> {
    let mut all = Vec::with_capacity(presets.len() + planets.len());
    for tag in presets {
        let planet = av_orbit::preset(tag)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown planet preset: {}", tag)))?;
        all.push(planet);
    }
    for def in planets {
        all.push(
            Planet::new(def.mass, def.period_days, def.semi_major_axis_au)?.with_tag(&def.tag),
        );
    }
    Ok(PlanetarySystem::new(star_mass_msun, all)?)
}

pub fn evaluate_study(study: &StudyDef) -> AppResult<StudyOutput> {
    info!(study = %study.id, kind = study.kind.label(), "Evaluating study");

    let output = match &study.kind {
        StudyKind::VariableStar {
            period_days,
            max_brightness,
            min_brightness,
            variant,
            periods,
            step_days,
        } => {
            let star = VariableStar::new(
                *period_days,
                *max_brightness,
                *min_brightness,
                resolve_variant(variant.as_deref()),
            )?;
            StudyOutput::VariableStar(star.curve_with(*step_days, periods * period_days)?)
        }
        StudyKind::StellarEvolution {
            mass_msun,
            mode,
            samples,
        } => match mode {
            EvolutionModeDef::Piecewise => {
                StudyOutput::Evolution(StellarTrack::new(*mass_msun)?.track(*samples)?)
            }
            EvolutionModeDef::Exponential => StudyOutput::ExponentialEvolution(
                ExponentialTrack::new(*mass_msun)?.track(*samples)?,
            ),
        },
        StudyKind::PlanetarySystem {
            star_mass_msun,
            presets,
            planets,
            duration_days,
            samples,
        } => {
            let system = planet_system(*star_mass_msun, presets, planets)?;
            let grid = TimeGrid::linspace(0.0, *duration_days, *samples)?;
            StudyOutput::PlanetarySystem(system.evolve(&grid)?)
        }
    };

    debug!(study = %study.id, samples = output.len(), "Study evaluated");
    Ok(output)
}

/// Channel-safe name: lowercase ASCII alphanumerics, everything else `_`.
pub fn channel_name(tag: &str) -> String {
    tag.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// One distinct channel prefix per planet, in order.
///
/// Tags with no ASCII alphanumerics become `planet_<n>`; prefixes that collide
/// after sanitizing get a `_<n>` suffix, `n` being the planet's 1-based position.
pub fn planet_channel_names<'a>(tags: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut names = Vec::new();
    for (i, tag) in tags.into_iter().enumerate() {
        let mut name = channel_name(tag);
        if !name.chars().any(|c| c.is_ascii_alphanumeric()) {
            name = format!("planet_{}", i + 1);
        }
        let mut candidate = name.clone();
        let mut n = i + 1;
        while taken.contains(&candidate) {
            candidate = format!("{name}_{n}");
            n += 1;
        }
        taken.insert(candidate.clone());
        names.push(candidate);
    }
    names
}

fn state_record(time: f64, state: &StellarState) -> SeriesRecord {
    SeriesRecord::new(time)
        .with("temperature_k", state.temperature_k)
        .with("luminosity_lsun", state.luminosity_lsun)
        .with("size", state.size)
}

/// Flatten an evaluated study into one record per sample.
pub fn to_records(output: &StudyOutput) -> Vec<SeriesRecord> {
    match output {
        StudyOutput::VariableStar(curve) => curve
            .iter()
            .map(|(t, &b)| SeriesRecord::new(t).with("brightness", b))
            .collect(),
        StudyOutput::Evolution(track) => track
            .iter()
            .map(|(t, sample)| {
                state_record(t, &sample.state).with("phase", f64::from(sample.phase.ordinal()))
            })
            .collect(),
        StudyOutput::ExponentialEvolution(track) => track
            .iter()
            .map(|(t, state)| state_record(t, state))
            .collect(),
        StudyOutput::PlanetarySystem(frames) => {
            let names = frames
                .get(0)
                .map(|(_, first)| planet_channel_names(first.planets.iter().map(|p| p.tag.as_str())))
                .unwrap_or_default();
            frames
                .iter()
                .map(|(t, snapshot)| {
                    let mut record = SeriesRecord::new(t)
                        .with("radial_velocity_mps", snapshot.radial_velocity_mps);
                    for (name, planet) in names.iter().zip(&snapshot.planets) {
                        record = record
                            .with(format!("{name}_x_au"), planet.position.x_au)
                            .with(format!("{name}_y_au"), planet.position.y_au);
                    }
                    record
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn study(kind: StudyKind) -> StudyDef {
        StudyDef {
            id: "s".to_string(),
            name: "Study".to_string(),
            kind,
        }
    }

    #[test]
    fn variable_star_curve_covers_two_periods() {
        let output = evaluate_study(&study(StudyKind::VariableStar {
            period_days: 72.0,
            max_brightness: 8.0,
            min_brightness: 4.0,
            variant: None,
            periods: 2.0,
            step_days: 0.1,
        }))
        .unwrap();
        assert_eq!(output.len(), 1440);

        let records = to_records(&output);
        let peak = &records[180];
        assert!((peak.time - 18.0).abs() < 1e-9);
        assert!((peak.value("brightness").unwrap() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_variant_falls_back_to_cepheid() {
        assert_eq!(resolve_variant(Some("mira")), StarVariant::Cepheid);
        assert_eq!(resolve_variant(Some("RR Lyrae")), StarVariant::RRLyrae);
        assert_eq!(resolve_variant(None), StarVariant::Cepheid);
    }

    #[test]
    fn evolution_records_carry_phase() {
        let output = evaluate_study(&study(StudyKind::StellarEvolution {
            mass_msun: 1.0,
            mode: EvolutionModeDef::Piecewise,
            samples: 100,
        }))
        .unwrap();
        let records = to_records(&output);
        assert_eq!(records.len(), 100);
        assert_eq!(records[0].value("phase"), Some(0.0));
        assert_eq!(records[99].value("phase"), Some(3.0));
    }

    #[test]
    fn exponential_mode_has_no_phase_channel() {
        let output = evaluate_study(&study(StudyKind::StellarEvolution {
            mass_msun: 8.0,
            mode: EvolutionModeDef::Exponential,
            samples: 100,
        }))
        .unwrap();
        let records = to_records(&output);
        assert_eq!(records[0].value("temperature_k"), Some(10000.0));
        assert_eq!(records[0].value("phase"), None);
    }

    #[test]
    fn planet_channels_use_sanitized_tags() {
        let output = evaluate_study(&study(StudyKind::PlanetarySystem {
            star_mass_msun: 1.0,
            presets: vec!["Planet A".to_string()],
            planets: vec![PlanetDef {
                tag: "Hot Jupiter".to_string(),
                mass: 1.5,
                period_days: 3.5,
                semi_major_axis_au: 0.045,
            }],
            duration_days: 20.0,
            samples: 1000,
        }))
        .unwrap();
        let records = to_records(&output);
        assert_eq!(records.len(), 1000);
        let first = &records[0];
        assert_eq!(first.value("planet_a_x_au"), Some(0.1));
        assert_eq!(first.value("hot_jupiter_y_au"), Some(0.0));
        assert_eq!(first.value("radial_velocity_mps"), Some(0.0));
    }

    #[test]
    fn colliding_planet_tags_keep_separate_channels() {
        let custom = |tag: &str, a: f64| PlanetDef {
            tag: tag.to_string(),
            mass: 1.0,
            period_days: 10.0,
            semi_major_axis_au: a,
        };
        let output = evaluate_study(&study(StudyKind::PlanetarySystem {
            star_mass_msun: 1.0,
            presets: vec!["Planet A".to_string()],
            planets: vec![custom("planet-a", 0.5), custom("행성", 0.7), custom("위성", 0.9)],
            duration_days: 20.0,
            samples: 10,
        }))
        .unwrap();
        let records = to_records(&output);
        let first = &records[0];
        assert_eq!(first.value("planet_a_x_au"), Some(0.1));
        assert_eq!(first.value("planet_a_2_x_au"), Some(0.5));
        assert_eq!(first.value("planet_3_x_au"), Some(0.7));
        assert_eq!(first.value("planet_4_x_au"), Some(0.9));

        let csv = av_results::render_export(
            av_results::ExportFormat::Csv,
            &records,
            &av_results::ExportOptions::default(),
        )
        .unwrap();
        let parsed = av_results::parse_export(av_results::ExportFormat::Csv, &csv).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn channel_names_are_unique_even_when_suffixes_clash() {
        let names = planet_channel_names(["b", "b_2", "b"]);
        assert_eq!(names, ["b", "b_2", "b_3"]);
    }

    #[test]
    fn empty_system_gives_zero_velocity_records() {
        let output = evaluate_study(&study(StudyKind::PlanetarySystem {
            star_mass_msun: 1.0,
            presets: vec![],
            planets: vec![],
            duration_days: 20.0,
            samples: 50,
        }))
        .unwrap();
        let records = to_records(&output);
        assert!(records.iter().all(|r| r.channels.len() == 1));
        assert!(records
            .iter()
            .all(|r| r.value("radial_velocity_mps") == Some(0.0)));
    }

    #[test]
    fn invalid_parameters_surface_as_model_errors() {
        let err = evaluate_study(&study(StudyKind::VariableStar {
            period_days: 0.0,
            max_brightness: 8.0,
            min_brightness: 4.0,
            variant: None,
            periods: 2.0,
            step_days: 0.1,
        }))
        .unwrap_err();
        assert!(matches!(err, AppError::Model(_)));
    }
}
