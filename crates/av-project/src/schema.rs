//! Scenario schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub studies: Vec<StudyDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudyDef {
    pub id: String,
    pub name: String,
    pub kind: StudyKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum StudyKind {
    VariableStar {
        period_days: f64,
        max_brightness: f64,
        min_brightness: f64,
        /// Curve shape; unknown names fall back to Cepheid.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variant: Option<String>,
        #[serde(default = "default_periods")]
        periods: f64,
        #[serde(default = "default_step_days")]
        step_days: f64,
    },
    StellarEvolution {
        mass_msun: f64,
        #[serde(default)]
        mode: EvolutionModeDef,
        #[serde(default = "default_track_samples")]
        samples: usize,
    },
    PlanetarySystem {
        #[serde(default = "default_star_mass")]
        star_mass_msun: f64,
        /// Built-in planets by tag (e.g. "Planet A").
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        presets: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        planets: Vec<PlanetDef>,
        #[serde(default = "default_rv_duration")]
        duration_days: f64,
        #[serde(default = "default_rv_samples")]
        samples: usize,
    },
}

impl StudyKind {
    pub fn label(&self) -> &'static str {
        match self {
            StudyKind::VariableStar { .. } => "variable-star",
            StudyKind::StellarEvolution { .. } => "stellar-evolution",
            StudyKind::PlanetarySystem { .. } => "planetary-system",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EvolutionModeDef {
    #[default]
    Piecewise,
    Exponential,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanetDef {
    pub tag: String,
    pub mass: f64,
    pub period_days: f64,
    pub semi_major_axis_au: f64,
}

fn default_periods() -> f64 {
    av_variable::CURVE_PERIODS
}

fn default_step_days() -> f64 {
    av_variable::CURVE_STEP_DAYS
}

fn default_track_samples() -> usize {
    av_evolution::DEFAULT_TRACK_SAMPLES
}

fn default_star_mass() -> f64 {
    1.0
}

fn default_rv_duration() -> f64 {
    av_orbit::RV_DURATION_DAYS
}

fn default_rv_samples() -> usize {
    av_orbit::RV_SAMPLES
}
