//! Demonstration planets.

use crate::planet::Planet;

/// Radial-velocity plots span this many days.
pub const RV_DURATION_DAYS: f64 = 20.0;

/// Radial-velocity plots use this many samples.
pub const RV_SAMPLES: usize = 1000;

/// Planets selected when nothing else is chosen.
pub const DEFAULT_SELECTION: &[&str] = &["Planet A"];

/// `(tag, mass [M_J], period [days], semi-major axis [AU])`
const PRESETS: [(&str, f64, f64, f64); 3] = [
    // Jupiter-like
    ("Planet A", 1.0, 10.0, 0.1),
    // Neptune-like
    ("Planet B", 0.3, 4.0, 0.05),
    // Earth-like
    ("Planet C", 0.01, 1.0, 0.02),
];

/// All demonstration planets in display order.
pub fn presets() -> Vec<Planet> {
    PRESETS.iter().filter_map(|&(tag, ..)| preset(tag)).collect()
}

/// Demonstration planet by tag.
pub fn preset(tag: &str) -> Option<Planet> {
    PRESETS
        .iter()
        .find(|(name, ..)| *name == tag)
        .and_then(|&(name, mass, period, a)| Planet::new(mass, period, a).ok().map(|p| p.with_tag(name)))
}
