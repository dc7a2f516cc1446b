//! Observable stellar state at one instant.

use crate::phase::Phase;
use serde::{Deserialize, Serialize};

/// H-R diagram temperature axis (K), drawn hot-to-cool.
pub const HR_TEMPERATURE_RANGE_K: (f64, f64) = (2000.0, 12000.0);

/// H-R diagram luminosity axis (L☉).
pub const HR_LUMINOSITY_RANGE: (f64, f64) = (0.0, 120.0);

/// Temperature, luminosity and size of a star.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StellarState {
    /// Effective temperature (K)
    pub temperature_k: f64,
    /// Luminosity (L☉)
    pub luminosity_lsun: f64,
    /// Radius (R☉), used as the marker size
    pub size: f64,
}

/// One point of a piecewise track: the state and the phase it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvolutionSample {
    pub phase: Phase,
    pub state: StellarState,
}
