//! Mass-branched exponential decay track.
//!
//! Stars heavier than [`HIGH_MASS_THRESHOLD`] start hotter, brighter and larger
//! and fade faster; everything else decays slowly from solar-like values.

use crate::state::StellarState;
use av_core::numeric::{Real, ensure_finite, ensure_positive};
use av_core::{ModelError, ModelResult, TimeGrid, Trajectory};
use serde::{Deserialize, Serialize};

/// Masses above this (M☉) take the high-mass branch.
pub const HIGH_MASS_THRESHOLD: Real = 5.0;

/// Track spans `[0, EXPONENTIAL_SPAN]` in arbitrary time units.
pub const EXPONENTIAL_SPAN: Real = 10.0;

/// Default number of samples across the span.
pub const EXPONENTIAL_SAMPLES: usize = 100;

/// `(initial value, decay rate)` for temperature, luminosity and size.
struct Branch {
    temperature: (Real, Real),
    luminosity: (Real, Real),
    size: (Real, Real),
}

const HIGH_MASS: Branch = Branch {
    temperature: (10_000.0, 0.1),
    luminosity: (100.0, 0.2),
    size: (10.0, 0.15),
};

const LOW_MASS: Branch = Branch {
    temperature: (6000.0, 0.05),
    luminosity: (1.0, 0.1),
    size: (5.0, 0.05),
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentialTrack {
    mass_msun: Real,
}

impl ExponentialTrack {
    pub fn new(mass_msun: Real) -> ModelResult<Self> {
        Ok(Self {
            mass_msun: ensure_positive(mass_msun, "mass")?,
        })
    }

    pub fn mass_msun(&self) -> Real {
        self.mass_msun
    }

    pub fn is_high_mass(&self) -> bool {
        self.mass_msun > HIGH_MASS_THRESHOLD
    }

    fn branch(&self) -> &'static Branch {
        if self.is_high_mass() {
            &HIGH_MASS
        } else {
            &LOW_MASS
        }
    }

    /// State at `time ∈ [0, EXPONENTIAL_SPAN]`.
    pub fn state_at(&self, time: Real) -> ModelResult<StellarState> {
        let time = ensure_finite(time, "time")?;
        if !(0.0..=EXPONENTIAL_SPAN).contains(&time) {
            return Err(ModelError::invalid("time", time));
        }
        let decay = |(initial, rate): (Real, Real)| initial * (-rate * time).exp();
        let branch = self.branch();
        Ok(StellarState {
            temperature_k: decay(branch.temperature),
            luminosity_lsun: decay(branch.luminosity),
            size: decay(branch.size),
        })
    }

    pub fn track(&self, samples: usize) -> ModelResult<Trajectory<StellarState>> {
        let grid = TimeGrid::linspace(0.0, EXPONENTIAL_SPAN, samples)?;
        Trajectory::evaluate(&grid, |t| self.state_at(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_mass_branch_starts_solar_like() {
        let state = ExponentialTrack::new(4.71).unwrap().state_at(0.0).unwrap();
        assert_eq!(state.temperature_k, 6000.0);
        assert_eq!(state.luminosity_lsun, 1.0);
        assert_eq!(state.size, 5.0);
    }

    #[test]
    fn high_mass_branch_is_strictly_above_threshold() {
        assert!(!ExponentialTrack::new(5.0).unwrap().is_high_mass());
        let track = ExponentialTrack::new(5.5).unwrap();
        assert!(track.is_high_mass());
        let end = track.state_at(EXPONENTIAL_SPAN).unwrap();
        assert!((end.temperature_k - 10_000.0 * (-1.0_f64).exp()).abs() < 1e-9);
        assert!((end.luminosity_lsun - 100.0 * (-2.0_f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn track_decays_monotonically() {
        let track = ExponentialTrack::new(8.0).unwrap().track(EXPONENTIAL_SAMPLES).unwrap();
        assert_eq!(track.len(), 100);
        for pair in track.samples().windows(2) {
            assert!(pair[1].temperature_k < pair[0].temperature_k);
            assert!(pair[1].luminosity_lsun < pair[0].luminosity_lsun);
            assert!(pair[1].size < pair[0].size);
        }
    }

    #[test]
    fn rejects_time_outside_span() {
        let track = ExponentialTrack::new(1.0).unwrap();
        assert!(track.state_at(-0.1).is_err());
        assert!(track.state_at(10.5).is_err());
        assert!(ExponentialTrack::new(-1.0).is_err());
    }
}
