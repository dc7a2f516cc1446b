//! Four-phase piecewise life cycle.
//!
//! Each phase is anchored on the value the previous phase ends on, so the
//! track is continuous at every boundary:
//!
//! | Phase | T (K) | L (L☉) | size |
//! |---|---|---|---|
//! | Protostar | `3000 → T_ms` linear | `10·m → m` geometric | `20 → 1` linear |
//! | Main Sequence | `T_ms` | `m → 1.5·m` linear | `1 → 1.2` linear |
//! | Red Giant | `T_ms → 3500` linear | `1.5·m → 1000·m` geometric | `1.2 → 100` linear |
//! | White Dwarf | `3500 → ~12000` saturating | `1000·m → 0.01·m` geometric | `100 → 0.01` geometric |
//!
//! with `T_ms = 5800·m` and `m` the mass in solar masses.

use crate::phase::Phase;
use crate::state::{EvolutionSample, StellarState};
use av_core::numeric::{Real, ensure_positive};
use av_core::units::constants::SUN_TEFF_K;
use av_core::{ModelResult, TimeGrid, Trajectory};
use serde::{Deserialize, Serialize};

/// Samples in a full track over `[0, 1]`.
pub const DEFAULT_TRACK_SAMPLES: usize = 100;

const PROTOSTAR_TEMPERATURE_K: Real = 3000.0;
const PROTOSTAR_LUMINOSITY: Real = 10.0;
const PROTOSTAR_SIZE: Real = 20.0;

const MS_LUMINOSITY_GAIN: Real = 0.5;
const MS_SIZE_GAIN: Real = 0.2;

const GIANT_TEMPERATURE_K: Real = 3500.0;
const GIANT_PEAK_LUMINOSITY: Real = 1000.0;
const GIANT_PEAK_SIZE: Real = 100.0;

const DWARF_TEMPERATURE_RISE_K: Real = 8500.0;
const DWARF_HEATING_RATE: Real = 5.0;
const DWARF_LUMINOSITY_DECADES: Real = 5.0;
const DWARF_SIZE_DECADES: Real = 4.0;

/// Piecewise track for a star of a given mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StellarTrack {
    mass_msun: Real,
}

impl StellarTrack {
    /// # Errors
    ///
    /// `InvalidParameter` when `mass_msun` is not strictly positive.
    pub fn new(mass_msun: Real) -> ModelResult<Self> {
        Ok(Self {
            mass_msun: ensure_positive(mass_msun, "mass")?,
        })
    }

    /// The fixed one-solar-mass track.
    pub fn solar() -> Self {
        Self { mass_msun: 1.0 }
    }

    pub fn mass_msun(&self) -> Real {
        self.mass_msun
    }

    /// Main-sequence temperature, proportional to mass.
    pub fn main_sequence_temperature_k(&self) -> Real {
        SUN_TEFF_K * self.mass_msun
    }

    /// State at normalized time `t ∈ [0, 1]`.
    pub fn sample_at(&self, t: Real) -> ModelResult<EvolutionSample> {
        let phase = Phase::at(t)?;
        let u = phase.local_fraction(t);
        Ok(EvolutionSample {
            phase,
            state: self.phase_state(phase, u),
        })
    }

    pub fn state_at(&self, t: Real) -> ModelResult<StellarState> {
        Ok(self.sample_at(t)?.state)
    }

    /// Closed-form state for `phase` at local fraction `u`.
    fn phase_state(&self, phase: Phase, u: Real) -> StellarState {
        let m = self.mass_msun;
        let t_ms = self.main_sequence_temperature_k();
        let ms_end_luminosity = 1.0 + MS_LUMINOSITY_GAIN;
        let ms_end_size = 1.0 + MS_SIZE_GAIN;

        let (temperature_k, luminosity, size) = match phase {
            Phase::Protostar => (
                lerp(PROTOSTAR_TEMPERATURE_K, t_ms, u),
                geometric(PROTOSTAR_LUMINOSITY, 1.0, u),
                lerp(PROTOSTAR_SIZE, 1.0, u),
            ),
            Phase::MainSequence => (
                t_ms,
                lerp(1.0, ms_end_luminosity, u),
                lerp(1.0, ms_end_size, u),
            ),
            Phase::RedGiant => (
                lerp(t_ms, GIANT_TEMPERATURE_K, u),
                geometric(ms_end_luminosity, GIANT_PEAK_LUMINOSITY, u),
                lerp(ms_end_size, GIANT_PEAK_SIZE, u),
            ),
            Phase::WhiteDwarf => (
                GIANT_TEMPERATURE_K
                    + DWARF_TEMPERATURE_RISE_K * (1.0 - (-DWARF_HEATING_RATE * u).exp()),
                GIANT_PEAK_LUMINOSITY * 10f64.powf(-DWARF_LUMINOSITY_DECADES * u),
                GIANT_PEAK_SIZE * 10f64.powf(-DWARF_SIZE_DECADES * u),
            ),
        };

        StellarState {
            temperature_k,
            luminosity_lsun: m * luminosity,
            size,
        }
    }

    /// Track over `samples` evenly spaced instants of `[0, 1]`.
    pub fn track(&self, samples: usize) -> ModelResult<Trajectory<EvolutionSample>> {
        let grid = TimeGrid::linspace(0.0, 1.0, samples)?;
        Trajectory::evaluate(&grid, |t| self.sample_at(t))
    }
}

fn lerp(from: Real, to: Real, u: Real) -> Real {
    from + (to - from) * u
}

/// Constant-ratio interpolation: `from·(to/from)^u`.
fn geometric(from: Real, to: Real, u: Real) -> Real {
    from * (to / from).powf(u)
}

/// `(temperature, luminosity, size)` of a star of `mass_msun` at normalized time `t`.
pub fn evolution_at(mass_msun: Real, t: Real) -> ModelResult<StellarState> {
    StellarTrack::new(mass_msun)?.state_at(t)
}

/// Full track of `samples` points over normalized time `[0, 1]`.
pub fn evolution_track(mass_msun: Real, samples: usize) -> ModelResult<Trajectory<EvolutionSample>> {
    StellarTrack::new(mass_msun)?.track(samples)
}
