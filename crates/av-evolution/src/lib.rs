//! Stellar-evolution tracks for the H-R diagram.
//!
//! Two track shapes are provided:
//! - [`StellarTrack`]: four-phase piecewise life cycle over normalized time `[0, 1]`
//! - [`ExponentialTrack`]: monotone exponential decay over `[0, 10]`, branching on mass
//!
//! Both are pure functions of `(mass, t)`; a track is the function tabulated
//! over a linear [`TimeGrid`](av_core::TimeGrid).

pub mod exponential;
pub mod phase;
pub mod piecewise;
pub mod state;

pub use exponential::{EXPONENTIAL_SAMPLES, EXPONENTIAL_SPAN, ExponentialTrack, HIGH_MASS_THRESHOLD};
pub use phase::Phase;
pub use piecewise::{DEFAULT_TRACK_SAMPLES, StellarTrack, evolution_at, evolution_track};
pub use state::{EvolutionSample, HR_LUMINOSITY_RANGE, HR_TEMPERATURE_RANGE_K, StellarState};
