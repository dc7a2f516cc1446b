//! Toy planetary system: circular orbits and stellar radial velocity.
//!
//! Planets never interact. Each one drives a sinusoidal line-of-sight
//! velocity of its host star, and the system velocity is the plain sum of
//! those sinusoids (superposition, no n-body coupling).
//!
//! - planet (validated planet parameters)
//! - velocity (semi-amplitude and single-planet radial velocity)
//! - position (circular orbit positions, star at the origin)
//! - system (star + planets, combined velocity and animation snapshots)
//! - presets (the three demonstration planets)

pub mod planet;
pub mod position;
pub mod presets;
pub mod system;
pub mod velocity;

pub use planet::Planet;
pub use position::{OrbitPosition, orbit_position};
pub use presets::{DEFAULT_SELECTION, RV_DURATION_DAYS, RV_SAMPLES, preset, presets};
pub use system::{PlanetPosition, PlanetarySystem, SystemSnapshot};
pub use velocity::{radial_velocity, semi_amplitude_mps};
