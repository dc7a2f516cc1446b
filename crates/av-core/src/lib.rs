//! av-core: shared foundation for the astroviz model crates.
//!
//! Contains:
//! - error (parameter/variant error taxonomy shared by every model)
//! - numeric (Real + tolerances + validation helpers)
//! - units (uom SI types, astronomical constructors, physical constants)
//! - grid (time grids the models are sampled on)
//! - trajectory (finite, restartable sample sequences handed to renderers)

pub mod error;
pub mod grid;
pub mod numeric;
pub mod trajectory;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{ModelError, ModelResult};
pub use grid::{MAX_SAMPLES, TimeGrid};
pub use numeric::*;
pub use trajectory::Trajectory;
pub use units::*;
