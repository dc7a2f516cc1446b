//! Variable-star brightness curves.
//!
//! A variable star is described by its period, brightness extremes and a
//! curve shape ([`StarVariant`]). Brightness is a closed-form function of
//! time, so a curve is just that function tabulated over a [`TimeGrid`].
//!
//! [`TimeGrid`]: av_core::TimeGrid

pub mod model;
pub mod variant;

pub use model::{
    CURVE_STEP_DAYS, CURVE_PERIODS, PULSATING_DAMPING, VariableStar, brightness_at,
};
pub use variant::StarVariant;
