// av-core/src/units.rs

use uom::si::f64::{Time as UomTime, Velocity as UomVelocity};

// Public canonical unit types (SI, f64)
pub type Time = UomTime;
pub type Velocity = UomVelocity;

#[inline]
pub fn days(v: f64) -> Time {
    use uom::si::time::day;
    Time::new::<day>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

/// Seconds in `t`.
#[inline]
pub fn as_seconds(t: Time) -> f64 {
    use uom::si::time::second;
    t.get::<second>()
}

/// Meters per second in `v`.
#[inline]
pub fn as_mps(v: Velocity) -> f64 {
    use uom::si::velocity::meter_per_second;
    v.get::<meter_per_second>()
}

pub mod constants {
    /// Newtonian gravitational constant (m³ kg⁻¹ s⁻²).
    pub const G_SI: f64 = 6.674_30e-11;

    /// Radial-velocity semi-amplitude coefficient (m/s) for the toy model.
    pub const RV_AMPLITUDE_MPS: f64 = 28.4329;

    /// Solar photosphere temperature used as the main-sequence anchor (K).
    pub const SUN_TEFF_K: f64 = 5800.0;
}
