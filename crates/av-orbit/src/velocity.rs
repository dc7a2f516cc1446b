//! Single-planet radial velocity.

use av_core::numeric::{Real, ensure_finite, ensure_non_negative, ensure_positive, phase_angle};
use av_core::units::constants::{G_SI, RV_AMPLITUDE_MPS};
use av_core::units::{Velocity, as_seconds, days, mps};
use av_core::ModelResult;

/// Semi-amplitude `K = 28.4329·(m_p/m_*)·(2π·G·m_*/P)^(1/3)` with `P` in seconds.
///
/// Inputs are assumed validated.
pub(crate) fn semi_amplitude(planet_mass: Real, period_days: Real, star_mass: Real) -> Velocity {
    let period_s = as_seconds(days(period_days));
    let orbital_term = (std::f64::consts::TAU * G_SI * star_mass / period_s).cbrt();
    mps(RV_AMPLITUDE_MPS * (planet_mass / star_mass) * orbital_term)
}

/// Semi-amplitude in m/s, with validation.
pub fn semi_amplitude_mps(planet_mass: Real, period_days: Real, star_mass: Real) -> ModelResult<Real> {
    let planet_mass = ensure_non_negative(planet_mass, "planet mass")?;
    let period_days = ensure_positive(period_days, "orbital period")?;
    let star_mass = ensure_positive(star_mass, "star mass")?;
    Ok(av_core::as_mps(semi_amplitude(planet_mass, period_days, star_mass)))
}

/// Stellar radial velocity (m/s) induced by one planet at `t` days.
///
/// `semi_major_axis_au` is validated but does not enter the amplitude.
pub fn radial_velocity(
    t: Real,
    planet_mass: Real,
    period_days: Real,
    semi_major_axis_au: Real,
    star_mass: Real,
) -> ModelResult<Real> {
    let t = ensure_finite(t, "time")?;
    ensure_positive(semi_major_axis_au, "semi-major axis")?;
    let k = semi_amplitude_mps(planet_mass, period_days, star_mass)?;
    Ok(k * phase_angle(t, period_days).sin())
}
