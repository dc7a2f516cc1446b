//! Circular orbit positions.

use av_core::numeric::{Real, ensure_finite, ensure_positive, phase_angle};
use av_core::ModelResult;
use serde::{Deserialize, Serialize};

/// Position in the orbital plane (AU), star at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitPosition {
    pub x_au: Real,
    pub y_au: Real,
}

impl OrbitPosition {
    pub(crate) fn on_circle(t: Real, period_days: Real, semi_major_axis_au: Real) -> Self {
        let (sin, cos) = phase_angle(t, period_days).sin_cos();
        Self {
            x_au: semi_major_axis_au * cos,
            y_au: semi_major_axis_au * sin,
        }
    }

    pub fn radius_au(&self) -> Real {
        self.x_au.hypot(self.y_au)
    }
}

/// Position at `t` days on a zero-eccentricity orbit.
pub fn orbit_position(t: Real, period_days: Real, semi_major_axis_au: Real) -> ModelResult<OrbitPosition> {
    let t = ensure_finite(t, "time")?;
    let period_days = ensure_positive(period_days, "orbital period")?;
    let semi_major_axis_au = ensure_positive(semi_major_axis_au, "semi-major axis")?;
    Ok(OrbitPosition::on_circle(t, period_days, semi_major_axis_au))
}
