//! Closed-form brightness model.

use crate::variant::StarVariant;
use av_core::numeric::{Real, ensure_finite, ensure_positive, phase_angle};
use av_core::{ModelError, ModelResult, TimeGrid, Trajectory};
use serde::{Deserialize, Serialize};

/// Sample spacing for a full curve (days).
pub const CURVE_STEP_DAYS: Real = 0.1;

/// A full curve spans this many periods.
pub const CURVE_PERIODS: Real = 2.0;

/// Amplitude factor of the `Pulsating` shape relative to `Cepheid`.
pub const PULSATING_DAMPING: Real = 0.8;

/// Validated variable-star parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariableStar {
    period_days: Real,
    max_brightness: Real,
    min_brightness: Real,
    variant: StarVariant,
}

impl VariableStar {
    /// # Errors
    ///
    /// `InvalidParameter` for a non-positive period, non-finite brightness or
    /// `min_brightness > max_brightness`.
    pub fn new(
        period_days: Real,
        max_brightness: Real,
        min_brightness: Real,
        variant: StarVariant,
    ) -> ModelResult<Self> {
        let period_days = ensure_positive(period_days, "period")?;
        let max_brightness = ensure_finite(max_brightness, "max brightness")?;
        let min_brightness = ensure_finite(min_brightness, "min brightness")?;
        if min_brightness > max_brightness {
            return Err(ModelError::invalid("min brightness", min_brightness));
        }
        Ok(Self {
            period_days,
            max_brightness,
            min_brightness,
            variant,
        })
    }

    pub fn period_days(&self) -> Real {
        self.period_days
    }

    pub fn max_brightness(&self) -> Real {
        self.max_brightness
    }

    pub fn min_brightness(&self) -> Real {
        self.min_brightness
    }

    pub fn variant(&self) -> StarVariant {
        self.variant
    }

    pub fn with_variant(self, variant: StarVariant) -> Self {
        Self { variant, ..self }
    }

    /// Brightness midline `(max+min)/2`.
    pub fn midline(&self) -> Real {
        0.5 * (self.max_brightness + self.min_brightness)
    }

    /// Peak deviation from the midline for the sinusoidal shapes.
    pub fn amplitude(&self) -> Real {
        let half_range = 0.5 * (self.max_brightness - self.min_brightness);
        match self.variant {
            StarVariant::Cepheid | StarVariant::RRLyrae => half_range,
            StarVariant::Pulsating => PULSATING_DAMPING * half_range,
        }
    }

    /// Brightness at `t` days.
    ///
    /// The sinusoidal shapes swing peak-to-peak over `max - min` (amplitude
    /// `(max - min)/2` about the midline), so a Cepheid peaks exactly at `max`.
    pub fn brightness_at(&self, t: Real) -> Real {
        let range = self.max_brightness - self.min_brightness;
        let s = phase_angle(t, self.period_days).sin();
        match self.variant {
            StarVariant::Cepheid => 0.5 * range * s + self.midline(),
            StarVariant::RRLyrae => range * s * s + self.min_brightness,
            StarVariant::Pulsating => PULSATING_DAMPING * 0.5 * range * s + self.midline(),
        }
    }

    /// Total span of a full curve: two periods.
    pub fn curve_duration(&self) -> Real {
        CURVE_PERIODS * self.period_days
    }

    /// Full curve sampled every 0.1 day over two periods.
    pub fn curve(&self) -> ModelResult<Trajectory<Real>> {
        self.curve_with(CURVE_STEP_DAYS, self.curve_duration())
    }

    /// Curve over an arbitrary stepped grid.
    pub fn curve_with(&self, step_days: Real, duration_days: Real) -> ModelResult<Trajectory<Real>> {
        let grid = TimeGrid::build(step_days, duration_days)?;
        Ok(Trajectory::tabulate(&grid, |t| self.brightness_at(t)))
    }

    /// Plot framing: `[min-1, max+1]`.
    pub fn y_range(&self) -> (Real, Real) {
        (self.min_brightness - 1.0, self.max_brightness + 1.0)
    }
}

/// One-shot evaluation with validation.
pub fn brightness_at(
    period_days: Real,
    max_brightness: Real,
    min_brightness: Real,
    variant: StarVariant,
    t: Real,
) -> ModelResult<Real> {
    let t = ensure_finite(t, "time")?;
    let star = VariableStar::new(period_days, max_brightness, min_brightness, variant)?;
    Ok(star.brightness_at(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use av_core::{Tolerances, nearly_equal};

    const TOL: Tolerances = Tolerances {
        abs: 1e-9,
        rel: 1e-9,
    };

    #[test]
    fn cepheid_peak_and_trough() {
        let peak = brightness_at(72.0, 8.0, 4.0, StarVariant::Cepheid, 18.0).unwrap();
        let trough = brightness_at(72.0, 8.0, 4.0, StarVariant::Cepheid, 54.0).unwrap();
        assert!(nearly_equal(peak, 8.0, TOL));
        assert!(nearly_equal(trough, 4.0, TOL));
    }

    #[test]
    fn cepheid_starts_on_midline() {
        let star = VariableStar::new(72.0, 8.0, 4.0, StarVariant::Cepheid).unwrap();
        assert!(nearly_equal(star.brightness_at(0.0), 6.0, TOL));
    }

    #[test]
    fn rr_lyrae_peaks_at_max_and_touches_min() {
        let star = VariableStar::new(10.0, 9.0, 3.0, StarVariant::RRLyrae).unwrap();
        assert!(nearly_equal(star.brightness_at(2.5), 9.0, TOL));
        assert!(nearly_equal(star.brightness_at(0.0), 3.0, TOL));
        assert!(nearly_equal(star.brightness_at(7.5), 9.0, TOL));
    }

    #[test]
    fn pulsating_is_damped_cepheid() {
        let cepheid = VariableStar::new(72.0, 8.0, 4.0, StarVariant::Cepheid).unwrap();
        let pulsating = cepheid.with_variant(StarVariant::Pulsating);
        assert!(nearly_equal(
            pulsating.amplitude(),
            PULSATING_DAMPING * cepheid.amplitude(),
            TOL
        ));
        assert!(nearly_equal(pulsating.brightness_at(18.0), 7.6, TOL));
    }

    #[test]
    fn full_curve_spans_two_periods() {
        let star = VariableStar::new(72.0, 8.0, 4.0, StarVariant::Cepheid).unwrap();
        let curve = star.curve().unwrap();
        assert_eq!(curve.len(), 1440);
        assert!(curve.times().last().copied().unwrap() < 144.0);
    }

    #[test]
    fn equal_extremes_give_flat_curve() {
        let star = VariableStar::new(5.0, 6.0, 6.0, StarVariant::RRLyrae).unwrap();
        let curve = star.curve().unwrap();
        assert!(curve.samples().iter().all(|&b| nearly_equal(b, 6.0, TOL)));
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert!(matches!(
            VariableStar::new(0.0, 8.0, 4.0, StarVariant::Cepheid),
            Err(ModelError::InvalidParameter { what: "period", .. })
        ));
        assert!(matches!(
            VariableStar::new(72.0, 4.0, 8.0, StarVariant::Cepheid),
            Err(ModelError::InvalidParameter {
                what: "min brightness",
                ..
            })
        ));
        assert!(brightness_at(72.0, 8.0, 4.0, StarVariant::Cepheid, f64::NAN).is_err());
    }

    #[test]
    fn y_range_pads_extremes() {
        let star = VariableStar::new(72.0, 8.0, 4.0, StarVariant::Cepheid).unwrap();
        assert_eq!(star.y_range(), (3.0, 9.0));
    }
}
