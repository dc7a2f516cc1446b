use crate::ModelError;

/// Floating point type used throughout the models
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, ModelError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ModelError::invalid(what, v))
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, ModelError> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(ModelError::invalid(what, v))
    }
}

/// Finite and greater than or equal to zero.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, ModelError> {
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(ModelError::invalid(what, v))
    }
}

/// Phase angle `2π·t/period` in radians.
#[inline]
pub fn phase_angle(t: Real, period: Real) -> Real {
    std::f64::consts::TAU * t / period
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Invalid parameter"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(0.0, "period").is_err());
        assert!(ensure_positive(-1.0, "period").is_err());
        assert!(ensure_positive(Real::INFINITY, "period").is_err());
        assert_eq!(ensure_positive(2.5, "period").unwrap(), 2.5);
    }

    #[test]
    fn ensure_non_negative_accepts_zero() {
        assert_eq!(ensure_non_negative(0.0, "mass").unwrap(), 0.0);
        assert!(ensure_non_negative(-1e-9, "mass").is_err());
    }

    #[test]
    fn phase_angle_quarter_period() {
        let angle = phase_angle(2.5, 10.0);
        assert!(nearly_equal(
            angle,
            std::f64::consts::FRAC_PI_2,
            Tolerances::default()
        ));
    }
}
