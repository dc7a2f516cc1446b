//! Planet parameters.

use av_core::numeric::{Real, ensure_non_negative, ensure_positive};
use av_core::ModelResult;
use serde::{Deserialize, Serialize};

/// A planet on a circular orbit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    tag: Option<String>,
    /// Mass in Jupiter masses (relative unit); zero is allowed.
    mass: Real,
    period_days: Real,
    semi_major_axis_au: Real,
}

impl Planet {
    /// # Errors
    ///
    /// `InvalidParameter` for a negative mass or a non-positive period or
    /// semi-major axis.
    pub fn new(mass: Real, period_days: Real, semi_major_axis_au: Real) -> ModelResult<Self> {
        Ok(Self {
            tag: None,
            mass: ensure_non_negative(mass, "planet mass")?,
            period_days: ensure_positive(period_days, "orbital period")?,
            semi_major_axis_au: ensure_positive(semi_major_axis_au, "semi-major axis")?,
        })
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn mass(&self) -> Real {
        self.mass
    }

    pub fn period_days(&self) -> Real {
        self.period_days
    }

    pub fn semi_major_axis_au(&self) -> Real {
        self.semi_major_axis_au
    }
}
