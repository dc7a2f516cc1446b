//! Time grids: the ordered instants a model is sampled on.
//!
//! Two constructions are supported:
//! - stepped: `0, step, 2·step, …` strictly below a total duration
//! - linear: `count` evenly spaced points with both endpoints included

use crate::numeric::{Real, ensure_finite, ensure_positive};
use crate::{ModelError, ModelResult};

/// Relative slack when deciding whether `total / step` is an integer.
const COUNT_SLACK: Real = 1e-9;

/// Upper bound on the number of instants in any grid.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Ordered, evenly spaced sample instants. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<Real>,
    step: Real,
}

impl TimeGrid {
    /// Number of instants `build(step, total_duration)` would produce,
    /// checked without allocating the grid.
    pub fn stepped_len(step: Real, total_duration: Real) -> ModelResult<usize> {
        let step = ensure_positive(step, "time step")?;
        let total = ensure_positive(total_duration, "total duration")?;

        let ratio = total / step;
        if !ratio.is_finite() || ratio > (MAX_SAMPLES + 1) as Real {
            return Err(ModelError::invalid("sample count", ratio));
        }
        let count = stepped_count(ratio);
        if count > MAX_SAMPLES {
            return Err(ModelError::invalid("sample count", count as Real));
        }
        Ok(count)
    }

    /// Build `⌈total/step⌉` instants `0, step, 2·step, …`, all `< total`.
    pub fn build(step: Real, total_duration: Real) -> ModelResult<Self> {
        let count = Self::stepped_len(step, total_duration)?;
        let total = total_duration;
        let times: Vec<Real> = (0..count)
            .map(|i| i as Real * step)
            .take_while(|&t| t < total)
            .collect();

        Ok(Self { times, step })
    }

    /// Build `count` evenly spaced instants from `start` to `end` inclusive.
    pub fn linspace(start: Real, end: Real, count: usize) -> ModelResult<Self> {
        let start = ensure_finite(start, "grid start")?;
        let end = ensure_finite(end, "grid end")?;
        if count == 0 || count > MAX_SAMPLES {
            return Err(ModelError::invalid("sample count", count as Real));
        }
        if count == 1 {
            return Ok(Self {
                times: vec![start],
                step: 0.0,
            });
        }
        if end <= start {
            return Err(ModelError::invalid("grid end", end));
        }

        let step = (end - start) / (count - 1) as Real;
        let mut times: Vec<Real> = (0..count).map(|i| start + i as Real * step).collect();
        // Ensure exact endpoint
        times[count - 1] = end;

        Ok(Self { times, step })
    }

    pub fn times(&self) -> &[Real] {
        &self.times
    }

    pub fn step(&self) -> Real {
        self.step
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn first(&self) -> Option<Real> {
        self.times.first().copied()
    }

    pub fn last(&self) -> Option<Real> {
        self.times.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Real> + '_ {
        self.times.iter().copied()
    }

    /// Evaluate `f` at every instant, stopping at the first error.
    pub fn sample<S, E>(&self, mut f: impl FnMut(Real) -> Result<S, E>) -> Result<Vec<S>, E> {
        self.times.iter().map(|&t| f(t)).collect()
    }
}

impl<'a> IntoIterator for &'a TimeGrid {
    type Item = &'a Real;
    type IntoIter = std::slice::Iter<'a, Real>;

    fn into_iter(self) -> Self::IntoIter {
        self.times.iter()
    }
}

/// Ceiling of `ratio`, except ratios within rounding noise of an integer snap to it.
fn stepped_count(ratio: Real) -> usize {
    let nearest = ratio.round();
    if (ratio - nearest).abs() <= COUNT_SLACK * nearest.max(1.0) {
        (nearest as usize).max(1)
    } else {
        ratio.ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_periods_of_72_days_has_1440_samples() {
        let grid = TimeGrid::build(0.1, 144.0).unwrap();
        assert_eq!(grid.len(), 1440);
        assert_eq!(grid.first(), Some(0.0));
        assert!(grid.last().unwrap() < 144.0);
        assert!((grid.last().unwrap() - 143.9).abs() < 1e-9);
    }

    #[test]
    fn non_integer_ratio_rounds_up() {
        let grid = TimeGrid::build(0.3, 1.0).unwrap();
        assert_eq!(grid.len(), 4);
        assert!(grid.last().unwrap() < 1.0);
    }

    #[test]
    fn step_larger_than_duration_yields_single_instant() {
        let grid = TimeGrid::build(5.0, 1.0).unwrap();
        assert_eq!(grid.times(), &[0.0]);
    }

    #[test]
    fn rejects_non_positive_inputs() {
        assert!(matches!(
            TimeGrid::build(0.0, 10.0),
            Err(ModelError::InvalidParameter {
                what: "time step",
                ..
            })
        ));
        assert!(TimeGrid::build(-0.1, 10.0).is_err());
        assert!(TimeGrid::build(0.1, 0.0).is_err());
        assert!(TimeGrid::build(Real::NAN, 10.0).is_err());
    }

    #[test]
    fn oversized_grids_are_rejected_before_allocating() {
        assert!(matches!(
            TimeGrid::build(1e-15, 1.0),
            Err(ModelError::InvalidParameter {
                what: "sample count",
                ..
            })
        ));
        assert!(TimeGrid::stepped_len(1e-300, 1e300).is_err());
        assert!(matches!(
            TimeGrid::linspace(0.0, 1.0, 1 << 50),
            Err(ModelError::InvalidParameter {
                what: "sample count",
                ..
            })
        ));
        assert!(TimeGrid::linspace(0.0, 1.0, MAX_SAMPLES + 1).is_err());
    }

    #[test]
    fn grid_at_the_limit_is_accepted() {
        assert_eq!(TimeGrid::stepped_len(1.0, MAX_SAMPLES as Real).unwrap(), MAX_SAMPLES);
        assert_eq!(TimeGrid::stepped_len(0.1, 144.0).unwrap(), 1440);
    }

    #[test]
    fn build_is_restartable() {
        let a = TimeGrid::build(0.1, 20.0).unwrap();
        let b = TimeGrid::build(0.1, 20.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn linspace_includes_endpoints() {
        let grid = TimeGrid::linspace(0.0, 20.0, 1000).unwrap();
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid.first(), Some(0.0));
        assert_eq!(grid.last(), Some(20.0));
        assert!((grid.step() - 20.0 / 999.0).abs() < 1e-12);
    }

    #[test]
    fn linspace_single_point() {
        let grid = TimeGrid::linspace(3.0, 3.0, 1).unwrap();
        assert_eq!(grid.times(), &[3.0]);
    }

    #[test]
    fn linspace_rejects_empty_and_reversed() {
        assert!(TimeGrid::linspace(0.0, 1.0, 0).is_err());
        assert!(TimeGrid::linspace(1.0, 0.0, 10).is_err());
    }

    #[test]
    fn sample_propagates_errors() {
        let grid = TimeGrid::linspace(0.0, 1.0, 5).unwrap();
        let result: Result<Vec<f64>, &str> =
            grid.sample(|t| if t > 0.5 { Err("late") } else { Ok(t) });
        assert_eq!(result, Err("late"));
    }
}
