//! Finite, already-computed sample sequences.
//!
//! A `Trajectory` pairs every instant of a `TimeGrid` with the model output at
//! that instant. Renderers pull frames from it; the model never drives playback.

use crate::grid::TimeGrid;
use crate::numeric::Real;

/// Time-indexed model output over a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<S> {
    times: Vec<Real>,
    samples: Vec<S>,
}

impl<S> Trajectory<S> {
    /// Evaluate `f` at every grid instant, stopping at the first error.
    pub fn evaluate<E>(
        grid: &TimeGrid,
        f: impl FnMut(Real) -> Result<S, E>,
    ) -> Result<Self, E> {
        let samples = grid.sample(f)?;
        Ok(Self {
            times: grid.times().to_vec(),
            samples,
        })
    }

    /// Evaluate an infallible `f` at every grid instant.
    pub fn tabulate(grid: &TimeGrid, f: impl FnMut(Real) -> S) -> Self {
        Self {
            times: grid.times().to_vec(),
            samples: grid.iter().map(f).collect(),
        }
    }

    pub fn times(&self) -> &[Real] {
        &self.times
    }

    pub fn samples(&self) -> &[S] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of animation frames (one per sample).
    pub fn frame_count(&self) -> usize {
        self.samples.len()
    }

    pub fn get(&self, index: usize) -> Option<(Real, &S)> {
        Some((*self.times.get(index)?, self.samples.get(index)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Real, &S)> + '_ {
        self.times.iter().copied().zip(self.samples.iter())
    }

    /// Prefix of the curve up to and including `frame` (a running reveal).
    ///
    /// Frames past the end clamp to the full sequence.
    pub fn reveal(&self, frame: usize) -> (&[Real], &[S]) {
        let end = frame.saturating_add(1).min(self.samples.len());
        (&self.times[..end], &self.samples[..end])
    }

    pub fn map<T>(&self, f: impl FnMut(&S) -> T) -> Trajectory<T> {
        Trajectory {
            times: self.times.clone(),
            samples: self.samples.iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doubled() -> Trajectory<f64> {
        let grid = TimeGrid::linspace(0.0, 4.0, 5).unwrap();
        Trajectory::tabulate(&grid, |t| 2.0 * t)
    }

    #[test]
    fn tabulate_pairs_times_and_samples() {
        let traj = doubled();
        assert_eq!(traj.len(), 5);
        assert_eq!(traj.get(3), Some((3.0, &6.0)));
        assert_eq!(traj.get(5), None);
    }

    #[test]
    fn reveal_is_a_growing_prefix() {
        let traj = doubled();
        let (t0, s0) = traj.reveal(0);
        assert_eq!(t0, &[0.0]);
        assert_eq!(s0, &[0.0]);

        let (t2, s2) = traj.reveal(2);
        assert_eq!(t2, &[0.0, 1.0, 2.0]);
        assert_eq!(s2, &[0.0, 2.0, 4.0]);
    }

    #[test]
    fn reveal_clamps_past_end() {
        let traj = doubled();
        let (times, samples) = traj.reveal(usize::MAX);
        assert_eq!(times.len(), traj.frame_count());
        assert_eq!(samples.len(), traj.frame_count());
    }

    #[test]
    fn evaluate_stops_on_error() {
        let grid = TimeGrid::linspace(0.0, 1.0, 3).unwrap();
        let result: Result<Trajectory<f64>, String> =
            Trajectory::evaluate(&grid, |t| if t < 1.0 { Ok(t) } else { Err("end".into()) });
        assert!(result.is_err());
    }

    #[test]
    fn map_keeps_time_axis() {
        let traj = doubled().map(|v| v + 1.0);
        assert_eq!(traj.times(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(traj.samples(), &[1.0, 3.0, 5.0, 7.0, 9.0]);
    }
}
