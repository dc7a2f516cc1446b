//! Star plus a set of independent planets.

use crate::planet::Planet;
use crate::position::OrbitPosition;
use crate::velocity::semi_amplitude;
use av_core::numeric::{Real, ensure_finite, ensure_positive, phase_angle};
use av_core::{ModelResult, TimeGrid, Trajectory, as_mps};
use serde::{Deserialize, Serialize};

/// Position of one planet at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub tag: String,
    pub position: OrbitPosition,
}

/// Everything an orbit animation frame needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    /// Combined stellar radial velocity (m/s)
    pub radial_velocity_mps: Real,
    /// One entry per planet, in system order; empty for a bare star.
    pub planets: Vec<PlanetPosition>,
}

/// Host star and its planets. Planet order is kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetarySystem {
    star_mass: Real,
    planets: Vec<Planet>,
}

impl PlanetarySystem {
    /// # Errors
    ///
    /// `InvalidParameter` when `star_mass` is not strictly positive.
    pub fn new(star_mass: Real, planets: Vec<Planet>) -> ModelResult<Self> {
        Ok(Self {
            star_mass: ensure_positive(star_mass, "star mass")?,
            planets,
        })
    }

    pub fn star_mass(&self) -> Real {
        self.star_mass
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    /// Display name for the planet at `index`.
    pub fn planet_label(&self, index: usize) -> String {
        self.planets
            .get(index)
            .and_then(|p| p.tag())
            .map(str::to_string)
            .unwrap_or_else(|| format!("planet {}", index + 1))
    }

    fn planet_velocity(&self, planet: &Planet, t: Real) -> Real {
        let k = semi_amplitude(planet.mass(), planet.period_days(), self.star_mass);
        as_mps(k) * phase_angle(t, planet.period_days()).sin()
    }

    /// Sum of every planet's radial velocity at `t` days; zero for no planets.
    pub fn radial_velocity_at(&self, t: Real) -> ModelResult<Real> {
        let t = ensure_finite(t, "time")?;
        Ok(self.planets.iter().map(|p| self.planet_velocity(p, t)).sum())
    }

    pub fn positions_at(&self, t: Real) -> ModelResult<Vec<PlanetPosition>> {
        let t = ensure_finite(t, "time")?;
        Ok(self
            .planets
            .iter()
            .enumerate()
            .map(|(i, p)| PlanetPosition {
                tag: self.planet_label(i),
                position: OrbitPosition::on_circle(t, p.period_days(), p.semi_major_axis_au()),
            })
            .collect())
    }

    pub fn snapshot_at(&self, t: Real) -> ModelResult<SystemSnapshot> {
        Ok(SystemSnapshot {
            radial_velocity_mps: self.radial_velocity_at(t)?,
            planets: self.positions_at(t)?,
        })
    }

    /// Combined radial velocity over `grid`.
    pub fn radial_velocity_curve(&self, grid: &TimeGrid) -> ModelResult<Trajectory<Real>> {
        Trajectory::evaluate(grid, |t| self.radial_velocity_at(t))
    }

    /// Animation frames over `grid`.
    pub fn evolve(&self, grid: &TimeGrid) -> ModelResult<Trajectory<SystemSnapshot>> {
        Trajectory::evaluate(grid, |t| self.snapshot_at(t))
    }

    /// Largest orbit radius, for framing an orbit plot.
    pub fn max_semi_major_axis_au(&self) -> Real {
        self.planets
            .iter()
            .map(Planet::semi_major_axis_au)
            .fold(0.0, Real::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{RV_DURATION_DAYS, RV_SAMPLES, preset, presets};
    use crate::velocity::radial_velocity;
    use av_core::{Tolerances, nearly_equal};

    fn rv_grid() -> TimeGrid {
        TimeGrid::linspace(0.0, RV_DURATION_DAYS, RV_SAMPLES).unwrap()
    }

    #[test]
    fn empty_system_is_identically_zero() {
        let system = PlanetarySystem::new(1.0, vec![]).unwrap();
        let curve = system.radial_velocity_curve(&rv_grid()).unwrap();
        assert_eq!(curve.len(), RV_SAMPLES);
        assert!(curve.samples().iter().all(|&v| v == 0.0));

        let frames = system.evolve(&rv_grid()).unwrap();
        assert!(frames.samples().iter().all(|f| f.planets.is_empty()));
        assert_eq!(system.max_semi_major_axis_au(), 0.0);
    }

    #[test]
    fn combined_velocity_is_sum_of_planets() {
        let planets = presets();
        let system = PlanetarySystem::new(1.0, planets.clone()).unwrap();
        let tol = Tolerances {
            abs: 1e-15,
            rel: 1e-9,
        };
        for t in [0.0, 0.7, 3.3, 12.1, 19.99] {
            let expected: f64 = planets
                .iter()
                .map(|p| {
                    radial_velocity(t, p.mass(), p.period_days(), p.semi_major_axis_au(), 1.0)
                        .unwrap()
                })
                .sum();
            assert!(nearly_equal(system.radial_velocity_at(t).unwrap(), expected, tol));
        }
    }

    #[test]
    fn snapshot_lists_planets_in_order() {
        let system = PlanetarySystem::new(
            1.0,
            vec![preset("Planet C").unwrap(), preset("Planet A").unwrap()],
        )
        .unwrap();
        let snap = system.snapshot_at(0.0).unwrap();
        let tags: Vec<&str> = snap.planets.iter().map(|p| p.tag.as_str()).collect();
        assert_eq!(tags, ["Planet C", "Planet A"]);
        assert_eq!(system.max_semi_major_axis_au(), 0.1);
    }

    #[test]
    fn untagged_planets_get_numbered_labels() {
        let system =
            PlanetarySystem::new(1.0, vec![Planet::new(0.5, 3.0, 0.04).unwrap()]).unwrap();
        assert_eq!(system.planet_label(0), "planet 1");
    }

    #[test]
    fn rejects_massless_star() {
        assert!(PlanetarySystem::new(0.0, presets()).is_err());
    }
}
