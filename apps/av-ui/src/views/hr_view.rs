use crate::animation::FrameCursor;
use av_core::Trajectory;
use av_evolution::{
    DEFAULT_TRACK_SAMPLES, EXPONENTIAL_SAMPLES, EvolutionSample, ExponentialTrack,
    HR_LUMINOSITY_RANGE, HR_TEMPERATURE_RANGE_K, Phase, StellarState, StellarTrack,
};
use av_project::schema::{EvolutionModeDef, StudyDef, StudyKind};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints, Points};
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Piecewise,
    Exponential,
}

enum Track {
    Piecewise(Trajectory<EvolutionSample>),
    Exponential(Trajectory<StellarState>),
}

impl Track {
    fn frame_count(&self) -> usize {
        match self {
            Track::Piecewise(t) => t.frame_count(),
            Track::Exponential(t) => t.frame_count(),
        }
    }

    fn state(&self, frame: usize) -> Option<(Option<Phase>, StellarState)> {
        match self {
            Track::Piecewise(t) => t.get(frame).map(|(_, s)| (Some(s.phase), s.state)),
            Track::Exponential(t) => t.get(frame).map(|(_, s)| (None, *s)),
        }
    }
}

/// Temperature runs right-to-left on an H-R diagram, so it is plotted negated.
fn hr_point(state: &StellarState) -> [f64; 2] {
    [-state.temperature_k, state.luminosity_lsun]
}

fn marker_radius(size: f64) -> f32 {
    (size.max(0.0).sqrt() * 3.0).clamp(3.0, 30.0) as f32
}

pub struct HrView {
    mode: Mode,
    mass_msun: f64,
    fixed_solar_track: bool,
    samples: usize,
    dirty: bool,
    track: Option<Track>,
    error: Option<String>,
    cursor: FrameCursor,
}

impl Default for HrView {
    fn default() -> Self {
        Self {
            mode: Mode::Piecewise,
            mass_msun: 4.71,
            fixed_solar_track: false,
            samples: DEFAULT_TRACK_SAMPLES,
            dirty: true,
            track: None,
            error: None,
            cursor: FrameCursor {
                frames_per_second: 10.0,
                ..Default::default()
            },
        }
    }
}

impl HrView {
    pub fn is_playing(&self) -> bool {
        self.cursor.is_playing() && self.track.is_some()
    }

    pub fn apply(&mut self, kind: &StudyKind) -> bool {
        let StudyKind::StellarEvolution {
            mass_msun,
            mode,
            samples,
        } = kind
        else {
            return false;
        };
        self.mass_msun = *mass_msun;
        self.fixed_solar_track = false;
        self.mode = match mode {
            EvolutionModeDef::Piecewise => Mode::Piecewise,
            EvolutionModeDef::Exponential => Mode::Exponential,
        };
        self.samples = *samples;
        self.dirty = true;
        self.cursor.restart();
        true
    }

    fn effective_mass(&self) -> f64 {
        if self.mode == Mode::Piecewise && self.fixed_solar_track {
            1.0
        } else {
            self.mass_msun
        }
    }

    pub fn study(&self) -> StudyDef {
        let mode = match self.mode {
            Mode::Piecewise => EvolutionModeDef::Piecewise,
            Mode::Exponential => EvolutionModeDef::Exponential,
        };
        StudyDef {
            id: format!("evolution_{:?}", self.mode).to_lowercase(),
            name: format!("Stellar evolution, M={} Msun", self.effective_mass()),
            kind: StudyKind::StellarEvolution {
                mass_msun: self.effective_mass(),
                mode,
                samples: self.samples,
            },
        }
    }

    fn recompute(&mut self) {
        self.dirty = false;
        let mass = self.effective_mass();
        let result = match self.mode {
            Mode::Piecewise => StellarTrack::new(mass)
                .and_then(|t| t.track(self.samples))
                .map(Track::Piecewise),
            Mode::Exponential => ExponentialTrack::new(mass)
                .and_then(|t| t.track(self.samples))
                .map(Track::Exponential),
        };
        match result {
            Ok(track) => {
                self.track = Some(track);
                self.error = None;
            }
            Err(e) => {
                self.track = None;
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.heading("Hertzsprung-Russell Diagram");
        ui.separator();

        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label("Track:");
            for (mode, label, samples) in [
                (Mode::Piecewise, "Life cycle", DEFAULT_TRACK_SAMPLES),
                (Mode::Exponential, "Exponential decay", EXPONENTIAL_SAMPLES),
            ] {
                if ui.selectable_value(&mut self.mode, mode, label).changed() {
                    self.samples = samples;
                    changed = true;
                }
            }
            ui.separator();
            ui.add_enabled_ui(!(self.mode == Mode::Piecewise && self.fixed_solar_track), |ui| {
                changed |= ui
                    .add(egui::Slider::new(&mut self.mass_msun, 1.0..=10.0).text("Mass (M☉)"))
                    .changed();
            });
            if self.mode == Mode::Piecewise {
                changed |= ui
                    .checkbox(&mut self.fixed_solar_track, "Fixed solar track")
                    .changed();
            }
        });
        if changed {
            self.dirty = true;
            self.cursor.restart();
        }
        if self.dirty {
            self.recompute();
        }

        if let Some(error) = &self.error {
            super::error_label(ui, error);
            return;
        }
        let Some(track) = self.track.as_ref() else {
            return;
        };

        let frame_count = track.frame_count();
        let now = ui.input(|i| i.time);
        self.cursor.advance(now, frame_count);
        self.cursor.show_controls(ui, frame_count);

        let current = track.state(self.cursor.frame(frame_count));
        if let Some((phase, state)) = current {
            let phase = phase.map(|p| format!("{}, ", p)).unwrap_or_default();
            ui.label(format!(
                "{}T = {:.0} K, L = {:.2} L☉, size = {:.2} R☉",
                phase, state.temperature_k, state.luminosity_lsun, state.size
            ));
        }

        let lines = track_lines(track);
        let (t_lo, t_hi) = HR_TEMPERATURE_RANGE_K;
        let (l_lo, l_hi) = HR_LUMINOSITY_RANGE;
        Plot::new("hr_plot")
            .legend(Legend::default())
            .x_axis_label("Temperature (K)")
            .y_axis_label("Luminosity (L☉)")
            .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
                format!("{:.0}", -mark.value)
            })
            .include_x(-t_hi)
            .include_x(-t_lo)
            .include_y(l_lo)
            .include_y(l_hi)
            .show(ui, |plot_ui| {
                for line in lines {
                    plot_ui.line(line);
                }
                if let Some((_, state)) = current {
                    plot_ui.points(
                        Points::new(vec![hr_point(&state)])
                            .radius(marker_radius(state.size))
                            .name("star"),
                    );
                }
            });
    }
}

/// One line per phase for a life-cycle track, each joined to the first point
/// of the next phase; a single line for the exponential track.
fn track_lines(track: &Track) -> Vec<Line> {
    match track {
        Track::Exponential(t) => {
            let points: PlotPoints = t.samples().iter().map(hr_point).collect();
            vec![Line::new(points).name("track")]
        }
        Track::Piecewise(t) => {
            let samples = t.samples();
            Phase::ALL
                .iter()
                .filter_map(|&phase| {
                    let first = samples.iter().position(|s| s.phase == phase)?;
                    let count = samples[first..]
                        .iter()
                        .take_while(|s| s.phase == phase)
                        .count();
                    let end = (first + count + 1).min(samples.len());
                    let points: PlotPoints =
                        samples[first..end].iter().map(|s| hr_point(&s.state)).collect();
                    Some(Line::new(points).name(phase.label()))
                })
                .collect()
        }
    }
}
