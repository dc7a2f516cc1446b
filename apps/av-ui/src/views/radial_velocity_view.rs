use crate::animation::FrameCursor;
use av_core::{TimeGrid, Trajectory};
use av_orbit::{DEFAULT_SELECTION, PlanetarySystem, RV_DURATION_DAYS, RV_SAMPLES, SystemSnapshot};
use av_project::schema::{PlanetDef, StudyDef, StudyKind};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

const ORBIT_SEGMENTS: usize = 128;

pub struct RadialVelocityView {
    star_mass_msun: f64,
    selected: Vec<String>,
    /// Planets loaded from a scenario that are not presets.
    custom: Vec<PlanetDef>,
    duration_days: f64,
    samples: usize,
    dirty: bool,
    system: Option<PlanetarySystem>,
    frames: Option<Trajectory<SystemSnapshot>>,
    error: Option<String>,
    cursor: FrameCursor,
}

impl Default for RadialVelocityView {
    fn default() -> Self {
        Self {
            star_mass_msun: 1.0,
            selected: DEFAULT_SELECTION.iter().map(|s| s.to_string()).collect(),
            custom: Vec::new(),
            duration_days: RV_DURATION_DAYS,
            samples: RV_SAMPLES,
            dirty: true,
            system: None,
            frames: None,
            error: None,
            cursor: FrameCursor::default(),
        }
    }
}

impl RadialVelocityView {
    pub fn is_playing(&self) -> bool {
        self.cursor.is_playing() && self.frames.is_some()
    }

    pub fn apply(&mut self, kind: &StudyKind) -> bool {
        let StudyKind::PlanetarySystem {
            star_mass_msun,
            presets,
            planets,
            duration_days,
            samples,
        } = kind
        else {
            return false;
        };
        self.star_mass_msun = *star_mass_msun;
        self.selected = presets.clone();
        self.custom = planets.clone();
        self.duration_days = *duration_days;
        self.samples = *samples;
        self.dirty = true;
        self.cursor.restart();
        true
    }

    pub fn study(&self) -> StudyDef {
        StudyDef {
            id: "radial_velocity".to_string(),
            name: format!(
                "Radial velocity, {} planet(s)",
                self.selected.len() + self.custom.len()
            ),
            kind: StudyKind::PlanetarySystem {
                star_mass_msun: self.star_mass_msun,
                presets: self.selected.clone(),
                planets: self.custom.clone(),
                duration_days: self.duration_days,
                samples: self.samples,
            },
        }
    }

    fn recompute(&mut self) {
        self.dirty = false;
        let result = av_app::planet_system(self.star_mass_msun, &self.selected, &self.custom)
            .and_then(|system| {
                let grid = TimeGrid::linspace(0.0, self.duration_days, self.samples)?;
                let frames = system.evolve(&grid)?;
                Ok((system, frames))
            });
        match result {
            Ok((system, frames)) => {
                self.system = Some(system);
                self.frames = Some(frames);
                self.error = None;
            }
            Err(e) => {
                self.system = None;
                self.frames = None;
                self.error = Some(e.to_string());
            }
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            changed |= ui
                .add(
                    egui::DragValue::new(&mut self.star_mass_msun)
                        .speed(0.01)
                        .range(0.05..=20.0)
                        .prefix("Star mass ")
                        .suffix(" M☉"),
                )
                .changed();

            ui.separator();
            ui.label("Planets:");
            for planet in av_orbit::presets() {
                let Some(tag) = planet.tag() else {
                    continue;
                };
                let mut is_selected = self.selected.iter().any(|s| s == tag);
                if ui.checkbox(&mut is_selected, tag).changed() {
                    if is_selected {
                        // Keep preset order stable for display.
                        self.selected.push(tag.to_string());
                        let order: Vec<String> = av_orbit::presets()
                            .iter()
                            .filter_map(|p| p.tag().map(str::to_string))
                            .collect();
                        self.selected
                            .sort_by_key(|s| order.iter().position(|o| o == s));
                    } else {
                        self.selected.retain(|s| s != tag);
                    }
                    changed = true;
                }
            }
            for planet in &self.custom {
                ui.label(format!("+ {}", planet.tag));
            }
            if !self.custom.is_empty() && ui.button("Clear custom").clicked() {
                self.custom.clear();
                changed = true;
            }
        });
        changed
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.heading("Radial Velocity");
        ui.separator();

        if self.show_controls(ui) {
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
        let (Some(system), Some(frames)) = (self.system.as_ref(), self.frames.as_ref()) else {
            return;
        };

        let frame_count = frames.frame_count();
        let now = ui.input(|i| i.time);
        self.cursor.advance(now, frame_count);
        self.cursor.show_controls(ui, frame_count);
        let frame = self.cursor.frame(frame_count);

        if system.planets().is_empty() {
            ui.label("No planets selected: the star does not move.");
        }

        let velocity: PlotPoints = frames
            .iter()
            .map(|(t, snap)| [t, snap.radial_velocity_mps])
            .collect();
        let now_marker: Vec<[f64; 2]> = frames
            .get(frame)
            .map(|(t, snap)| vec![[t, snap.radial_velocity_mps]])
            .unwrap_or_default();

        let half = ui.available_width() / 2.0 - 8.0;
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.set_width(half);
                Plot::new("rv_plot")
                    .legend(Legend::default())
                    .x_axis_label("Time (days)")
                    .y_axis_label("Radial velocity (m/s)")
                    .include_x(0.0)
                    .include_x(self.duration_days)
                    .include_y(0.0)
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new(velocity).name("combined"));
                        plot_ui.points(Points::new(now_marker).radius(4.0).name("now"));
                    });
            });

            ui.vertical(|ui| {
                ui.set_width(half);
                let extent = system.max_semi_major_axis_au().max(0.01) * 1.2;
                Plot::new("orbit_plot")
                    .legend(Legend::default())
                    .data_aspect(1.0)
                    .x_axis_label("x (AU)")
                    .y_axis_label("y (AU)")
                    .include_x(-extent)
                    .include_x(extent)
                    .include_y(-extent)
                    .include_y(extent)
                    .show(ui, |plot_ui| {
                        plot_ui.points(
                            Points::new(vec![[0.0, 0.0]])
                                .radius(8.0)
                                .color(egui::Color32::YELLOW)
                                .name("star"),
                        );
                        for planet in system.planets() {
                            plot_ui.line(orbit_circle(planet.semi_major_axis_au()));
                        }
                        if let Some((_, snap)) = frames.get(frame) {
                            for planet in &snap.planets {
                                plot_ui.points(
                                    Points::new(vec![[planet.position.x_au, planet.position.y_au]])
                                        .radius(5.0)
                                        .name(&planet.tag),
                                );
                            }
                        }
                    });
            });
        });
    }
}

fn orbit_circle(radius_au: f64) -> Line {
    let points: PlotPoints = (0..=ORBIT_SEGMENTS)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / ORBIT_SEGMENTS as f64;
            [radius_au * angle.cos(), radius_au * angle.sin()]
        })
        .collect();
    Line::new(points)
        .color(egui::Color32::from_gray(120))
        .style(egui_plot::LineStyle::dashed_dense())
}
