use crate::animation::FrameCursor;
use av_core::Trajectory;
use av_project::schema::{StudyDef, StudyKind};
use av_variable::{CURVE_PERIODS, CURVE_STEP_DAYS, StarVariant, VariableStar};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

pub struct VariableStarView {
    period_days: f64,
    max_brightness: f64,
    min_brightness: f64,
    variant: StarVariant,
    periods: f64,
    step_days: f64,
    dirty: bool,
    star: Option<VariableStar>,
    curve: Option<Trajectory<f64>>,
    error: Option<String>,
    cursor: FrameCursor,
}

impl Default for VariableStarView {
    fn default() -> Self {
        Self {
            period_days: 72.0,
            max_brightness: 8.0,
            min_brightness: 4.0,
            variant: StarVariant::default(),
            periods: CURVE_PERIODS,
            step_days: CURVE_STEP_DAYS,
            dirty: true,
            star: None,
            curve: None,
            error: None,
            cursor: FrameCursor::default(),
        }
    }
}

impl VariableStarView {
    pub fn is_playing(&self) -> bool {
        self.cursor.is_playing() && self.curve.is_some()
    }

    /// Take parameters from a scenario study. Returns false for other kinds.
    pub fn apply(&mut self, kind: &StudyKind) -> bool {
        let StudyKind::VariableStar {
            period_days,
            max_brightness,
            min_brightness,
            variant,
            periods,
            step_days,
        } = kind
        else {
            return false;
        };
        self.period_days = *period_days;
        self.max_brightness = *max_brightness;
        self.min_brightness = *min_brightness;
        self.variant = av_app::resolve_variant(variant.as_deref());
        self.periods = *periods;
        self.step_days = *step_days;
        self.dirty = true;
        self.cursor.restart();
        true
    }

    pub fn study(&self) -> StudyDef {
        StudyDef {
            id: format!("variable_star_{}", self.variant.key()),
            name: format!("{} star, P={} d", self.variant, self.period_days),
            kind: StudyKind::VariableStar {
                period_days: self.period_days,
                max_brightness: self.max_brightness,
                min_brightness: self.min_brightness,
                variant: Some(self.variant.label().to_string()),
                periods: self.periods,
                step_days: self.step_days,
            },
        }
    }

    fn recompute(&mut self) {
        self.dirty = false;
        let result = VariableStar::new(
            self.period_days,
            self.max_brightness,
            self.min_brightness,
            self.variant,
        )
        .and_then(|star| {
            let curve = star.curve_with(self.step_days, self.periods * self.period_days)?;
            Ok((star, curve))
        });
        match result {
            Ok((star, curve)) => {
                self.star = Some(star);
                self.curve = Some(curve);
                self.error = None;
            }
            Err(e) => {
                self.star = None;
                self.curve = None;
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.heading("Variable Star Brightness");
        ui.separator();

        let mut changed = false;
        ui.horizontal(|ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.period_days, 1.0..=500.0).text("Period (days)"))
                .changed();
            egui::ComboBox::from_id_salt("variant_selector")
                .selected_text(self.variant.label())
                .show_ui(ui, |ui| {
                    for variant in StarVariant::ALL {
                        changed |= ui
                            .selectable_value(&mut self.variant, variant, variant.label())
                            .changed();
                    }
                });
        });
        ui.horizontal(|ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.max_brightness, 0.0..=10.0).text("Max brightness"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut self.min_brightness, 0.0..=10.0).text("Min brightness"))
                .changed();
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
        let (Some(star), Some(curve)) = (self.star.as_ref(), self.curve.as_ref()) else {
            return;
        };

        let frame_count = curve.frame_count();
        let now = ui.input(|i| i.time);
        self.cursor.advance(now, frame_count);
        self.cursor.show_controls(ui, frame_count);

        let frame = self.cursor.frame(frame_count);
        let (times, values) = curve.reveal(frame);
        let revealed: PlotPoints = times
            .iter()
            .zip(values)
            .map(|(&t, &b)| [t, b])
            .collect();
        let head: Vec<[f64; 2]> = curve.get(frame).map(|(t, &b)| vec![[t, b]]).unwrap_or_default();

        if let (Some(t), Some(b)) = (times.last(), values.last()) {
            ui.label(format!("t = {:.1} d, brightness = {:.3}", t, b));
        }

        let (y_min, y_max) = star.y_range();
        Plot::new("brightness_plot")
            .legend(Legend::default())
            .x_axis_label("Time (days)")
            .y_axis_label("Brightness")
            .include_x(0.0)
            .include_x(self.periods * star.period_days())
            .include_y(y_min)
            .include_y(y_max)
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(revealed).name(star.variant().label()));
                plot_ui.points(Points::new(head).radius(4.0).name("now"));
            });
    }
}
