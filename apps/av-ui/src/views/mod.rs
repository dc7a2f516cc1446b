pub mod hr_view;
pub mod radial_velocity_view;
pub mod variable_star_view;

pub use hr_view::HrView;
pub use radial_velocity_view::RadialVelocityView;
pub use variable_star_view::VariableStarView;

/// Red error line shown in place of a plot.
pub(crate) fn error_label(ui: &mut egui::Ui, message: &str) {
    ui.colored_label(egui::Color32::RED, message);
}
