use crate::views::{HrView, RadialVelocityView, VariableStarView};
use av_app::{ExportRequest, StudySummary, evaluate_study, export_with_fallback, to_records};
use av_project::schema::{Scenario, StudyDef};
use av_results::{ExportFormat, ExportOptions, ExportStore};
use egui_file_dialog::{DialogMode, FileDialog};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct AstroVizApp {
    scenario: Option<Scenario>,
    scenario_path: Option<PathBuf>,
    studies: Vec<StudySummary>,
    file_dialog: FileDialog,
    file_dialog_action: Option<FileDialogAction>,
    last_directory: Option<PathBuf>,
    active_view: ViewTab,
    variable_view: VariableStarView,
    hr_view: HrView,
    rv_view: RadialVelocityView,
    export_format: ExportFormat,
    status: Option<Status>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ViewTab {
    VariableStar,
    HrDiagram,
    RadialVelocity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FileDialogAction {
    Open,
    Export,
}

enum Status {
    Info(String),
    Warning(String),
    Error(String),
}

impl Default for AstroVizApp {
    fn default() -> Self {
        Self {
            scenario: None,
            scenario_path: None,
            studies: Vec::new(),
            file_dialog: FileDialog::new(),
            file_dialog_action: None,
            last_directory: None,
            active_view: ViewTab::VariableStar,
            variable_view: VariableStarView::default(),
            hr_view: HrView::default(),
            rv_view: RadialVelocityView::default(),
            export_format: ExportFormat::Frames,
            status: None,
        }
    }
}

impl AstroVizApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn remember_directory(&mut self, path: &Path) {
        let dir = if path.is_dir() { Some(path) } else { path.parent() };
        self.last_directory = dir.map(Path::to_path_buf);
    }

    fn open_scenario(&mut self, path: PathBuf) {
        self.remember_directory(&path);
        match av_app::load_scenario(&path) {
            Ok(scenario) => {
                info!(path = %path.display(), studies = scenario.studies.len(), "Scenario opened");
                self.studies = av_app::list_studies(&scenario);
                self.status = Some(Status::Info(format!(
                    "Loaded '{}' ({} studies)",
                    scenario.name,
                    scenario.studies.len()
                )));
                self.scenario = Some(scenario);
                self.scenario_path = Some(path);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to open scenario");
                self.status = Some(Status::Error(format!("Failed to load scenario: {}", e)));
            }
        }
    }

    fn select_study(&mut self, study_id: &str) {
        let Some(study) = self
            .scenario
            .as_ref()
            .and_then(|s| av_app::get_study(s, study_id).ok())
        else {
            return;
        };
        let kind = study.kind.clone();
        if self.variable_view.apply(&kind) {
            self.active_view = ViewTab::VariableStar;
        } else if self.hr_view.apply(&kind) {
            self.active_view = ViewTab::HrDiagram;
        } else if self.rv_view.apply(&kind) {
            self.active_view = ViewTab::RadialVelocity;
        }
    }

    fn current_study(&self) -> StudyDef {
        match self.active_view {
            ViewTab::VariableStar => self.variable_view.study(),
            ViewTab::HrDiagram => self.hr_view.study(),
            ViewTab::RadialVelocity => self.rv_view.study(),
        }
    }

    fn export_current(&mut self, dir: PathBuf) {
        self.remember_directory(&dir);
        let study = self.current_study();
        let result = ExportStore::new(dir)
            .map_err(av_app::AppError::from)
            .and_then(|store| {
                let records = to_records(&evaluate_study(&study)?);
                export_with_fallback(
                    &store,
                    &ExportRequest {
                        study: &study,
                        records: &records,
                        preferred: self.export_format,
                        options: ExportOptions::default(),
                    },
                )
            });

        self.status = Some(match result {
            Ok(outcome) if outcome.used_fallback() => {
                let skipped: Vec<String> = outcome
                    .fallbacks
                    .iter()
                    .map(|n| format!("{} ({})", n.format, n.reason))
                    .collect();
                Status::Warning(format!(
                    "Exported as {} after {} failed: {}",
                    outcome.manifest.format,
                    skipped.join(", "),
                    outcome.path.display()
                ))
            }
            Ok(outcome) => Status::Info(format!("Exported {}", outcome.path.display())),
            Err(e) => Status::Error(format!("Export failed: {}", e)),
        });
    }

    fn open_dialog(&mut self, mode: DialogMode) {
        if let Some(dir) = &self.last_directory {
            self.file_dialog.config_mut().initial_directory = dir.clone();
        }
        let _ = self.file_dialog.open(mode, true, None);
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Open scenario").clicked() {
                self.file_dialog_action = Some(FileDialogAction::Open);
                self.open_dialog(DialogMode::SelectFile);
            }

            ui.separator();

            egui::ComboBox::from_id_salt("export_format")
                .selected_text(self.export_format.label())
                .show_ui(ui, |ui| {
                    for format in ExportFormat::ALL {
                        ui.selectable_value(&mut self.export_format, format, format.label());
                    }
                });
            if ui.button("Export…").clicked() {
                self.file_dialog_action = Some(FileDialogAction::Export);
                self.open_dialog(DialogMode::SelectDirectory);
            }

            if let Some(status) = &self.status {
                ui.separator();
                match status {
                    Status::Info(msg) => {
                        ui.label(msg);
                    }
                    Status::Warning(msg) => {
                        ui.colored_label(egui::Color32::YELLOW, format!("⚠ {}", msg));
                    }
                    Status::Error(msg) => {
                        ui.colored_label(egui::Color32::RED, msg);
                    }
                }
            }
        });
    }

    fn show_studies(&mut self, ui: &mut egui::Ui) {
        ui.heading("Scenario");
        let Some(scenario) = self.scenario.as_ref() else {
            ui.label("Open a scenario to load saved studies");
            return;
        };
        ui.label(format!("Name: {}", scenario.name));
        ui.separator();

        let mut clicked = None;
        for study in &self.studies {
            let response = ui
                .selectable_label(false, format!("{} [{}]", study.name, study.kind))
                .on_hover_text(&study.detail);
            if response.clicked() {
                clicked = Some(study.id.clone());
            }
        }
        if let Some(id) = clicked {
            self.select_study(&id);
        }
    }
}

impl eframe::App for AstroVizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.show_toolbar(ui);
        });

        self.file_dialog.update(ctx);
        if let Some(path) = self.file_dialog.take_selected() {
            match self.file_dialog_action.take() {
                Some(FileDialogAction::Open) => self.open_scenario(path.to_path_buf()),
                Some(FileDialogAction::Export) => self.export_current(path.to_path_buf()),
                None => {}
            }
        }

        egui::SidePanel::left("studies")
            .default_width(220.0)
            .show(ctx, |ui| {
                self.show_studies(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.active_view, ViewTab::VariableStar, "Variable Star");
                ui.selectable_value(&mut self.active_view, ViewTab::HrDiagram, "H-R Diagram");
                ui.selectable_value(
                    &mut self.active_view,
                    ViewTab::RadialVelocity,
                    "Radial Velocity",
                );
            });

            ui.separator();

            match self.active_view {
                ViewTab::VariableStar => self.variable_view.show(ui),
                ViewTab::HrDiagram => self.hr_view.show(ui),
                ViewTab::RadialVelocity => self.rv_view.show(ui),
            }
        });

        let animating = match self.active_view {
            ViewTab::VariableStar => self.variable_view.is_playing(),
            ViewTab::HrDiagram => self.hr_view.is_playing(),
            ViewTab::RadialVelocity => self.rv_view.is_playing(),
        };
        if animating {
            ctx.request_repaint();
        }
    }
}
