#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![allow(clippy::collapsible_if)]

mod animation;
mod app;
mod views;

use app::AstroVizApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("AstroViz"),
        ..Default::default()
    };

    eframe::run_native(
        "AstroViz",
        options,
        Box::new(|cc| Ok(Box::new(AstroVizApp::new(cc)))),
    )
}
