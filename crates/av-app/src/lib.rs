//! Shared application service layer for astroviz.
//!
//! This crate provides a unified interface for both CLI and GUI frontends:
//! scenario loading, study evaluation, record queries and exports with a
//! format fallback policy.

pub mod error;
pub mod export_service;
pub mod query;
pub mod run_service;
pub mod scenario_service;

pub use error::{AppError, AppResult};
pub use export_service::{
    ExportOutcome, ExportRequest, FallbackNote, TOOL_VERSION, export_with_fallback, list_exports,
    load_export,
};
pub use query::{SeriesSummary, channel_range, extract_channel, list_channels, summarize};
pub use run_service::{
    StudyOutput, channel_name, evaluate_study, planet_channel_names, planet_system, resolve_variant,
    to_records,
};
pub use scenario_service::{
    StudySummary, get_study, list_studies, load_scenario, save_scenario, validate_scenario,
};
