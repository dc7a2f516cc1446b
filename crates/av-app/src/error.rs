//! Error types for the av-app service layer.

use av_results::ExportFormat;
use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// provides a unified error interface for both CLI and GUI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Failed to read scenario file: {path}")]
    ScenarioFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scenario validation failed: {0}")]
    Validation(String),

    #[error("Study not found: {0}")]
    StudyNotFound(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Export not found: {0}")]
    ExportNotFound(String),

    #[error("Export failed in every format ({})", format_attempts(.attempts))]
    ExportFailed { attempts: Vec<(ExportFormat, String)> },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for av-app operations.
pub type AppResult<T> = Result<T, AppError>;

fn format_attempts(attempts: &[(ExportFormat, String)]) -> String {
    attempts
        .iter()
        .map(|(format, reason)| format!("{format}: {reason}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<av_project::ProjectError> for AppError {
    fn from(err: av_project::ProjectError) -> Self {
        match err {
            av_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Scenario(other.to_string()),
        }
    }
}

impl From<av_project::ValidationError> for AppError {
    fn from(err: av_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<av_core::ModelError> for AppError {
    fn from(err: av_core::ModelError) -> Self {
        AppError::Model(err.to_string())
    }
}

impl From<av_results::ResultsError> for AppError {
    fn from(err: av_results::ResultsError) -> Self {
        match err {
            av_results::ResultsError::ExportNotFound { export_id } => {
                AppError::ExportNotFound(export_id)
            }
            other => AppError::Results(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_failure_lists_every_attempt() {
        let err = AppError::ExportFailed {
            attempts: vec![
                (ExportFormat::Frames, "too many frames".to_string()),
                (ExportFormat::Csv, "disk full".to_string()),
            ],
        };
        let text = err.to_string();
        assert!(text.contains("frames: too many frames"));
        assert!(text.contains("csv: disk full"));
    }

    #[test]
    fn validation_errors_stay_distinguishable() {
        let err: AppError = av_project::ProjectError::Validation(
            av_project::ValidationError::UnsupportedVersion { version: 9 },
        )
        .into();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
