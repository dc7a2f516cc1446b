//! Result data types.

use crate::ResultsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type ExportId = String;

/// Default ceiling on the number of frames in an animation export.
pub const DEFAULT_MAX_FRAMES: usize = 5000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportManifest {
    pub export_id: ExportId,
    pub study_id: String,
    pub timestamp: String,
    /// Study family, e.g. `variable-star`.
    pub kind: String,
    pub format: ExportFormat,
    pub sample_count: usize,
    pub tool_version: String,
}

impl ExportManifest {
    /// Manifest stamped with the current UTC time (RFC 3339).
    pub fn new(
        export_id: ExportId,
        study_id: impl Into<String>,
        kind: impl Into<String>,
        format: ExportFormat,
        sample_count: usize,
        tool_version: impl Into<String>,
    ) -> Self {
        Self {
            export_id,
            study_id: study_id.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            kind: kind.into(),
            format,
            sample_count,
            tool_version: tool_version.into(),
        }
    }

    pub fn data_file_name(&self) -> String {
        format!("data.{}", self.format.extension())
    }
}

/// Export containers, ordered from richest to simplest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// JSON-lines animation, one frame per line.
    Frames,
    Json,
    Csv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Frames, Self::Json, Self::Csv];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Frames => "frames.jsonl",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Frames => "frames",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// This format followed by every simpler one.
    pub fn fallback_chain(self) -> &'static [ExportFormat] {
        match self {
            Self::Frames => &Self::ALL,
            Self::Json => &Self::ALL[1..],
            Self::Csv => &Self::ALL[2..],
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExportFormat {
    type Err = ResultsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frames" | "jsonl" | "animation" => Ok(Self::Frames),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(ResultsError::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub max_frames: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

/// One sample of a study, flattened into named channels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesRecord {
    pub time: f64,
    pub channels: Vec<ChannelValue>,
}

impl SeriesRecord {
    pub fn new(time: f64) -> Self {
        Self {
            time,
            channels: Vec::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.channels.push(ChannelValue {
            name: name.into(),
            value,
        });
        self
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.channels
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelValue {
    pub name: String,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_chain_ends_with_csv() {
        for format in ExportFormat::ALL {
            let chain = format.fallback_chain();
            assert_eq!(chain[0], format);
            assert_eq!(chain.last(), Some(&ExportFormat::Csv));
        }
        assert_eq!(ExportFormat::Frames.fallback_chain().len(), 3);
    }

    #[test]
    fn format_parses_labels() {
        for format in ExportFormat::ALL {
            assert_eq!(format.label().parse::<ExportFormat>().unwrap(), format);
        }
        assert_eq!(" CSV ".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("gif".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn record_lookup() {
        let record = SeriesRecord::new(1.5).with("brightness", 6.0);
        assert_eq!(record.value("brightness"), Some(6.0));
        assert_eq!(record.value("size"), None);
    }
}
