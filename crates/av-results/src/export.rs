//! Export containers for series records.
//!
//! Every format can be read back with [`parse_export`], so the store can
//! reload whatever it saved.

use crate::types::{ExportFormat, ExportOptions, SeriesRecord};
use crate::{ResultsError, ResultsResult};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// One line of a frame export. `visible` is the length of the revealed
/// prefix when this frame is on screen.
#[derive(Debug, Serialize, Deserialize)]
struct FrameLine<R> {
    frame: usize,
    time: f64,
    visible: usize,
    record: R,
}

pub fn render_export(
    format: ExportFormat,
    records: &[SeriesRecord],
    options: &ExportOptions,
) -> ResultsResult<String> {
    match format {
        ExportFormat::Frames => render_frames(records, options),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        ExportFormat::Csv => Ok(render_csv(records)),
    }
}

pub fn parse_export(format: ExportFormat, content: &str) -> ResultsResult<Vec<SeriesRecord>> {
    match format {
        ExportFormat::Frames => parse_frames(content),
        ExportFormat::Json => Ok(serde_json::from_str(content)?),
        ExportFormat::Csv => parse_csv(content),
    }
}

fn render_frames(records: &[SeriesRecord], options: &ExportOptions) -> ResultsResult<String> {
    if records.len() > options.max_frames {
        return Err(ResultsError::FrameLimitExceeded {
            frames: records.len(),
            limit: options.max_frames,
        });
    }

    let mut content = String::new();
    for (frame, record) in records.iter().enumerate() {
        let line = FrameLine {
            frame,
            time: record.time,
            visible: frame + 1,
            record,
        };
        content.push_str(&serde_json::to_string(&line)?);
        content.push('\n');
    }
    Ok(content)
}

fn parse_frames(content: &str) -> ResultsResult<Vec<SeriesRecord>> {
    let mut records = Vec::new();
    for line in content.lines() {
        if !line.trim().is_empty() {
            let frame: FrameLine<SeriesRecord> = serde_json::from_str(line)?;
            records.push(frame.record);
        }
    }
    Ok(records)
}

/// Columns come from the first record; later records are written in the
/// same column order and leave missing channels empty.
fn render_csv(records: &[SeriesRecord]) -> String {
    let columns: Vec<&str> = records
        .first()
        .map(|r| r.channels.iter().map(|c| c.name.as_str()).collect())
        .unwrap_or_default();

    let mut content = String::from("time");
    for column in &columns {
        content.push(',');
        content.push_str(column);
    }
    content.push('\n');

    for record in records {
        let _ = write!(content, "{}", record.time);
        for column in &columns {
            content.push(',');
            if let Some(value) = record.value(column) {
                let _ = write!(content, "{}", value);
            }
        }
        content.push('\n');
    }
    content
}

fn parse_csv(content: &str) -> ResultsResult<Vec<SeriesRecord>> {
    let mut lines = content.lines().enumerate();
    let columns: Vec<&str> = match lines.next() {
        Some((_, header)) => header.split(',').skip(1).collect(),
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let parse = |cell: &str| {
            cell.trim().parse::<f64>().map_err(|e| ResultsError::Parse {
                line: index + 1,
                message: format!("'{cell}': {e}"),
            })
        };

        let mut cells = line.split(',');
        let time = parse(cells.next().unwrap_or_default())?;
        let mut record = SeriesRecord::new(time);
        for (column, cell) in columns.iter().zip(cells) {
            if !cell.trim().is_empty() {
                record = record.with(*column, parse(cell)?);
            }
        }
        records.push(record);
    }
    Ok(records)
}
