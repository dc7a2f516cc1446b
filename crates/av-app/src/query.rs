//! Query helpers for extracting data from series records.

use av_results::SeriesRecord;

use crate::error::{AppError, AppResult};

/// Summary of a series' time range and channels.
#[derive(Debug, Clone)]
pub struct SeriesSummary {
    pub time_range: (f64, f64),
    pub record_count: usize,
    pub channels: Vec<String>,
}

pub fn summarize(records: &[SeriesRecord]) -> AppResult<SeriesSummary> {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return Err(AppError::InvalidInput("No records in series".to_string()));
    };

    Ok(SeriesSummary {
        time_range: (first.time, last.time),
        record_count: records.len(),
        channels: list_channels(records),
    })
}

/// Channel names of the first record, in order.
pub fn list_channels(records: &[SeriesRecord]) -> Vec<String> {
    records
        .first()
        .map(|r| r.channels.iter().map(|c| c.name.clone()).collect())
        .unwrap_or_default()
}

/// `(time, value)` pairs for one channel; records without it are skipped.
pub fn extract_channel(records: &[SeriesRecord], channel: &str) -> AppResult<Vec<(f64, f64)>> {
    let series: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|r| r.value(channel).map(|v| (r.time, v)))
        .collect();

    if series.is_empty() && !records.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Unknown channel: {}",
            channel
        )));
    }
    Ok(series)
}

/// `(min, max)` of one channel.
pub fn channel_range(records: &[SeriesRecord], channel: &str) -> AppResult<(f64, f64)> {
    let series = extract_channel(records, channel)?;
    if series.is_empty() {
        return Err(AppError::InvalidInput("No records in series".to_string()));
    }
    Ok(series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, v)| {
            (lo.min(v), hi.max(v))
        }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<SeriesRecord> {
        vec![
            SeriesRecord::new(0.0).with("brightness", 6.0),
            SeriesRecord::new(1.0).with("brightness", 8.0),
            SeriesRecord::new(2.0).with("brightness", 4.0),
        ]
    }

    #[test]
    fn summary_reports_span_and_channels() {
        let summary = summarize(&records()).unwrap();
        assert_eq!(summary.time_range, (0.0, 2.0));
        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.channels, ["brightness"]);
        assert!(summarize(&[]).is_err());
    }

    #[test]
    fn channel_extraction() {
        let series = extract_channel(&records(), "brightness").unwrap();
        assert_eq!(series[1], (1.0, 8.0));
        assert_eq!(channel_range(&records(), "brightness").unwrap(), (4.0, 8.0));
        assert!(extract_channel(&records(), "size").is_err());
    }
}
