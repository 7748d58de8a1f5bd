//! Wait-event activity over time.
//!
//! The server samples the statement's average active sessions per wait
//! event at regular intervals. Each event in the session series becomes an
//! [`EventTrend`]: its values in time order, colored like its session bars.

use super::series::CategorySeries;
use crate::source::Snapshot;

/// Highest level a value can be quantized to (levels are `0..=MAX_LEVEL`).
pub const MAX_LEVEL: u8 = 7;

/// One wait event's activity across the sampled snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct EventTrend {
    pub label: String,
    pub color: String,
    /// Average active sessions, one value per snapshot, oldest first.
    pub values: Vec<f64>,
    pub peak: f64,
}

impl EventTrend {
    /// Most recent value, 0 when there are no snapshots.
    pub fn latest(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }

    /// Values quantized to `0..=MAX_LEVEL` against `scale`.
    pub fn levels(&self, scale: f64) -> Vec<u8> {
        self.values.iter().map(|&v| level(v, scale)).collect()
    }
}

/// Quantize `value` against `scale`. A non-positive scale yields 0.
pub fn level(value: f64, scale: f64) -> u8 {
    if !(scale > 0.0) || !(value > 0.0) {
        return 0;
    }
    let level = (value / scale * MAX_LEVEL as f64).round();
    level.min(MAX_LEVEL as f64) as u8
}

/// Build one trend per category, in series order.
///
/// Events that were never active in any snapshot are left out. `snapshots`
/// must already be in time order.
pub fn event_trends(series: &CategorySeries, snapshots: &[Snapshot]) -> Vec<EventTrend> {
    series
        .iter()
        .filter_map(|category| {
            let values: Vec<f64> = snapshots.iter().map(|s| s.value(&category.label)).collect();
            let peak = values.iter().copied().fold(0.0, f64::max);
            (peak > 0.0).then(|| EventTrend {
                label: category.label.clone(),
                color: category.color.clone(),
                values,
                peak,
            })
        })
        .collect()
}

/// Shared scale for a set of trends: the highest peak among them.
///
/// Using one scale keeps the heights of different events comparable.
pub fn common_scale(trends: &[EventTrend]) -> f64 {
    trends.iter().map(|t| t.peak).fold(0.0, f64::max)
}
