use serde::Serialize;

use super::history::SeriesPoint;
use super::process::AggregatedRow;

/// Host-wide utilization as read by a [`SystemSampler`](super::collector::SystemSampler).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostReading {
    pub cpu_percent: f64,
    pub memory_percent: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSample {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub tick_index: u64,
}

/// Everything published for one successful tick. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    pub tick_index: u64,
    pub rows: Vec<AggregatedRow>,
    pub system: SystemSample,
    pub cpu_series: Vec<SeriesPoint>,
    pub mem_series: Vec<SeriesPoint>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickError {
    /// Index the failed tick would have taken; it is not consumed.
    pub tick_index: u64,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TickEvent {
    Sample(TickReport),
    Error(TickError),
}

impl TickEvent {
    pub fn tick_index(&self) -> u64 {
        match self {
            TickEvent::Sample(report) => report.tick_index,
            TickEvent::Error(err) => err.tick_index,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TickEvent::Error(_))
    }
}
