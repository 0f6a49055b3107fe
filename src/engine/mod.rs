pub mod scheduler;
pub mod ticker;

use tracing::{debug, warn};

use crate::system::aggregate::aggregate;
use crate::system::collector::{ProcessSampler, SystemSampler};
use crate::system::error::SampleError;
use crate::system::history::TimeSeries;
use crate::system::snapshot::{SystemSample, TickError, TickEvent, TickReport};

/// Single-owner sampling pipeline: everything one tick needs, run to
/// completion synchronously.
///
/// The two series and the tick counter are the only state kept between
/// ticks. Rows are rebuilt from scratch every time.
pub struct Engine<P, S> {
    processes: P,
    host: S,
    cpu_series: TimeSeries,
    mem_series: TimeSeries,
    next_tick: u64,
}

impl<P, S> Engine<P, S>
where
    P: ProcessSampler,
    S: SystemSampler,
{
    pub fn new(processes: P, host: S, history_capacity: usize) -> Result<Self, SampleError> {
        Ok(Engine {
            processes,
            host,
            cpu_series: TimeSeries::new(history_capacity)?,
            mem_series: TimeSeries::new(history_capacity)?,
            next_tick: 0,
        })
    }

    /// Index the next successful tick will be published under.
    pub fn next_tick_index(&self) -> u64 {
        self.next_tick
    }

    pub fn cpu_series(&self) -> &TimeSeries {
        &self.cpu_series
    }

    pub fn mem_series(&self) -> &TimeSeries {
        &self.mem_series
    }

    /// Run one sampling pass. A failed pass leaves the series and the tick
    /// counter untouched and comes back as [`TickEvent::Error`].
    pub fn tick(&mut self) -> TickEvent {
        let tick_index = self.next_tick;
        match self.run_tick(tick_index) {
            Ok(report) => {
                self.next_tick += 1;
                debug!(
                    tick_index,
                    rows = report.rows.len(),
                    cpu = report.system.cpu_percent,
                    mem = report.system.memory_percent,
                    "tick complete"
                );
                TickEvent::Sample(report)
            }
            Err(err) => {
                warn!(tick_index, %err, "tick failed");
                TickEvent::Error(TickError {
                    tick_index,
                    reason: err.to_string(),
                })
            }
        }
    }

    fn run_tick(&mut self, tick_index: u64) -> Result<TickReport, SampleError> {
        let samples = self.processes.sample()?;
        let rows = aggregate(samples);
        let host = self.host.sample()?;

        self.cpu_series.append(tick_index, host.cpu_percent);
        self.mem_series.append(tick_index, host.memory_percent);

        Ok(TickReport {
            tick_index,
            rows: rows.into_values().collect(),
            system: SystemSample {
                cpu_percent: host.cpu_percent,
                memory_percent: host.memory_percent,
                tick_index,
            },
            cpu_series: self.cpu_series.snapshot(),
            mem_series: self.mem_series.snapshot(),
        })
    }
}
