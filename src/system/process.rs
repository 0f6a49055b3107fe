use serde::Serialize;

/// Processes with a PID below this are folded into the [`SYSTEM_GROUP`] row.
pub const SYSTEM_PID_THRESHOLD: u32 = 1000;

/// Grouping name shared by all low-PID host/kernel processes.
pub const SYSTEM_GROUP: &str = "SYSTEM";

/// One process as read from the OS on a single tick.
///
/// `cpu_percent` is per-core utilization since the previous read of the same
/// process (so it can exceed 100 on multi-core hosts); `memory_percent` is the
/// resident set as a share of total physical memory.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub status: String,
}

/// All processes sharing a grouping name, folded into one row.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedRow {
    pub name: String,
    pub representative_pid: u32,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    /// Status of the last member folded in. Indicative only for merged rows.
    pub status: String,
    pub member_count: usize,
}

impl AggregatedRow {
    pub fn seed(name: String, sample: ProcessSample) -> Self {
        AggregatedRow {
            name,
            representative_pid: sample.pid,
            cpu_percent: sample.cpu_percent,
            memory_percent: sample.memory_percent,
            status: sample.status,
            member_count: 1,
        }
    }

    pub fn fold(&mut self, sample: ProcessSample) {
        self.cpu_percent += sample.cpu_percent;
        self.memory_percent += sample.memory_percent;
        self.status = sample.status;
        self.member_count += 1;
    }
}
