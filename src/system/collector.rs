use std::time::{Duration, Instant};

use sysinfo::{
    MINIMUM_CPU_UPDATE_INTERVAL, Process, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate,
    System,
};
use tracing::trace;

use super::error::SampleError;
use super::process::ProcessSample;
use super::snapshot::HostReading;

/// Source of the per-process table, read once per tick.
pub trait ProcessSampler {
    fn sample(&mut self) -> Result<Vec<ProcessSample>, SampleError>;
}

/// Source of host-wide CPU and memory utilization, read once per tick.
///
/// Implementations must not sleep to compute CPU usage.
pub trait SystemSampler {
    fn sample(&mut self) -> Result<HostReading, SampleError>;
}

/// Keep every readable sample, drop per-process failures, and abort on
/// anything that affects the whole provider.
pub fn collect_readable<I>(reads: I) -> Result<Vec<ProcessSample>, SampleError>
where
    I: IntoIterator<Item = Result<ProcessSample, SampleError>>,
{
    let mut samples = Vec::new();
    for read in reads {
        match read {
            Ok(sample) => samples.push(sample),
            Err(err) if err.is_per_process() => trace!(%err, "skipping process"),
            Err(err) => return Err(err),
        }
    }
    Ok(samples)
}

fn process_refresh_kind() -> ProcessRefreshKind {
    ProcessRefreshKind::nothing().with_memory().with_cpu()
}

fn ensure_supported() -> Result<(), SampleError> {
    if sysinfo::IS_SUPPORTED_SYSTEM {
        Ok(())
    } else {
        Err(SampleError::ProviderUnavailable(format!(
            "process introspection is not supported on {}",
            std::env::consts::OS
        )))
    }
}

pub fn status_label(status: ProcessStatus) -> &'static str {
    match status {
        ProcessStatus::Run => "running",
        ProcessStatus::Sleep => "sleeping",
        ProcessStatus::Idle => "idle",
        ProcessStatus::Stop => "stopped",
        ProcessStatus::Zombie => "zombie",
        ProcessStatus::Tracing => "tracing-stop",
        ProcessStatus::Dead => "dead",
        ProcessStatus::Wakekill => "wake-kill",
        ProcessStatus::Waking => "waking",
        ProcessStatus::Parked => "parked",
        ProcessStatus::LockBlocked => "locked",
        ProcessStatus::UninterruptibleDiskSleep => "disk-sleep",
        _ => "unknown",
    }
}

fn read_process(pid: u32, process: &Process, total_memory: u64) -> Result<ProcessSample, SampleError> {
    if matches!(process.status(), ProcessStatus::Dead) {
        return Err(SampleError::ProcessVanished { pid });
    }

    let name = process.name().to_string_lossy().to_string();
    // The provider hands back an empty identity for processes it may not inspect.
    if name.is_empty() {
        return Err(SampleError::PermissionDenied { pid });
    }

    let memory_percent = process.memory() as f64 / total_memory as f64 * 100.0;

    Ok(ProcessSample {
        pid,
        name,
        cpu_percent: f64::from(process.cpu_usage()),
        memory_percent,
        status: status_label(process.status()).to_string(),
    })
}

/// Process table reader backed by `sysinfo`.
///
/// CPU percent is per core, measured between consecutive calls; the first
/// observation of a process reports 0.
pub struct ProcessCollector {
    sys: System,
}

impl Default for ProcessCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessCollector {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_processes_specifics(ProcessesToUpdate::All, true, process_refresh_kind());
        ProcessCollector { sys }
    }
}

impl ProcessSampler for ProcessCollector {
    fn sample(&mut self) -> Result<Vec<ProcessSample>, SampleError> {
        ensure_supported()?;

        self.sys.refresh_memory();
        self.sys
            .refresh_processes_specifics(ProcessesToUpdate::All, true, process_refresh_kind());

        let total_memory = self.sys.total_memory();
        if total_memory == 0 {
            return Err(SampleError::ProviderUnavailable(
                "total physical memory reported as zero".to_string(),
            ));
        }
        if self.sys.processes().is_empty() {
            return Err(SampleError::ProviderUnavailable(
                "process table is empty".to_string(),
            ));
        }

        collect_readable(
            self.sys
                .processes()
                .iter()
                .filter(|(_, process)| process.thread_kind().is_none())
                .map(|(pid, process)| read_process(pid.as_u32(), process, total_memory)),
        )
    }
}

/// Host-wide CPU and memory reader backed by `sysinfo`.
///
/// CPU usage is the delta since the previous call, so the constructor primes
/// one refresh and `sample` never blocks. A reading taken before
/// [`HostCollector::warmup`] has elapsed covers too short a window to be
/// reliable; callers should hold their first sample back by that much.
pub struct HostCollector {
    sys: System,
    primed_at: Instant,
}

impl Default for HostCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl HostCollector {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_usage();
        HostCollector {
            sys,
            primed_at: Instant::now(),
        }
    }

    /// Time left before the first CPU delta is meaningful.
    pub fn warmup(&self) -> Duration {
        MINIMUM_CPU_UPDATE_INTERVAL.saturating_sub(self.primed_at.elapsed())
    }
}

impl SystemSampler for HostCollector {
    fn sample(&mut self) -> Result<HostReading, SampleError> {
        ensure_supported()?;

        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();

        if self.sys.cpus().is_empty() {
            return Err(SampleError::ProviderUnavailable(
                "no CPUs reported by the host".to_string(),
            ));
        }
        let total_memory = self.sys.total_memory();
        if total_memory == 0 {
            return Err(SampleError::ProviderUnavailable(
                "total physical memory reported as zero".to_string(),
            ));
        }

        Ok(HostReading {
            cpu_percent: f64::from(self.sys.global_cpu_usage()),
            memory_percent: self.sys.used_memory() as f64 / total_memory as f64 * 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(pid: u32) -> Result<ProcessSample, SampleError> {
        Ok(ProcessSample {
            pid,
            name: format!("p{pid}"),
            cpu_percent: 1.0,
            memory_percent: 1.0,
            status: "running".into(),
        })
    }

    #[test]
    fn per_process_failures_are_skipped() {
        let reads = vec![
            ok(1001),
            Err(SampleError::ProcessVanished { pid: 1002 }),
            ok(1003),
            Err(SampleError::PermissionDenied { pid: 1004 }),
        ];
        let samples = collect_readable(reads).unwrap();
        let pids: Vec<u32> = samples.iter().map(|s| s.pid).collect();
        assert_eq!(pids, vec![1001, 1003]);
    }

    #[test]
    fn provider_failure_aborts_the_sample() {
        let reads = vec![
            ok(1001),
            Err(SampleError::ProviderUnavailable("gone".into())),
            ok(1003),
        ];
        assert!(matches!(
            collect_readable(reads),
            Err(SampleError::ProviderUnavailable(_))
        ));
    }

    #[test]
    fn status_labels_use_lowercase_vocabulary() {
        assert_eq!(status_label(ProcessStatus::Run), "running");
        assert_eq!(status_label(ProcessStatus::Sleep), "sleeping");
        assert_eq!(status_label(ProcessStatus::Zombie), "zombie");
    }
}
