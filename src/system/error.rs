use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("OS introspection provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Process vanished during read (PID {pid})")]
    ProcessVanished { pid: u32 },

    #[error("Permission denied reading process (PID {pid})")]
    PermissionDenied { pid: u32 },

    #[error("Time series capacity must be positive, got {0}")]
    InvalidCapacity(usize),
}

impl SampleError {
    /// True for failures scoped to a single process, which samplers skip
    /// instead of failing the whole tick.
    pub fn is_per_process(&self) -> bool {
        matches!(
            self,
            SampleError::ProcessVanished { .. } | SampleError::PermissionDenied { .. }
        )
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Scheduler is already running")]
    AlreadyRunning,

    #[error("Scheduler is not running")]
    NotRunning,

    #[error("Tick worker terminated: {0}")]
    TaskFailed(String),
}
