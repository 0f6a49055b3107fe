use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::Engine;
use super::ticker::{IntervalTicker, Ticker};
use crate::system::collector::{ProcessSampler, SystemSampler};
use crate::system::error::SchedulerError;
use crate::system::snapshot::{TickError, TickEvent};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// Latest published tick; `None` until the first tick completes.
pub type TickReceiver = watch::Receiver<Option<Arc<TickEvent>>>;

type Publisher = Arc<watch::Sender<Option<Arc<TickEvent>>>>;

enum State<P, S> {
    Idle(Engine<P, S>),
    Running {
        stop: watch::Sender<bool>,
        task: JoinHandle<Option<Engine<P, S>>>,
    },
    Lost,
}

/// Drives an [`Engine`] on a [`Ticker`] and publishes every tick.
///
/// Publication is latest-value: a subscriber that falls behind only sees
/// the newest event and never holds up the cadence. Ticks never overlap;
/// each one finishes before the ticker is polled again.
pub struct SampleScheduler<P, S> {
    state: State<P, S>,
    publisher: Publisher,
}

impl<P, S> SampleScheduler<P, S>
where
    P: ProcessSampler + Send + 'static,
    S: SystemSampler + Send + 'static,
{
    pub fn new(engine: Engine<P, S>) -> Self {
        let (publisher, _) = watch::channel(None);
        SampleScheduler {
            state: State::Idle(engine),
            publisher: Arc::new(publisher),
        }
    }

    pub fn subscribe(&self) -> TickReceiver {
        self.publisher.subscribe()
    }

    /// Invoke `callback` on a dedicated thread for each event it catches up
    /// with. Events published while the callback runs collapse to the newest.
    /// The callback never runs on the runtime, so it may block freely. The
    /// thread exits once the scheduler is dropped.
    pub fn subscribe_fn<F>(&self, mut callback: F) -> thread::JoinHandle<()>
    where
        F: FnMut(&TickEvent) + Send + 'static,
    {
        let mut rx = self.subscribe();
        thread::spawn(move || {
            while futures::executor::block_on(rx.changed()).is_ok() {
                let latest = rx.borrow_and_update().clone();
                if let Some(event) = latest {
                    callback(&*event);
                }
            }
        })
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// The engine, while idle.
    pub fn engine(&self) -> Option<&Engine<P, S>> {
        match &self.state {
            State::Idle(engine) => Some(engine),
            _ => None,
        }
    }

    pub fn start(&mut self, interval: Duration) -> Result<(), SchedulerError> {
        self.start_with(IntervalTicker::new(interval))
    }

    /// Start ticking on a caller-supplied clock. Must be called from within
    /// a tokio runtime.
    pub fn start_with<T: Ticker>(&mut self, ticker: T) -> Result<(), SchedulerError> {
        match std::mem::replace(&mut self.state, State::Lost) {
            State::Idle(engine) => {
                let (stop, stop_rx) = watch::channel(false);
                let next_tick = engine.next_tick_index();
                let task = tokio::spawn(run_ticks(
                    engine,
                    ticker,
                    stop_rx,
                    Arc::clone(&self.publisher),
                ));
                self.state = State::Running { stop, task };
                info!(next_tick, "sampling started");
                Ok(())
            }
            running @ State::Running { .. } => {
                self.state = running;
                Err(SchedulerError::AlreadyRunning)
            }
            State::Lost => Err(SchedulerError::TaskFailed(
                "engine was lost by an earlier failure".to_string(),
            )),
        }
    }

    /// Stop ticking. An in-flight tick is allowed to finish; once this
    /// returns no further tick will start. The engine, with its history
    /// and tick counter, is kept for a later `start`.
    pub async fn stop(&mut self) -> Result<(), SchedulerError> {
        match std::mem::replace(&mut self.state, State::Lost) {
            State::Running { stop, task } => {
                stop.send_replace(true);
                match task.await {
                    Ok(Some(engine)) => {
                        info!(next_tick = engine.next_tick_index(), "sampling stopped");
                        self.state = State::Idle(engine);
                        Ok(())
                    }
                    Ok(None) => Err(SchedulerError::TaskFailed(
                        "tick worker died".to_string(),
                    )),
                    Err(err) => Err(SchedulerError::TaskFailed(err.to_string())),
                }
            }
            idle @ State::Idle(_) => {
                self.state = idle;
                Err(SchedulerError::NotRunning)
            }
            State::Lost => Err(SchedulerError::TaskFailed(
                "engine was lost by an earlier failure".to_string(),
            )),
        }
    }
}

async fn run_ticks<P, S, T>(
    mut engine: Engine<P, S>,
    mut ticker: T,
    mut stop: watch::Receiver<bool>,
    publisher: Publisher,
) -> Option<Engine<P, S>>
where
    P: ProcessSampler + Send + 'static,
    S: SystemSampler + Send + 'static,
    T: Ticker,
{
    loop {
        tokio::select! {
            biased;
            _ = stop.wait_for(|stopped| *stopped) => break,
            _ = ticker.tick() => {}
        }
        if *stop.borrow() {
            break;
        }

        // OS reads block, so the pass runs off the async worker. A panic in
        // a sampler becomes an error tick and the engine is kept.
        let joined = tokio::task::spawn_blocking(move || {
            let event = match panic::catch_unwind(AssertUnwindSafe(|| engine.tick())) {
                Ok(event) => event,
                Err(payload) => {
                    let tick_index = engine.next_tick_index();
                    let reason = format!("sampler panicked: {}", panic_message(payload.as_ref()));
                    warn!(tick_index, %reason, "tick failed");
                    TickEvent::Error(TickError { tick_index, reason })
                }
            };
            (engine, event)
        })
        .await;

        match joined {
            Ok((returned, event)) => {
                engine = returned;
                publisher.send_replace(Some(Arc::new(event)));
            }
            Err(err) => {
                error!(%err, "tick worker died");
                return None;
            }
        }
    }
    Some(engine)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}
