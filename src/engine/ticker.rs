use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};

/// Clock that decides when the next tick starts.
pub trait Ticker: Send + 'static {
    /// Resolves when the next tick is due.
    fn tick(&mut self) -> impl Future<Output = ()> + Send;
}

/// Wall-clock cadence. A tick that overruns the period is followed
/// immediately by the next one, with no backlog of missed ticks.
pub struct IntervalTicker {
    period: Duration,
    first_delay: Duration,
    interval: Option<Interval>,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            first_delay: Duration::ZERO,
            interval: None,
        }
    }

    /// Hold the first tick back by `delay`, measured from the first poll.
    pub fn first_tick_after(mut self, delay: Duration) -> Self {
        self.first_delay = delay;
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        let (period, first_delay) = (self.period, self.first_delay);
        let interval = self.interval.get_or_insert_with(|| {
            let start = tokio::time::Instant::now() + first_delay;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        interval.tick().await;
    }
}

/// Ticker driven by hand through a [`TickTrigger`], for deterministic runs.
pub struct ManualTicker {
    rx: mpsc::UnboundedReceiver<()>,
}

#[derive(Clone)]
pub struct TickTrigger {
    tx: mpsc::UnboundedSender<()>,
}

impl TickTrigger {
    /// Queue one tick. Returns false once the ticker is gone.
    pub fn fire(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

pub fn manual() -> (ManualTicker, TickTrigger) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ManualTicker { rx }, TickTrigger { tx })
}

impl Ticker for ManualTicker {
    async fn tick(&mut self) {
        if self.rx.recv().await.is_none() {
            // Every trigger dropped: no tick will ever be due again.
            std::future::pending::<()>().await;
        }
    }
}
