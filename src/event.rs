use std::sync::Arc;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::engine::scheduler::TickReceiver;
use crate::system::snapshot::TickEvent;

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick(Arc<TickEvent>),
    Resize,
}

/// Merges terminal input with engine publications into one stream.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(mut ticks: TickReceiver) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();

        let task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            let mut engine_open = true;

            loop {
                tokio::select! {
                    maybe_event = reader.next() => {
                        match maybe_event {
                            Some(Ok(evt)) => {
                                let mapped = match evt {
                                    CrosstermEvent::Key(key) => Some(Event::Key(key)),
                                    CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                                    _ => None,
                                };
                                if let Some(e) = mapped
                                    && tx.send(e).is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(_)) => break,
                            None => break,
                        }
                    }
                    changed = ticks.changed(), if engine_open => {
                        if changed.is_err() {
                            engine_open = false;
                            continue;
                        }
                        let latest = ticks.borrow_and_update().clone();
                        if let Some(tick) = latest
                            && tx.send(Event::Tick(tick)).is_err()
                        {
                            break;
                        }
                    }
                }
            }
        });

        Self { rx, _task: task }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
