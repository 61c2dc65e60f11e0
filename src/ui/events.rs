use std::io;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
}

/// Reads terminal input on a dedicated thread and interleaves ticks.
///
/// The thread stops once the receiving side is dropped.
pub struct EventHandler {
    rx: Receiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("input".to_string())
            .spawn(move || {
                let mut last_tick = Instant::now();
                loop {
                    let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                    match event::poll(timeout) {
                        Ok(true) => {
                            let sent = match event::read() {
                                Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)),
                                Ok(Event::Resize(cols, rows)) => {
                                    tx.send(AppEvent::Resize(cols, rows))
                                }
                                Ok(_) => Ok(()),
                                Err(err) => {
                                    tracing::error!(error = %err, "Failed to read terminal event");
                                    break;
                                }
                            };
                            if sent.is_err() {
                                break;
                            }
                        }
                        Ok(false) => {}
                        Err(err) => {
                            tracing::error!(error = %err, "Failed to poll terminal events");
                            break;
                        }
                    }

                    if last_tick.elapsed() >= tick_rate {
                        if tx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                        last_tick = Instant::now();
                    }
                }
            })?;

        Ok(Self { rx })
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}
