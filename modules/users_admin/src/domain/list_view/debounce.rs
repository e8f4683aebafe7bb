//! Time-windowed coalescing of a fast input stream.
//!
//! Values written through an [`InputHandle`] are collected by a [`Debouncer`],
//! which forwards only the newest value once no input arrived for the
//! quiescence interval, and never forwards the same value twice in a row.

use std::time::Duration;
use tokio::sync::mpsc;

/// Producer side; cheap to clone, one per input widget.
#[derive(Debug, Clone)]
pub struct InputHandle<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> InputHandle<T> {
    /// Returns `false` once the debouncer is gone.
    pub fn send(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}

/// Consumer side of the coalescing stage.
#[derive(Debug)]
pub struct Debouncer<T> {
    rx: mpsc::UnboundedReceiver<T>,
    quiet: Duration,
    last_forwarded: Option<T>,
}

pub fn debouncer<T>(quiet: Duration) -> (InputHandle<T>, Debouncer<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        InputHandle { tx },
        Debouncer {
            rx,
            quiet,
            last_forwarded: None,
        },
    )
}

impl<T: Clone + PartialEq> Debouncer<T> {
    /// Wait for the next effective value.
    ///
    /// Resolves to `None` when every input handle is dropped and nothing is
    /// pending. A burst cut short by the inputs closing is still flushed.
    pub async fn next(&mut self) -> Option<T> {
        loop {
            let mut pending = self.rx.recv().await?;
            loop {
                tokio::select! {
                    more = self.rx.recv() => match more {
                        Some(v) => pending = v,
                        None => break,
                    },
                    _ = tokio::time::sleep(self.quiet) => break,
                }
            }

            if self.last_forwarded.as_ref() != Some(&pending) {
                self.last_forwarded = Some(pending.clone());
                return Some(pending);
            }
        }
    }

    /// Record a value set programmatically so that typing it again is not
    /// treated as a change.
    pub fn mark_forwarded(&mut self, value: T) {
        self.last_forwarded = Some(value);
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }
}
