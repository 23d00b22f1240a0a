//!  src/util/debounce.rs
//!  ===================================================================
//!  Single-slot trailing-edge debouncer.
//!
//!  • One pending timer at most: every `submit` aborts the previous
//!    sleeper before spawning a new one.
//!  • Uses `tokio::time::sleep` inside a spawned task, so an aborted
//!    timer is simply dropped.
//!  • Each submission is stamped with a generation. A firing that was
//!    already queued on the channel when a newer submission (or a
//!    cancel) happened carries an old generation and is refused by
//!    `accept`.

use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, trace};

/* ======================== DebounceConfig ============================ */

#[derive(Debug, Clone)]
pub struct DebounceConfig {
    pub delay: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::search_input()
    }
}

impl DebounceConfig {
    /// Quick config for search input debouncing
    #[must_use]
    pub const fn search_input() -> Self {
        Self {
            delay: Duration::from_millis(300),
        }
    }

    #[must_use]
    pub const fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

/* ============================ Debouncer ============================ */

/// Value delivered once the quiet period elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub generation: u64,
    pub value: T,
}

/// Debounces values of `T` and delivers them as `E` on an existing channel.
pub struct Debouncer<T, E> {
    cfg: DebounceConfig,
    tx: mpsc::UnboundedSender<E>,
    wrap: fn(Fired<T>) -> E,
    sleeper: Option<JoinHandle<()>>,
    generation: u64,
    pending: bool,
}

impl<T: Send + 'static, E: Send + 'static> Debouncer<T, E> {
    #[must_use]
    pub fn new(cfg: DebounceConfig, tx: mpsc::UnboundedSender<E>, wrap: fn(Fired<T>) -> E) -> Self {
        Self {
            cfg,
            tx,
            wrap,
            sleeper: None,
            generation: 0,
            pending: false,
        }
    }

    /// Restart the quiet period with `value` as the trailing event.
    /// Must be called from within a Tokio runtime.
    pub fn submit(&mut self, value: T) -> u64 {
        self.abort_sleeper();
        self.generation += 1;
        self.pending = true;

        let generation = self.generation;
        let delay = self.cfg.delay;
        let tx = self.tx.clone();
        let wrap = self.wrap;

        trace!("debouncer armed, generation {}", generation);
        self.sleeper = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(wrap(Fired { generation, value }));
        }));

        generation
    }

    /// Drop the pending event, if any. Firings already queued become stale.
    pub fn cancel(&mut self) {
        if self.pending {
            debug!("debouncer cancelled at generation {}", self.generation);
        }
        self.abort_sleeper();
        self.generation += 1;
        self.pending = false;
    }

    /// Claim a delivered firing. Only the newest pending generation is
    /// accepted, and only once.
    pub fn accept(&mut self, generation: u64) -> bool {
        if self.pending && generation == self.generation {
            self.pending = false;
            self.sleeper = None;
            true
        } else {
            trace!(
                "debouncer refused generation {} (current {})",
                generation, self.generation
            );
            false
        }
    }

    /// True between `submit` and the matching `accept`/`cancel`.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.cfg.delay
    }

    fn abort_sleeper(&mut self) {
        if let Some(handle) = self.sleeper.take() {
            handle.abort();
        }
    }
}

impl<T, E> Drop for Debouncer<T, E> {
    fn drop(&mut self) {
        if let Some(handle) = self.sleeper.take() {
            handle.abort();
        }
    }
}
