//! Process-wide cap on live synthesis threads.
//!
//! A fast clock wired to a buzzer's enable pin toggles it thousands of times
//! per second. Each rising edge after the previous worker has exited asks for
//! a new thread, so without a ceiling the process can run out of threads.
//! The budget admits a worker only while fewer than `cap` are alive.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use crate::DEFAULT_THREAD_CAP;

#[derive(Debug)]
struct Counter {
    live: AtomicUsize,
    cap: usize,
}

/// Shared live-thread counter with a fixed cap.
///
/// Clones share the same counter.
#[derive(Debug, Clone)]
pub struct ThreadBudget {
    counter: Arc<Counter>,
}

impl ThreadBudget {
    pub fn new(cap: usize) -> Self {
        Self {
            counter: Arc::new(Counter {
                live: AtomicUsize::new(0),
                cap,
            }),
        }
    }

    /// The budget used by default launchers, capped at `DEFAULT_THREAD_CAP`
    pub fn global() -> Self {
        static GLOBAL: OnceLock<ThreadBudget> = OnceLock::new();
        GLOBAL
            .get_or_init(|| ThreadBudget::new(DEFAULT_THREAD_CAP))
            .clone()
    }

    /// Reserve a slot for one worker, or `None` if the cap is reached.
    ///
    /// The check and the increment happen in one atomic step, so concurrent
    /// callers can never overshoot the cap.
    pub fn try_acquire(&self) -> Option<BudgetSlot> {
        let cap = self.counter.cap;
        self.counter
            .live
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |live| {
                (live < cap).then_some(live + 1)
            })
            .ok()
            .map(|_| BudgetSlot {
                counter: self.counter.clone(),
            })
    }

    /// Workers currently holding a slot
    pub fn live(&self) -> usize {
        self.counter.live.load(Ordering::Acquire)
    }

    pub fn cap(&self) -> usize {
        self.counter.cap
    }
}

/// One admitted worker. Dropping the slot (when the worker exits) frees it.
#[derive(Debug)]
pub struct BudgetSlot {
    counter: Arc<Counter>,
}

impl Drop for BudgetSlot {
    fn drop(&mut self) {
        self.counter.live.fetch_sub(1, Ordering::AcqRel);
    }
}
