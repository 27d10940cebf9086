//! View state guarded against stale responses.
//!
//! A view starts a load with [`ViewState::begin`] and hands the resulting
//! [`Ticket`] back with the result. Only the most recently started load may
//! settle; earlier ones that finish late are dropped.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one load of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic load counter for one view.
#[derive(Debug, Default)]
pub struct ViewEpoch {
    current: AtomicU64,
}

impl ViewEpoch {
    pub fn begin(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }
}

/// The displayed value of a view plus its epoch.
#[derive(Debug, Default)]
pub struct ViewState<T> {
    epoch: ViewEpoch,
    value: Mutex<T>,
}

impl<T: Clone> ViewState<T> {
    pub fn new(initial: T) -> Self {
        Self {
            epoch: ViewEpoch::default(),
            value: Mutex::new(initial),
        }
    }

    pub fn begin(&self) -> Ticket {
        self.epoch.begin()
    }

    /// Stores `value` if `ticket` is still the latest load.
    ///
    /// Returns `false` when the result was stale and ignored.
    pub fn settle(&self, ticket: Ticket, value: T) -> bool {
        let mut current = self.value.lock().unwrap_or_else(|p| p.into_inner());
        if !self.epoch.is_current(ticket) {
            return false;
        }
        *current = value;
        true
    }

    /// Replaces the value unconditionally and invalidates in-flight loads.
    pub fn replace(&self, value: T) {
        let ticket = self.begin();
        self.settle(ticket, value);
    }

    pub fn get(&self) -> T {
        self.value.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}
