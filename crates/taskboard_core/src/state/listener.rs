//! Generic ordered listener registry.
//!
//! # Invariants
//! - Delivery order equals subscription order.
//! - Each listener receives its own copy of the broadcast items.
//! - A panicking listener is contained; later listeners still run.
//! - The listener list is copied before delivery, so listeners may subscribe
//!   or trigger nested broadcasts without invalidating the iteration.

use log::error;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

/// Subscriber callback receiving an owned snapshot.
pub type Listener<T> = Rc<dyn Fn(Vec<T>)>;

/// Delivery summary for one broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotifyReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Ordered subscriber list, generic over the broadcast item type.
pub struct ListenerRegistry<T> {
    listeners: RefCell<Vec<Listener<T>>>,
}

impl<T> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl<T: Clone> ListenerRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one listener. No dedup and no unsubscribe.
    pub fn subscribe(&self, listener: impl Fn(Vec<T>) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Broadcasts `items` to every listener registered before this call.
    pub(crate) fn notify_all(&self, items: &[T]) -> NotifyReport {
        let listeners: Vec<Listener<T>> = self.listeners.borrow().clone();
        let mut report = NotifyReport::default();

        for (index, listener) in listeners.iter().enumerate() {
            let snapshot = items.to_vec();
            match panic::catch_unwind(AssertUnwindSafe(|| listener(snapshot))) {
                Ok(()) => report.delivered += 1,
                Err(_) => {
                    report.failed += 1;
                    error!(
                        "event=listener_failed module=state status=error index={} listeners={}",
                        index,
                        listeners.len()
                    );
                }
            }
        }

        report
    }
}
