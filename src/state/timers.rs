//! Timer Queue - Cooperative, single-threaded delayed callbacks
//!
//! The timing facility behind the rotating text and the copy feedback.
//! Time is virtual: nothing fires until the owner calls [`TimerQueue::advance`].
//! The terminal host advances by real elapsed time every frame; tests advance
//! by exact milliseconds.
//!
//! # Pattern
//!
//! - Each component owns the id of its one pending timer
//! - Scheduling the next tick happens inside the current tick's callback
//! - Teardown cancels the pending id, after which nothing of that component fires
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::state::timers::TimerQueue;
//!
//! let timers = TimerQueue::new();
//! let id = timers.schedule(Duration::from_millis(60), || println!("tick"));
//!
//! timers.advance(Duration::from_millis(60)); // prints "tick"
//! timers.cancel(id); // no-op, already fired
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

/// Handle of a scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId {
    deadline: Duration,
    seq: u64,
}

impl TimerId {
    /// When the timer is due, on the queue's clock.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

type Callback = Box<dyn FnOnce()>;

struct QueueInner {
    now: Duration,
    next_seq: u64,
    /// Ordered by (deadline, seq): due order, ties in scheduling order.
    pending: BTreeMap<TimerId, Callback>,
}

// =============================================================================
// TIMER QUEUE
// =============================================================================

/// Instance-scoped queue of delayed callbacks.
///
/// Callbacks run with no borrow of the queue held, so they may freely
/// schedule or cancel timers.
pub struct TimerQueue {
    inner: RefCell<QueueInner>,
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerQueue {
    pub fn new() -> Self {
        Self {
            inner: RefCell::new(QueueInner {
                now: Duration::ZERO,
                next_seq: 0,
                pending: BTreeMap::new(),
            }),
        }
    }

    /// Current time on the queue's clock.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Run `callback` once, `delay` after now.
    pub fn schedule<F>(&self, delay: Duration, callback: F) -> TimerId
    where
        F: FnOnce() + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = TimerId {
            deadline: inner.now + delay,
            seq: inner.next_seq,
        };
        inner.next_seq += 1;
        inner.pending.insert(id, Box::new(callback));
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was
    /// cancelled before.
    pub fn cancel(&self, id: TimerId) -> bool {
        self.inner.borrow_mut().pending.remove(&id).is_some()
    }

    /// Whether `id` is still waiting to fire.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.inner.borrow().pending.contains_key(&id)
    }

    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner.borrow().pending.keys().next().map(|id| id.deadline)
    }

    /// Move the clock forward by `delta`, firing every timer that comes due.
    ///
    /// The clock steps to each deadline before its callback runs, so a
    /// callback scheduling a follow-up sees the correct "now". Follow-ups due
    /// within the window fire in the same call. Returns the number fired.
    pub fn advance(&self, delta: Duration) -> usize {
        let target = self.now() + delta;
        let mut fired = 0;

        loop {
            let due = {
                let mut inner = self.inner.borrow_mut();
                let next = inner.pending.keys().next().copied();
                match next {
                    Some(id) if id.deadline <= target => {
                        inner.now = id.deadline;
                        inner.pending.remove(&id)
                    }
                    _ => None,
                }
            };

            match due {
                Some(callback) => {
                    callback();
                    fired += 1;
                }
                None => break,
            }
        }

        self.inner.borrow_mut().now = target;
        fired
    }

    /// Drop every pending timer without running it.
    pub fn clear(&self) {
        self.inner.borrow_mut().pending.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_at_deadline() {
        let timers = TimerQueue::new();
        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();

        timers.schedule(ms(10), move || fired_clone.set(true));

        timers.advance(ms(9));
        assert!(!fired.get());

        timers.advance(ms(1));
        assert!(fired.get());
        assert_eq!(timers.pending(), 0);
        assert_eq!(timers.now(), ms(10));
    }

    #[test]
    fn test_cancel_prevents_fire() {
        let timers = TimerQueue::new();
        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();

        let id = timers.schedule(ms(10), move || fired_clone.set(true));
        assert!(timers.is_pending(id));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));

        timers.advance(ms(100));
        assert!(!fired.get());
    }

    #[test]
    fn test_order_by_deadline_then_schedule() {
        let timers = TimerQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, name) in [(20, "c"), (10, "a"), (10, "b")] {
            let log = log.clone();
            timers.schedule(ms(delay), move || log.borrow_mut().push(name));
        }

        assert_eq!(timers.next_deadline(), Some(ms(10)));
        assert_eq!(timers.advance(ms(20)), 3);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_chained_schedule_within_window() {
        let timers = Rc::new(TimerQueue::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let timers_clone = timers.clone();
        let seen_clone = seen.clone();
        timers.schedule(ms(10), move || {
            seen_clone.borrow_mut().push(timers_clone.now());
            let seen_inner = seen_clone.clone();
            let timers_inner = timers_clone.clone();
            timers_clone.schedule(ms(10), move || {
                seen_inner.borrow_mut().push(timers_inner.now());
            });
        });

        timers.advance(ms(25));
        assert_eq!(*seen.borrow(), vec![ms(10), ms(20)]);
        assert_eq!(timers.now(), ms(25));
    }

    #[test]
    fn test_zero_delay_fires_on_zero_advance() {
        let timers = TimerQueue::new();
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();

        timers.schedule(Duration::ZERO, move || count_clone.set(count_clone.get() + 1));
        timers.advance(Duration::ZERO);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_clear() {
        let timers = TimerQueue::new();
        timers.schedule(ms(1), || {});
        timers.schedule(ms(2), || {});
        timers.clear();
        assert_eq!(timers.pending(), 0);
        assert_eq!(timers.advance(ms(10)), 0);
    }
}
