//! Clipboard Module - Copy support and "copied" feedback
//!
//! The clipboard itself is an internal buffer (no system clipboard access).
//! [`CopyFeedback`] puts text on it and raises a `copied` flag that falls back
//! after a fixed window, the way the contact card confirms a copied address.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::state::clipboard::{self, CopyFeedback};
//!
//! let feedback = CopyFeedback::new(Duration::from_millis(1600), timers.clone());
//! feedback.copy("someone@example.com");
//!
//! assert!(feedback.is_copied());
//! assert_eq!(clipboard::paste().as_deref(), Some("someone@example.com"));
//!
//! timers.advance(Duration::from_millis(1600));
//! assert!(!feedback.is_copied());
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use spark_signals::{signal, Signal};
use tracing::debug;

use super::timers::{TimerId, TimerQueue};

// =============================================================================
// Internal Buffer
// =============================================================================

thread_local! {
    static CLIPBOARD_BUFFER: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Copy text to the clipboard. Empty strings are ignored.
pub fn copy(text: &str) {
    if text.is_empty() {
        return;
    }

    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = Some(text.to_string());
    });
}

/// Most recently copied text.
pub fn paste() -> Option<String> {
    CLIPBOARD_BUFFER.with(|buf| buf.borrow().clone())
}

pub fn clear() {
    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = None;
    });
}

pub fn has_content() -> bool {
    CLIPBOARD_BUFFER.with(|buf| buf.borrow().is_some())
}

// =============================================================================
// Copy Feedback
// =============================================================================

struct FeedbackInner {
    window: Duration,
    timers: Rc<TimerQueue>,
    copied: Signal<bool>,
    reset: Option<TimerId>,
}

/// Transient "copied" flag with a single pending reset timer.
pub struct CopyFeedback {
    inner: Rc<RefCell<FeedbackInner>>,
}

impl CopyFeedback {
    pub fn new(window: Duration, timers: Rc<TimerQueue>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(FeedbackInner {
                window,
                timers,
                copied: signal(false),
                reset: None,
            })),
        }
    }

    /// Copy `text` and raise the flag. A repeat copy restarts the window.
    pub fn copy(&self, text: &str) {
        copy(text);

        let (timers, previous, window, copied) = {
            let mut inner = self.inner.borrow_mut();
            (
                inner.timers.clone(),
                inner.reset.take(),
                inner.window,
                inner.copied.clone(),
            )
        };
        if let Some(id) = previous {
            timers.cancel(id);
        }

        let weak: Weak<RefCell<FeedbackInner>> = Rc::downgrade(&self.inner);
        let id = timers.schedule(window, move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let copied = {
                let mut inner = inner.borrow_mut();
                inner.reset = None;
                inner.copied.clone()
            };
            copied.set(false);
        });
        self.inner.borrow_mut().reset = Some(id);

        if !copied.get() {
            debug!("copied to clipboard");
            copied.set(true);
        }
    }

    pub fn is_copied(&self) -> bool {
        self.inner.borrow().copied.get()
    }

    pub fn copied_signal(&self) -> Signal<bool> {
        self.inner.borrow().copied.clone()
    }

    /// Cancel the pending reset and drop the flag.
    pub fn dispose(&self) {
        let (timers, pending, copied) = {
            let mut inner = self.inner.borrow_mut();
            (inner.timers.clone(), inner.reset.take(), inner.copied.clone())
        };
        if let Some(id) = pending {
            timers.cancel(id);
        }
        if copied.get() {
            copied.set(false);
        }
    }
}

impl Drop for CopyFeedback {
    fn drop(&mut self) {
        self.dispose();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn setup() -> (CopyFeedback, Rc<TimerQueue>) {
        clear();
        let timers = Rc::new(TimerQueue::new());
        (CopyFeedback::new(ms(1600), timers.clone()), timers)
    }

    #[test]
    fn test_copy_paste() {
        clear();
        assert!(paste().is_none());
        assert!(!has_content());

        copy("Hello 世界");
        assert_eq!(paste(), Some("Hello 世界".to_string()));
        assert_eq!(paste(), Some("Hello 世界".to_string()));
    }

    #[test]
    fn test_copy_empty_ignored() {
        clear();
        copy("Something");
        copy("");
        assert_eq!(paste(), Some("Something".to_string()));
    }

    #[test]
    fn test_feedback_window() {
        let (feedback, timers) = setup();

        feedback.copy("me@example.com");
        assert!(feedback.is_copied());
        assert_eq!(paste(), Some("me@example.com".to_string()));

        timers.advance(ms(1599));
        assert!(feedback.is_copied());

        timers.advance(ms(1));
        assert!(!feedback.is_copied());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_repeat_copy_restarts_window() {
        let (feedback, timers) = setup();

        feedback.copy("a@b.c");
        timers.advance(ms(1000));
        feedback.copy("a@b.c");
        assert_eq!(timers.pending(), 1);

        // the first reset would have fired at 1600
        timers.advance(ms(1000));
        assert!(feedback.is_copied());

        timers.advance(ms(600));
        assert!(!feedback.is_copied());
    }

    #[test]
    fn test_dispose_cancels_reset() {
        let (feedback, timers) = setup();
        feedback.copy("a@b.c");

        feedback.dispose();
        assert_eq!(timers.pending(), 0);
        assert!(!feedback.is_copied());
    }

    #[test]
    fn test_drop_cancels_reset() {
        let (feedback, timers) = setup();
        feedback.copy("a@b.c");
        drop(feedback);
        assert_eq!(timers.pending(), 0);
    }
}
