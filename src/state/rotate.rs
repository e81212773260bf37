//! Rotating Text - Typewriter loop over a fixed list of phrases
//!
//! Types a phrase one character at a time, holds it, deletes it, then moves on
//! to the next phrase, forever. All waiting is done through a [`TimerQueue`],
//! with exactly one pending tick per animator.
//!
//! # Pattern
//!
//! - `start()` schedules the first tick, each tick schedules the next
//! - `stop()` cancels the pending tick; nothing fires afterwards
//! - An empty phrase list never schedules anything
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::state::rotate::RotatingText;
//!
//! let timers = Rc::new(TimerQueue::new());
//! let hero = RotatingText::new(phrases, RotationTiming::default(), timers.clone());
//! hero.start();
//!
//! timers.advance(Duration::from_millis(120));
//! println!("{}{}", hero.text(), hero.caret());
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use spark_signals::{signal, Signal};
use tracing::debug;

use super::timers::{TimerId, TimerQueue};
use crate::config::RotationTiming;
use crate::types::{RotationPhase, RotationState};

/// Caret blink half-period.
const CARET_BLINK: Duration = Duration::from_millis(530);

/// Floor for every tick delay, so zero timings still let time advance.
const MIN_TICK: Duration = Duration::from_millis(1);

// =============================================================================
// ANIMATOR STATE
// =============================================================================

struct RotatorInner {
    phrases: Vec<String>,
    /// Character count per phrase.
    lengths: Vec<usize>,
    timing: RotationTiming,
    timers: Rc<TimerQueue>,
    state: RotationState,
    text: Signal<String>,
    pending: Option<TimerId>,
}

impl RotatorInner {
    fn visible_text(&self) -> String {
        self.phrases
            .get(self.state.phrase_index)
            .map(|phrase| phrase.chars().take(self.state.visible_length).collect())
            .unwrap_or_default()
    }

    /// Delay before the next tick, given the current phase.
    fn next_delay(&self) -> Duration {
        let len = self.lengths[self.state.phrase_index];
        let delay = match self.state.phase(len) {
            RotationPhase::Growing => self.timing.typing(),
            RotationPhase::Held => self.timing.pause(),
            RotationPhase::Shrinking => self.timing.deleting(),
        };
        delay.max(MIN_TICK)
    }
}

// =============================================================================
// ROTATING TEXT
// =============================================================================

/// Typewriter animator for the hero headline.
pub struct RotatingText {
    inner: Rc<RefCell<RotatorInner>>,
}

impl RotatingText {
    pub fn new(phrases: Vec<String>, timing: RotationTiming, timers: Rc<TimerQueue>) -> Self {
        let lengths = phrases.iter().map(|p| p.chars().count()).collect();
        Self {
            inner: Rc::new(RefCell::new(RotatorInner {
                phrases,
                lengths,
                timing,
                timers,
                state: RotationState::default(),
                text: signal(String::new()),
                pending: None,
            })),
        }
    }

    /// Begin animating. No-op if already running or if there are no phrases.
    pub fn start(&self) {
        {
            let inner = self.inner.borrow();
            if inner.pending.is_some() {
                return;
            }
            if inner.phrases.is_empty() {
                debug!("no phrases, rotating text stays inert");
                return;
            }
        }
        schedule_next(&self.inner);
    }

    /// Cancel the pending tick. The displayed text freezes where it is.
    pub fn stop(&self) {
        let (timers, pending) = {
            let mut inner = self.inner.borrow_mut();
            (inner.timers.clone(), inner.pending.take())
        };
        if let Some(id) = pending {
            timers.cancel(id);
        }
    }

    /// Back to the first phrase with nothing typed, then start again.
    pub fn restart(&self) {
        self.stop();
        let text = {
            let mut inner = self.inner.borrow_mut();
            inner.state.reset();
            inner.text.clone()
        };
        text.set(String::new());
        self.start();
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().pending.is_some()
    }

    /// Currently visible part of the current phrase.
    pub fn text(&self) -> String {
        self.inner.borrow().visible_text()
    }

    pub fn state(&self) -> RotationState {
        self.inner.borrow().state
    }

    /// Reactive view of the visible text.
    pub fn text_signal(&self) -> Signal<String> {
        self.inner.borrow().text.clone()
    }

    /// Blinking caret glyph, derived from the queue clock. Empty while inert.
    pub fn caret(&self) -> &'static str {
        let inner = self.inner.borrow();
        if inner.phrases.is_empty() {
            return "";
        }
        let phase = inner.timers.now().as_millis() / CARET_BLINK.as_millis();
        if phase % 2 == 0 { "|" } else { " " }
    }
}

impl Drop for RotatingText {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// TICKS
// =============================================================================

fn schedule_next(inner: &Rc<RefCell<RotatorInner>>) {
    let (timers, delay) = {
        let guard = inner.borrow();
        (guard.timers.clone(), guard.next_delay())
    };
    let weak = Rc::downgrade(inner);
    let id = timers.schedule(delay, move || tick(&weak));
    inner.borrow_mut().pending = Some(id);
}

fn tick(weak: &Weak<RefCell<RotatorInner>>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };

    let (text, visible) = {
        let mut guard = inner.borrow_mut();
        let guard = &mut *guard;
        guard.pending = None;
        let before = guard.state.phrase_index;
        guard.state.tick(&guard.lengths);
        if guard.state.phrase_index != before {
            debug!(phrase = guard.state.phrase_index, "rotating to next phrase");
        }
        (guard.text.clone(), guard.visible_text())
    };

    if text.get() != visible {
        text.set(visible);
    }
    schedule_next(&inner);
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn setup(phrases: &[&str], timing: RotationTiming) -> (RotatingText, Rc<TimerQueue>) {
        let timers = Rc::new(TimerQueue::new());
        let phrases = phrases.iter().map(|p| p.to_string()).collect();
        (RotatingText::new(phrases, timing, timers.clone()), timers)
    }

    #[test]
    fn test_hi_yo_timeline() {
        let (hero, timers) = setup(&["Hi", "Yo"], RotationTiming::new(10, 10, 50));
        hero.start();
        assert_eq!(hero.text(), "");

        timers.advance(ms(10));
        assert_eq!(hero.text(), "H");

        timers.advance(ms(10));
        assert_eq!(hero.text(), "Hi");

        // held until 70
        timers.advance(ms(49));
        assert_eq!(hero.text(), "Hi");
        assert!(!hero.state().is_deleting);

        timers.advance(ms(1));
        assert!(hero.state().is_deleting);
        assert_eq!(hero.text(), "Hi");

        timers.advance(ms(10));
        assert_eq!(hero.text(), "H");

        timers.advance(ms(10));
        assert_eq!(hero.text(), "");
        assert_eq!(hero.state().phrase_index, 1);
        assert!(!hero.state().is_deleting);

        timers.advance(ms(10));
        assert_eq!(hero.text(), "Y");
    }

    #[test]
    fn test_index_wraps_to_first_phrase() {
        let (hero, timers) = setup(&["Hi", "Yo"], RotationTiming::new(10, 10, 50));
        hero.start();

        // one phrase cycle: 2 typed + hold + 2 deleted = 20 + 50 + 20
        timers.advance(ms(90));
        assert_eq!(hero.state().phrase_index, 1);

        timers.advance(ms(90));
        assert_eq!(hero.state().phrase_index, 0);
        assert_eq!(hero.text(), "");
    }

    #[test]
    fn test_single_pending_timer() {
        let (hero, timers) = setup(&["abc"], RotationTiming::default());
        hero.start();
        hero.start();
        assert_eq!(timers.pending(), 1);

        for _ in 0..50 {
            timers.advance(ms(37));
            assert_eq!(timers.pending(), 1);
        }
    }

    #[test]
    fn test_zero_timings_tick_once_per_ms() {
        let (hero, timers) = setup(&["Hi"], RotationTiming::new(0, 0, 0));
        hero.start();

        // 5 ticks per cycle: H, Hi, hold, H, empty
        assert_eq!(timers.advance(ms(16)), 16);
        assert_eq!(timers.pending(), 1);
        assert_eq!(hero.text(), "H");

        timers.advance(ms(1));
        assert_eq!(hero.text(), "Hi");
    }

    #[test]
    fn test_empty_list_never_schedules() {
        let (hero, timers) = setup(&[], RotationTiming::default());
        hero.start();
        hero.restart();

        assert_eq!(timers.pending(), 0);
        assert!(!hero.is_running());
        assert_eq!(timers.advance(ms(10_000)), 0);
        assert_eq!(hero.text(), "");
        assert_eq!(hero.caret(), "");
    }

    #[test]
    fn test_empty_phrase_holds_at_zero() {
        let (hero, timers) = setup(&["", "ok"], RotationTiming::new(10, 10, 50));
        hero.start();

        timers.advance(ms(49));
        assert_eq!(hero.state().phrase_index, 0);

        timers.advance(ms(1));
        assert_eq!(hero.state().phrase_index, 1);

        timers.advance(ms(10));
        assert_eq!(hero.text(), "o");
    }

    #[test]
    fn test_stop_cancels_pending_tick() {
        let (hero, timers) = setup(&["Hello"], RotationTiming::default());
        hero.start();
        timers.advance(ms(120));
        assert_eq!(hero.text(), "He");

        hero.stop();
        assert_eq!(timers.pending(), 0);
        timers.advance(ms(5_000));
        assert_eq!(hero.text(), "He");
    }

    #[test]
    fn test_drop_cancels_pending_tick() {
        let (hero, timers) = setup(&["Hello"], RotationTiming::default());
        hero.start();
        drop(hero);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_restart_resets_cycle() {
        let (hero, timers) = setup(&["Hi", "Yo"], RotationTiming::new(10, 10, 50));
        hero.start();
        timers.advance(ms(100));
        assert_eq!(hero.text(), "Y");

        hero.restart();
        assert_eq!(hero.state(), RotationState::default());
        assert_eq!(hero.text_signal().get(), "");
        assert_eq!(timers.pending(), 1);

        timers.advance(ms(10));
        assert_eq!(hero.text(), "H");
    }

    #[test]
    fn test_multibyte_phrase_counts_chars() {
        let (hero, timers) = setup(&["héllo"], RotationTiming::new(10, 10, 50));
        hero.start();
        timers.advance(ms(20));
        assert_eq!(hero.text(), "hé");
        timers.advance(ms(30));
        assert_eq!(hero.text(), "héllo");
        assert_eq!(hero.state().visible_length, 5);
    }

    #[test]
    fn test_signal_follows_text() {
        let (hero, timers) = setup(&["Hi"], RotationTiming::new(10, 10, 50));
        let text = hero.text_signal();
        hero.start();

        timers.advance(ms(20));
        assert_eq!(text.get(), "Hi");
    }

    #[test]
    fn test_caret_blinks() {
        let (hero, timers) = setup(&["Hi"], RotationTiming::default());
        assert_eq!(hero.caret(), "|");
        timers.advance(CARET_BLINK);
        assert_eq!(hero.caret(), " ");
        timers.advance(CARET_BLINK);
        assert_eq!(hero.caret(), "|");
    }
}
