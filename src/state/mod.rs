//! State Module - Runtime state of the site
//!
//! - **Nav** - Hero zone, active section, menu, scrolled styling
//! - **Rotate** - Typewriter loop of the hero headline
//! - **Panels** - Tech-vault skill panel, experience drawer
//! - **Clipboard** - Internal clipboard and copy feedback
//! - **Timers** - Virtual-time timer queue everything waits on
//! - **Viewport** - Region visibility and scroll notifications
//! - **Keyboard** - Event types, dispatch, handler registry
//! - **Input** - crossterm event conversion and polling

pub mod clipboard;
pub mod input;
pub mod keyboard;
pub mod nav;
pub mod panels;
pub mod rotate;
pub mod timers;
pub mod viewport;

pub use clipboard::CopyFeedback;
pub use keyboard::{
    dispatch as dispatch_keyboard, last_event, last_key, on as on_keyboard, on_key,
    reset_keyboard_state, KeyState, KeyboardEvent, Modifiers,
};
pub use nav::NavTracker;
pub use panels::{ExperienceDrawer, SkillPanel};
pub use rotate::RotatingText;
pub use timers::{TimerId, TimerQueue};
pub use viewport::{
    ObservationCallback, ObservationId, PageViewport, ScrollCallback, ScrollSource,
    ScrollSubscription, Viewport, ViewportObserver,
};
