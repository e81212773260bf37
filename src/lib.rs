//! # spark-folio
//!
//! Reactive portfolio site core, with a terminal host to browse it.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for the
//! read-only state surfaces.
//!
//! ## Architecture
//!
//! Two state machines carry the page:
//!
//! - [`NavTracker`] - derives the hero zone, the active nav anchor, the menu
//!   and the scrolled flag from viewport notifications
//! - [`RotatingText`] - types, holds and deletes the hero phrases in a loop
//!
//! Both own their state as instances and take their host facilities
//! ([`Viewport`], [`TimerQueue`]) as explicit dependencies, so a terminal, a
//! browser binding or a test can drive them.
//!
//! ```text
//! PageViewport ─┬─► NavTracker ──► Signal<NavigationState> ─┐
//! TimerQueue ───┴─► RotatingText ─► Signal<String> ──────────┴─► view ─► renderer
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Anchors, regions, observations, navigation and rotation state
//! - [`config`] - `SiteConfig` and its serde defaults
//! - [`content`] - Static section content
//! - [`state`] - Tracker, animator, panels, timers, viewport, keyboard
//! - [`globe`] - Skill pin placement on the tech-vault globe
//! - [`renderer`] - Row-diffing terminal output
//! - [`pipeline`] - Site wiring, view composition, mount

pub mod config;
pub mod content;
pub mod error;
pub mod globe;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{ContactConfig, RegionLayout, RotationTiming, SiteConfig, TrackerConfig};
pub use error::{FolioError, Result};

pub use pipeline::{compose, mount, run, tick, MountHandle, Site};

pub use state::{
    CopyFeedback, ExperienceDrawer, NavTracker, PageViewport, RotatingText, ScrollSource,
    SkillPanel, TimerQueue, Viewport, ViewportObserver,
};
