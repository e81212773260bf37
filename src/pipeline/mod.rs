//! Site Pipeline
//!
//! Connects the site's state to the terminal.
//!
//! # Pipeline Architecture
//!
//! ```text
//! input ──► keys / scroll ──► Site (tracker, animator, panels) ──► view::compose ──► renderer
//!                                  ▲
//!                        timers.advance(elapsed)
//! ```
//!
//! ## Data Flow
//!
//! 1. **keys** - Key bindings turn key presses into site commands
//! 2. **site** - Owns the page viewport, timer queue and every component
//! 3. **view** - Pure composition of the current state into a frame
//! 4. **mount** - Terminal lifecycle and the loop tying the above together

pub mod keys;
pub mod mount;
pub mod site;
pub mod view;

pub use mount::{mount, run, tick, MountHandle};
pub use site::Site;
pub use view::compose;
