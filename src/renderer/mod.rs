//! Terminal renderer - the "blind" output layer.
//!
//! The renderer knows only about rows of styled text. It doesn't understand
//! the nav bar, sections or animation. It takes a filled [`Frame`] and writes
//! the rows that changed since the last frame.
//!
//! ```text
//!   Site state ──► view::compose ──► Frame ──► DiffRenderer ──► Terminal
//! ```
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::renderer::{DiffRenderer, Frame, Line};
//!
//! let mut frame = Frame::new(80, 24);
//! frame.set(0, Line::plain("Hello"));
//!
//! let mut renderer = DiffRenderer::new(std::io::stdout());
//! renderer.enter_fullscreen()?;
//! renderer.render(&frame)?;
//! renderer.exit_fullscreen()?;
//! ```

pub mod diff;
pub mod frame;

pub use diff::DiffRenderer;
pub use frame::{Attrs, Frame, Line, Span, Style};
