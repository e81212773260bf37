//! Mount API - Terminal lifecycle and render loop.
//!
//! Claims the terminal (raw mode, alternate screen, mouse wheel), builds the
//! [`Site`] sized to it, and runs the loop: poll input, advance site time by
//! real elapsed time, compose, render the rows that changed.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::pipeline::mount;
//!
//! let mut handle = mount::mount(SiteConfig::default())?;
//!
//! // Option 1: Run blocking event loop
//! mount::run(&mut handle)?;
//!
//! // Option 2: Tick manually in your own loop
//! while mount::tick(&mut handle)? {
//!     // Your logic here
//! }
//!
//! handle.unmount()?;
//! ```

use std::io::{self, Stdout};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::terminal;
use tracing::{debug, info, warn};

use super::keys::{self, SiteKeysHandle};
use super::site::Site;
use super::view::compose;
use crate::config::SiteConfig;
use crate::error::Result;
use crate::renderer::DiffRenderer;
use crate::state::input::{self, InputEvent};
use crate::state::keyboard;

/// Input poll timeout, about one frame at 60fps.
const FRAME: Duration = Duration::from_millis(16);

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by mount(). Unmounting (or dropping) restores the terminal.
pub struct MountHandle {
    site: Rc<Site>,
    renderer: DiffRenderer<Stdout>,
    running: Arc<AtomicBool>,
    keys: Option<SiteKeysHandle>,
    size: (u16, u16),
    last_tick: Instant,
    mounted: bool,
}

impl MountHandle {
    pub fn site(&self) -> &Rc<Site> {
        &self.site
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Request shutdown; the loop exits on its next tick.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Release the site and give the terminal back.
    pub fn unmount(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if !self.mounted {
            return Ok(());
        }
        self.mounted = false;
        self.running.store(false, Ordering::SeqCst);

        if let Some(handle) = self.keys.take() {
            handle.cleanup();
        }
        self.site.deactivate();

        self.renderer.exit_fullscreen()?;
        terminal::disable_raw_mode()?;
        info!("unmounted");
        Ok(())
    }

    fn row_height(&self) -> f32 {
        self.site.config().row_height_px
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!(%err, "terminal restore failed");
        }
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount the site on the terminal.
///
/// This sets up:
/// 1. Terminal size detection (the viewport is one terminal screen)
/// 2. The site, activated: observers, listeners, animation
/// 3. Raw mode, alternate screen and mouse capture
/// 4. Key bindings (Ctrl+C/q quit, scrolling, menu, selection, copy)
pub fn mount(config: SiteConfig) -> Result<MountHandle> {
    let (width, height) = terminal::size()?;
    let viewport_height = height as f32 * config.row_height_px;
    let site = Rc::new(Site::new(config, viewport_height)?);
    site.activate();

    terminal::enable_raw_mode()?;
    let mut renderer = DiffRenderer::new(io::stdout());
    if let Err(err) = renderer.enter_fullscreen() {
        let _ = terminal::disable_raw_mode();
        return Err(err.into());
    }

    let running = Arc::new(AtomicBool::new(true));
    let keys = keys::setup_site_keys(Rc::downgrade(&site), running.clone());

    info!(width, height, "mounted");

    let mut handle = MountHandle {
        site,
        renderer,
        running,
        keys: Some(keys),
        size: (width, height),
        last_tick: Instant::now(),
        mounted: true,
    };
    draw(&mut handle)?;
    Ok(handle)
}

fn draw(handle: &mut MountHandle) -> Result<()> {
    let (width, height) = handle.size;
    let frame = compose(&handle.site, width, height);
    handle.renderer.render(&frame)?;
    Ok(())
}

// =============================================================================
// Event Loop
// =============================================================================

/// Run the loop once: handle at most one input event, advance time, redraw.
///
/// Returns `Ok(false)` once shutdown was requested.
pub fn tick(handle: &mut MountHandle) -> Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    match input::poll_event(FRAME)? {
        Some(InputEvent::Key(event)) => {
            keyboard::dispatch(event);
        }
        Some(InputEvent::Wheel(lines)) => {
            handle.site.scroll_by(lines as f32 * handle.row_height());
        }
        Some(InputEvent::Resize(width, height)) => {
            debug!(width, height, "terminal resized");
            handle.size = (width, height);
            handle.site.resize(height as f32 * handle.row_height());
            handle.renderer.invalidate();
        }
        Some(InputEvent::None) | None => {}
    }

    let now = Instant::now();
    handle.site.advance(now - handle.last_tick);
    handle.last_tick = now;

    if !handle.is_running() {
        return Ok(false);
    }
    draw(handle)?;
    Ok(true)
}

/// Run the loop until Ctrl+C, `q` or [`MountHandle::stop`].
pub fn run(handle: &mut MountHandle) -> Result<()> {
    while tick(handle)? {}
    Ok(())
}
