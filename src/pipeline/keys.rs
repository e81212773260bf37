//! Site Keys - Keyboard bindings of the terminal host
//!
//! - Ctrl+C / q: graceful shutdown
//! - ArrowDown / j, ArrowUp / k: scroll one row
//! - PageDown / PageUp: scroll most of a screen
//! - m: toggle the nav menu (Escape closing it is the tracker's own binding)
//! - 1..9: select a nav item and jump to its section
//! - c: copy the contact email
//! - s: toggle the tech-vault skills list
//! - [ / ]: move the hover across the skill pins, Enter: click the hovered pin
//! - e then 1..9: open that experience entry in the drawer
//! - Escape / Backspace: close the drawer
//!
//! Registered on mount and cleaned up on unmount.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::pipeline::keys;
//!
//! let running = Arc::new(AtomicBool::new(true));
//! let handle = keys::setup_site_keys(Rc::downgrade(&site), running.clone());
//!
//! // Later, on cleanup:
//! handle.cleanup();
//! ```

use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::site::Site;
use crate::state::keyboard::{self, KeyboardEvent};
use crate::state::viewport::ScrollSource;

/// Share of the viewport a page key scrolls.
const PAGE_FRACTION: f32 = 0.9;

// =============================================================================
// SITE KEYS HANDLE
// =============================================================================

/// Cleanup handle for the site's key handlers
pub struct SiteKeysHandle {
    cleanup: Option<Box<dyn FnOnce()>>,
}

impl SiteKeysHandle {
    pub fn cleanup(mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl Drop for SiteKeysHandle {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

// =============================================================================
// SETUP
// =============================================================================

/// Set up the site's key handlers. `running` goes false on quit.
pub fn setup_site_keys(site: Weak<Site>, running: Arc<AtomicBool>) -> SiteKeysHandle {
    // set by `e`, consumed by the next key
    let drawer_prefix = Rc::new(Cell::new(false));

    let cleanup = keyboard::on(move |event| {
        if event.modifiers.ctrl {
            if event.key == "c" {
                running.store(false, Ordering::SeqCst);
                return true;
            }
            return false;
        }
        if event.key == "q" {
            running.store(false, Ordering::SeqCst);
            return true;
        }
        match site.upgrade() {
            Some(site) => handle_site_key(&site, event, &drawer_prefix),
            None => false,
        }
    });

    SiteKeysHandle {
        cleanup: Some(Box::new(cleanup)),
    }
}

fn handle_site_key(site: &Site, event: &KeyboardEvent, drawer_prefix: &Cell<bool>) -> bool {
    let row = site.config().row_height_px;
    let page = site.page().viewport_height() * PAGE_FRACTION;

    if drawer_prefix.replace(false) {
        if let Ok(n @ 1..=9) = event.key.parse::<usize>() {
            site.drawer_mut().open(n - 1);
            return true;
        }
    }

    match event.key.as_str() {
        "ArrowDown" | "j" => {
            site.scroll_by(row);
        }
        "ArrowUp" | "k" => {
            site.scroll_by(-row);
        }
        "PageDown" | " " => {
            site.scroll_by(page);
        }
        "PageUp" => {
            site.scroll_by(-page);
        }
        "Home" => {
            site.page().set_scroll(0.0);
        }
        "End" => {
            site.page().set_scroll(site.page().max_scroll());
        }
        "m" => site.nav().toggle_menu(),
        "c" => site.copy_email(),
        "s" => site.skills_mut().toggle_open(),
        "e" => drawer_prefix.set(true),
        "]" => return hover_next_pin(site, true),
        "[" => return hover_next_pin(site, false),
        "Enter" => return click_hovered_pin(site),
        "Escape" | "Backspace" => {
            if !site.drawer().is_open() {
                return false;
            }
            site.drawer_mut().close();
        }
        key => match key.parse::<usize>() {
            Ok(n @ 1..=9) => return site.select(n - 1),
            _ => return false,
        },
    }
    true
}

/// Keyboard stand-in for the pointer moving across the globe pins.
fn hover_next_pin(site: &Site, forward: bool) -> bool {
    let mut skills = site.skills_mut();
    let count = skills.pins().len();
    if count == 0 {
        return false;
    }
    let current = skills
        .hovered()
        .and_then(|pin| skills.pins().iter().position(|p| p.label == pin.label));
    let next = match (current, forward) {
        (None, true) => 0,
        (None, false) => count - 1,
        (Some(i), true) => (i + 1) % count,
        (Some(i), false) => (i + count - 1) % count,
    };
    let label = skills.pins()[next].label.clone();
    skills.hover(Some(&label));
    true
}

fn click_hovered_pin(site: &Site) -> bool {
    let label = site.skills().hovered().map(|pin| pin.label.clone());
    match label {
        Some(label) => {
            site.skills_mut().click(&label);
            true
        }
        None => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::state::keyboard::{dispatch, reset_keyboard_state, Modifiers};
    use crate::types::AnchorId;
    use std::rc::Rc;

    fn setup() -> (Rc<Site>, Arc<AtomicBool>, SiteKeysHandle) {
        reset_keyboard_state();
        let site = Rc::new(Site::new(SiteConfig::default(), 640.0).unwrap());
        site.activate();
        let running = Arc::new(AtomicBool::new(true));
        let handle = setup_site_keys(Rc::downgrade(&site), running.clone());
        (site, running, handle)
    }

    #[test]
    fn test_ctrl_c_stops() {
        let (site, running, _handle) = setup();
        dispatch(KeyboardEvent::with_modifiers("c", Modifiers::ctrl()));
        assert!(!running.load(Ordering::SeqCst));
        assert!(!site.copy_feedback().is_copied());
    }

    #[test]
    fn test_q_stops() {
        let (_site, running, _handle) = setup();
        dispatch(KeyboardEvent::new("q"));
        assert!(!running.load(Ordering::SeqCst));
    }

    #[test]
    fn test_plain_c_copies() {
        let (site, running, _handle) = setup();
        dispatch(KeyboardEvent::new("c"));
        assert!(running.load(Ordering::SeqCst));
        assert!(site.copy_feedback().is_copied());
    }

    #[test]
    fn test_scroll_keys() {
        let (site, _running, _handle) = setup();
        dispatch(KeyboardEvent::new("j"));
        assert_eq!(site.scroll_y(), 16.0);
        assert!(site.nav().state().is_scrolled);

        dispatch(KeyboardEvent::new("ArrowUp"));
        assert_eq!(site.scroll_y(), 0.0);

        dispatch(KeyboardEvent::new("PageDown"));
        assert_eq!(site.scroll_y(), 576.0);
    }

    #[test]
    fn test_menu_and_escape() {
        let (site, _running, _handle) = setup();
        dispatch(KeyboardEvent::new("m"));
        assert!(site.nav().state().is_menu_open);

        dispatch(KeyboardEvent::new("Escape"));
        assert!(!site.nav().state().is_menu_open);
    }

    #[test]
    fn test_number_selects_section() {
        let (site, _running, _handle) = setup();
        dispatch(KeyboardEvent::new("m"));
        assert!(dispatch(KeyboardEvent::new("4")));

        let state = site.nav().state();
        assert!(!state.is_menu_open);
        assert_eq!(state.active_anchor, AnchorId::from("experience"));

        assert!(!dispatch(KeyboardEvent::new("9")));
    }

    #[test]
    fn test_experience_drawer_keys() {
        let (site, _running, _handle) = setup();
        dispatch(KeyboardEvent::new("e"));
        dispatch(KeyboardEvent::new("2"));

        let drawer = site.drawer();
        assert!(drawer.is_open());
        assert_eq!(drawer.current().map(|e| e.role.clone()), Some(drawer.entries()[1].role.clone()));
        drop(drawer);
        // the digit went to the drawer, not the nav
        assert!(site.nav().state().is_hero_zone);

        dispatch(KeyboardEvent::new("Escape"));
        assert!(!site.drawer().is_open());

        dispatch(KeyboardEvent::new("e"));
        dispatch(KeyboardEvent::new("3"));
        dispatch(KeyboardEvent::new("Backspace"));
        assert!(!site.drawer().is_open());
    }

    #[test]
    fn test_drawer_prefix_cleared_by_other_key() {
        let (site, _running, _handle) = setup();
        dispatch(KeyboardEvent::new("e"));
        dispatch(KeyboardEvent::new("x"));
        dispatch(KeyboardEvent::new("3"));

        assert!(!site.drawer().is_open());
        assert_eq!(site.nav().state().active_anchor, AnchorId::from("projects"));
    }

    #[test]
    fn test_escape_without_drawer_falls_through() {
        let (_site, _running, _handle) = setup();
        assert!(!dispatch(KeyboardEvent::new("Backspace")));
    }

    #[test]
    fn test_skill_pin_keys() {
        let (site, _running, _handle) = setup();
        assert!(!dispatch(KeyboardEvent::new("Enter")));

        dispatch(KeyboardEvent::new("]"));
        let first = site.skills().pins()[0].label.clone();
        assert_eq!(site.skills().hovered().map(|p| p.label.clone()), Some(first.clone()));

        dispatch(KeyboardEvent::new("["));
        let last = site.skills().pins().last().map(|p| p.label.clone());
        assert_eq!(site.skills().hovered().map(|p| p.label.clone()), last);

        dispatch(KeyboardEvent::new("]"));
        assert!(dispatch(KeyboardEvent::new("Enter")));
        assert_eq!(site.skills().active().map(|p| p.label.clone()), Some(first));

        dispatch(KeyboardEvent::new("Enter"));
        assert!(site.skills().active().is_none());
    }

    #[test]
    fn test_cleanup_removes_handlers() {
        let (site, running, handle) = setup();
        handle.cleanup();

        dispatch(KeyboardEvent::new("q"));
        dispatch(KeyboardEvent::new("j"));
        assert!(running.load(Ordering::SeqCst));
        assert_eq!(site.scroll_y(), 0.0);
    }
}
