//! Navigation Tracker - Scroll-driven active link and hero docking
//!
//! Derives the nav bar's state from viewport geometry:
//!
//! - `is_hero_zone` - hero region at least 35% visible (or, without a hero
//!   region, scroll offset under 60% of the viewport height)
//! - `active_anchor` - the most visible section, pinned to the first nav item
//!   while in the hero zone
//! - `is_scrolled` - scrolled past 14px, for the bar's styling
//! - `is_menu_open` - toggled by the user, closed by Escape or a selection
//!
//! The tracker owns its state as an instance. The host hands it a
//! [`Viewport`] on activation and the tracker releases every observer,
//! listener and key handler on deactivation or drop.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::state::nav::NavTracker;
//!
//! let tracker = NavTracker::new(items, sections, Some("hero".into()), TrackerConfig::default())?;
//! tracker.activate(page.clone());
//!
//! page.set_scroll(1400.0);
//! println!("active: {}", tracker.state().active_anchor);
//!
//! tracker.deactivate();
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use spark_signals::{signal, Signal};
use tracing::{debug, warn};

use super::keyboard;
use super::viewport::{ObservationCallback, ObservationId, ScrollSubscription, Viewport};
use crate::config::TrackerConfig;
use crate::error::{FolioError, Result};
use crate::types::{AnchorId, NavItem, NavigationState, RegionId, ViewportObservation};

// =============================================================================
// TRACKER STATE
// =============================================================================

/// Host registrations held while active.
struct Bindings {
    host: Rc<dyn Viewport>,
    hero: Option<ObservationId>,
    sections: Vec<ObservationId>,
    scroll: Vec<ScrollSubscription>,
    escape: Option<Box<dyn FnOnce()>>,
}

struct TrackerInner {
    items: Vec<NavItem>,
    /// Observed sections, in nav order: region and the anchor it activates.
    sections: Vec<(RegionId, AnchorId)>,
    hero: Option<RegionId>,
    config: TrackerConfig,
    state: NavigationState,
    published: Signal<NavigationState>,
    bindings: Option<Bindings>,
}

impl TrackerInner {
    fn default_anchor(&self) -> &AnchorId {
        &self.items[0].anchor
    }

    fn has_anchor(&self, anchor: &AnchorId) -> bool {
        self.items.iter().any(|item| &item.anchor == anchor)
    }

    /// Apply a hero-zone reading. Returns true if the zone changed.
    fn set_hero_zone(&mut self, in_hero: bool) -> bool {
        let changed = self.state.is_hero_zone != in_hero;
        if changed {
            debug!(in_hero, "hero zone changed");
            self.state.is_hero_zone = in_hero;
        }
        if in_hero {
            self.state.active_anchor = self.default_anchor().clone();
        }
        changed
    }

    fn apply_sections(&mut self, batch: &[ViewportObservation]) {
        if self.state.is_hero_zone {
            self.state.active_anchor = self.default_anchor().clone();
            return;
        }

        // Highest ratio wins; on equal ratios the earlier entry stays.
        let mut best: Option<&ViewportObservation> = None;
        for obs in batch.iter().filter(|o| o.is_intersecting) {
            if best.is_none_or(|b| obs.intersection_ratio > b.intersection_ratio) {
                best = Some(obs);
            }
        }

        let anchor = best.and_then(|obs| {
            self.sections
                .iter()
                .find(|(region, _)| region == &obs.region)
                .map(|(_, anchor)| anchor.clone())
        });

        if let Some(anchor) = anchor {
            if anchor != self.state.active_anchor {
                debug!(%anchor, "active section changed");
                self.state.active_anchor = anchor;
            }
        }
    }

    fn set_scroll_offset(&mut self, y: f32) {
        self.state.is_scrolled = y > self.config.scrolled_px;
    }

    fn hero_from_batch(&self, batch: &[ViewportObservation]) -> Option<bool> {
        let hero = self.hero.as_ref()?;
        batch
            .iter()
            .rev()
            .find(|obs| &obs.region == hero)
            .map(|obs| obs.is_intersecting && obs.intersection_ratio >= self.config.hero_threshold)
    }
}

// =============================================================================
// NAV TRACKER
// =============================================================================

/// Navigation activity tracker for one nav bar.
pub struct NavTracker {
    inner: Rc<RefCell<TrackerInner>>,
}

impl NavTracker {
    /// Build a tracker.
    ///
    /// `sections` maps nav anchors to the page regions that activate them.
    /// Entries for anchors that are not nav items are dropped, so the active
    /// anchor can only ever be a nav item. Fails if `items` is empty.
    pub fn new(
        items: Vec<NavItem>,
        sections: BTreeMap<AnchorId, RegionId>,
        hero: Option<RegionId>,
        config: TrackerConfig,
    ) -> Result<Self> {
        let first = items.first().ok_or(FolioError::EmptyNavigation)?;
        let state = NavigationState::initial(first.anchor.clone());

        let sections = items
            .iter()
            .filter_map(|item| match sections.get(&item.anchor) {
                Some(region) => Some((region.clone(), item.anchor.clone())),
                None => {
                    warn!(anchor = %item.anchor, "nav item has no section mapping");
                    None
                }
            })
            .collect();

        Ok(Self {
            inner: Rc::new(RefCell::new(TrackerInner {
                items,
                sections,
                hero,
                config,
                published: signal(state.clone()),
                state,
                bindings: None,
            })),
        })
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> NavigationState {
        self.inner.borrow().state.clone()
    }

    /// Reactive view of the state, for render effects.
    pub fn state_signal(&self) -> Signal<NavigationState> {
        self.inner.borrow().published.clone()
    }

    pub fn items(&self) -> Vec<NavItem> {
        self.inner.borrow().items.clone()
    }

    /// Label of the active item.
    pub fn active_label(&self) -> String {
        let inner = self.inner.borrow();
        inner
            .items
            .iter()
            .find(|item| item.anchor == inner.state.active_anchor)
            .map(|item| item.label.clone())
            .unwrap_or_else(|| "Menu".to_string())
    }

    pub fn is_active(&self) -> bool {
        self.inner.borrow().bindings.is_some()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Start observing `host`. Replaces any previous activation.
    pub fn activate(&self, host: Rc<dyn Viewport>) {
        self.deactivate();

        let weak = Rc::downgrade(&self.inner);
        let (hero, config) = {
            let inner = self.inner.borrow();
            for (region, anchor) in &inner.sections {
                if !host.contains(region) {
                    warn!(%region, %anchor, "section missing from page, skipped");
                }
            }
            (inner.hero.clone(), inner.config.clone())
        };

        let mut bindings = Bindings {
            host: host.clone(),
            hero: None,
            sections: Vec::new(),
            scroll: Vec::new(),
            escape: None,
        };

        // Scrolled styling
        bindings.scroll.push(host.on_scroll(Rc::new({
            let weak = weak.clone();
            move |y: f32| {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().set_scroll_offset(y);
                    publish(&inner);
                }
            }
        })));
        self.inner.borrow_mut().set_scroll_offset(host.scroll_y());
        publish(&self.inner);

        // Hero zone
        match hero.filter(|region| host.contains(region)) {
            Some(region) => {
                let callback: ObservationCallback = Rc::new({
                    let weak = weak.clone();
                    move |batch: &[ViewportObservation]| on_hero_batch(&weak, batch)
                });
                bindings.hero = Some(host.observe(&region, &[config.hero_threshold], callback));
            }
            None => {
                debug!("no hero region, using scroll heuristic");
                let factor = config.fallback_viewport_factor;
                let host_for_cb = Rc::downgrade(&host);
                bindings.scroll.push(host.on_scroll(Rc::new({
                    let weak = weak.clone();
                    move |y: f32| {
                        let Some(host) = host_for_cb.upgrade() else {
                            return;
                        };
                        let in_hero = y < host.viewport_height() * factor;
                        on_hero_reading(&weak, in_hero);
                    }
                })));
                let in_hero = host.scroll_y() < host.viewport_height() * factor;
                on_hero_reading(&weak, in_hero);
            }
        }

        // Escape closes the menu
        let escape = keyboard::on_key("Escape", {
            let weak = weak.clone();
            move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().state.is_menu_open = false;
                    publish(&inner);
                }
                false
            }
        });
        bindings.escape = Some(Box::new(escape));

        self.inner.borrow_mut().bindings = Some(bindings);
        subscribe_sections(&self.inner);
    }

    /// Release every host registration. Safe to call repeatedly.
    pub fn deactivate(&self) {
        let bindings = self.inner.borrow_mut().bindings.take();
        let Some(bindings) = bindings else {
            return;
        };

        if let Some(id) = bindings.hero {
            bindings.host.unobserve(id);
        }
        for id in bindings.sections {
            bindings.host.unobserve(id);
        }
        for sub in bindings.scroll {
            bindings.host.off_scroll(sub);
        }
        if let Some(cleanup) = bindings.escape {
            cleanup();
        }
        debug!("nav tracker deactivated");
    }

    // =========================================================================
    // Commands
    // =========================================================================

    pub fn toggle_menu(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.state.is_menu_open = !inner.state.is_menu_open;
        }
        publish(&self.inner);
    }

    pub fn close_menu(&self) {
        self.inner.borrow_mut().state.is_menu_open = false;
        publish(&self.inner);
    }

    /// The user picked a nav item. Closes the menu; outside the hero zone the
    /// item becomes active. Unknown anchors only close the menu.
    pub fn select_item(&self, anchor: &AnchorId) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.state.is_menu_open = false;
            if !inner.state.is_hero_zone && inner.has_anchor(anchor) {
                inner.state.active_anchor = anchor.clone();
            }
        }
        publish(&self.inner);
    }
}

impl Drop for NavTracker {
    fn drop(&mut self) {
        self.deactivate();
    }
}

// =============================================================================
// CALLBACKS
// =============================================================================

/// Push the state to the signal if it changed. Runs with no borrow held so
/// effects reading the tracker see a consistent snapshot.
fn publish(inner: &Rc<RefCell<TrackerInner>>) {
    let (published, state) = {
        let guard = inner.borrow();
        (guard.published.clone(), guard.state.clone())
    };
    if published.get() != state {
        published.set(state);
    }
}

fn on_hero_batch(weak: &Weak<RefCell<TrackerInner>>, batch: &[ViewportObservation]) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let reading = inner.borrow().hero_from_batch(batch);
    if let Some(in_hero) = reading {
        on_hero_reading(weak, in_hero);
    }
}

fn on_hero_reading(weak: &Weak<RefCell<TrackerInner>>, in_hero: bool) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let changed = inner.borrow_mut().set_hero_zone(in_hero);
    publish(&inner);
    // Leaving the hero zone re-reads section visibility from scratch, so the
    // section behind the hero gets highlighted without waiting for a crossing.
    if changed && !in_hero {
        subscribe_sections(&inner);
    }
}

fn on_sections_batch(weak: &Weak<RefCell<TrackerInner>>, batch: &[ViewportObservation]) {
    if let Some(inner) = weak.upgrade() {
        inner.borrow_mut().apply_sections(batch);
        publish(&inner);
    }
}

/// (Re)register the section observers. No-op while inactive; with no section
/// present on the page the tracker stays idle.
fn subscribe_sections(inner: &Rc<RefCell<TrackerInner>>) {
    let (host, old, regions, thresholds) = {
        let mut guard = inner.borrow_mut();
        let Some(bindings) = guard.bindings.as_mut() else {
            return;
        };
        let host = bindings.host.clone();
        let old = std::mem::take(&mut bindings.sections);
        let regions: Vec<RegionId> = guard
            .sections
            .iter()
            .map(|(region, _)| region.clone())
            .filter(|region| host.contains(region))
            .collect();
        (host, old, regions, guard.config.section_thresholds.clone())
    };

    for id in old {
        host.unobserve(id);
    }
    if regions.is_empty() {
        debug!("no nav sections on the page, tracker idle");
        return;
    }

    let weak = Rc::downgrade(inner);
    let callback: ObservationCallback = Rc::new(move |batch: &[ViewportObservation]| {
        on_sections_batch(&weak, batch)
    });
    let ids = host.observe_batch(&regions, &thresholds, callback);

    // Deactivated from inside a callback: drop what we just registered.
    let orphaned = match inner.borrow_mut().bindings.as_mut() {
        Some(bindings) => {
            bindings.sections = ids;
            Vec::new()
        }
        None => ids,
    };
    for id in orphaned {
        host.unobserve(id);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::keyboard::{dispatch, reset_keyboard_state, KeyboardEvent};
    use crate::state::viewport::{PageViewport, ScrollCallback, ScrollSource, ViewportObserver};
    use std::cell::Cell;

    /// Host double: tests push observation batches by hand.
    struct FakeViewport {
        regions: Vec<RegionId>,
        registrations: RefCell<Vec<(ObservationId, RegionId, ObservationCallback)>>,
        listeners: RefCell<Vec<(ScrollSubscription, ScrollCallback)>>,
        scroll_y: Cell<f32>,
        viewport_height: f32,
        next_id: Cell<u64>,
    }

    impl FakeViewport {
        fn new(regions: &[&str]) -> Rc<Self> {
            Rc::new(Self {
                regions: regions.iter().map(|r| RegionId::from(*r)).collect(),
                registrations: RefCell::new(Vec::new()),
                listeners: RefCell::new(Vec::new()),
                scroll_y: Cell::new(0.0),
                viewport_height: 1000.0,
                next_id: Cell::new(0),
            })
        }

        fn next_id(&self) -> u64 {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            id
        }

        /// Deliver a batch to whoever observes its first region.
        fn emit(&self, batch: &[ViewportObservation]) {
            let callback = self
                .registrations
                .borrow()
                .iter()
                .find(|(_, region, _)| region == &batch[0].region)
                .map(|(_, _, cb)| cb.clone());
            if let Some(callback) = callback {
                callback(batch);
            }
        }

        fn scroll_to(&self, y: f32) {
            self.scroll_y.set(y);
            let listeners: Vec<ScrollCallback> =
                self.listeners.borrow().iter().map(|(_, cb)| cb.clone()).collect();
            for listener in listeners {
                listener(y);
            }
        }

        fn observed(&self) -> Vec<String> {
            self.registrations
                .borrow()
                .iter()
                .map(|(_, region, _)| region.to_string())
                .collect()
        }
    }

    impl ViewportObserver for FakeViewport {
        fn contains(&self, region: &RegionId) -> bool {
            self.regions.contains(region)
        }

        fn observe(&self, region: &RegionId, _: &[f32], callback: ObservationCallback) -> ObservationId {
            let id = ObservationId(self.next_id());
            self.registrations.borrow_mut().push((id, region.clone(), callback));
            id
        }

        fn unobserve(&self, id: ObservationId) {
            self.registrations.borrow_mut().retain(|(rid, _, _)| *rid != id);
        }
    }

    impl ScrollSource for FakeViewport {
        fn scroll_y(&self) -> f32 {
            self.scroll_y.get()
        }

        fn viewport_height(&self) -> f32 {
            self.viewport_height
        }

        fn on_scroll(&self, callback: ScrollCallback) -> ScrollSubscription {
            let id = ScrollSubscription(self.next_id());
            self.listeners.borrow_mut().push((id, callback));
            id
        }

        fn off_scroll(&self, subscription: ScrollSubscription) {
            self.listeners.borrow_mut().retain(|(id, _)| *id != subscription);
        }
    }

    fn items() -> Vec<NavItem> {
        vec![
            NavItem::new("About", "about"),
            NavItem::new("Projects", "projects"),
            NavItem::new("Experience", "experience"),
        ]
    }

    fn identity_sections() -> BTreeMap<AnchorId, RegionId> {
        ["about", "projects", "experience"]
            .into_iter()
            .map(|id| (AnchorId::from(id), RegionId::from(id)))
            .collect()
    }

    fn setup(regions: &[&str], hero: Option<&str>) -> (NavTracker, Rc<FakeViewport>) {
        reset_keyboard_state();
        let tracker = NavTracker::new(
            items(),
            identity_sections(),
            hero.map(RegionId::from),
            TrackerConfig::default(),
        )
        .unwrap();
        let host = FakeViewport::new(regions);
        tracker.activate(host.clone());
        (tracker, host)
    }

    fn leave_hero(host: &FakeViewport) {
        host.emit(&[ViewportObservation::new("hero", true, 0.1)]);
    }

    #[test]
    fn test_initial_state() {
        let (tracker, _host) = setup(&["hero", "about", "projects"], Some("hero"));
        let state = tracker.state();
        assert!(state.is_hero_zone);
        assert_eq!(state.active_anchor, AnchorId::from("about"));
        assert!(!state.is_menu_open);
        assert!(!state.is_scrolled);
        assert_eq!(tracker.active_label(), "About");
    }

    #[test]
    fn test_empty_items_rejected() {
        let result = NavTracker::new(Vec::new(), BTreeMap::new(), None, TrackerConfig::default());
        assert!(matches!(result, Err(FolioError::EmptyNavigation)));
    }

    #[test]
    fn test_hero_pins_active() {
        let (tracker, host) = setup(&["hero", "about", "experience"], Some("hero"));

        host.emit(&[ViewportObservation::new("hero", true, 0.5)]);
        host.emit(&[ViewportObservation::new("experience", true, 1.0)]);

        let state = tracker.state();
        assert!(state.is_hero_zone);
        assert_eq!(state.active_anchor, AnchorId::from("about"));
    }

    #[test]
    fn test_hero_threshold() {
        let (tracker, host) = setup(&["hero", "about"], Some("hero"));

        host.emit(&[ViewportObservation::new("hero", true, 0.34)]);
        assert!(!tracker.state().is_hero_zone);

        host.emit(&[ViewportObservation::new("hero", true, 0.35)]);
        assert!(tracker.state().is_hero_zone);

        host.emit(&[ViewportObservation::new("hero", false, 0.0)]);
        assert!(!tracker.state().is_hero_zone);
    }

    #[test]
    fn test_highest_ratio_wins() {
        let (tracker, host) = setup(&["hero", "about", "projects", "experience"], Some("hero"));
        leave_hero(&host);

        host.emit(&[
            ViewportObservation::new("projects", true, 0.30),
            ViewportObservation::new("experience", true, 0.50),
        ]);
        assert_eq!(tracker.state().active_anchor, AnchorId::from("experience"));
    }

    #[test]
    fn test_tie_keeps_first_in_batch() {
        let (tracker, host) = setup(&["hero", "about", "projects", "experience"], Some("hero"));
        leave_hero(&host);

        host.emit(&[
            ViewportObservation::new("projects", true, 0.40),
            ViewportObservation::new("experience", true, 0.40),
        ]);
        assert_eq!(tracker.state().active_anchor, AnchorId::from("projects"));
    }

    #[test]
    fn test_no_intersection_retains_previous() {
        let (tracker, host) = setup(&["hero", "about", "projects"], Some("hero"));
        leave_hero(&host);

        host.emit(&[ViewportObservation::new("projects", true, 0.7)]);
        assert_eq!(tracker.state().active_anchor, AnchorId::from("projects"));

        host.emit(&[
            ViewportObservation::new("projects", false, 0.0),
            ViewportObservation::new("about", false, 0.0),
        ]);
        assert_eq!(tracker.state().active_anchor, AnchorId::from("projects"));
    }

    #[test]
    fn test_missing_sections_not_observed() {
        let (tracker, host) = setup(&["hero", "projects"], Some("hero"));

        assert_eq!(host.observed(), vec!["hero", "projects"]);

        leave_hero(&host);
        host.emit(&[ViewportObservation::new("projects", true, 0.25)]);
        assert_eq!(tracker.state().active_anchor, AnchorId::from("projects"));
    }

    #[test]
    fn test_foreign_mapping_entries_dropped() {
        reset_keyboard_state();
        let mut sections = identity_sections();
        sections.insert(AnchorId::from("blog"), RegionId::from("blog"));

        let tracker = NavTracker::new(items(), sections, None, TrackerConfig::default()).unwrap();
        let host = FakeViewport::new(&["blog", "projects"]);
        tracker.activate(host.clone());
        host.scroll_to(900.0);

        assert_eq!(host.observed(), vec!["projects"]);
    }

    #[test]
    fn test_zero_sections_idle() {
        let (tracker, host) = setup(&["hero"], Some("hero"));
        assert_eq!(host.observed(), vec!["hero"]);

        leave_hero(&host);
        assert_eq!(tracker.state().active_anchor, AnchorId::from("about"));
    }

    #[test]
    fn test_fallback_without_hero_region() {
        let (tracker, host) = setup(&["about", "projects"], None);
        assert!(tracker.state().is_hero_zone);

        // 60% of a 1000px viewport
        host.scroll_to(599.0);
        assert!(tracker.state().is_hero_zone);

        host.scroll_to(600.0);
        assert!(!tracker.state().is_hero_zone);

        host.emit(&[ViewportObservation::new("projects", true, 0.55)]);
        assert_eq!(tracker.state().active_anchor, AnchorId::from("projects"));

        host.scroll_to(0.0);
        let state = tracker.state();
        assert!(state.is_hero_zone);
        assert_eq!(state.active_anchor, AnchorId::from("about"));
    }

    #[test]
    fn test_configured_hero_absent_uses_fallback() {
        let (tracker, host) = setup(&["about"], Some("hero"));
        assert!(!host.observed().contains(&"hero".to_string()));

        host.scroll_to(800.0);
        assert!(!tracker.state().is_hero_zone);
    }

    #[test]
    fn test_scrolled_threshold() {
        let (tracker, host) = setup(&["hero"], Some("hero"));

        host.scroll_to(14.0);
        assert!(!tracker.state().is_scrolled);

        host.scroll_to(15.0);
        assert!(tracker.state().is_scrolled);
    }

    #[test]
    fn test_menu_commands() {
        let (tracker, _host) = setup(&["hero"], Some("hero"));

        tracker.toggle_menu();
        assert!(tracker.state().is_menu_open);
        assert_eq!(tracker.state().active_anchor, AnchorId::from("about"));

        tracker.toggle_menu();
        assert!(!tracker.state().is_menu_open);

        tracker.toggle_menu();
        tracker.close_menu();
        assert!(!tracker.state().is_menu_open);
    }

    #[test]
    fn test_escape_closes_menu_idempotently() {
        let (tracker, _host) = setup(&["hero"], Some("hero"));

        tracker.toggle_menu();
        dispatch(KeyboardEvent::new("Escape"));
        assert!(!tracker.state().is_menu_open);

        dispatch(KeyboardEvent::new("Escape"));
        assert!(!tracker.state().is_menu_open);
    }

    #[test]
    fn test_select_in_hero_zone_is_noop() {
        let (tracker, _host) = setup(&["hero"], Some("hero"));
        tracker.toggle_menu();

        tracker.select_item(&AnchorId::from("experience"));

        let state = tracker.state();
        assert_eq!(state.active_anchor, AnchorId::from("about"));
        assert!(!state.is_menu_open);
    }

    #[test]
    fn test_select_outside_hero() {
        let (tracker, host) = setup(&["hero"], Some("hero"));
        leave_hero(&host);

        tracker.select_item(&AnchorId::from("experience"));
        assert_eq!(tracker.state().active_anchor, AnchorId::from("experience"));

        tracker.select_item(&AnchorId::from("nowhere"));
        assert_eq!(tracker.state().active_anchor, AnchorId::from("experience"));
    }

    #[test]
    fn test_deactivate_releases_everything() {
        let (tracker, host) = setup(&["hero", "about", "projects"], Some("hero"));
        assert!(tracker.is_active());

        tracker.deactivate();
        assert!(!tracker.is_active());
        assert!(host.observed().is_empty());
        assert!(host.listeners.borrow().is_empty());
        assert_eq!(keyboard::handler_count(), 0);

        tracker.deactivate();
    }

    #[test]
    fn test_drop_releases_registrations() {
        let (tracker, host) = setup(&["hero", "about"], Some("hero"));
        drop(tracker);
        assert!(host.observed().is_empty());
        assert_eq!(keyboard::handler_count(), 0);
    }

    #[test]
    fn test_signal_tracks_state() {
        let (tracker, host) = setup(&["hero"], Some("hero"));
        let published = tracker.state_signal();

        host.scroll_to(100.0);
        assert!(published.get().is_scrolled);
        assert_eq!(published.get(), tracker.state());
    }

    #[test]
    fn test_leaving_hero_rereads_sections_on_page() {
        reset_keyboard_state();
        let page = Rc::new(PageViewport::new(100.0));
        page.push_region("hero", 100.0);
        page.push_region("about", 100.0);
        page.push_region("projects", 100.0);

        let tracker =
            NavTracker::new(items(), identity_sections(), Some("hero".into()), TrackerConfig::default())
                .unwrap();
        tracker.activate(page.clone());

        // hero gone, about 0.3, projects 0.7
        page.set_scroll(170.0);
        let state = tracker.state();
        assert!(!state.is_hero_zone);
        assert_eq!(state.active_anchor, AnchorId::from("projects"));

        // about 0.8, projects 0.2
        page.set_scroll(120.0);
        assert_eq!(tracker.state().active_anchor, AnchorId::from("about"));

        page.set_scroll(0.0);
        let state = tracker.state();
        assert!(state.is_hero_zone);
        assert_eq!(state.active_anchor, AnchorId::from("about"));
    }

    #[test]
    fn test_leaving_hero_ignores_released_section_records() {
        reset_keyboard_state();
        let page = Rc::new(PageViewport::new(100.0));
        page.push_region("hero", 100.0);
        page.push_region("projects", 40.0);
        page.push_region("experience", 200.0);

        let tracker =
            NavTracker::new(items(), identity_sections(), Some("hero".into()), TrackerConfig::default())
                .unwrap();
        tracker.activate(page.clone());

        // hero 0.5, projects 1.0, experience 0.05
        page.set_scroll(50.0);
        assert!(tracker.state().is_hero_zone);

        // hero 0.1, projects 1.0, experience 0.25: only experience crossed a
        // threshold, but projects is still the most visible
        page.set_scroll(90.0);
        let state = tracker.state();
        assert!(!state.is_hero_zone);
        assert_eq!(state.active_anchor, AnchorId::from("projects"));
    }
}
