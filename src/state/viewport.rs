//! Viewport Module - Region visibility and scroll notifications
//!
//! The host-side facilities the navigation tracker consumes:
//!
//! - [`ViewportObserver`] - "tell me when this region's visibility crosses a threshold"
//! - [`ScrollSource`] - scroll offset, viewport height, scroll listeners
//! - [`PageViewport`] - both, over a vertical stack of regions
//!
//! The tracker only sees the traits, so a browser binding or a test double can
//! stand in for [`PageViewport`].
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::state::viewport::{PageViewport, ViewportObserver};
//!
//! let page = PageViewport::new(800.0);
//! page.push_region("hero", 900.0);
//! page.push_region("projects", 1200.0);
//!
//! let id = page.observe(&"projects".into(), &[0.25, 0.5], Rc::new(|batch| {
//!     for obs in batch {
//!         println!("{} at {:.2}", obs.region, obs.intersection_ratio);
//!     }
//! }));
//!
//! page.set_scroll(700.0); // crosses 0.25 for "projects"
//! page.unobserve(id);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::{RegionId, ViewportObservation};

// =============================================================================
// TRAITS
// =============================================================================

/// Receives batches of visibility changes.
pub type ObservationCallback = Rc<dyn Fn(&[ViewportObservation])>;

/// Receives the new vertical scroll offset.
pub type ScrollCallback = Rc<dyn Fn(f32)>;

/// Registration handle returned by [`ViewportObserver::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObservationId(pub u64);

/// Registration handle returned by [`ScrollSource::on_scroll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScrollSubscription(pub u64);

/// Threshold-crossing visibility notifications.
pub trait ViewportObserver {
    /// Whether the region exists on the page.
    fn contains(&self, region: &RegionId) -> bool;

    /// Watch `region`. The callback gets the current visibility right away,
    /// then a new observation whenever the region starts or stops
    /// intersecting or its ratio crosses one of `thresholds`. Observing an
    /// unknown region registers nothing that will ever fire.
    fn observe(
        &self,
        region: &RegionId,
        thresholds: &[f32],
        callback: ObservationCallback,
    ) -> ObservationId;

    /// Watch several regions with one callback. The current visibility of
    /// all of them arrives as a single batch, in `regions` order. Hosts that
    /// cannot batch may rely on this default, which delivers per region.
    fn observe_batch(
        &self,
        regions: &[RegionId],
        thresholds: &[f32],
        callback: ObservationCallback,
    ) -> Vec<ObservationId> {
        regions
            .iter()
            .map(|region| self.observe(region, thresholds, callback.clone()))
            .collect()
    }

    /// Stop a registration. Unknown ids are ignored.
    fn unobserve(&self, id: ObservationId);
}

/// Scroll position queries and listeners.
pub trait ScrollSource {
    fn scroll_y(&self) -> f32;
    fn viewport_height(&self) -> f32;
    fn on_scroll(&self, callback: ScrollCallback) -> ScrollSubscription;
    fn off_scroll(&self, subscription: ScrollSubscription);
}

/// Everything the navigation tracker needs from its host.
pub trait Viewport: ViewportObserver + ScrollSource {}

impl<T: ViewportObserver + ScrollSource> Viewport for T {}

// =============================================================================
// PAGE VIEWPORT
// =============================================================================

#[derive(Clone, Debug)]
struct Region {
    id: RegionId,
    top: f32,
    height: f32,
}

struct Registration {
    id: ObservationId,
    region: RegionId,
    thresholds: Vec<f32>,
    callback: ObservationCallback,
    /// Last delivered (intersecting, thresholds met).
    last: Option<(bool, usize)>,
}

struct PageInner {
    regions: Vec<Region>,
    scroll_y: f32,
    viewport_height: f32,
    registrations: Vec<Registration>,
    scroll_listeners: Vec<(ScrollSubscription, ScrollCallback)>,
    next_id: u64,
}

impl PageInner {
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn region(&self, id: &RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| &r.id == id)
    }

    fn page_height(&self) -> f32 {
        self.regions.iter().map(|r| r.height).sum()
    }

    fn max_scroll(&self) -> f32 {
        (self.page_height() - self.viewport_height).max(0.0)
    }

    fn visibility(&self, region: &Region) -> (bool, f32) {
        let view_top = self.scroll_y;
        let view_bottom = self.scroll_y + self.viewport_height;
        let bottom = region.top + region.height;

        if region.height <= 0.0 {
            let inside = region.top >= view_top && region.top <= view_bottom;
            return (inside, if inside { 1.0 } else { 0.0 });
        }

        let visible = (bottom.min(view_bottom) - region.top.max(view_top)).max(0.0);
        let ratio = (visible / region.height).clamp(0.0, 1.0);
        (visible > 0.0, ratio)
    }

    /// Observations whose threshold bucket changed, grouped per callback in
    /// registration order and tagged with the registration they belong to.
    fn collect_changes(&mut self) -> Vec<PendingBatch> {
        let mut batches: Vec<PendingBatch> = Vec::new();

        let snapshots: Vec<Option<(bool, f32)>> = self
            .registrations
            .iter()
            .map(|reg| self.region(&reg.region).map(|r| self.visibility(r)))
            .collect();

        for (reg, snapshot) in self.registrations.iter_mut().zip(snapshots) {
            let Some((intersecting, ratio)) = snapshot else {
                continue;
            };
            let state = (intersecting, thresholds_met(&reg.thresholds, ratio));
            if reg.last == Some(state) {
                continue;
            }
            reg.last = Some(state);

            let observation = ViewportObservation::new(reg.region.clone(), intersecting, ratio);
            match batches
                .iter_mut()
                .find(|(cb, _)| same_callback(cb, &reg.callback))
            {
                Some((_, batch)) => batch.push((reg.id, observation)),
                None => batches.push((reg.callback.clone(), vec![(reg.id, observation)])),
            }
        }

        batches
    }
}

/// A callback with the observations queued for it.
type PendingBatch = (ObservationCallback, Vec<(ObservationId, ViewportObservation)>);

fn thresholds_met(thresholds: &[f32], ratio: f32) -> usize {
    thresholds.iter().filter(|t| ratio >= **t).count()
}

fn same_callback(a: &ObservationCallback, b: &ObservationCallback) -> bool {
    std::ptr::eq(
        Rc::as_ptr(a) as *const (),
        Rc::as_ptr(b) as *const (),
    )
}

/// A vertical page of stacked regions with a scrollable viewport.
///
/// Units are pixels. Callbacks are invoked with no internal borrow held, so
/// they may query the viewport or (un)register observers.
pub struct PageViewport {
    inner: RefCell<PageInner>,
}

impl PageViewport {
    pub fn new(viewport_height: f32) -> Self {
        Self {
            inner: RefCell::new(PageInner {
                regions: Vec::new(),
                scroll_y: 0.0,
                viewport_height: viewport_height.max(0.0),
                registrations: Vec::new(),
                scroll_listeners: Vec::new(),
                next_id: 0,
            }),
        }
    }

    /// Append a region below the existing ones.
    pub fn push_region(&self, id: impl Into<RegionId>, height: f32) {
        {
            let mut inner = self.inner.borrow_mut();
            let top = inner.page_height();
            inner.regions.push(Region {
                id: id.into(),
                top,
                height: height.max(0.0),
            });
        }
        self.notify_observers();
    }

    /// Top edge of a region.
    pub fn region_top(&self, id: &RegionId) -> Option<f32> {
        self.inner.borrow().region(id).map(|r| r.top)
    }

    /// Current (intersecting, ratio) of a region.
    pub fn visibility(&self, id: &RegionId) -> Option<(bool, f32)> {
        let inner = self.inner.borrow();
        inner.region(id).map(|r| inner.visibility(r))
    }

    /// Regions overlapping the viewport, top to bottom, with their top edge.
    pub fn visible_regions(&self) -> Vec<(RegionId, f32)> {
        let inner = self.inner.borrow();
        inner
            .regions
            .iter()
            .filter(|r| inner.visibility(r).0)
            .map(|r| (r.id.clone(), r.top))
            .collect()
    }

    pub fn page_height(&self) -> f32 {
        self.inner.borrow().page_height()
    }

    pub fn max_scroll(&self) -> f32 {
        self.inner.borrow().max_scroll()
    }

    /// Scroll to `y`, clamped to the page.
    pub fn set_scroll(&self, y: f32) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let clamped = y.clamp(0.0, inner.max_scroll());
            let changed = clamped != inner.scroll_y;
            inner.scroll_y = clamped;
            changed
        };
        if changed {
            self.notify_scroll();
            self.notify_observers();
        }
    }

    /// Scroll by a delta. Returns false when already at the boundary.
    pub fn scroll_by(&self, dy: f32) -> bool {
        let before = self.scroll_y();
        self.set_scroll(before + dy);
        self.scroll_y() != before
    }

    /// Bring the top of a region to the top of the viewport.
    pub fn scroll_to_region(&self, id: &RegionId) -> bool {
        match self.region_top(id) {
            Some(top) => {
                self.set_scroll(top);
                true
            }
            None => false,
        }
    }

    pub fn set_viewport_height(&self, height: f32) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.viewport_height = height.max(0.0);
            let max = inner.max_scroll();
            if inner.scroll_y > max {
                inner.scroll_y = max;
            }
        }
        self.notify_scroll();
        self.notify_observers();
    }

    /// Number of live observer registrations.
    pub fn observer_count(&self) -> usize {
        self.inner.borrow().registrations.len()
    }

    /// Number of live scroll listeners.
    pub fn scroll_listener_count(&self) -> usize {
        self.inner.borrow().scroll_listeners.len()
    }

    fn notify_scroll(&self) {
        let (y, listeners) = {
            let inner = self.inner.borrow();
            let listeners: Vec<(ScrollSubscription, ScrollCallback)> = inner
                .scroll_listeners
                .iter()
                .map(|(id, cb)| (*id, cb.clone()))
                .collect();
            (inner.scroll_y, listeners)
        };
        for (id, listener) in listeners {
            if self.has_scroll_listener(id) {
                listener(y);
            }
        }
    }

    /// Earlier callbacks may unobserve; records of released registrations
    /// are dropped rather than delivered.
    fn notify_observers(&self) {
        let batches = self.inner.borrow_mut().collect_changes();
        for (callback, pending) in batches {
            let batch: Vec<ViewportObservation> = {
                let inner = self.inner.borrow();
                pending
                    .into_iter()
                    .filter(|(id, _)| inner.registrations.iter().any(|reg| reg.id == *id))
                    .map(|(_, observation)| observation)
                    .collect()
            };
            if !batch.is_empty() {
                callback(&batch);
            }
        }
    }

    fn has_scroll_listener(&self, id: ScrollSubscription) -> bool {
        self.inner
            .borrow()
            .scroll_listeners
            .iter()
            .any(|(sub, _)| *sub == id)
    }
}

impl PageViewport {
    /// Add a registration and return its current visibility, if the region exists.
    fn register(
        &self,
        region: &RegionId,
        thresholds: &[f32],
        callback: &ObservationCallback,
    ) -> (ObservationId, Option<ViewportObservation>) {
        let mut inner = self.inner.borrow_mut();
        let id = ObservationId(inner.next_id());
        let mut thresholds = thresholds.to_vec();
        thresholds.sort_by(|a, b| a.total_cmp(b));

        let visibility = inner.region(region).map(|r| inner.visibility(r));
        let last = visibility.map(|(hit, ratio)| (hit, thresholds_met(&thresholds, ratio)));
        inner.registrations.push(Registration {
            id,
            region: region.clone(),
            thresholds,
            callback: callback.clone(),
            last,
        });

        let initial = visibility.map(|(hit, ratio)| ViewportObservation::new(region.clone(), hit, ratio));
        (id, initial)
    }
}

impl ViewportObserver for PageViewport {
    fn contains(&self, region: &RegionId) -> bool {
        self.inner.borrow().region(region).is_some()
    }

    fn observe(
        &self,
        region: &RegionId,
        thresholds: &[f32],
        callback: ObservationCallback,
    ) -> ObservationId {
        let (id, initial) = self.register(region, thresholds, &callback);
        if let Some(observation) = initial {
            callback(&[observation]);
        }
        id
    }

    fn observe_batch(
        &self,
        regions: &[RegionId],
        thresholds: &[f32],
        callback: ObservationCallback,
    ) -> Vec<ObservationId> {
        let mut ids = Vec::with_capacity(regions.len());
        let mut batch = Vec::new();
        for region in regions {
            let (id, initial) = self.register(region, thresholds, &callback);
            ids.push(id);
            batch.extend(initial);
        }
        if !batch.is_empty() {
            callback(&batch);
        }
        ids
    }

    fn unobserve(&self, id: ObservationId) {
        self.inner
            .borrow_mut()
            .registrations
            .retain(|reg| reg.id != id);
    }
}

impl ScrollSource for PageViewport {
    fn scroll_y(&self) -> f32 {
        self.inner.borrow().scroll_y
    }

    fn viewport_height(&self) -> f32 {
        self.inner.borrow().viewport_height
    }

    fn on_scroll(&self, callback: ScrollCallback) -> ScrollSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = ScrollSubscription(inner.next_id());
        inner.scroll_listeners.push((id, callback));
        id
    }

    fn off_scroll(&self, subscription: ScrollSubscription) {
        self.inner
            .borrow_mut()
            .scroll_listeners
            .retain(|(id, _)| *id != subscription);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn setup() -> PageViewport {
        let page = PageViewport::new(100.0);
        page.push_region("hero", 100.0);
        page.push_region("a", 200.0);
        page.push_region("b", 100.0);
        page
    }

    fn recorder() -> (ObservationCallback, Rc<RefCell<Vec<Vec<ViewportObservation>>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        let cb: ObservationCallback = Rc::new(move |batch: &[ViewportObservation]| {
            log_clone.borrow_mut().push(batch.to_vec());
        });
        (cb, log)
    }

    #[test]
    fn test_layout() {
        let page = setup();
        assert_eq!(page.page_height(), 400.0);
        assert_eq!(page.max_scroll(), 300.0);
        assert_eq!(page.region_top(&"b".into()), Some(300.0));
        assert!(page.contains(&"a".into()));
        assert!(!page.contains(&"missing".into()));
    }

    #[test]
    fn test_visibility_ratio() {
        let page = setup();
        assert_eq!(page.visibility(&"hero".into()), Some((true, 1.0)));
        assert_eq!(page.visibility(&"a".into()), Some((false, 0.0)));

        page.set_scroll(50.0);
        assert_eq!(page.visibility(&"hero".into()), Some((true, 0.5)));
        assert_eq!(page.visibility(&"a".into()), Some((true, 0.25)));
    }

    #[test]
    fn test_scroll_clamps() {
        let page = setup();
        page.set_scroll(1000.0);
        assert_eq!(page.scroll_y(), 300.0);
        assert!(!page.scroll_by(10.0));
        assert!(page.scroll_by(-500.0));
        assert_eq!(page.scroll_y(), 0.0);
    }

    #[test]
    fn test_initial_observation_delivered() {
        let page = setup();
        let (cb, log) = recorder();

        page.observe(&"hero".into(), &[0.35], cb);

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0], vec![ViewportObservation::new("hero", true, 1.0)]);
    }

    #[test]
    fn test_notifies_only_on_threshold_crossing() {
        let page = setup();
        let (cb, log) = recorder();
        page.observe(&"hero".into(), &[0.35], cb);

        // 1.0 -> 0.9: still above 0.35, no notification
        page.set_scroll(10.0);
        assert_eq!(log.borrow().len(), 1);

        // 0.9 -> 0.3: crossed downward
        page.set_scroll(70.0);
        assert_eq!(log.borrow().len(), 2);
        assert!(log.borrow()[1][0].intersection_ratio < 0.35);

        // leaves the viewport entirely
        page.set_scroll(150.0);
        assert_eq!(log.borrow().len(), 3);
        assert!(!log.borrow()[2][0].is_intersecting);
    }

    #[test]
    fn test_batches_group_by_callback() {
        let page = setup();
        let (cb, log) = recorder();
        page.observe(&"a".into(), &[0.25], cb.clone());
        page.observe(&"b".into(), &[0.25], cb);
        log.borrow_mut().clear();

        page.set_scroll(250.0);

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        let regions: Vec<_> = log[0].iter().map(|o| o.region.as_str().to_string()).collect();
        assert_eq!(regions, vec!["a", "b"]);
    }

    #[test]
    fn test_observe_batch_single_initial_batch() {
        let page = setup();
        page.set_scroll(250.0);
        let (cb, log) = recorder();

        let ids = page.observe_batch(&["a".into(), "missing".into(), "b".into()], &[0.25], cb);

        assert_eq!(ids.len(), 3);
        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].len(), 2);
        assert_eq!(log[0][0].intersection_ratio, 0.25);
        assert_eq!(log[0][1].intersection_ratio, 0.5);
    }

    #[test]
    fn test_unknown_region_never_reports() {
        let page = setup();
        let (cb, log) = recorder();
        page.observe(&"missing".into(), &[0.25], cb);
        page.set_scroll(200.0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unobserve() {
        let page = setup();
        let (cb, log) = recorder();
        let id = page.observe(&"a".into(), &[0.25], cb);
        page.unobserve(id);
        assert_eq!(page.observer_count(), 0);

        page.set_scroll(200.0);
        assert_eq!(log.borrow().len(), 1); // only the initial one
    }

    #[test]
    fn test_unobserve_during_delivery_drops_pending_records() {
        let page = Rc::new(setup());
        let (cb, log) = recorder();
        let victim = Rc::new(Cell::new(None));

        let victim_clone = victim.clone();
        let page_weak = Rc::downgrade(&page);
        page.observe(
            &"hero".into(),
            &[0.35],
            Rc::new(move |_: &[ViewportObservation]| {
                if let (Some(page), Some(id)) = (page_weak.upgrade(), victim_clone.take()) {
                    page.unobserve(id);
                }
            }),
        );
        victim.set(Some(page.observe(&"a".into(), &[0.25], cb)));
        log.borrow_mut().clear();

        // hero crosses 0.35 first and releases "a" before its record goes out
        page.set_scroll(80.0);
        assert!(log.borrow().is_empty());
        assert_eq!(page.observer_count(), 1);
    }

    #[test]
    fn test_scroll_listener_removed_mid_notify_not_called() {
        let page = Rc::new(setup());
        let calls = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(None));

        let page_weak = Rc::downgrade(&page);
        let second_clone = second.clone();
        page.on_scroll(Rc::new(move |_| {
            if let (Some(page), Some(sub)) = (page_weak.upgrade(), second_clone.take()) {
                page.off_scroll(sub);
            }
        }));
        let calls_clone = calls.clone();
        second.set(Some(page.on_scroll(Rc::new(move |_| calls_clone.set(calls_clone.get() + 1)))));

        page.set_scroll(10.0);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_scroll_listeners() {
        let page = setup();
        let last = Rc::new(Cell::new(-1.0f32));
        let last_clone = last.clone();

        let sub = page.on_scroll(Rc::new(move |y| last_clone.set(y)));
        page.set_scroll(42.0);
        assert_eq!(last.get(), 42.0);

        page.off_scroll(sub);
        assert_eq!(page.scroll_listener_count(), 0);
        page.set_scroll(10.0);
        assert_eq!(last.get(), 42.0);
    }

    #[test]
    fn test_scroll_to_region() {
        let page = setup();
        assert!(page.scroll_to_region(&"a".into()));
        assert_eq!(page.scroll_y(), 100.0);
        assert!(!page.scroll_to_region(&"missing".into()));
    }

    #[test]
    fn test_visible_regions() {
        let page = setup();
        page.set_scroll(150.0);
        let visible: Vec<_> = page
            .visible_regions()
            .into_iter()
            .map(|(id, _)| id.as_str().to_string())
            .collect();
        assert_eq!(visible, vec!["a"]);
    }
}
