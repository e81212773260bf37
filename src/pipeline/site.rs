//! Site - one page's worth of state wired to one viewport and one timer queue.
//!
//! Owns the navigation tracker, the hero's rotating text, the section panels
//! and the copy feedback. The terminal host drives it through scroll, select
//! and advance calls; tests drive it the same way without a terminal.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::pipeline::Site;
//!
//! let site = Site::new(SiteConfig::default(), 40.0 * 16.0)?;
//! site.activate();
//!
//! site.scroll_by(1200.0);
//! site.advance(Duration::from_millis(16));
//! println!("{}", site.nav().active_label());
//! ```

use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::SiteConfig;
use crate::error::Result;
use crate::state::clipboard::CopyFeedback;
use crate::state::nav::NavTracker;
use crate::state::panels::{ExperienceDrawer, SkillPanel};
use crate::state::rotate::RotatingText;
use crate::state::timers::TimerQueue;
use crate::state::viewport::{PageViewport, ScrollSource};
use crate::types::{AnchorId, RegionId};

pub struct Site {
    config: SiteConfig,
    sections: BTreeMap<AnchorId, RegionId>,
    page: Rc<PageViewport>,
    timers: Rc<TimerQueue>,
    nav: NavTracker,
    hero: RotatingText,
    skills: RefCell<SkillPanel>,
    drawer: RefCell<ExperienceDrawer>,
    copy: CopyFeedback,
}

impl Site {
    /// Lay out the page and build every component. Nothing observes or
    /// ticks until [`Site::activate`].
    pub fn new(config: SiteConfig, viewport_height: f32) -> Result<Self> {
        config.validate()?;

        let page = Rc::new(PageViewport::new(viewport_height));
        for region in &config.layout {
            page.push_region(region.region.clone(), region.height);
        }

        let timers = Rc::new(TimerQueue::new());
        let sections = config.section_map();
        let nav = NavTracker::new(
            config.nav.clone(),
            sections.clone(),
            config.hero.clone(),
            config.tracker.clone(),
        )?;
        let hero = RotatingText::new(config.phrases.clone(), config.rotation, timers.clone());
        let copy = CopyFeedback::new(Duration::from_millis(config.contact.copied_ms), timers.clone());

        Ok(Self {
            skills: RefCell::new(SkillPanel::new(config.content.pins.clone())),
            drawer: RefCell::new(ExperienceDrawer::new(config.content.experience.clone())),
            config,
            sections,
            page,
            timers,
            nav,
            hero,
            copy,
        })
    }

    pub fn activate(&self) {
        self.nav.activate(self.page.clone());
        self.hero.start();
        info!(regions = self.config.layout.len(), "site activated");
    }

    /// Release observers, listeners, key handlers and timers.
    pub fn deactivate(&self) {
        self.nav.deactivate();
        self.hero.stop();
        self.copy.dispose();
        info!("site deactivated");
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn page(&self) -> &Rc<PageViewport> {
        &self.page
    }

    pub fn timers(&self) -> &Rc<TimerQueue> {
        &self.timers
    }

    pub fn nav(&self) -> &NavTracker {
        &self.nav
    }

    pub fn hero(&self) -> &RotatingText {
        &self.hero
    }

    pub fn copy_feedback(&self) -> &CopyFeedback {
        &self.copy
    }

    pub fn skills(&self) -> Ref<'_, SkillPanel> {
        self.skills.borrow()
    }

    pub fn skills_mut(&self) -> RefMut<'_, SkillPanel> {
        self.skills.borrow_mut()
    }

    pub fn drawer(&self) -> Ref<'_, ExperienceDrawer> {
        self.drawer.borrow()
    }

    pub fn drawer_mut(&self) -> RefMut<'_, ExperienceDrawer> {
        self.drawer.borrow_mut()
    }

    // =========================================================================
    // Commands
    // =========================================================================

    pub fn scroll_by(&self, dy: f32) -> bool {
        self.page.scroll_by(dy)
    }

    /// Select the nav item at `index` and bring its section into view.
    /// Returns false for an index past the end of the nav.
    pub fn select(&self, index: usize) -> bool {
        let Some(item) = self.config.nav.get(index) else {
            return false;
        };
        debug!(anchor = %item.anchor, "nav item selected");
        self.nav.select_item(&item.anchor);
        if let Some(region) = self.sections.get(&item.anchor) {
            self.page.scroll_to_region(region);
        }
        true
    }

    pub fn copy_email(&self) {
        self.copy.copy(&self.config.contact.email);
    }

    /// Move site time forward, firing due animation and feedback timers.
    pub fn advance(&self, elapsed: Duration) -> usize {
        self.timers.advance(elapsed)
    }

    /// New viewport height, in pixels.
    pub fn resize(&self, viewport_height: f32) {
        self.page.set_viewport_height(viewport_height);
    }

    pub fn scroll_y(&self) -> f32 {
        self.page.scroll_y()
    }
}

// =============================================================================
// Tests
// =============================================================================
