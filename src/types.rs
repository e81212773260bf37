//! Core types shared by the navigation tracker, the rotating text animator and
//! the renderer.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of a navigable section, as used in nav links (`about`, `projects`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorId(String);

impl AnchorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Link form of the anchor (`#about`).
    pub fn href(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnchorId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AnchorId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifier of an observable page region.
///
/// Regions are what the viewport host knows about. The tracker maps them to
/// anchors through an explicit table handed in at construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RegionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// One entry of the navigation bar. List order is tab order, and the first
/// entry is the default active anchor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub anchor: AnchorId,
}

impl NavItem {
    pub fn new(label: impl Into<String>, anchor: impl Into<AnchorId>) -> Self {
        Self {
            label: label.into(),
            anchor: anchor.into(),
        }
    }
}

/// Visibility report for one region, delivered by a viewport observer.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportObservation {
    pub region: RegionId,
    pub is_intersecting: bool,
    /// Visible fraction of the region, 0.0..=1.0.
    pub intersection_ratio: f32,
}

impl ViewportObservation {
    pub fn new(region: impl Into<RegionId>, is_intersecting: bool, intersection_ratio: f32) -> Self {
        Self {
            region: region.into(),
            is_intersecting,
            intersection_ratio,
        }
    }
}

/// Read-only navigation state published by the tracker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationState {
    /// Hero dominates the viewport: bar docks at the bottom, highlight pinned.
    pub is_hero_zone: bool,
    pub active_anchor: AnchorId,
    pub is_menu_open: bool,
    /// Scrolled past the small styling threshold.
    pub is_scrolled: bool,
}

impl NavigationState {
    pub fn initial(default_anchor: AnchorId) -> Self {
        Self {
            is_hero_zone: true,
            active_anchor: default_anchor,
            is_menu_open: false,
            is_scrolled: false,
        }
    }

    /// Style flags the renderer draws the bar with.
    pub fn bar_flags(&self) -> NavBarFlags {
        let mut flags = NavBarFlags::empty();
        flags.set(NavBarFlags::DOCK_BOTTOM, self.is_hero_zone);
        flags.set(NavBarFlags::SCROLLED, self.is_scrolled);
        flags.set(NavBarFlags::MENU_OPEN, self.is_menu_open);
        flags
    }
}

bitflags::bitflags! {
    /// Nav bar presentation flags derived from [`NavigationState`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NavBarFlags: u8 {
        const DOCK_BOTTOM = 1 << 0;
        const SCROLLED = 1 << 1;
        const MENU_OPEN = 1 << 2;
    }
}

// =============================================================================
// Rotation
// =============================================================================

/// Position of the rotating text animator within its phrase cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RotationState {
    pub phrase_index: usize,
    /// Visible prefix length, in characters.
    pub visible_length: usize,
    pub is_deleting: bool,
}

/// Effective phase of the typing cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationPhase {
    Growing,
    Held,
    Shrinking,
}

impl RotationState {
    /// Phase for a phrase of `phrase_len` characters.
    pub fn phase(&self, phrase_len: usize) -> RotationPhase {
        if self.is_deleting {
            RotationPhase::Shrinking
        } else if self.visible_length >= phrase_len {
            RotationPhase::Held
        } else {
            RotationPhase::Growing
        }
    }

    /// Advance by one timer tick.
    ///
    /// `lengths` yields the character count of each phrase. After the tick,
    /// a phrase that has been fully deleted is immediately replaced by the
    /// next one (wrapping), so the state never rests at "deleting, empty".
    pub fn tick(&mut self, lengths: &[usize]) {
        if lengths.is_empty() {
            return;
        }
        let len = lengths[self.phrase_index];
        match self.phase(len) {
            RotationPhase::Growing => self.visible_length += 1,
            RotationPhase::Held => self.is_deleting = true,
            RotationPhase::Shrinking => {
                self.visible_length = self.visible_length.saturating_sub(1);
            }
        }
        self.settle(lengths.len());
    }

    /// Apply the immediate advance once deletion has emptied the phrase.
    pub fn settle(&mut self, phrase_count: usize) {
        if self.is_deleting && self.visible_length == 0 && phrase_count > 0 {
            self.is_deleting = false;
            self.phrase_index = (self.phrase_index + 1) % phrase_count;
        }
    }

    /// Back to the first phrase, nothing typed.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
