//! Section panels - Tech-vault skill panel and experience drawer.
//!
//! Small view-state holders for the two interactive sections. Neither touches
//! the viewport or timers.

use tracing::debug;

use crate::content::{Experience, SkillPin};

// =============================================================================
// SKILL PANEL
// =============================================================================

/// Skills list of the tech vault plus the globe pin selection.
///
/// A clicked pin stays active until clicked again. Hover only shows while no
/// pin is active.
#[derive(Clone, Debug)]
pub struct SkillPanel {
    pins: Vec<SkillPin>,
    open: bool,
    active: Option<usize>,
    hovered: Option<usize>,
}

impl SkillPanel {
    pub fn new(pins: Vec<SkillPin>) -> Self {
        Self {
            pins,
            open: false,
            active: None,
            hovered: None,
        }
    }

    pub fn pins(&self) -> &[SkillPin] {
        &self.pins
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    fn index_of(&self, label: &str) -> Option<usize> {
        self.pins.iter().position(|p| p.label == label)
    }

    /// Click a pin: activates it, or clears it if it was already active.
    /// Unknown labels are ignored.
    pub fn click(&mut self, label: &str) {
        let Some(index) = self.index_of(label) else {
            return;
        };
        self.active = if self.active == Some(index) { None } else { Some(index) };
        debug!(pin = label, active = self.active.is_some(), "skill pin clicked");
    }

    /// Pointer entered a pin, or left all pins with `None`.
    pub fn hover(&mut self, label: Option<&str>) {
        self.hovered = label.and_then(|l| self.index_of(l));
    }

    pub fn active(&self) -> Option<&SkillPin> {
        self.active.map(|i| &self.pins[i])
    }

    pub fn hovered(&self) -> Option<&SkillPin> {
        self.hovered.map(|i| &self.pins[i])
    }

    /// Pin shown in the detail card: the active one, else the hovered one.
    pub fn selected(&self) -> Option<&SkillPin> {
        self.active.or(self.hovered).map(|i| &self.pins[i])
    }
}

// =============================================================================
// EXPERIENCE DRAWER
// =============================================================================

/// Detail drawer over the experience timeline. At most one entry is open.
#[derive(Clone, Debug)]
pub struct ExperienceDrawer {
    entries: Vec<Experience>,
    open: Option<usize>,
}

impl ExperienceDrawer {
    pub fn new(entries: Vec<Experience>) -> Self {
        Self { entries, open: None }
    }

    pub fn entries(&self) -> &[Experience] {
        &self.entries
    }

    /// Open the entry at `index`. Out-of-range indices are ignored.
    pub fn open(&mut self, index: usize) {
        if index < self.entries.len() {
            self.open = Some(index);
        }
    }

    /// Close the drawer (also what an overlay click does).
    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<&Experience> {
        self.open.map(|i| &self.entries[i])
    }
}

// =============================================================================
// TESTS
// =============================================================================
