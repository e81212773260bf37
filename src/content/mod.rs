//! Site Content - Static, read-only data rendered by the section views
//!
//! Everything here is opaque to the state machines: nav items and phrases
//! feed the tracker and animator, the rest is passed straight to rendering.
//! [`SiteContent::default`] carries the shipped portfolio content.

mod data;

use serde::{Deserialize, Serialize};

pub use data::{default_nav_items, default_phrases};

// =============================================================================
// TYPES
// =============================================================================

/// Proficiency shown on a skill pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Expert,
    Strong,
    Working,
}

impl SkillLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Expert => "Expert",
            Self::Strong => "Strong",
            Self::Working => "Working",
        }
    }
}

/// A labeled marker on the tech-vault globe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillPin {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub color: Option<String>,
    pub level: SkillLevel,
    pub blurb: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub blurb: String,
    #[serde(default)]
    pub live: Option<String>,
    pub repo: String,
    pub tech: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub dates: String,
    pub tech: Vec<String>,
    pub details: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLink {
    pub label: String,
    pub href: String,
}

/// All section content of the site.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub name: String,
    pub tagline: String,
    /// Marquee rows of tech chips.
    pub tech_rows: Vec<Vec<String>>,
    pub pins: Vec<SkillPin>,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub contacts: Vec<ContactLink>,
}

impl Default for SiteContent {
    fn default() -> Self {
        data::default_content()
    }
}

impl SiteContent {
    /// Find a pin by its label.
    pub fn pin(&self, label: &str) -> Option<&SkillPin> {
        self.pins.iter().find(|p| p.label == label)
    }
}

// =============================================================================
// UTC OFFSET
// =============================================================================

/// Format a UTC offset, given in minutes east of UTC, as `+HH:00`.
///
/// Only the whole-hour part is shown (truncated toward zero), so `-210`
/// becomes `-03:00`.
pub fn format_utc_offset(minutes_east: i32) -> String {
    let hours = minutes_east / 60;
    let sign = if minutes_east >= 0 { '+' } else { '-' };
    format!("{}{:02}:00", sign, hours.unsigned_abs())
}
