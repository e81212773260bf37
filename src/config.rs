//! Site configuration.
//!
//! Every field has a serde default, so an empty JSON object yields the shipped
//! site. Tracker thresholds and animation timings live here rather than as
//! constants so a host can tune them without touching the state machines.
//!
//! ```ignore
//! let config = SiteConfig::load("site.json")?;
//! let site = Site::new(config, 40.0 * 16.0)?;
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::content::{default_nav_items, default_phrases, SiteContent};
use crate::error::{FolioError, Result};
use crate::types::{AnchorId, NavItem, RegionId};

// =============================================================================
// Rotation timing
// =============================================================================

/// Timings of the rotating text animator, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationTiming {
    #[serde(default = "default_typing_ms")]
    pub typing_ms: u64,
    #[serde(default = "default_deleting_ms")]
    pub deleting_ms: u64,
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
}

impl Default for RotationTiming {
    fn default() -> Self {
        Self {
            typing_ms: default_typing_ms(),
            deleting_ms: default_deleting_ms(),
            pause_ms: default_pause_ms(),
        }
    }
}

impl RotationTiming {
    pub fn new(typing_ms: u64, deleting_ms: u64, pause_ms: u64) -> Self {
        Self {
            typing_ms,
            deleting_ms,
            pause_ms,
        }
    }

    pub fn typing(&self) -> Duration {
        Duration::from_millis(self.typing_ms)
    }

    pub fn deleting(&self) -> Duration {
        Duration::from_millis(self.deleting_ms)
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

fn default_typing_ms() -> u64 {
    60
}

fn default_deleting_ms() -> u64 {
    40
}

fn default_pause_ms() -> u64 {
    1100
}

// =============================================================================
// Tracker thresholds
// =============================================================================

/// Thresholds of the navigation activity tracker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Visible fraction of the hero region that counts as "in hero zone".
    #[serde(default = "default_hero_threshold")]
    pub hero_threshold: f32,
    /// Section visibility thresholds that trigger re-evaluation.
    #[serde(default = "default_section_thresholds")]
    pub section_thresholds: Vec<f32>,
    /// Without a hero region, hero zone holds while scroll < factor * viewport height.
    #[serde(default = "default_fallback_factor")]
    pub fallback_viewport_factor: f32,
    /// Scroll offset past which the bar switches to its scrolled styling.
    #[serde(default = "default_scrolled_px")]
    pub scrolled_px: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            hero_threshold: default_hero_threshold(),
            section_thresholds: default_section_thresholds(),
            fallback_viewport_factor: default_fallback_factor(),
            scrolled_px: default_scrolled_px(),
        }
    }
}

fn default_hero_threshold() -> f32 {
    0.35
}

fn default_section_thresholds() -> Vec<f32> {
    vec![0.25, 0.40, 0.55, 0.70]
}

fn default_fallback_factor() -> f32 {
    0.6
}

fn default_scrolled_px() -> f32 {
    14.0
}

// =============================================================================
// Contact
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default = "default_email")]
    pub email: String,
    /// How long the "copied" confirmation stays up.
    #[serde(default = "default_copied_ms")]
    pub copied_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            email: default_email(),
            copied_ms: default_copied_ms(),
        }
    }
}

fn default_email() -> String {
    "bhanusad@mail.uc.edu".to_string()
}

fn default_copied_ms() -> u64 {
    1600
}

// =============================================================================
// Page layout
// =============================================================================

/// One region of the page, stacked top to bottom in list order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionLayout {
    pub region: RegionId,
    /// Height in pixels.
    pub height: f32,
    /// Heading the terminal renderer shows for the region.
    #[serde(default)]
    pub title: Option<String>,
}

impl RegionLayout {
    pub fn new(region: impl Into<RegionId>, height: f32, title: Option<&str>) -> Self {
        Self {
            region: region.into(),
            height,
            title: title.map(String::from),
        }
    }
}

fn default_layout() -> Vec<RegionLayout> {
    vec![
        RegionLayout::new("hero", 900.0, None),
        RegionLayout::new("portfolio", 760.0, Some("Portfolio")),
        RegionLayout::new("tech-vault", 860.0, Some("Tech Vault")),
        RegionLayout::new("projects", 1180.0, Some("Projects")),
        RegionLayout::new("experience", 1020.0, Some("Experience")),
        RegionLayout::new("contact", 720.0, Some("Contact")),
    ]
}

// =============================================================================
// Site config
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_nav_items")]
    pub nav: Vec<NavItem>,
    /// Hero region; `None` switches the tracker to its scroll heuristic.
    #[serde(default = "default_hero")]
    pub hero: Option<RegionId>,
    /// Anchor to region table. When absent, each anchor observes the region
    /// of the same name.
    #[serde(default)]
    pub sections: Option<BTreeMap<AnchorId, RegionId>>,
    #[serde(default = "default_layout")]
    pub layout: Vec<RegionLayout>,
    #[serde(default = "default_phrases")]
    pub phrases: Vec<String>,
    #[serde(default)]
    pub rotation: RotationTiming,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub content: SiteContent,
    #[serde(default)]
    pub utc_offset_minutes: i32,
    /// Pixels per terminal row when the site is drawn in a terminal.
    #[serde(default = "default_row_height")]
    pub row_height_px: f32,
}

fn default_hero() -> Option<RegionId> {
    Some(RegionId::new("hero"))
}

fn default_row_height() -> f32 {
    16.0
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            nav: default_nav_items(),
            hero: default_hero(),
            sections: None,
            layout: default_layout(),
            phrases: default_phrases(),
            rotation: RotationTiming::default(),
            tracker: TrackerConfig::default(),
            contact: ContactConfig::default(),
            content: SiteContent::default(),
            utc_offset_minutes: 0,
            row_height_px: default_row_height(),
        }
    }
}

impl SiteConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        debug!(nav = config.nav.len(), phrases = config.phrases.len(), "parsed site config");
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FolioError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        info!(path = %path.display(), "loaded site config");
        Ok(config)
    }

    /// Reject configs the tracker cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.nav.is_empty() {
            return Err(FolioError::EmptyNavigation);
        }
        let timing = &self.rotation;
        for (name, ms) in [
            ("typing_ms", timing.typing_ms),
            ("deleting_ms", timing.deleting_ms),
            ("pause_ms", timing.pause_ms),
        ] {
            if ms == 0 {
                return Err(FolioError::ZeroTiming(name));
            }
        }
        Ok(())
    }

    /// The anchor to region table the tracker is built with.
    pub fn section_map(&self) -> BTreeMap<AnchorId, RegionId> {
        match &self.sections {
            Some(map) => map.clone(),
            None => self
                .nav
                .iter()
                .map(|item| (item.anchor.clone(), RegionId::new(item.anchor.as_str())))
                .collect(),
        }
    }
}
