//! Core configuration for scrollwipe-core.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::frame_selector::Scrub;
use crate::interp::Easing;

/// Engine configuration. Every field has a default, so partial JSON is accepted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transition: TransitionConfig,
    pub scroll: ScrollConfig,
}

impl Config {
    pub fn from_json_str(s: &str) -> Result<Self, CoreError> {
        serde_json::from_str(s).map_err(|e| CoreError::Config(e.to_string()))
    }
}

/// Page-transition wipe. Paths are canonical target paths handed to the resolver;
/// panels are addressed as `{panels}/{index}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Full-viewport cover layer holding the panels.
    pub overlay: String,
    pub panels: String,
    pub panel_count: usize,
    /// Wrapper around the routed page content (the children slot).
    pub content: String,
    /// Stacking order of the overlay while it covers the page.
    pub z_index: f32,
    /// Per-panel duration of both the grow and the slide-away, in seconds.
    pub panel_duration: f32,
    /// Signed stagger spread; negative fills from the last panel.
    pub stagger: f32,
    pub easing: Easing,
    /// Offset from trigger at which the content entrance starts.
    pub entrance_delay: f32,
    pub entrance_duration: f32,
    /// Content scale at the start of the entrance; it settles to 1.
    pub entrance_scale: f32,
    pub entrance_easing: Easing,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            overlay: "stairs".into(),
            panels: "stairs/panel".into(),
            panel_count: 5,
            content: "page".into(),
            z_index: 20.0,
            panel_duration: 0.4,
            stagger: -0.1,
            easing: Easing::QuadOut,
            entrance_delay: 1.0,
            entrance_duration: 0.5,
            entrance_scale: 1.2,
            entrance_easing: Easing::QuadOut,
        }
    }
}

impl TransitionConfig {
    pub fn panel_paths(&self) -> Vec<String> {
        (0..self.panel_count)
            .map(|i| format!("{}/{}", self.panels, i))
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Used by frame selectors that do not set their own scrub.
    pub default_scrub: Scrub,
}
