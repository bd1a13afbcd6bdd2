//! Input contracts for the core engine.
//!
//! Adapters collect route changes, scroll samples and layout changes between
//! frames and pass them into `Engine::update()` once per display refresh.

use serde::{Deserialize, Serialize};

use crate::ids::SelectorId;
use crate::pin::Geometry;

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// Router path values observed since the last frame, oldest first. Every entry
    /// is a trigger, including repeats of the current path.
    #[serde(default)]
    pub route_changes: Vec<String>,
    /// Latest scroll sample, if the document scrolled.
    #[serde(default)]
    pub scroll: Option<ScrollSample>,
    /// Layout changes (resize, reflow) per frame selector. Applied before `scroll`.
    #[serde(default)]
    pub geometry: Vec<GeometryUpdate>,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScrollSample {
    /// Document scroll offset in pixels.
    pub offset: f32,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeometryUpdate {
    pub selector: SelectorId,
    pub geometry: Geometry,
}

impl Inputs {
    pub fn route(pathname: impl Into<String>) -> Self {
        Self {
            route_changes: vec![pathname.into()],
            ..Self::default()
        }
    }

    pub fn scroll(offset: f32) -> Self {
        Self {
            scroll: Some(ScrollSample { offset }),
            ..Self::default()
        }
    }

    pub fn with_geometry(mut self, selector: SelectorId, geometry: Geometry) -> Self {
        self.geometry.push(GeometryUpdate { selector, geometry });
        self
    }
}
