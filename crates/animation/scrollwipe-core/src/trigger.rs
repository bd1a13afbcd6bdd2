//! What makes a component's timeline move.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum Trigger {
    /// A navigation happened. Fired even when the path did not change.
    RouteChange(String),
    /// Normalized progress through a pin window, in `[0, 1]`.
    ScrollProgress(f32),
}

impl Trigger {
    pub fn route(pathname: impl Into<String>) -> Self {
        Trigger::RouteChange(pathname.into())
    }

    /// Progress trigger, clamped to `[0, 1]`. NaN becomes 0.
    pub fn scroll_progress(ratio: f32) -> Self {
        let ratio = if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        };
        Trigger::ScrollProgress(ratio)
    }
}
