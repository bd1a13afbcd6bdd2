//! Pin regions: the scroll window over which an anchor element is held in place.
//!
//! A window edge is written like `"top 20%"`: the first token is a point on the
//! anchor element, the second a point on the viewport. The edge is reached when
//! those two points line up.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::binding::TargetHandle;
use crate::error::CoreError;

/// One edge of a pin window, as fractions of element and viewport height.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScrollEdge {
    pub element: f32,
    pub viewport: f32,
}

impl ScrollEdge {
    pub const fn new(element: f32, viewport: f32) -> Self {
        Self { element, viewport }
    }

    /// Document scroll offset at which this edge is reached.
    pub fn resolve(&self, geometry: &Geometry) -> f32 {
        geometry.anchor_top + self.element * geometry.anchor_height
            - self.viewport * geometry.viewport_height
    }
}

fn parse_token(token: &str, input: &str) -> Result<f32, CoreError> {
    let invalid = |reason: String| CoreError::InvalidScrollEdge {
        input: input.to_string(),
        reason,
    };
    match token {
        "top" => Ok(0.0),
        "center" => Ok(0.5),
        "bottom" => Ok(1.0),
        _ => {
            let pct = token.strip_suffix('%').ok_or_else(|| {
                invalid(format!(
                    "'{token}' is not top, center, bottom or a percentage"
                ))
            })?;
            pct.trim()
                .parse::<f32>()
                .map(|v| v / 100.0)
                .map_err(|e| invalid(format!("'{token}': {e}")))
        }
    }
}

fn format_token(v: f32) -> String {
    if v == 0.0 {
        "top".into()
    } else if v == 0.5 {
        "center".into()
    } else if v == 1.0 {
        "bottom".into()
    } else {
        format!("{}%", v * 100.0)
    }
}

impl FromStr for ScrollEdge {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let first = tokens.next().ok_or_else(|| CoreError::InvalidScrollEdge {
            input: s.to_string(),
            reason: "empty".into(),
        })?;
        let element = parse_token(first, s)?;
        // A single token applies to both element and viewport.
        let viewport = match tokens.next() {
            Some(tok) => parse_token(tok, s)?,
            None => element,
        };
        if tokens.next().is_some() {
            return Err(CoreError::InvalidScrollEdge {
                input: s.to_string(),
                reason: "expected at most two tokens".into(),
            });
        }
        Ok(Self { element, viewport })
    }
}

impl TryFrom<String> for ScrollEdge {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ScrollEdge> for String {
    fn from(edge: ScrollEdge) -> Self {
        edge.to_string()
    }
}

impl fmt::Display for ScrollEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            format_token(self.element),
            format_token(self.viewport)
        )
    }
}

/// Layout measurements supplied by the host. `anchor_top` is the anchor's document
/// offset in normal flow (not while pinned).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub viewport_height: f32,
    pub anchor_top: f32,
    pub anchor_height: f32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum PinState {
    Before,
    Pinned,
    After,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PinRegion {
    pub start: f32,
    pub end: f32,
    pub anchor: TargetHandle,
}

impl PinRegion {
    pub fn from_geometry(
        anchor: TargetHandle,
        start: ScrollEdge,
        end: ScrollEdge,
        geometry: &Geometry,
    ) -> Self {
        Self {
            start: start.resolve(geometry),
            end: end.resolve(geometry),
            anchor,
        }
    }

    /// Scroll distance covered while pinned.
    pub fn span(&self) -> f32 {
        (self.end - self.start).max(0.0)
    }

    /// Normalized progress through the window, clamped to `[0, 1]`.
    /// An empty window jumps from 0 to 1 at its start.
    pub fn progress(&self, scroll: f32) -> f32 {
        let span = self.span();
        if span <= 0.0 {
            return if scroll >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll - self.start) / span).clamp(0.0, 1.0)
    }

    pub fn state(&self, scroll: f32) -> PinState {
        if scroll < self.start {
            PinState::Before
        } else if self.span() > 0.0 && scroll <= self.end {
            PinState::Pinned
        } else {
            PinState::After
        }
    }

    /// Translation that keeps the anchor visually fixed. Past the window the anchor
    /// stays displaced by the full span, so following content is not overlapped.
    pub fn pin_offset(&self, scroll: f32) -> f32 {
        (scroll - self.start).clamp(0.0, self.span())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keywords_and_percentages() {
        let edge: ScrollEdge = "top 20%".parse().unwrap();
        assert_eq!(edge, ScrollEdge::new(0.0, 0.2));
        let edge: ScrollEdge = "bottom -95%".parse().unwrap();
        assert_eq!(edge.element, 1.0);
        assert!((edge.viewport + 0.95).abs() < 1e-6);
        let edge: ScrollEdge = "center".parse().unwrap();
        assert_eq!(edge, ScrollEdge::new(0.5, 0.5));
    }

    #[test]
    fn rejects_garbage() {
        assert!("middle 20%".parse::<ScrollEdge>().is_err());
        assert!("top 20% 30%".parse::<ScrollEdge>().is_err());
        assert!("".parse::<ScrollEdge>().is_err());
        assert!("top abc%".parse::<ScrollEdge>().is_err());
    }

    #[test]
    fn display_uses_keywords_when_possible() {
        assert_eq!(ScrollEdge::new(0.0, 1.0).to_string(), "top bottom");
    }
}
