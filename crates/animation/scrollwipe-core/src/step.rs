//! Steps: the timed visual mutations a timeline is made of.
//!
//! A step targets one or more elements, tweens one or more properties on each,
//! and is placed on the timeline either at an absolute offset or after everything
//! scheduled before it. Multi-target steps can be staggered so targets start in a
//! cascade instead of all at once.

use serde::{Deserialize, Serialize};

use crate::binding::TargetHandle;
use crate::interp::Easing;
use crate::value::{Property, Value};

/// Default step duration in seconds.
pub const DEFAULT_DURATION: f32 = 0.5;

/// How a single property changes over the step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tween {
    /// From whatever value the target holds when the tween starts.
    To(Value),
    FromTo { from: Value, to: Value },
    /// Discrete switch applied when the tween completes.
    Set(Value),
    /// Hard cut through a list of text values (`floor(t * (n - 1))`).
    Frames(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyTween {
    pub property: Property,
    pub tween: Tween,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StaggerDirection {
    /// First target starts earliest.
    #[default]
    Forward,
    /// Last target starts earliest.
    Reverse,
}

/// Spread of a step's start time across its targets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stagger {
    /// Total spread in seconds between the first and last target to start.
    pub amount: f32,
    #[serde(default)]
    pub direction: StaggerDirection,
}

impl Stagger {
    pub fn none() -> Self {
        Self::default()
    }

    /// Signed amount: negative means [`StaggerDirection::Reverse`].
    pub fn signed(amount: f32) -> Self {
        let direction = if amount < 0.0 {
            StaggerDirection::Reverse
        } else {
            StaggerDirection::Forward
        };
        Self {
            amount: amount.abs(),
            direction,
        }
    }

    /// Start delay of target `index` out of `count`, relative to the step offset.
    pub fn delay_for(&self, index: usize, count: usize) -> f32 {
        if count <= 1 || self.amount <= 0.0 {
            return 0.0;
        }
        let each = self.amount / (count - 1) as f32;
        let slot = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => count - 1 - index.min(count - 1),
        };
        slot as f32 * each
    }
}

/// Where a step lands on its timeline.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Position {
    /// Absolute offset from timeline start.
    At(f32),
    /// After the end of everything scheduled so far, plus `gap` (negative overlaps).
    Sequential { gap: f32 },
}

impl Default for Position {
    fn default() -> Self {
        Position::Sequential { gap: 0.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub label: Option<String>,
    pub targets: Vec<TargetHandle>,
    pub props: Vec<PropertyTween>,
    pub duration: f32,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default)]
    pub stagger: Stagger,
}

impl Step {
    pub fn new<I, T>(targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetHandle>,
    {
        Self {
            label: None,
            targets: targets.into_iter().map(Into::into).collect(),
            props: Vec::new(),
            duration: DEFAULT_DURATION,
            position: Position::default(),
            easing: Easing::default(),
            stagger: Stagger::none(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn to(mut self, property: Property, value: Value) -> Self {
        self.props.push(PropertyTween {
            property,
            tween: Tween::To(value),
        });
        self
    }

    pub fn from_to(mut self, property: Property, from: Value, to: Value) -> Self {
        self.props.push(PropertyTween {
            property,
            tween: Tween::FromTo { from, to },
        });
        self
    }

    /// Discrete switch; also makes the step instantaneous.
    pub fn set(mut self, property: Property, value: Value) -> Self {
        self.props.push(PropertyTween {
            property,
            tween: Tween::Set(value),
        });
        self.duration = 0.0;
        self
    }

    pub fn frames(mut self, property: Property, frames: Vec<String>) -> Self {
        self.props.push(PropertyTween {
            property,
            tween: Tween::Frames(frames),
        });
        self
    }

    pub fn duration(mut self, seconds: f32) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    pub fn at(mut self, offset: f32) -> Self {
        self.position = Position::At(offset);
        self
    }

    pub fn after(mut self, gap: f32) -> Self {
        self.position = Position::Sequential { gap };
        self
    }

    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = stagger;
        self
    }

    /// Time from the first target starting to the last target finishing.
    pub fn span(&self) -> f32 {
        // matches delay_for: a non-positive amount spreads nothing
        let spread = if self.targets.len() > 1 {
            self.stagger.amount.max(0.0)
        } else {
            0.0
        };
        self.duration + spread
    }

    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or("<unnamed>")
    }
}

/// A step fixed in place on a timeline. Immutable once scheduled.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledStep {
    step: Step,
    offset: f32,
}

impl ScheduledStep {
    pub(crate) fn new(step: Step, offset: f32) -> Self {
        Self { step, offset }
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    /// Resolved start, relative to timeline start.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn end(&self) -> f32 {
        self.offset + self.step.span()
    }
}
