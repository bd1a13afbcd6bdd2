//! Output contracts from the core engine.
//!
//! Outputs carry only the style changes for this frame, keyed by target handle and
//! property, and a separate list of semantic events. Adapters apply changes to the
//! host and forward events.

use serde::{Deserialize, Serialize};

use crate::binding::TargetHandle;
use crate::choreographer::Phase;
use crate::ids::{SelectorId, TimelineId};
use crate::timeline::PlayHandle;
use crate::value::{Property, Value};

/// One changed property on one target this frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub key: TargetHandle,
    pub property: Property,
    pub value: Value,
}

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoreEvent {
    TransitionStarted {
        pathname: String,
        handle: PlayHandle,
    },
    TransitionCancelled {
        handle: PlayHandle,
    },
    TransitionCompleted {
        handle: PlayHandle,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
    },
    StepSkipped {
        timeline: TimelineId,
        label: String,
    },
    FrameChanged {
        selector: SelectorId,
        index: usize,
        source: String,
    },
    PinChanged {
        selector: SelectorId,
        pinned: bool,
    },
    SelectorDisabled {
        selector: SelectorId,
        reason: String,
    },
}

/// Outputs returned by `Engine::update()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    /// Record a change. A later write to the same `(key, property)` in the same frame
    /// replaces the earlier one, so a frame only carries final values.
    pub fn push_change(&mut self, change: Change) {
        if let Some(existing) = self
            .changes
            .iter_mut()
            .find(|c| c.key == change.key && c.property == change.property)
        {
            existing.value = change.value;
        } else {
            self.changes.push(change);
        }
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Last value written for `(key, property)` this frame.
    pub fn change_for(&self, key: &str, property: Property) -> Option<&Value> {
        self.changes
            .iter()
            .find(|c| c.key == key && c.property == property)
            .map(|c| &c.value)
    }
}
