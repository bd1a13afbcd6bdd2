//! Last-applied style values of the elements one component animates.
//!
//! Every mutation goes through [`Stage::apply`], which records a [`Change`] only when
//! the value actually differs from what the element already shows.

use hashbrown::HashMap;

use crate::binding::TargetHandle;
use crate::outputs::{Change, Outputs};
use crate::value::{Property, Value};

#[derive(Debug, Default, Clone)]
pub struct Stage {
    values: HashMap<TargetHandle, HashMap<Property, Value>>,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, target: &str, property: Property) -> Option<&Value> {
        self.values.get(target).and_then(|props| props.get(&property))
    }

    /// Value the element currently shows, falling back to the property's initial value.
    pub fn current(&self, target: &str, property: Property) -> Value {
        self.get(target, property)
            .cloned()
            .unwrap_or_else(|| property.initial_value())
    }

    /// Write `value`; returns true (and records a change) if it differed.
    pub fn apply(
        &mut self,
        target: &str,
        property: Property,
        value: Value,
        out: &mut Outputs,
    ) -> bool {
        let props = self.values.entry_ref(target).or_default();
        if props.get(&property) == Some(&value) {
            return false;
        }
        props.insert(property, value.clone());
        out.push_change(Change {
            key: target.to_string(),
            property,
            value,
        });
        true
    }

    /// Record a value the host already shows, without emitting a change.
    pub fn seed(&mut self, target: &str, property: Property, value: Value) {
        self.values
            .entry_ref(target)
            .or_default()
            .insert(property, value);
    }
}
