//! Animatable properties and the values they carry.

use serde::{Deserialize, Serialize};

/// Visual properties the engine knows how to mutate on a target element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    Display,
    ZIndex,
    /// Height as a percentage of the element's full height.
    Height,
    TranslateY,
    Opacity,
    Scale,
    /// Media resource reference (image `src`).
    Source,
    /// Whether the element is held fixed in the viewport.
    Pinned,
}

impl Property {
    /// Host-facing name, close to the CSS/DOM attribute it maps to.
    pub fn css_name(self) -> &'static str {
        match self {
            Property::Display => "display",
            Property::ZIndex => "z-index",
            Property::Height => "height",
            Property::TranslateY => "transform.translateY",
            Property::Opacity => "opacity",
            Property::Scale => "transform.scale",
            Property::Source => "src",
            Property::Pinned => "pinned",
        }
    }

    /// Value assumed for an element that has never been written.
    pub fn initial_value(self) -> Value {
        match self {
            Property::Display => Value::Display(Display::Block),
            Property::ZIndex => Value::Float(0.0),
            Property::Height => Value::Percent(100.0),
            Property::TranslateY => Value::Percent(0.0),
            Property::Opacity => Value::Float(1.0),
            Property::Scale => Value::Float(1.0),
            Property::Source => Value::Text(String::new()),
            Property::Pinned => Value::Bool(false),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    Block,
    None,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    Float(f32),
    Percent(f32),
    Px(f32),
    Bool(bool),
    Text(String),
    Display(Display),
}

impl Value {
    /// Numeric payload for interpolatable kinds.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Value::Float(v) | Value::Percent(v) | Value::Px(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Same kind of value with a new numeric payload. Discrete kinds are returned unchanged.
    pub fn with_number(&self, v: f32) -> Value {
        match self {
            Value::Float(_) => Value::Float(v),
            Value::Percent(_) => Value::Percent(v),
            Value::Px(_) => Value::Px(v),
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_names_and_json_shape() {
        assert_eq!(Property::TranslateY.css_name(), "transform.translateY");
        assert_eq!(Property::Source.css_name(), "src");
        let json = serde_json::to_string(&Value::Percent(50.0)).unwrap();
        assert_eq!(json, r#"{"type":"percent","data":50.0}"#);
        let v: Value = serde_json::from_str(r#"{"type":"display","data":"none"}"#).unwrap();
        assert_eq!(v, Value::Display(Display::None));
        assert_eq!(Value::Text("a.jpg".into()).as_text(), Some("a.jpg"));
        assert_eq!(Value::Bool(true).as_number(), None);
    }
}
