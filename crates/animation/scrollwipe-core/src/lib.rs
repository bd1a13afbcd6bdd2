//! scrollwipe core (host-agnostic)
//!
//! A small timeline animation engine for two effects:
//! - a page-transition wipe replayed on every route change ([`Choreographer`]);
//! - a scroll-scrubbed image sequence with a pinned anchor ([`FrameSelector`]).
//!
//! Both are built on [`Timeline`], an ordered list of timed, optionally staggered
//! [`Step`]s. The engine never touches a DOM: it emits [`Change`]s keyed by target
//! handle and property, which an adapter applies to the host once per frame.

pub mod binding;
pub mod choreographer;
pub mod config;
pub mod engine;
pub mod error;
pub mod frame_selector;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod outputs;
pub mod pin;
pub mod stage;
pub mod step;
pub mod timeline;
pub mod trigger;
pub mod value;

// Re-exports for consumers (adapters)
pub use binding::{IdentityResolver, TargetHandle, TargetResolver};
pub use choreographer::{Choreographer, Phase};
pub use config::{Config, ScrollConfig, TransitionConfig};
pub use engine::Engine;
pub use error::CoreError;
pub use frame_selector::{FrameSelector, FrameSelectorCfg, FrameSequence, Scrub};
pub use ids::{RunId, SelectorId, TimelineId};
pub use inputs::{GeometryUpdate, Inputs, ScrollSample};
pub use interp::functions::frame_index;
pub use interp::Easing;
pub use outputs::{Change, CoreEvent, Outputs};
pub use pin::{Geometry, PinRegion, PinState, ScrollEdge};
pub use stage::Stage;
pub use step::{Position, Stagger, StaggerDirection, Step, Tween};
pub use timeline::{PlayHandle, RunStatus, Timeline};
pub use trigger::Trigger;
pub use value::{Display, Property, Value};
