//! Scroll-linked frame selector.
//!
//! Binds an ordered list of image URLs and one display surface to a pin region.
//! Scroll samples become normalized progress, progress becomes a frame index
//! (`floor(p * (N - 1))`), and the surface source is rewritten only when the index
//! changes. The anchor element is held in place while the window is active.

use serde::{Deserialize, Serialize};

use crate::binding::{resolve_all, IdentityResolver, TargetHandle, TargetResolver};
use crate::error::CoreError;
use crate::ids::{IdAllocator, SelectorId};
use crate::interp::functions::frame_index;
use crate::interp::Easing;
use crate::outputs::{CoreEvent, Outputs};
use crate::pin::{Geometry, PinRegion, PinState, ScrollEdge};
use crate::stage::Stage;
use crate::step::Step;
use crate::timeline::Timeline;
use crate::trigger::Trigger;
use crate::value::{Property, Value};

/// Progress differences below this are treated as caught up.
const SCRUB_SNAP: f32 = 1e-4;

/// How rendered progress follows scroll progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Scrub {
    /// Rendered progress equals scroll progress.
    #[default]
    Instant,
    /// Rendered progress eases toward scroll progress with time constant `seconds`.
    Smoothed { seconds: f32 },
}

impl Scrub {
    /// Next rendered progress after `dt` seconds. Never overshoots `target`.
    pub fn approach(self, current: f32, target: f32, dt: f32) -> f32 {
        match self {
            Scrub::Instant => target,
            Scrub::Smoothed { seconds } => {
                if seconds <= 0.0 {
                    return target;
                }
                let k = 1.0 - (-dt.max(0.0) / seconds).exp();
                let next = current + (target - current) * k;
                if (target - next).abs() < SCRUB_SNAP {
                    target
                } else {
                    next
                }
            }
        }
    }
}

/// Ordered, non-empty list of media resource URLs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FrameSequence(Vec<String>);

impl FrameSequence {
    pub fn new(frames: Vec<String>) -> Result<Self, CoreError> {
        if frames.is_empty() {
            return Err(CoreError::EmptyFrameSequence);
        }
        Ok(Self(frames))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false once constructed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn index_for(&self, progress: f32) -> usize {
        frame_index(progress, self.len())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl TryFrom<Vec<String>> for FrameSequence {
    type Error = CoreError;

    fn try_from(frames: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(frames)
    }
}

impl From<FrameSequence> for Vec<String> {
    fn from(seq: FrameSequence) -> Self {
        seq.0
    }
}

fn default_start() -> ScrollEdge {
    ScrollEdge::new(0.0, 0.2)
}

fn default_end() -> ScrollEdge {
    ScrollEdge::new(0.0, -0.95)
}

/// Configuration for one frame selector. `surface` and `anchor` are canonical
/// target paths handed to the resolver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSelectorCfg {
    pub frames: Vec<String>,
    pub surface: String,
    pub anchor: String,
    #[serde(default = "default_start")]
    pub start: ScrollEdge,
    #[serde(default = "default_end")]
    pub end: ScrollEdge,
    /// Falls back to `ScrollConfig::default_scrub`.
    #[serde(default)]
    pub scrub: Option<Scrub>,
    /// Frame the surface already shows when mounted (e.g. from static markup).
    #[serde(default)]
    pub initial_index: Option<usize>,
}

impl FrameSelectorCfg {
    pub fn new(frames: Vec<String>, surface: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            frames,
            surface: surface.into(),
            anchor: anchor.into(),
            start: default_start(),
            end: default_end(),
            scrub: None,
            initial_index: None,
        }
    }
}

#[derive(Debug)]
pub struct FrameSelector {
    id: SelectorId,
    surface_path: String,
    anchor_path: String,
    surface: Option<TargetHandle>,
    anchor: Option<TargetHandle>,
    start: ScrollEdge,
    end: ScrollEdge,
    scrub: Scrub,
    /// `None` when the selector disabled itself.
    sequence: Option<FrameSequence>,
    stage: Stage,
    timelines: IdAllocator,
    timeline: Option<Timeline>,
    region: Option<PinRegion>,
    scroll: Option<f32>,
    target: f32,
    rendered: Option<f32>,
    displayed: Option<usize>,
    pin: Option<PinState>,
}

impl FrameSelector {
    /// Build a selector. An empty frame list disables it: it will never pin or mutate.
    pub fn new(id: SelectorId, cfg: FrameSelectorCfg, default_scrub: Scrub, out: &mut Outputs) -> Self {
        let sequence = match FrameSequence::new(cfg.frames) {
            Ok(seq) => Some(seq),
            Err(e) => {
                log::warn!("frame selector {}: {e}; disabling", id.0);
                out.push_event(CoreEvent::SelectorDisabled {
                    selector: id,
                    reason: e.to_string(),
                });
                None
            }
        };
        let mut selector = Self {
            id,
            surface_path: cfg.surface,
            anchor_path: cfg.anchor,
            surface: None,
            anchor: None,
            start: cfg.start,
            end: cfg.end,
            scrub: cfg.scrub.unwrap_or(default_scrub),
            sequence,
            stage: Stage::new(),
            timelines: IdAllocator::new(),
            timeline: None,
            region: None,
            scroll: None,
            target: 0.0,
            rendered: None,
            displayed: None,
            pin: None,
        };
        if let (Some(seq), Some(i)) = (&selector.sequence, cfg.initial_index) {
            let i = i.min(seq.len() - 1);
            if let Some(src) = seq.get(i) {
                selector
                    .stage
                    .seed(&selector.surface_path, Property::Source, Value::Text(src.to_string()));
            }
            selector.displayed = Some(i);
        }
        selector.prebind(&mut IdentityResolver, out);
        selector
    }

    pub fn id(&self) -> SelectorId {
        self.id
    }

    pub fn is_enabled(&self) -> bool {
        self.sequence.is_some()
    }

    pub fn sequence(&self) -> Option<&FrameSequence> {
        self.sequence.as_ref()
    }

    pub fn surface(&self) -> Option<&str> {
        self.surface.as_deref()
    }

    pub fn region(&self) -> Option<&PinRegion> {
        self.region.as_ref()
    }

    pub fn pin_state(&self) -> Option<PinState> {
        self.pin
    }

    /// Progress currently rendered (lags scroll progress when smoothed).
    pub fn progress(&self) -> f32 {
        self.rendered.unwrap_or(0.0)
    }

    pub fn target_progress(&self) -> f32 {
        self.target
    }

    pub fn displayed_index(&self) -> Option<usize> {
        self.displayed
    }

    pub fn displayed_source(&self) -> Option<&str> {
        let seq = self.sequence.as_ref()?;
        seq.get(self.displayed?)
    }

    /// Resolve surface and anchor, then rebuild the scrub timeline.
    pub fn prebind(&mut self, resolver: &mut dyn TargetResolver, out: &mut Outputs) {
        if !self.is_enabled() {
            return;
        }
        self.surface = resolve_all(resolver, [self.surface_path.as_str()]).pop();
        self.anchor = resolve_all(resolver, [self.anchor_path.as_str()]).pop();
        if let (Some(surface), Some(i)) = (&self.surface, self.displayed) {
            if surface != &self.surface_path {
                if let Some(src) = self.sequence.as_ref().and_then(|s| s.get(i)) {
                    self.stage
                        .seed(surface, Property::Source, Value::Text(src.to_string()));
                }
            }
        }
        self.rebuild_timeline(out);
        if let Some(scroll) = self.scroll {
            self.on_scroll(scroll, out);
        }
    }

    fn rebuild_timeline(&mut self, out: &mut Outputs) {
        let Some(seq) = &self.sequence else {
            return;
        };
        if let Some(mut old) = self.timeline.take() {
            old.cancel();
        }
        let mut tl = Timeline::new(self.timelines.alloc_timeline());
        tl.schedule(
            [Step::new(self.surface.iter().cloned())
                .label("frames")
                .frames(Property::Source, seq.as_slice().to_vec())
                .duration(1.0)
                .ease(Easing::Linear)
                .at(0.0)],
            out,
        );
        self.timeline = Some(tl);
    }

    /// New layout measurements: recompute the pin window, rebuild the timeline and
    /// re-apply the last scroll.
    pub fn set_geometry(&mut self, geometry: Geometry, out: &mut Outputs) {
        if !self.is_enabled() {
            return;
        }
        let anchor = self
            .anchor
            .clone()
            .unwrap_or_else(|| self.anchor_path.clone());
        self.region = Some(PinRegion::from_geometry(
            anchor, self.start, self.end, &geometry,
        ));
        self.rebuild_timeline(out);
        if let Some(scroll) = self.scroll {
            self.on_scroll(scroll, out);
        }
    }

    /// One scroll sample (document scroll offset).
    pub fn on_scroll(&mut self, offset: f32, out: &mut Outputs) {
        if !self.is_enabled() {
            return;
        }
        self.scroll = Some(offset);
        let Some(region) = &self.region else {
            log::debug!("frame selector {}: scroll before geometry; ignored", self.id.0);
            return;
        };
        let progress = region.progress(offset);
        self.update_pin(offset, out);
        self.on_trigger(&Trigger::scroll_progress(progress), out);
    }

    /// Feed a trigger directly. Only `ScrollProgress` is meaningful here.
    pub fn on_trigger(&mut self, trigger: &Trigger, out: &mut Outputs) {
        if !self.is_enabled() {
            return;
        }
        let Trigger::ScrollProgress(p) = trigger else {
            return;
        };
        self.target = p.clamp(0.0, 1.0);
        if self.scrub == Scrub::Instant || self.rendered.is_none() {
            self.rendered = Some(self.target);
            self.render(out);
        }
    }

    /// Advance scrub smoothing by `dt` seconds.
    pub fn tick(&mut self, dt: f32, out: &mut Outputs) {
        let Some(current) = self.rendered else {
            return;
        };
        if current == self.target {
            return;
        }
        self.rendered = Some(self.scrub.approach(current, self.target, dt));
        self.render(out);
    }

    fn update_pin(&mut self, scroll: f32, out: &mut Outputs) {
        let Some(region) = &self.region else {
            return;
        };
        let state = region.state(scroll);
        let offset = region.pin_offset(scroll);
        let was_pinned = self.pin == Some(PinState::Pinned);
        self.pin = Some(state);
        let pinned = state == PinState::Pinned;
        if let Some(anchor) = &self.anchor {
            self.stage
                .apply(anchor, Property::TranslateY, Value::Px(offset), out);
            self.stage
                .apply(anchor, Property::Pinned, Value::Bool(pinned), out);
        }
        if was_pinned != pinned {
            out.push_event(CoreEvent::PinChanged {
                selector: self.id,
                pinned,
            });
        }
    }

    fn render(&mut self, out: &mut Outputs) {
        let (Some(seq), Some(progress)) = (&self.sequence, self.rendered) else {
            return;
        };
        if let Some(tl) = self.timeline.as_mut() {
            tl.seek(progress, &mut self.stage, out);
        }
        let index = seq.index_for(progress);
        if self.displayed != Some(index) {
            self.displayed = Some(index);
            out.push_event(CoreEvent::FrameChanged {
                selector: self.id,
                index,
                source: seq.get(index).unwrap_or_default().to_string(),
            });
        }
    }

    /// Tear down: stop the timeline, release the pin and clear the pin offset.
    pub fn unmount(&mut self, out: &mut Outputs) {
        if let Some(mut tl) = self.timeline.take() {
            tl.cancel();
        }
        if let (Some(anchor), Some(_)) = (&self.anchor, self.pin) {
            // back to normal flow
            self.stage
                .apply(anchor, Property::Pinned, Value::Bool(false), out);
            self.stage
                .apply(anchor, Property::TranslateY, Value::Px(0.0), out);
        }
        if self.pin == Some(PinState::Pinned) {
            out.push_event(CoreEvent::PinChanged {
                selector: self.id,
                pinned: false,
            });
        }
        self.pin = None;
        self.region = None;
    }
}
