//! Page-transition choreographer.
//!
//! Every route change plays the same wipe: panels grow to cover the viewport in a
//! staggered cascade, slide away downward, the cover layer hides, and the new
//! content fades in. A route change mid-wipe cancels the running timeline, resets
//! the cover to its starting state, and starts over.

use serde::{Deserialize, Serialize};

use crate::binding::{resolve_all, IdentityResolver, TargetHandle, TargetResolver};
use crate::config::TransitionConfig;
use crate::ids::IdAllocator;
use crate::outputs::{CoreEvent, Outputs};
use crate::stage::Stage;
use crate::step::{Stagger, Step};
use crate::timeline::{PlayHandle, Timeline};
use crate::trigger::Trigger;
use crate::value::{Display, Property, Value};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    /// Panels growing over the outgoing page.
    Covering,
    /// Panels fully grown and sliding away.
    Covered,
    /// Cover hidden, content entrance running.
    Revealing,
}

#[derive(Debug, Default, Clone)]
struct CoverTargets {
    overlay: Vec<TargetHandle>,
    panels: Vec<TargetHandle>,
    content: Vec<TargetHandle>,
}

#[derive(Debug)]
pub struct Choreographer {
    cfg: TransitionConfig,
    targets: CoverTargets,
    stage: Stage,
    timelines: IdAllocator,
    timeline: Option<Timeline>,
    handle: Option<PlayHandle>,
    phase: Phase,
    /// Timeline time at which panels are fully grown / fully gone.
    cover_end: f32,
    clear_end: f32,
    pathname: Option<String>,
    mounted: bool,
}

impl Choreographer {
    pub fn new(cfg: TransitionConfig) -> Self {
        let mut choreographer = Self {
            cfg,
            targets: CoverTargets::default(),
            stage: Stage::new(),
            timelines: IdAllocator::new(),
            timeline: None,
            handle: None,
            phase: Phase::Idle,
            cover_end: 0.0,
            clear_end: 0.0,
            pathname: None,
            mounted: false,
        };
        choreographer.bind(&mut IdentityResolver);
        choreographer
    }

    /// Resolve overlay, panel and content paths. Unresolved paths are dropped, which
    /// turns the steps that animate them into no-ops on the next trigger. A mounted,
    /// idle cover is hidden again under its new handles.
    pub fn prebind(&mut self, resolver: &mut dyn TargetResolver, out: &mut Outputs) {
        self.bind(resolver);
        if self.mounted && !self.is_active() {
            self.hide_cover(out);
        }
    }

    fn bind(&mut self, resolver: &mut dyn TargetResolver) {
        let panel_paths = self.cfg.panel_paths();
        self.targets = CoverTargets {
            overlay: resolve_all(resolver, [self.cfg.overlay.as_str()]),
            panels: resolve_all(resolver, panel_paths.iter().map(String::as_str)),
            content: resolve_all(resolver, [self.cfg.content.as_str()]),
        };
    }

    /// Start hidden; the first route change plays the first wipe.
    pub fn mount(&mut self, out: &mut Outputs) {
        self.mounted = true;
        self.hide_cover(out);
    }

    fn hide_cover(&mut self, out: &mut Outputs) {
        for overlay in &self.targets.overlay {
            self.stage.apply(
                overlay,
                Property::Display,
                Value::Display(Display::None),
                out,
            );
        }
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.cfg
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pathname(&self) -> Option<&str> {
        self.pathname.as_deref()
    }

    /// Handle of the most recent run.
    pub fn handle(&self) -> Option<PlayHandle> {
        self.handle
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn is_active(&self) -> bool {
        self.timeline.as_ref().is_some_and(Timeline::is_playing)
    }

    /// True when every overlay element has display none.
    pub fn is_cover_hidden(&self) -> bool {
        self.targets.overlay.iter().all(|o| {
            self.stage.current(o, Property::Display) == Value::Display(Display::None)
        })
    }

    pub fn on_trigger(&mut self, trigger: &Trigger, out: &mut Outputs) {
        if let Trigger::RouteChange(pathname) = trigger {
            self.route_changed(pathname, out);
        }
    }

    /// Cancel any running wipe, reset to the covering start state and play a new one.
    /// No path-equality guard: navigating to the current route replays the wipe.
    pub fn route_changed(&mut self, pathname: &str, out: &mut Outputs) {
        if let Some(handle) = self.timeline.take().and_then(|mut tl| tl.cancel()) {
            log::debug!("transition run {:?} cancelled by route change", handle.run);
            out.push_event(CoreEvent::TransitionCancelled { handle });
        }
        self.reset(out);

        let mut tl = Timeline::new(self.timelines.alloc_timeline());
        self.schedule_wipe(&mut tl, out);
        let handle = tl.play();
        self.timeline = Some(tl);
        self.handle = Some(handle);
        self.pathname = Some(pathname.to_string());

        self.set_phase(Phase::Covering, out);
        out.push_event(CoreEvent::TransitionStarted {
            pathname: pathname.to_string(),
            handle,
        });
    }

    /// Advance the running wipe by `dt` seconds.
    pub fn tick(&mut self, dt: f32, out: &mut Outputs) {
        let Some(tl) = self.timeline.as_mut().filter(|tl| tl.is_playing()) else {
            return;
        };
        let completed = tl.tick(dt, &mut self.stage, out);
        let elapsed = tl.elapsed();
        match completed {
            Some(handle) => {
                self.set_phase(Phase::Idle, out);
                out.push_event(CoreEvent::TransitionCompleted { handle });
            }
            None => {
                let phase = self.phase_at(elapsed.unwrap_or(0.0));
                self.set_phase(phase, out);
            }
        }
    }

    /// Stop any running wipe and hide the cover layer. A cancelled wipe leaves the
    /// content fully shown.
    pub fn unmount(&mut self, out: &mut Outputs) {
        if let Some(handle) = self.timeline.take().and_then(|mut tl| tl.cancel()) {
            out.push_event(CoreEvent::TransitionCancelled { handle });
            self.settle_content(out);
        }
        self.hide_cover(out);
        self.mounted = false;
        self.set_phase(Phase::Idle, out);
    }

    /// Content fully visible at natural size, as after a finished entrance.
    fn settle_content(&mut self, out: &mut Outputs) {
        for content in &self.targets.content {
            self.stage
                .apply(content, Property::Opacity, Value::Float(1.0), out);
            self.stage
                .apply(content, Property::Scale, Value::Float(1.0), out);
        }
    }

    fn phase_at(&self, t: f32) -> Phase {
        if t < self.cover_end {
            Phase::Covering
        } else if t < self.clear_end {
            Phase::Covered
        } else {
            Phase::Revealing
        }
    }

    fn set_phase(&mut self, phase: Phase, out: &mut Outputs) {
        if self.phase == phase {
            return;
        }
        log::debug!("transition phase {:?} -> {:?}", self.phase, phase);
        out.push_event(CoreEvent::PhaseChanged {
            from: self.phase,
            to: phase,
        });
        self.phase = phase;
    }

    /// Cover shown on top, panels collapsed, content transparent and enlarged.
    /// Overwrites whatever a cancelled run left behind.
    fn reset(&mut self, out: &mut Outputs) {
        let cfg = &self.cfg;
        for overlay in &self.targets.overlay {
            self.stage.apply(
                overlay,
                Property::Display,
                Value::Display(Display::Block),
                out,
            );
            self.stage
                .apply(overlay, Property::ZIndex, Value::Float(cfg.z_index), out);
        }
        for panel in &self.targets.panels {
            self.stage
                .apply(panel, Property::Height, Value::Percent(0.0), out);
            self.stage
                .apply(panel, Property::TranslateY, Value::Percent(0.0), out);
        }
        for content in &self.targets.content {
            self.stage
                .apply(content, Property::Opacity, Value::Float(0.0), out);
            self.stage.apply(
                content,
                Property::Scale,
                Value::Float(cfg.entrance_scale),
                out,
            );
        }
    }

    fn schedule_wipe(&mut self, tl: &mut Timeline, out: &mut Outputs) {
        let cfg = &self.cfg;
        let t = &self.targets;
        let stagger = Stagger::signed(cfg.stagger);

        tl.schedule(
            [
                Step::new(t.overlay.clone())
                    .label("overlay-show")
                    .set(Property::Display, Value::Display(Display::Block))
                    .set(Property::ZIndex, Value::Float(cfg.z_index))
                    .at(0.0),
                Step::new(t.panels.clone())
                    .label("panels-cover")
                    .from_to(Property::Height, Value::Percent(0.0), Value::Percent(100.0))
                    .duration(cfg.panel_duration)
                    .ease(cfg.easing)
                    .stagger(stagger),
            ],
            out,
        );
        self.cover_end = tl.end();

        tl.schedule(
            [Step::new(t.panels.clone())
                .label("panels-clear")
                .from_to(
                    Property::TranslateY,
                    Value::Percent(0.0),
                    Value::Percent(100.0),
                )
                .duration(cfg.panel_duration)
                .ease(cfg.easing)
                .stagger(stagger)],
            out,
        );
        self.clear_end = tl.end();

        tl.schedule(
            [
                Step::new(t.overlay.clone())
                    .label("overlay-hide")
                    .set(Property::Display, Value::Display(Display::None)),
                Step::new(t.panels.clone())
                    .label("panels-rewind")
                    .set(Property::TranslateY, Value::Percent(0.0)),
                Step::new(t.content.clone())
                    .label("content-enter")
                    .from_to(Property::Opacity, Value::Float(0.0), Value::Float(1.0))
                    .from_to(
                        Property::Scale,
                        Value::Float(cfg.entrance_scale),
                        Value::Float(1.0),
                    )
                    .duration(cfg.entrance_duration)
                    .ease(cfg.entrance_easing)
                    .at(cfg.entrance_delay),
            ],
            out,
        );
    }
}
