//! Engine: owns the mounted components and drives them once per frame.
//!
//! Methods:
//! - new, prebind (resolver), mount/unmount for the transition and frame selectors
//! - update: apply inputs (geometry → scroll → route changes), then tick every
//!   component and return the consolidated outputs of the frame

use crate::binding::TargetResolver;
use crate::choreographer::Choreographer;
use crate::config::Config;
use crate::frame_selector::{FrameSelector, FrameSelectorCfg};
use crate::ids::{IdAllocator, SelectorId};
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::trigger::Trigger;

#[derive(Debug)]
pub struct Engine {
    cfg: Config,
    ids: IdAllocator,
    transition: Option<Choreographer>,
    selectors: Vec<FrameSelector>,

    // Outputs of the current frame. Lifecycle calls made between frames land here
    // too and are delivered by the next update().
    outputs: Outputs,
    delivered: bool,
}

impl Engine {
    /// Create a new engine with the given config.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            transition: None,
            selectors: Vec::new(),
            outputs: Outputs::default(),
            delivered: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    fn begin_outputs(&mut self) {
        if self.delivered {
            self.outputs.clear();
            self.delivered = false;
        }
    }

    /// Resolve target paths of every mounted component against the host. Components
    /// mounted later resolve paths to themselves until the next prebind.
    pub fn prebind(&mut self, resolver: &mut dyn TargetResolver) {
        self.begin_outputs();
        if let Some(t) = self.transition.as_mut() {
            t.prebind(resolver, &mut self.outputs);
        }
        for s in &mut self.selectors {
            s.prebind(resolver, &mut self.outputs);
        }
    }

    /// Mount the page-transition wrapper. Remounting replaces the previous one.
    pub fn mount_transition(&mut self) {
        self.unmount_transition();
        let mut choreographer = Choreographer::new(self.cfg.transition.clone());
        choreographer.mount(&mut self.outputs);
        self.transition = Some(choreographer);
    }

    pub fn unmount_transition(&mut self) {
        self.begin_outputs();
        if let Some(mut t) = self.transition.take() {
            t.unmount(&mut self.outputs);
        }
    }

    pub fn transition(&self) -> Option<&Choreographer> {
        self.transition.as_ref()
    }

    /// Mount a scroll-linked frame selector. An empty frame list mounts it disabled.
    pub fn mount_frame_selector(&mut self, cfg: FrameSelectorCfg) -> SelectorId {
        self.begin_outputs();
        let id = self.ids.alloc_selector();
        let selector = FrameSelector::new(id, cfg, self.cfg.scroll.default_scrub, &mut self.outputs);
        self.selectors.push(selector);
        id
    }

    /// Returns false if no selector had this id.
    pub fn unmount_frame_selector(&mut self, id: SelectorId) -> bool {
        self.begin_outputs();
        let Some(pos) = self.selectors.iter().position(|s| s.id() == id) else {
            return false;
        };
        let mut selector = self.selectors.remove(pos);
        selector.unmount(&mut self.outputs);
        true
    }

    pub fn frame_selector(&self, id: SelectorId) -> Option<&FrameSelector> {
        self.selectors.iter().find(|s| s.id() == id)
    }

    /// Step by `dt` seconds with the inputs gathered since the last frame.
    pub fn update(&mut self, dt: f32, inputs: Inputs) -> &Outputs {
        self.begin_outputs();
        let out = &mut self.outputs;

        // 1) Layout first so scroll samples map through current pin windows.
        for upd in inputs.geometry {
            match self.selectors.iter_mut().find(|s| s.id() == upd.selector) {
                Some(s) => s.set_geometry(upd.geometry, out),
                None => log::warn!("geometry for unknown frame selector {}", upd.selector.0),
            }
        }

        // 2) Scroll sample fans out to every selector.
        if let Some(sample) = inputs.scroll {
            for s in &mut self.selectors {
                s.on_scroll(sample.offset, out);
            }
        }

        // 3) Each route change cancels and restarts the wipe; the last one wins.
        if let Some(t) = self.transition.as_mut() {
            for path in inputs.route_changes {
                t.on_trigger(&Trigger::RouteChange(path), out);
            }
        }

        // 4) Advance clocks.
        if let Some(t) = self.transition.as_mut() {
            t.tick(dt, out);
        }
        for s in &mut self.selectors {
            s.tick(dt, out);
        }

        self.delivered = true;
        &self.outputs
    }
}
