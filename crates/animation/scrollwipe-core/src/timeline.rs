//! Timeline: an ordered list of scheduled steps processed against a clock.
//!
//! - `schedule` appends steps and resolves their offsets (never reorders).
//! - `play` expands steps into per-target tweens and starts a run.
//! - `tick` advances the run's clock; `seek` renders at an arbitrary playhead.
//! - `cancel` stops the run, leaving elements as last applied.

use serde::{Deserialize, Serialize};

use crate::binding::TargetHandle;
use crate::ids::{RunId, TimelineId};
use crate::interp::functions::{frame_index, interpolate_value};
use crate::interp::Easing;
use crate::outputs::{CoreEvent, Outputs};
use crate::stage::Stage;
use crate::step::{Position, PropertyTween, ScheduledStep, Step, Tween};
use crate::value::Value;

/// Finished runs remembered for `status()` lookups.
const RUN_HISTORY: usize = 16;

/// Identifies one run started by [`Timeline::play`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PlayHandle {
    pub timeline: TimelineId,
    pub run: RunId,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum RunStatus {
    Playing,
    Completed,
    Cancelled,
    /// Handle does not belong to this timeline or fell out of history.
    Unknown,
}

/// One step applied to one target.
#[derive(Debug)]
struct ActiveTween {
    step: usize,
    target: TargetHandle,
    start: f32,
    duration: f32,
    easing: Easing,
    /// Start values, captured when the tween first renders.
    from: Option<Vec<Value>>,
    done: bool,
}

#[derive(Debug)]
struct Run {
    id: RunId,
    elapsed: f32,
    tweens: Vec<ActiveTween>,
    /// Clock-driven runs complete; seek-driven runs never do.
    clocked: bool,
}

#[derive(Debug)]
pub struct Timeline {
    id: TimelineId,
    steps: Vec<ScheduledStep>,
    run: Option<Run>,
    next_run: u32,
    finished: Vec<(RunId, RunStatus)>,
}

impl Timeline {
    pub fn new(id: TimelineId) -> Self {
        Self {
            id,
            steps: Vec::new(),
            run: None,
            next_run: 0,
            finished: Vec::new(),
        }
    }

    pub fn id(&self) -> TimelineId {
        self.id
    }

    pub fn steps(&self) -> &[ScheduledStep] {
        &self.steps
    }

    /// End of the last scheduled step.
    pub fn end(&self) -> f32 {
        self.steps
            .iter()
            .map(ScheduledStep::end)
            .fold(0.0f32, f32::max)
    }

    /// Append steps in order. Steps without targets are skipped and reported as
    /// [`CoreEvent::StepSkipped`]. Scheduling never starts playback, and steps added
    /// during a run only take part in the next one.
    pub fn schedule<I>(&mut self, steps: I, out: &mut Outputs)
    where
        I: IntoIterator<Item = Step>,
    {
        for step in steps {
            if step.targets.is_empty() {
                log::warn!(
                    "timeline {}: step '{}' has no targets; skipping",
                    self.id.0,
                    step.display_name()
                );
                out.push_event(CoreEvent::StepSkipped {
                    timeline: self.id,
                    label: step.display_name().to_string(),
                });
                continue;
            }
            let offset = match step.position {
                Position::At(t) => t,
                Position::Sequential { gap } => self.end() + gap,
            }
            .max(0.0);
            self.steps.push(ScheduledStep::new(step, offset));
        }
    }

    pub fn is_playing(&self) -> bool {
        self.run.as_ref().is_some_and(|r| r.clocked)
    }

    /// Playhead of the active run (clock or seek), if any.
    pub fn elapsed(&self) -> Option<f32> {
        self.run.as_ref().map(|r| r.elapsed)
    }

    pub fn status(&self, handle: PlayHandle) -> RunStatus {
        if handle.timeline != self.id {
            return RunStatus::Unknown;
        }
        if let Some(run) = &self.run {
            if run.clocked && run.id == handle.run {
                return RunStatus::Playing;
            }
        }
        self.finished
            .iter()
            .rev()
            .find(|(id, _)| *id == handle.run)
            .map(|(_, status)| *status)
            .unwrap_or(RunStatus::Unknown)
    }

    /// Start a clock-driven run from time 0. An active run is cancelled first.
    pub fn play(&mut self) -> PlayHandle {
        self.cancel();
        let id = self.alloc_run();
        self.run = Some(Run {
            id,
            elapsed: 0.0,
            tweens: self.expand(),
            clocked: true,
        });
        PlayHandle {
            timeline: self.id,
            run: id,
        }
    }

    /// Stop the active run. Returns the cancelled handle, or `None` if nothing was playing.
    pub fn cancel(&mut self) -> Option<PlayHandle> {
        let run = self.run.take()?;
        if !run.clocked {
            return None;
        }
        self.remember(run.id, RunStatus::Cancelled);
        Some(PlayHandle {
            timeline: self.id,
            run: run.id,
        })
    }

    /// Advance the active run by `dt` seconds. Returns the handle if the run completed
    /// during this tick.
    pub fn tick(&mut self, dt: f32, stage: &mut Stage, out: &mut Outputs) -> Option<PlayHandle> {
        let run = self.run.as_mut().filter(|r| r.clocked)?;
        run.elapsed += dt.max(0.0);
        let elapsed = run.elapsed;
        for tween in run.tweens.iter_mut() {
            if tween.done || elapsed < tween.start {
                continue;
            }
            let props = &self.steps[tween.step].step().props;
            render_tween(tween, props, elapsed - tween.start, stage, out);
        }
        if !run.tweens.iter().all(|t| t.done) {
            return None;
        }
        let id = run.id;
        self.run = None;
        self.remember(id, RunStatus::Completed);
        Some(PlayHandle {
            timeline: self.id,
            run: id,
        })
    }

    /// Render every tween at playhead `time` without a clock. Works in both directions;
    /// tweens that have not started yet and never rendered are left alone.
    pub fn seek(&mut self, time: f32, stage: &mut Stage, out: &mut Outputs) {
        if self.run.as_ref().map_or(true, |r| r.clocked) {
            self.cancel();
            let id = self.alloc_run();
            self.run = Some(Run {
                id,
                elapsed: 0.0,
                tweens: self.expand(),
                clocked: false,
            });
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };
        run.elapsed = time;
        for tween in run.tweens.iter_mut() {
            let local = time - tween.start;
            if local < 0.0 && tween.from.is_none() {
                continue;
            }
            let props = &self.steps[tween.step].step().props;
            render_tween(tween, props, local.max(0.0), stage, out);
        }
    }

    fn alloc_run(&mut self) -> RunId {
        let id = RunId(self.next_run);
        self.next_run = self.next_run.wrapping_add(1);
        id
    }

    fn remember(&mut self, id: RunId, status: RunStatus) {
        if self.finished.len() == RUN_HISTORY {
            self.finished.remove(0);
        }
        self.finished.push((id, status));
    }

    fn expand(&self) -> Vec<ActiveTween> {
        let mut tweens = Vec::new();
        for (idx, scheduled) in self.steps.iter().enumerate() {
            let step = scheduled.step();
            let count = step.targets.len();
            for (i, target) in step.targets.iter().enumerate() {
                tweens.push(ActiveTween {
                    step: idx,
                    target: target.clone(),
                    start: scheduled.offset() + step.stagger.delay_for(i, count),
                    duration: step.duration,
                    easing: step.easing,
                    from: None,
                    done: false,
                });
            }
        }
        tweens
    }
}

fn render_tween(
    tween: &mut ActiveTween,
    props: &[PropertyTween],
    local: f32,
    stage: &mut Stage,
    out: &mut Outputs,
) {
    let u = if tween.duration <= 0.0 {
        1.0
    } else {
        (local / tween.duration).clamp(0.0, 1.0)
    };
    let complete = u >= 1.0;
    let eased = tween.easing.apply(u);

    let from = tween.from.get_or_insert_with(|| {
        props
            .iter()
            .map(|p| match &p.tween {
                Tween::FromTo { from, .. } => from.clone(),
                _ => stage.current(&tween.target, p.property),
            })
            .collect()
    });

    for (prop, start) in props.iter().zip(from.iter()) {
        let value = match &prop.tween {
            Tween::To(to) | Tween::FromTo { to, .. } => {
                interpolate_value(start, to, eased, complete)
            }
            Tween::Set(to) => {
                if complete {
                    to.clone()
                } else {
                    start.clone()
                }
            }
            Tween::Frames(frames) => {
                if frames.is_empty() {
                    continue;
                }
                Value::Text(frames[frame_index(eased, frames.len())].clone())
            }
        };
        stage.apply(&tween.target, prop.property, value, out);
    }
    tween.done = complete;
}
