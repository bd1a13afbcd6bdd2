use std::collections::HashMap;

use approx::assert_abs_diff_eq;
use scrollwipe_core::{
    Choreographer, CoreEvent, Display, Outputs, Phase, Property, TargetResolver, TransitionConfig,
    Trigger, Value,
};

const FRAME: f32 = 1.0 / 60.0;

fn panels(cfg: &TransitionConfig) -> Vec<String> {
    cfg.panel_paths()
}

/// Tick until the wipe settles, collecting every event along the way.
fn settle(c: &mut Choreographer, events: &mut Vec<CoreEvent>) -> usize {
    for i in 0..600 {
        let mut out = Outputs::default();
        c.tick(FRAME, &mut out);
        events.extend(out.events);
        if !c.is_active() {
            return i + 1;
        }
    }
    panic!("transition did not settle");
}

fn phases(events: &[CoreEvent]) -> Vec<Phase> {
    events
        .iter()
        .filter_map(|e| match e {
            CoreEvent::PhaseChanged { to, .. } => Some(*to),
            _ => None,
        })
        .collect()
}

#[test]
fn mount_starts_hidden() {
    let mut c = Choreographer::new(TransitionConfig::default());
    let mut out = Outputs::default();
    c.mount(&mut out);
    assert!(c.is_cover_hidden());
    assert_eq!(c.phase(), Phase::Idle);
    assert_eq!(
        out.change_for("stairs", Property::Display),
        Some(&Value::Display(Display::None))
    );
}

#[test]
fn route_change_resets_to_covering_state_in_the_same_frame() {
    let cfg = TransitionConfig::default();
    let mut c = Choreographer::new(cfg.clone());
    let mut out = Outputs::default();
    c.mount(&mut out);
    c.route_changed("/agence", &mut out);

    assert_eq!(
        out.change_for("stairs", Property::Display),
        Some(&Value::Display(Display::Block))
    );
    assert_eq!(
        out.change_for("stairs", Property::ZIndex),
        Some(&Value::Float(cfg.z_index))
    );
    for p in panels(&cfg) {
        assert_eq!(out.change_for(&p, Property::Height), Some(&Value::Percent(0.0)));
    }
    assert_eq!(out.change_for("page", Property::Opacity), Some(&Value::Float(0.0)));
    assert_eq!(out.change_for("page", Property::Scale), Some(&Value::Float(1.2)));
    assert_eq!(c.phase(), Phase::Covering);
    assert_eq!(c.pathname(), Some("/agence"));
    assert!(matches!(
        out.events.last(),
        Some(CoreEvent::TransitionStarted { pathname, .. }) if pathname == "/agence"
    ));
}

#[test]
fn wipe_walks_through_every_phase_and_ends_hidden() {
    let cfg = TransitionConfig::default();
    let mut c = Choreographer::new(cfg.clone());
    let mut out = Outputs::default();
    c.mount(&mut out);
    c.route_changed("/projects", &mut out);
    let handle = c.handle().expect("handle");

    let mut events = out.events.clone();
    settle(&mut c, &mut events);

    assert_eq!(
        phases(&events),
        vec![Phase::Covering, Phase::Covered, Phase::Revealing, Phase::Idle]
    );
    assert!(events.contains(&CoreEvent::TransitionCompleted { handle }));
    assert!(c.is_cover_hidden());
    let stage = c.stage();
    for p in panels(&cfg) {
        assert_eq!(stage.current(&p, Property::Height), Value::Percent(100.0));
        assert_eq!(stage.current(&p, Property::TranslateY), Value::Percent(0.0));
    }
    assert_eq!(stage.current("page", Property::Opacity), Value::Float(1.0));
    assert_eq!(stage.current("page", Property::Scale), Value::Float(1.0));
}

#[test]
fn panels_fill_in_reverse_cascade() {
    let cfg = TransitionConfig::default();
    let mut c = Choreographer::new(cfg.clone());
    let mut out = Outputs::default();
    c.route_changed("/", &mut out);
    c.tick(0.05, &mut out);

    let names = panels(&cfg);
    let height = |name: &str| c.stage().current(name, Property::Height).as_number().unwrap();
    assert!(height(&names[4]) > 0.0);
    assert_eq!(height(&names[0]), 0.0);
    for pair in names.windows(2) {
        assert!(height(&pair[0]) <= height(&pair[1]));
    }
}

#[test]
fn phase_boundaries_follow_config() {
    let cfg = TransitionConfig::default();
    let mut c = Choreographer::new(cfg.clone());
    let mut out = Outputs::default();
    c.route_changed("/", &mut out);

    // cover ends at panel_duration + |stagger| = 0.5, clear at 1.0, entrance runs 1.0..1.5
    c.tick(0.25, &mut out);
    assert_eq!(c.phase(), Phase::Covering);
    c.tick(0.5, &mut out);
    assert_eq!(c.phase(), Phase::Covered);
    assert!(!c.is_cover_hidden());
    c.tick(0.5, &mut out);
    assert_eq!(c.phase(), Phase::Revealing);
    assert!(c.is_cover_hidden());
    let opacity = c.stage().current("page", Property::Opacity).as_number().unwrap();
    // 0.25s into a 0.5s quad-out entrance
    assert_abs_diff_eq!(opacity, 0.75, epsilon = 1e-5);
    c.tick(0.25, &mut out);
    assert_eq!(c.phase(), Phase::Idle);
    assert!(!c.is_active());
}

#[test]
fn retrigger_mid_flight_cancels_and_only_second_run_completes() {
    let mut c = Choreographer::new(TransitionConfig::default());
    let mut events = Vec::new();

    let mut out = Outputs::default();
    c.mount(&mut out);
    c.route_changed("/agence", &mut out);
    let first = c.handle().unwrap();
    for _ in 0..3 {
        c.tick(FRAME, &mut out);
    }
    events.extend(out.events);

    // 50ms later: second navigation, well before the first wipe is done.
    let mut out = Outputs::default();
    c.route_changed("/projects", &mut out);
    let second = c.handle().unwrap();
    assert_ne!(first, second);
    // Reset wrote a fully collapsed cover over the partial one.
    assert_eq!(
        out.change_for("stairs/panel/4", Property::Height),
        Some(&Value::Percent(0.0))
    );
    events.extend(out.events);
    settle(&mut c, &mut events);

    assert!(events.contains(&CoreEvent::TransitionCancelled { handle: first }));
    assert!(!events.contains(&CoreEvent::TransitionCompleted { handle: first }));
    let completed: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, CoreEvent::TransitionCompleted { .. }))
        .collect();
    assert_eq!(completed, vec![&CoreEvent::TransitionCompleted { handle: second }]);
    assert!(c.is_cover_hidden());
    assert_eq!(c.pathname(), Some("/projects"));
    assert_eq!(
        c.stage().current("page", Property::Opacity),
        Value::Float(1.0)
    );
}

#[test]
fn same_route_replays_the_wipe() {
    let mut c = Choreographer::new(TransitionConfig::default());
    let mut events = Vec::new();
    for _ in 0..2 {
        let mut out = Outputs::default();
        c.on_trigger(&Trigger::route("/agence"), &mut out);
        events.extend(out.events);
        settle(&mut c, &mut events);
    }
    let started = events
        .iter()
        .filter(|e| matches!(e, CoreEvent::TransitionStarted { .. }))
        .count();
    assert_eq!(started, 2);
}

#[test]
fn scroll_triggers_are_ignored() {
    let mut c = Choreographer::new(TransitionConfig::default());
    let mut out = Outputs::default();
    c.on_trigger(&Trigger::scroll_progress(0.5), &mut out);
    assert!(out.is_empty());
    assert_eq!(c.phase(), Phase::Idle);
}

struct MapResolver(HashMap<&'static str, &'static str>);

impl TargetResolver for MapResolver {
    fn resolve(&mut self, path: &str) -> Option<String> {
        self.0.get(path).map(|s| s.to_string())
    }
}

#[test]
fn missing_targets_skip_their_steps_but_the_wipe_still_runs() {
    let mut c = Choreographer::new(TransitionConfig::default());
    // Content wrapper and one panel are missing from the host.
    let mut resolver = MapResolver(HashMap::from([
        ("stairs", "#stairs"),
        ("stairs/panel/0", "#p0"),
        ("stairs/panel/1", "#p1"),
        ("stairs/panel/3", "#p3"),
        ("stairs/panel/4", "#p4"),
    ]));
    let mut out = Outputs::default();
    c.prebind(&mut resolver, &mut out);
    c.route_changed("/", &mut out);
    let skipped: Vec<_> = out
        .events
        .iter()
        .filter_map(|e| match e {
            CoreEvent::StepSkipped { label, .. } => Some(label.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(skipped, vec!["content-enter"]);
    assert!(out.change_for("#p3", Property::Height).is_some());
    assert!(out.change_for("stairs/panel/2", Property::Height).is_none());

    let mut events = Vec::new();
    settle(&mut c, &mut events);
    assert!(c.is_cover_hidden());
    assert_eq!(
        c.stage().current("#stairs", Property::Display),
        Value::Display(Display::None)
    );
}

#[test]
fn rebinding_a_mounted_cover_hides_it_under_the_new_handle() {
    let mut c = Choreographer::new(TransitionConfig::default());
    let mut out = Outputs::default();
    c.mount(&mut out);
    let mut resolver = MapResolver(HashMap::from([("stairs", "#stairs")]));
    let mut out = Outputs::default();
    c.prebind(&mut resolver, &mut out);
    assert_eq!(
        out.change_for("#stairs", Property::Display),
        Some(&Value::Display(Display::None))
    );
    assert!(c.is_cover_hidden());
}

#[test]
fn unmount_cancels_and_hides_cover() {
    let mut c = Choreographer::new(TransitionConfig::default());
    let mut out = Outputs::default();
    c.route_changed("/", &mut out);
    c.tick(0.3, &mut out);
    let handle = c.handle().unwrap();

    let mut out = Outputs::default();
    c.unmount(&mut out);
    assert!(out.events.contains(&CoreEvent::TransitionCancelled { handle }));
    assert!(c.is_cover_hidden());
    assert_eq!(c.phase(), Phase::Idle);
    assert!(!c.is_active());
    assert_eq!(out.change_for("page", Property::Opacity), Some(&Value::Float(1.0)));
    assert_eq!(out.change_for("page", Property::Scale), Some(&Value::Float(1.0)));
}

#[test]
fn unmount_when_idle_leaves_content_alone() {
    let mut c = Choreographer::new(TransitionConfig::default());
    let mut out = Outputs::default();
    c.mount(&mut out);
    let mut out = Outputs::default();
    c.unmount(&mut out);
    assert!(out.change_for("page", Property::Opacity).is_none());
    assert!(out.change_for("page", Property::Scale).is_none());
}
