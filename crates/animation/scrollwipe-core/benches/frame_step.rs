//! Per-frame cost of the engine: a full wipe and a scroll sweep through a frame selector.
//!
//! Run with: `cargo bench --bench frame_step`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scrollwipe_core::{Config, Engine, FrameSelectorCfg, Geometry, Inputs};

const FRAME: f32 = 1.0 / 60.0;

fn frames(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("https://cdn.example/team/{i}.jpg")).collect()
}

fn bench_wipe(c: &mut Criterion) {
    let mut group = c.benchmark_group("wipe");
    for panels in [5usize, 20, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(panels), &panels, |b, &panels| {
            let mut cfg = Config::default();
            cfg.transition.panel_count = panels;
            b.iter(|| {
                let mut engine = Engine::new(cfg.clone());
                engine.mount_transition();
                engine.update(FRAME, Inputs::route("/agence"));
                for _ in 0..90 {
                    black_box(engine.update(FRAME, Inputs::default()).changes.len());
                }
            });
        });
    }
    group.finish();
}

fn bench_scroll_sweep(c: &mut Criterion) {
    let geometry = Geometry {
        viewport_height: 900.0,
        anchor_top: 224.0,
        anchor_height: 288.0,
    };
    let mut group = c.benchmark_group("scroll_sweep");
    for n in [14usize, 120] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut engine = Engine::new(Config::default());
            let id = engine.mount_frame_selector(FrameSelectorCfg::new(
                frames(n),
                "agence/team-image",
                "agence/team-frame",
            ));
            engine.update(0.0, Inputs::default().with_geometry(id, geometry));
            b.iter(|| {
                for px in (0..1200).step_by(4) {
                    black_box(engine.update(FRAME, Inputs::scroll(px as f32)).changes.len());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_wipe, bench_scroll_sweep);
criterion_main!(benches);
