//! Criterion micro-benchmarks for the reaction-diffusion stencil,
//! the dominant per-step cost in the workspace.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use orrery_core::StepEngine;
use orrery_engines::{
    FieldDerivative, ReactionDiffusionConfig, ReactionDiffusionEngine, TuringReaction,
};
use orrery_space::Torus2D;

/// Benchmark: one Turing derivative evaluation over a 100x100 grid
/// (the demo grid size), isolated from the Euler write-back.
fn bench_turing_eval_100x100(c: &mut Criterion) {
    let grid = Torus2D::new(100, 100).unwrap();
    let reaction = TuringReaction::default();
    let field = vec![1.0f64; grid.cell_count() * 2];
    let mut dfdt = vec![0.0f64; grid.cell_count() * 2];

    c.bench_function("turing_eval_100x100", |b| {
        b.iter(|| {
            reaction
                .eval(&grid, 2, black_box(&field), &mut dfdt)
                .unwrap();
            black_box(&dfdt);
        });
    });
}

/// Benchmark: a full engine update (derivative + Euler write-back)
/// on a 100x100 grid, stepping through a preallocated history.
fn bench_reaction_diffusion_step_100x100(c: &mut Criterion) {
    let config = ReactionDiffusionConfig {
        max_step: 1024,
        dim: 2,
        dt: 0.02,
        dh: 0.01,
        size: 100,
        seed: 42,
    };
    let reaction = TuringReaction::default();

    c.bench_function("reaction_diffusion_step_100x100", |b| {
        let mut engine = ReactionDiffusionEngine::new(config).unwrap();
        engine.initialize(&()).unwrap();
        b.iter(|| {
            if engine.step() + 1 == engine.max_step() {
                engine.initialize(&()).unwrap();
            }
            engine.update(black_box(&reaction)).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_turing_eval_100x100,
    bench_reaction_diffusion_step_100x100
);
criterion_main!(benches);
