// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — RHS Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the hot path an ODE integrator hits:
//!   - Coupling kernel (slow-sized and fast-sized lattices)
//!   - One-layer RHS
//!   - Two-layer RHS (K=8/J=32 and K=36/J=10)
//!   - Fixed-step RK4 driver (100 steps)

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lorenz96_physics::{
    coupling_kernel_into, default_initial_condition_seeded, default_one_layer_initial_condition,
    default_parameters, DerivativeEvaluator, FixedStepIntegrator, OneLayerModel, TwoLayerModel,
};
use lorenz96_types::IntegrationScheme;

// ── Kernel ────────────────────────────────────────────────────────────

fn bench_kernel(c: &mut Criterion) {
    for m in [40usize, 360] {
        let u = default_one_layer_initial_condition(m);
        let mut out = vec![0.0; m];
        c.bench_function(&format!("coupling_kernel_m{m}"), |b| {
            b.iter(|| coupling_kernel_into(black_box(&mut out), black_box(&u), 10.0, 10.0))
        });
    }
}

// ── RHS ───────────────────────────────────────────────────────────────

fn bench_one_layer(c: &mut Criterion) {
    let u = default_one_layer_initial_condition(40);
    let mut du = vec![0.0; 40];
    c.bench_function("one_layer_rhs_m40", |b| {
        b.iter(|| OneLayerModel.evaluate(black_box(&mut du), black_box(&u), &8.0, 0.0))
    });
}

fn bench_two_layer(c: &mut Criterion) {
    let p = default_parameters();
    for (k, j) in [(8usize, 32usize), (36, 10)] {
        let model = TwoLayerModel::new(k, j).expect("valid layout");
        let u = default_initial_condition_seeded(model.layout(), 42);
        let mut du = vec![0.0; u.len()];
        c.bench_function(&format!("two_layer_rhs_k{k}_j{j}"), |b| {
            b.iter(|| model.evaluate(black_box(&mut du), black_box(&u), &p, 0.0))
        });
    }
}

// ── Driver ────────────────────────────────────────────────────────────

fn bench_rk4(c: &mut Criterion) {
    let model = TwoLayerModel::new(8, 32).expect("valid layout");
    let p = default_parameters();
    let u0 = default_initial_condition_seeded(model.layout(), 42);
    let integ = FixedStepIntegrator::new(0.001, IntegrationScheme::Rk4).expect("valid dt");
    c.bench_function("rk4_100_steps_k8_j32", |b| {
        b.iter(|| integ.solve(&model, &p, black_box(&u0), 0.0, 100, 100, |_| {}))
    });
}

criterion_group!(
    benches,
    bench_kernel,
    bench_one_layer,
    bench_two_layer,
    bench_rk4
);
criterion_main!(benches);
