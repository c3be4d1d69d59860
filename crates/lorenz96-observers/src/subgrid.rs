// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — Subgrid Forcing Diagnostic
// ─────────────────────────────────────────────────────────────────────
//! Effective forcing of the fast layer on each slow variable:
//!
//!   S_i = hcb · Σ_j Y_{i,j},   hcb = h·c/b
//!
//! This is exactly the term subtracted in the slow update of the
//! two-layer model, and the quantity a reduced (slow-only) model has to
//! parameterise. Pure: reading it never affects the integration.

use lorenz96_physics::{IntegratorContext, TwoLayerLayout, TwoLayerModel, TwoLayerParams};

use crate::saving::{Observer, SavedValues};

/// Write the length-K subgrid forcing of state `u` into `out`.
pub fn subgrid_forcing_into(
    out: &mut [f64],
    u: &[f64],
    layout: &TwoLayerLayout,
    p: &TwoLayerParams,
) {
    let (_, y) = layout.split(u);
    layout.reduce_fast(y, out);
    let hcb = p.hcb();
    for v in out.iter_mut() {
        *v *= hcb;
    }
}

/// Length-K subgrid forcing of state `u`.
///
/// `_t` is carried only so the signature matches an observer log entry;
/// the system is autonomous.
pub fn subgrid_forcing(
    u: &[f64],
    _t: f64,
    layout: &TwoLayerLayout,
    p: &TwoLayerParams,
) -> Vec<f64> {
    let mut out = vec![0.0; layout.k()];
    subgrid_forcing_into(&mut out, u, layout, p);
    out
}

/// Observer form of [`subgrid_forcing`]; layout and parameters come
/// from the integrator context.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubgridObserver;

impl Observer<TwoLayerModel> for SubgridObserver {
    type Value = Vec<f64>;

    fn observe(&mut self, ctx: &IntegratorContext<'_, TwoLayerModel>) -> Vec<f64> {
        subgrid_forcing(ctx.state, ctx.t, ctx.model.layout(), ctx.params)
    }
}

/// Per-slow-index time mean of a saved subgrid series.
///
/// `None` for an empty series.
pub fn time_mean(saved: &SavedValues<Vec<f64>>) -> Option<Vec<f64>> {
    let first = saved.saveval.first()?;
    let mut mean = vec![0.0; first.len()];
    for row in &saved.saveval {
        for (m, v) in mean.iter_mut().zip(row) {
            *m += v;
        }
    }
    let n = saved.len() as f64;
    for m in mean.iter_mut() {
        *m /= n;
    }
    Some(mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saving::solve_observed;
    use lorenz96_physics::{
        default_initial_condition_seeded, default_parameters, DerivativeEvaluator,
        FixedStepIntegrator,
    };
    use lorenz96_types::IntegrationScheme;

    #[test]
    fn test_length_is_k() {
        for (k, j) in [(1, 1), (3, 7), (8, 6), (36, 10)] {
            let layout = TwoLayerLayout::new(k, j).unwrap();
            let u = default_initial_condition_seeded(&layout, 9);
            let s = subgrid_forcing(&u, 0.0, &layout, &default_parameters());
            assert_eq!(s.len(), k);
        }
    }

    #[test]
    fn test_groups_by_slow_index() {
        // K=3, J=2: Y reshaped K×J is [[1,2],[3,4],[5,6]].
        let layout = TwoLayerLayout::new(3, 2).unwrap();
        let u = [0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let s = subgrid_forcing(&u, 0.0, &layout, &default_parameters());
        assert_eq!(s, vec![3.0, 7.0, 11.0]);
    }

    #[test]
    fn test_scales_with_hcb() {
        let layout = TwoLayerLayout::new(2, 2).unwrap();
        let u = [9.0, 9.0, 1.0, 1.0, 2.0, 2.0];
        let p = TwoLayerParams::new(2.0, 6.0, 4.0, 12.0); // hcb = 3
        assert_eq!(subgrid_forcing(&u, 0.0, &layout, &p), vec![6.0, 12.0]);
    }

    #[test]
    fn test_slow_values_ignored() {
        let layout = TwoLayerLayout::new(2, 3).unwrap();
        let mut u = default_initial_condition_seeded(&layout, 4);
        let p = default_parameters();
        let a = subgrid_forcing(&u, 0.0, &layout, &p);
        u[0] = 100.0;
        u[1] = -100.0;
        assert_eq!(subgrid_forcing(&u, 1.0, &layout, &p), a);
    }

    #[test]
    fn test_matches_slow_coupling_term() {
        // With F = 0 and a zero slow block, dX_i/dt = -S_i.
        let layout = TwoLayerLayout::new(4, 5).unwrap();
        let model = TwoLayerModel::with_layout(layout);
        let mut u = default_initial_condition_seeded(&layout, 8);
        u[..4].fill(0.0);
        let p = TwoLayerParams::new(1.0, 10.0, 10.0, 0.0);
        let mut du = vec![0.0; layout.n()];
        model.evaluate(&mut du, &u, &p, 0.0);
        let s = subgrid_forcing(&u, 0.0, &layout, &p);
        for i in 0..4 {
            assert!((du[i] + s[i]).abs() < 1e-12, "i={i}: {} vs {}", du[i], s[i]);
        }
    }

    #[test]
    fn test_observer_during_solve() {
        let model = TwoLayerModel::new(8, 6).unwrap();
        let p = default_parameters();
        let u0 = default_initial_condition_seeded(model.layout(), 42);
        let integ = FixedStepIntegrator::new(1e-3, IntegrationScheme::Rk4).unwrap();
        let (traj, saved) =
            solve_observed(&integ, &model, &p, &u0, 0.0, 50, 10, SubgridObserver).unwrap();

        assert_eq!(saved.len(), traj.len());
        for ((_, s), u) in saved.iter().zip(&traj.u) {
            assert_eq!(s, &subgrid_forcing(u, 0.0, model.layout(), &p));
        }
    }

    #[test]
    fn test_time_mean() {
        let mut saved = SavedValues::default();
        assert!(time_mean(&saved).is_none());
        saved.push(0.0, vec![1.0, 4.0]);
        saved.push(0.1, vec![3.0, 0.0]);
        assert_eq!(time_mean(&saved), Some(vec![2.0, 2.0]));
    }
}
