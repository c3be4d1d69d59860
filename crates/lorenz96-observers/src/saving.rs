// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — Saving Callback
// ─────────────────────────────────────────────────────────────────────
//! Observer contract and a callback that stores observed values on a
//! fixed step cadence.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use lorenz96_physics::{DerivativeEvaluator, FixedStepIntegrator, IntegratorContext, Trajectory};
use lorenz96_types::{L96Error, L96Result};

/// Read-only observation taken at an accepted integration step.
pub trait Observer<M: DerivativeEvaluator> {
    type Value;

    fn observe(&mut self, ctx: &IntegratorContext<'_, M>) -> Self::Value;
}

/// Observed values and the times they were taken at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedValues<V> {
    pub t: Vec<f64>,
    pub saveval: Vec<V>,
}

impl<V> Default for SavedValues<V> {
    fn default() -> Self {
        Self {
            t: Vec::new(),
            saveval: Vec::new(),
        }
    }
}

impl<V> SavedValues<V> {
    pub fn push(&mut self, t: f64, value: V) {
        self.t.push(t);
        self.saveval.push(value);
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &V)> {
        self.t.iter().copied().zip(self.saveval.iter())
    }
}

/// Runs an [`Observer`] on every `save_every`-th accepted step.
pub struct SavingCallback<M: DerivativeEvaluator, O: Observer<M>> {
    observer: O,
    save_every: u64,
    saved: SavedValues<O::Value>,
    _model: PhantomData<fn(&M)>,
}

impl<M: DerivativeEvaluator, O: Observer<M>> SavingCallback<M, O> {
    pub fn new(observer: O, save_every: usize) -> L96Result<Self> {
        if save_every < 1 {
            return Err(L96Error::Validation(format!(
                "save_every must be >= 1, got {save_every}"
            )));
        }
        log::debug!("saving callback: every {save_every} step(s)");
        Ok(Self {
            observer,
            save_every: save_every as u64,
            saved: SavedValues::default(),
            _model: PhantomData,
        })
    }

    /// Unconditionally record an observation (e.g. at the initial state).
    pub fn record(&mut self, ctx: &IntegratorContext<'_, M>) {
        let value = self.observer.observe(ctx);
        self.saved.push(ctx.t, value);
    }

    /// Step hook: records when the step counter hits the cadence.
    pub fn on_step(&mut self, ctx: &IntegratorContext<'_, M>) {
        if ctx.step % self.save_every == 0 {
            self.record(ctx);
        }
    }

    pub fn saved(&self) -> &SavedValues<O::Value> {
        &self.saved
    }

    pub fn into_saved(self) -> SavedValues<O::Value> {
        self.saved
    }
}

/// Integrate with `integrator` and observe on the trajectory's cadence:
/// the initial state and every `save_every`-th step.
#[allow(clippy::too_many_arguments)]
pub fn solve_observed<M, O>(
    integrator: &FixedStepIntegrator,
    model: &M,
    params: &M::Params,
    u0: &[f64],
    t0: f64,
    n_steps: usize,
    save_every: usize,
    observer: O,
) -> L96Result<(Trajectory, SavedValues<O::Value>)>
where
    M: DerivativeEvaluator,
    O: Observer<M>,
{
    let mut callback = SavingCallback::new(observer, save_every)?;
    callback.record(&IntegratorContext::new(u0, t0, 0, params, model));
    let traj = integrator.solve(model, params, u0, t0, n_steps, save_every, |ctx| {
        callback.on_step(ctx)
    })?;
    Ok((traj, callback.into_saved()))
}
