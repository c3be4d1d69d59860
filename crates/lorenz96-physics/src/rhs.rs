// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — Derivative Evaluator Contract
// ─────────────────────────────────────────────────────────────────────
//! The in-place RHS contract consumed by an ODE integrator, and the
//! context an integrator hands to its observers.

/// In-place right-hand side `du = f(u, p, t)`.
///
/// Implementations read `u`, write every element of `du`, and neither
/// allocate nor retain either buffer. Shapes are not checked on this
/// path: `du` and `u` must both have the model's state length.
pub trait DerivativeEvaluator {
    /// Parameter container passed on every call.
    type Params;

    /// Evaluate the derivative at (u, p, t) into `du`.
    fn evaluate(&self, du: &mut [f64], u: &[f64], p: &Self::Params, t: f64);

    /// State length fixed by the model, if any. Stateless evaluators
    /// take their length from the buffers and return `None`.
    fn state_len(&self) -> Option<usize> {
        None
    }
}

/// What an integrator exposes to an observer at an accepted step.
///
/// Observers recover the bound model (and through it the layout) and
/// the current parameters from here instead of reaching into the
/// integrator.
pub struct IntegratorContext<'a, M: DerivativeEvaluator> {
    /// State after the accepted step.
    pub state: &'a [f64],
    /// Time of `state`.
    pub t: f64,
    /// Accepted-step counter (1 for the first step).
    pub step: u64,
    pub params: &'a M::Params,
    pub model: &'a M,
}

impl<'a, M: DerivativeEvaluator> IntegratorContext<'a, M> {
    pub fn new(state: &'a [f64], t: f64, step: u64, params: &'a M::Params, model: &'a M) -> Self {
        Self {
            state,
            t,
            step,
            params,
            model,
        }
    }
}

impl<M: DerivativeEvaluator> Clone for IntegratorContext<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: DerivativeEvaluator> Copy for IntegratorContext<'_, M> {}
