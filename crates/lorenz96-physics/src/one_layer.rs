// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — One-Layer Model
// ─────────────────────────────────────────────────────────────────────
//! dX_j/dt = (X_{j+1} - X_{j-2})·X_{j-1} - X_j + F
//!
//! Autonomous; the lattice size M is taken from the buffers.

use crate::kernel::coupling_kernel_into;
use crate::rhs::DerivativeEvaluator;

/// Stateless one-layer Lorenz-96 evaluator. Parameter: forcing F.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneLayerModel;

impl OneLayerModel {
    pub fn new() -> Self {
        Self
    }
}

impl DerivativeEvaluator for OneLayerModel {
    type Params = f64;

    fn evaluate(&self, du: &mut [f64], u: &[f64], forcing: &f64, _t: f64) {
        coupling_kernel_into(du, u, 1.0, 1.0);
        for d in du.iter_mut() {
            *d += *forcing;
        }
    }
}
