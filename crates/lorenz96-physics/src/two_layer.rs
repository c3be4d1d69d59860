// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — Two-Layer Model
// ─────────────────────────────────────────────────────────────────────
//! Slow/fast coupled Lorenz-96 system, hcb = h·c/b:
//!
//!   dX_i/dt    = L(X; 1, 1)_i + F - hcb · Σ_j Y_{i,j}
//!   dY_{i,j}/dt = L(Y; c, b)_{i·J+j} - c·Y_{i,j} + hcb · X_i
//!
//! L is the coupling kernel. The fast block is one periodic lattice of
//! length K·J: its wraparound crosses slow-index boundaries, so Y_{i,J-1}
//! neighbours Y_{i+1,0} and Y_{K-1,J-1} neighbours Y_{0,0}.

use lorenz96_types::{ExperimentConfig, L96Result};

use crate::kernel::coupling_kernel_add;
use crate::layout::TwoLayerLayout;
use crate::params::TwoLayerParams;
use crate::rhs::DerivativeEvaluator;

/// Two-layer evaluator bound to an immutable layout.
///
/// Cheap to copy and safe to share across threads; concurrent callers
/// must each bring their own derivative buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoLayerModel {
    layout: TwoLayerLayout,
}

impl TwoLayerModel {
    /// Model with K slow and K·J fast variables.
    pub fn new(k: usize, j: usize) -> L96Result<Self> {
        Ok(Self::with_layout(TwoLayerLayout::new(k, j)?))
    }

    pub fn with_layout(layout: TwoLayerLayout) -> Self {
        Self { layout }
    }

    pub fn from_config(cfg: &ExperimentConfig) -> L96Result<Self> {
        Self::new(cfg.k, cfg.j)
    }

    #[inline]
    pub fn layout(&self) -> &TwoLayerLayout {
        &self.layout
    }
}

impl DerivativeEvaluator for TwoLayerModel {
    type Params = TwoLayerParams;

    fn evaluate(&self, du: &mut [f64], u: &[f64], p: &TwoLayerParams, _t: f64) {
        let layout = &self.layout;
        let hcb = p.hcb();
        let (x, y) = layout.split(u);
        let (dx, dy) = layout.split_mut(du);

        // Slow layer: forcing - aggregated fast feedback, then advection
        layout.reduce_fast(y, dx);
        for d in dx.iter_mut() {
            *d = p.f - hcb * *d;
        }
        coupling_kernel_add(dx, x, 1.0, 1.0);

        // Fast layer: slow value broadcast over its J slots and damping,
        // then the kernel over the whole K·J lattice
        layout.broadcast_slow(x, dy);
        for (d, &yv) in dy.iter_mut().zip(y) {
            *d = hcb * *d - p.c * yv;
        }
        coupling_kernel_add(dy, y, p.c, p.b);
    }

    fn state_len(&self) -> Option<usize> {
        Some(self.layout.n())
    }
}
