// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — Physics Engine
// (C) 2026 Lorenz-96 Multiscale contributors.
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Right-hand sides of the Lorenz-96 family: the one-layer model, the
//! two-layer slow/fast model, and the coupling kernel both are built
//! from.
//!
//! # Invariants
//!
//! 1. **Layout**: a two-layer state is `[X_0..X_{K-1} | Y_{0,*} .. Y_{K-1,*}]`
//!    with the J fast variables of slow index i contiguous at
//!    `K + i·J ..`. N_J and N are always derived from K and J.
//!
//! 2. **In-place, allocation-free RHS**: evaluators read the state and
//!    overwrite a caller-owned derivative buffer. Shapes are not checked
//!    on this path.
//!
//! 3. **Periodic fast lattice**: the fast block is one ring of K·J sites;
//!    wraparound crosses slow-index boundaries.
//!
//! 4. **No parameter validation**: NaN/Inf in (h, c, b, F) propagate to
//!    the output as a divergence signal.

pub mod kernel;
pub mod layout;
pub mod one_layer;
pub mod params;
pub mod rhs;
pub mod stepper;
pub mod two_layer;

pub use kernel::{coupling_kernel, coupling_kernel_add, coupling_kernel_into};
pub use layout::TwoLayerLayout;
pub use one_layer::OneLayerModel;
pub use params::{
    default_initial_condition, default_initial_condition_seeded, default_one_layer_forcing,
    default_one_layer_initial_condition, default_parameters, TwoLayerParams,
};
pub use rhs::{DerivativeEvaluator, IntegratorContext};
pub use stepper::{FixedStepIntegrator, Trajectory};
pub use two_layer::TwoLayerModel;
