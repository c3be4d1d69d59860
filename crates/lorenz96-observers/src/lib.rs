// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — Observers
// (C) 2026 Lorenz-96 Multiscale contributors.
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Side-channel observers for Lorenz-96 integrations.
//!
//! - Subgrid forcing: hcb · Σ_j Y_{i,j}, the fast-layer feedback on each
//!   slow variable
//! - Saving callback: records (t, value) pairs at accepted steps
//! - Experiment runner: config in, trajectory and subgrid series out
//!
//! Observers never influence the integration. Everything they need
//! (state, time, parameters, bound model) arrives through an
//! `IntegratorContext`.

pub mod experiment;
pub mod saving;
pub mod subgrid;

pub use experiment::{run_experiment, ExperimentRun};
pub use saving::{solve_observed, Observer, SavedValues, SavingCallback};
pub use subgrid::{subgrid_forcing, subgrid_forcing_into, time_mean, SubgridObserver};
