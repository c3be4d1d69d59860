// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — Shared Types
// (C) 2026 Lorenz-96 Multiscale contributors.
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Error hierarchy and experiment configuration shared by the
//! Lorenz-96 physics, observer, and binding crates.

pub mod config;
pub mod error;

pub use config::{ExperimentConfig, IntegrationScheme};
pub use error::{L96Error, L96Result};
