// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — Canonical Parameters and Initial Conditions
// ─────────────────────────────────────────────────────────────────────
//! Default (h, c, b, F) tuple and seed states for both models.
//!
//! The fast-layer noise is the only stochastic element in the crate;
//! it is drawn from a caller-supplied `Rng` or from a ChaCha8 stream
//! seeded with a `u64`, so that values reproduce across platforms.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use lorenz96_types::ExperimentConfig;

use crate::layout::TwoLayerLayout;

/// Wavenumber of the smooth slow-layer seed.
const SEED_WAVENUMBER: f64 = 3.0;
/// Amplitude of the smooth slow-layer seed.
const SEED_AMPLITUDE: f64 = 0.5;

/// Two-layer parameter tuple (h, c, b, F).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwoLayerParams {
    /// Coupling strength.
    pub h: f64,
    /// Time-scale ratio.
    pub c: f64,
    /// Amplitude-scale ratio.
    pub b: f64,
    /// Slow-layer forcing.
    pub f: f64,
}

impl TwoLayerParams {
    pub fn new(h: f64, c: f64, b: f64, f: f64) -> Self {
        Self { h, c, b, f }
    }

    /// Inter-layer coupling coefficient h·c/b.
    #[inline]
    pub fn hcb(&self) -> f64 {
        self.h * self.c / self.b
    }

    pub fn from_config(cfg: &ExperimentConfig) -> Self {
        Self::new(cfg.h, cfg.c, cfg.b, cfg.forcing)
    }
}

impl Default for TwoLayerParams {
    fn default() -> Self {
        default_parameters()
    }
}

impl From<(f64, f64, f64, f64)> for TwoLayerParams {
    fn from((h, c, b, f): (f64, f64, f64, f64)) -> Self {
        Self::new(h, c, b, f)
    }
}

/// Canonical two-layer parameters: h = 1, c = 10, b = 10, F = 12.
pub fn default_parameters() -> TwoLayerParams {
    TwoLayerParams::new(1.0, 10.0, 10.0, 12.0)
}

/// Canonical one-layer forcing, F = 8 (chaotic regime).
pub fn default_one_layer_forcing() -> f64 {
    8.0
}

/// Smooth seed `0.5·sin(2π·3·i/M)` over M sites.
fn smooth_seed(m: usize) -> impl Iterator<Item = f64> {
    (0..m).map(move |i| SEED_AMPLITUDE * (TAU * SEED_WAVENUMBER * i as f64 / m as f64).sin())
}

/// One-layer initial condition of length M: the smooth 3-wavenumber seed.
pub fn default_one_layer_initial_condition(m: usize) -> Vec<f64> {
    smooth_seed(m).collect()
}

/// Two-layer initial condition of length N.
///
/// Slow part: `0.5·sin(2π·3·i/K)`, independent of `rng`.
/// Fast part: K·J standard-normal draws.
pub fn default_initial_condition<R: Rng + ?Sized>(layout: &TwoLayerLayout, rng: &mut R) -> Vec<f64> {
    let mut u = Vec::with_capacity(layout.n());
    u.extend(smooth_seed(layout.k()));
    u.extend((0..layout.n_j()).map(|_| -> f64 { StandardNormal.sample(rng) }));
    u
}

/// [`default_initial_condition`] drawn from a ChaCha8 stream seeded with `seed`.
pub fn default_initial_condition_seeded(layout: &TwoLayerLayout, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    default_initial_condition(layout, &mut rng)
}
