// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — Experiment Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{L96Error, L96Result};

/// Fixed-step scheme used by the reference driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationScheme {
    /// Explicit (forward) Euler.
    Euler,
    /// Classic fourth-order Runge-Kutta.
    #[default]
    Rk4,
}

/// One two-layer experiment: geometry, parameters, seed and run length.
///
/// Only the structural fields are validated. The physical parameters
/// (h, c, b, F) pass through untouched so that NaN/Inf stay visible
/// as a divergence signal downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Number of slow variables X.
    pub k: usize,
    /// Fast variables Y per slow variable.
    pub j: usize,
    /// Coupling strength.
    pub h: f64,
    /// Time-scale ratio between the layers.
    pub c: f64,
    /// Amplitude-scale ratio between the layers.
    pub b: f64,
    /// Constant forcing on the slow layer.
    pub forcing: f64,
    /// Seed for the fast-layer noise in the initial condition.
    pub seed: u64,
    /// Driver step size.
    pub dt: f64,
    /// Number of driver steps.
    pub n_steps: usize,
    /// Record every n-th accepted step.
    pub save_every: usize,
    pub scheme: IntegrationScheme,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            k: 8,
            j: 32,
            h: 1.0,
            c: 10.0,
            b: 10.0,
            forcing: 12.0,
            seed: 42,
            dt: 0.001,
            n_steps: 1000,
            save_every: 10,
            scheme: IntegrationScheme::Rk4,
        }
    }
}

impl ExperimentConfig {
    /// Validate the structural fields.
    pub fn validate(&self) -> L96Result<()> {
        if self.k < 1 {
            return Err(L96Error::Config(format!("k must be >= 1, got {}", self.k)));
        }
        if self.j < 1 {
            return Err(L96Error::Config(format!("j must be >= 1, got {}", self.j)));
        }
        if self.state_len().is_none() {
            return Err(L96Error::Config(format!(
                "k + k*j overflows usize (k={}, j={})",
                self.k, self.j
            )));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(L96Error::Config(format!(
                "dt must be finite and > 0, got {}",
                self.dt
            )));
        }
        if self.save_every < 1 {
            return Err(L96Error::Config(format!(
                "save_every must be >= 1, got {}",
                self.save_every
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> L96Result<Self> {
        serde_json::from_str(json).map_err(|e| L96Error::Config(format!("JSON parse error: {e}")))
    }

    /// Total state length K + K·J, `None` on overflow.
    pub fn state_len(&self) -> Option<usize> {
        self.k.checked_mul(self.j)?.checked_add(self.k)
    }
}
