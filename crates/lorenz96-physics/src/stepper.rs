// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — Fixed-Step Reference Driver
// ─────────────────────────────────────────────────────────────────────
//! Explicit Euler / classic RK4 with a constant step, for tests,
//! benchmarks, and classroom runs. No step-size control: production
//! runs hand the evaluator to a real ODE library.
//!
//! Stage buffers are allocated once per `solve` and reused every step.

use serde::{Deserialize, Serialize};

use lorenz96_types::{ExperimentConfig, IntegrationScheme, L96Error, L96Result};

use crate::rhs::{DerivativeEvaluator, IntegratorContext};

/// Saved time series: `u[n]` is the state at `t[n]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub t: Vec<f64>,
    pub u: Vec<Vec<f64>>,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Last saved state.
    pub fn last(&self) -> Option<&[f64]> {
        self.u.last().map(Vec::as_slice)
    }
}

/// Pre-allocated stage buffers.
struct Scratch {
    k1: Vec<f64>,
    k2: Vec<f64>,
    k3: Vec<f64>,
    k4: Vec<f64>,
    tmp: Vec<f64>,
}

impl Scratch {
    fn new(n: usize) -> Self {
        Self {
            k1: vec![0.0; n],
            k2: vec![0.0; n],
            k3: vec![0.0; n],
            k4: vec![0.0; n],
            tmp: vec![0.0; n],
        }
    }
}

/// Constant-step integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepIntegrator {
    dt: f64,
    scheme: IntegrationScheme,
}

impl FixedStepIntegrator {
    pub fn new(dt: f64, scheme: IntegrationScheme) -> L96Result<Self> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(L96Error::Validation(format!(
                "dt must be finite and > 0, got {dt}"
            )));
        }
        Ok(Self { dt, scheme })
    }

    pub fn from_config(cfg: &ExperimentConfig) -> L96Result<Self> {
        Self::new(cfg.dt, cfg.scheme)
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn scheme(&self) -> IntegrationScheme {
        self.scheme
    }

    /// Advance `u` in place by one step from time `t`.
    fn step<M: DerivativeEvaluator>(
        &self,
        model: &M,
        params: &M::Params,
        u: &mut [f64],
        t: f64,
        s: &mut Scratch,
    ) {
        let dt = self.dt;
        match self.scheme {
            IntegrationScheme::Euler => {
                model.evaluate(&mut s.k1, u, params, t);
                for (ui, k) in u.iter_mut().zip(&s.k1) {
                    *ui += dt * k;
                }
            }
            IntegrationScheme::Rk4 => {
                let half = 0.5 * dt;
                model.evaluate(&mut s.k1, u, params, t);

                stage(&mut s.tmp, u, &s.k1, half);
                model.evaluate(&mut s.k2, &s.tmp, params, t + half);

                stage(&mut s.tmp, u, &s.k2, half);
                model.evaluate(&mut s.k3, &s.tmp, params, t + half);

                stage(&mut s.tmp, u, &s.k3, dt);
                model.evaluate(&mut s.k4, &s.tmp, params, t + dt);

                let w = dt / 6.0;
                for (n, ui) in u.iter_mut().enumerate() {
                    *ui += w * (s.k1[n] + 2.0 * s.k2[n] + 2.0 * s.k3[n] + s.k4[n]);
                }
            }
        }
    }

    /// Integrate `n_steps` steps from (`u0`, `t0`).
    ///
    /// The initial state and every `save_every`-th step are saved.
    /// `on_step` sees every accepted step through an
    /// [`IntegratorContext`]. Non-finite states are not an error: the
    /// run continues and the first divergence is logged.
    #[allow(clippy::too_many_arguments)]
    pub fn solve<M, F>(
        &self,
        model: &M,
        params: &M::Params,
        u0: &[f64],
        t0: f64,
        n_steps: usize,
        save_every: usize,
        mut on_step: F,
    ) -> L96Result<Trajectory>
    where
        M: DerivativeEvaluator,
        F: FnMut(&IntegratorContext<'_, M>),
    {
        if let Some(expected) = model.state_len() {
            if u0.len() != expected {
                return Err(L96Error::Shape {
                    expected,
                    actual: u0.len(),
                });
            }
        }
        if save_every < 1 {
            return Err(L96Error::Validation(format!(
                "save_every must be >= 1, got {save_every}"
            )));
        }

        log::debug!(
            "fixed-step solve: {:?}, dt={}, n_steps={n_steps}, state_len={}",
            self.scheme,
            self.dt,
            u0.len()
        );

        let mut u = u0.to_vec();
        let mut scratch = Scratch::new(u.len());
        let mut traj = Trajectory {
            t: Vec::with_capacity(n_steps / save_every + 1),
            u: Vec::with_capacity(n_steps / save_every + 1),
        };
        traj.t.push(t0);
        traj.u.push(u.clone());

        let mut diverged = false;
        for n in 1..=n_steps {
            let t_prev = t0 + (n - 1) as f64 * self.dt;
            self.step(model, params, &mut u, t_prev, &mut scratch);
            let t = t0 + n as f64 * self.dt;

            if !diverged && u.iter().any(|v| !v.is_finite()) {
                diverged = true;
                log::warn!("state became non-finite at t={t:.6} (step {n})");
            }

            on_step(&IntegratorContext::new(&u, t, n as u64, params, model));

            if n % save_every == 0 {
                traj.t.push(t);
                traj.u.push(u.clone());
            }
        }
        Ok(traj)
    }
}

/// `out = u + h·k`
#[inline]
fn stage(out: &mut [f64], u: &[f64], k: &[f64], h: f64) {
    for ((o, &ui), &ki) in out.iter_mut().zip(u).zip(k) {
        *o = ui + h * ki;
    }
}
