// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — PyO3 FFI Bindings
// (C) 2026 Lorenz-96 Multiscale contributors.
// License: GNU AGPL v3
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the Lorenz-96 models, for notebooks.
//!
//! # FFI Safety
//!
//! - Every buffer arriving from Python is length-checked before it
//!   reaches an evaluator; mismatches raise `ValueError`.
//! - Layout and configuration errors map to `ValueError` with the Rust
//!   message.
//! - Values cross the boundary by copy; no Rust borrow escapes a call.
//!
//! Install: `pip install -e crates/lorenz96-ffi` (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from lorenz96 import TwoLayerModel, default_parameters
//!
//! model = TwoLayerModel(k=8, j=32)
//! u0 = model.initial_condition(seed=42)
//! run = model.integrate(u0, dt=0.001, n_steps=5000, save_every=10)
//! run["subgrid"]  # hcb * sum_j Y[i, j] at each saved time
//!
//! model = TwoLayerModel.from_json('{"k": 8, "j": 6, "seed": 2024}')
//! run = model.run()  # every setting taken from the config
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use lorenz96_observers::{run_experiment, solve_observed, subgrid_forcing, SubgridObserver};
use lorenz96_physics::{
    default_initial_condition_seeded, DerivativeEvaluator, FixedStepIntegrator, OneLayerModel,
    TwoLayerModel, TwoLayerParams,
};
use lorenz96_types::{ExperimentConfig, IntegrationScheme, L96Error};

fn to_py_err(e: L96Error) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn parse_scheme(name: &str) -> PyResult<IntegrationScheme> {
    match name.to_ascii_lowercase().as_str() {
        "euler" => Ok(IntegrationScheme::Euler),
        "rk4" => Ok(IntegrationScheme::Rk4),
        other => Err(PyValueError::new_err(format!(
            "unknown scheme '{other}', expected 'euler' or 'rk4'"
        ))),
    }
}

// ─── TwoLayerModel ──────────────────────────────────────────────────

/// Two-layer Lorenz-96 model with K slow and K·J fast variables.
///
/// Holds an `ExperimentConfig`; its parameters, seed, step size, scheme
/// and run length are the defaults for every method below.
#[pyclass(name = "TwoLayerModel")]
struct PyTwoLayerModel {
    inner: TwoLayerModel,
    config: ExperimentConfig,
}

impl PyTwoLayerModel {
    fn from_config(config: ExperimentConfig) -> PyResult<Self> {
        config.validate().map_err(to_py_err)?;
        let inner = TwoLayerModel::from_config(&config).map_err(to_py_err)?;
        Ok(Self { inner, config })
    }

    fn check_len(&self, u: &[f64]) -> PyResult<()> {
        let expected = self.inner.layout().n();
        if u.len() != expected {
            return Err(to_py_err(L96Error::Shape {
                expected,
                actual: u.len(),
            }));
        }
        Ok(())
    }

    /// Per-call overrides on top of the held configuration.
    fn params(
        &self,
        h: Option<f64>,
        c: Option<f64>,
        b: Option<f64>,
        f: Option<f64>,
    ) -> TwoLayerParams {
        let base = TwoLayerParams::from_config(&self.config);
        TwoLayerParams::new(
            h.unwrap_or(base.h),
            c.unwrap_or(base.c),
            b.unwrap_or(base.b),
            f.unwrap_or(base.f),
        )
    }
}

fn run_to_dict(
    py: Python<'_>,
    t: Vec<f64>,
    u: Vec<Vec<f64>>,
    subgrid: Vec<Vec<f64>>,
) -> PyResult<PyObject> {
    let dict = PyDict::new(py);
    dict.set_item("t", t)?;
    dict.set_item("u", u)?;
    dict.set_item("subgrid", subgrid)?;
    Ok(dict.into_any().unbind())
}

#[pymethods]
impl PyTwoLayerModel {
    #[new]
    #[pyo3(signature = (k = 8, j = 32))]
    fn new(k: usize, j: usize) -> PyResult<Self> {
        Self::from_config(ExperimentConfig {
            k,
            j,
            ..ExperimentConfig::default()
        })
    }

    /// Build from an `ExperimentConfig` JSON string. The whole config is
    /// kept and used as the defaults of later calls.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        Self::from_config(ExperimentConfig::from_json(json).map_err(to_py_err)?)
    }

    #[getter]
    fn k(&self) -> usize {
        self.inner.layout().k()
    }

    #[getter]
    fn j(&self) -> usize {
        self.inner.layout().j()
    }

    #[getter]
    fn n_j(&self) -> usize {
        self.inner.layout().n_j()
    }

    #[getter]
    fn n(&self) -> usize {
        self.inner.layout().n()
    }

    /// The held configuration as (h, c, b, F).
    #[getter]
    fn parameters(&self) -> (f64, f64, f64, f64) {
        let p = self.params(None, None, None, None);
        (p.h, p.c, p.b, p.f)
    }

    /// Flat indices of the slow block.
    fn slow_indices(&self) -> Vec<usize> {
        self.inner.layout().slow_range().collect()
    }

    /// Flat indices of the fast block.
    fn fast_indices(&self) -> Vec<usize> {
        self.inner.layout().fast_range().collect()
    }

    /// Flat indices of the J fast variables coupled to slow index `i`.
    fn fast_indices_of(&self, i: usize) -> PyResult<Vec<usize>> {
        let layout = self.inner.layout();
        if i >= layout.k() {
            return Err(PyValueError::new_err(format!(
                "slow index {i} out of range for K={}",
                layout.k()
            )));
        }
        Ok(layout.fast_range_of(i).collect())
    }

    /// Seeded default initial condition (length N). Seed defaults to the config's.
    #[pyo3(signature = (seed = None))]
    fn initial_condition(&self, seed: Option<u64>) -> Vec<f64> {
        default_initial_condition_seeded(self.inner.layout(), seed.unwrap_or(self.config.seed))
    }

    /// du/dt at (u, t); unset parameters come from the config.
    #[pyo3(signature = (u, h = None, c = None, b = None, f = None, t = 0.0))]
    #[allow(clippy::too_many_arguments)]
    fn rhs(
        &self,
        u: Vec<f64>,
        h: Option<f64>,
        c: Option<f64>,
        b: Option<f64>,
        f: Option<f64>,
        t: f64,
    ) -> PyResult<Vec<f64>> {
        self.check_len(&u)?;
        let mut du = vec![0.0; u.len()];
        self.inner.evaluate(&mut du, &u, &self.params(h, c, b, f), t);
        Ok(du)
    }

    /// Subgrid forcing hcb · Σ_j Y[i, j] (length K).
    #[pyo3(signature = (u, h = None, c = None, b = None, f = None, t = 0.0))]
    #[allow(clippy::too_many_arguments)]
    fn subgrid_forcing(
        &self,
        u: Vec<f64>,
        h: Option<f64>,
        c: Option<f64>,
        b: Option<f64>,
        f: Option<f64>,
        t: f64,
    ) -> PyResult<Vec<f64>> {
        self.check_len(&u)?;
        Ok(subgrid_forcing(
            &u,
            t,
            self.inner.layout(),
            &self.params(h, c, b, f),
        ))
    }

    /// Fixed-step run from `u0`. Returns dict with `t`, `u` (list of
    /// states) and `subgrid` (list of length-K forcings) on the save
    /// cadence. Unset arguments come from the config.
    #[pyo3(signature = (
        u0,
        dt = None,
        n_steps = None,
        save_every = None,
        h = None,
        c = None,
        b = None,
        f = None,
        scheme = None,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn integrate(
        &self,
        py: Python<'_>,
        u0: Vec<f64>,
        dt: Option<f64>,
        n_steps: Option<usize>,
        save_every: Option<usize>,
        h: Option<f64>,
        c: Option<f64>,
        b: Option<f64>,
        f: Option<f64>,
        scheme: Option<&str>,
    ) -> PyResult<PyObject> {
        self.check_len(&u0)?;
        let scheme = match scheme {
            Some(name) => parse_scheme(name)?,
            None => self.config.scheme,
        };
        let integ = FixedStepIntegrator::new(dt.unwrap_or(self.config.dt), scheme)
            .map_err(to_py_err)?;
        let (traj, saved) = solve_observed(
            &integ,
            &self.inner,
            &self.params(h, c, b, f),
            &u0,
            0.0,
            n_steps.unwrap_or(self.config.n_steps),
            save_every.unwrap_or(self.config.save_every),
            SubgridObserver,
        )
        .map_err(to_py_err)?;
        run_to_dict(py, traj.t, traj.u, saved.saveval)
    }

    /// Run the held configuration end to end from its seeded initial
    /// condition. Same dict layout as `integrate`.
    fn run(&self, py: Python<'_>) -> PyResult<PyObject> {
        let run = run_experiment(&self.config).map_err(to_py_err)?;
        run_to_dict(py, run.trajectory.t, run.trajectory.u, run.subgrid.saveval)
    }

    fn __repr__(&self) -> String {
        let l = self.inner.layout();
        format!("TwoLayerModel(k={}, j={}, n={})", l.k(), l.j(), l.n())
    }
}

// ─── Free functions ─────────────────────────────────────────────────

/// Canonical (h, c, b, F) = (1, 10, 10, 12).
#[pyfunction]
fn default_parameters() -> (f64, f64, f64, f64) {
    let p = lorenz96_physics::default_parameters();
    (p.h, p.c, p.b, p.f)
}

/// One-layer du/dt for forcing `f`.
#[pyfunction]
#[pyo3(signature = (u, f = 8.0))]
fn one_layer_rhs(u: Vec<f64>, f: f64) -> Vec<f64> {
    let mut du = vec![0.0; u.len()];
    OneLayerModel.evaluate(&mut du, &u, &f, 0.0);
    du
}

/// Coupling kernel c·b·(u[j+1] - u[j-2])·u[j-1] - c·u[j] on a ring.
#[pyfunction]
#[pyo3(signature = (u, c = 1.0, b = 1.0))]
fn coupling_kernel(u: Vec<f64>, c: f64, b: f64) -> Vec<f64> {
    lorenz96_physics::coupling_kernel(&u, c, b)
}

// ─── Module ─────────────────────────────────────────────────────────

/// Lorenz-96 teaching models.
///
/// - `TwoLayerModel` — slow/fast RHS, layout accessors, subgrid forcing, config runs
/// - `one_layer_rhs`, `coupling_kernel` — single-layer building blocks
/// - `default_parameters` — canonical (h, c, b, F)
#[pymodule]
fn lorenz96(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTwoLayerModel>()?;
    m.add_function(wrap_pyfunction!(default_parameters, m)?)?;
    m.add_function(wrap_pyfunction!(one_layer_rhs, m)?)?;
    m.add_function(wrap_pyfunction!(coupling_kernel, m)?)?;
    Ok(())
}
