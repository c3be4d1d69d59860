// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — Experiment Runner
// ─────────────────────────────────────────────────────────────────────
//! One call from an `ExperimentConfig` to a saved run: model, parameters,
//! seeded initial condition, fixed-step driver, and the subgrid-forcing
//! series on the trajectory's save cadence.

use serde::{Deserialize, Serialize};

use lorenz96_physics::{
    default_initial_condition_seeded, FixedStepIntegrator, Trajectory, TwoLayerModel,
    TwoLayerParams,
};
use lorenz96_types::{ExperimentConfig, L96Result};

use crate::saving::{solve_observed, SavedValues};
use crate::subgrid::SubgridObserver;

/// Result of [`run_experiment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRun {
    pub config: ExperimentConfig,
    pub trajectory: Trajectory,
    /// Subgrid forcing at every saved time.
    pub subgrid: SavedValues<Vec<f64>>,
}

/// Run the two-layer experiment described by `cfg` from t = 0.
pub fn run_experiment(cfg: &ExperimentConfig) -> L96Result<ExperimentRun> {
    cfg.validate()?;
    let model = TwoLayerModel::from_config(cfg)?;
    let params = TwoLayerParams::from_config(cfg);
    let integrator = FixedStepIntegrator::from_config(cfg)?;
    let u0 = default_initial_condition_seeded(model.layout(), cfg.seed);

    log::info!(
        "experiment: K={}, J={}, seed={}, {:?} dt={} x {} steps",
        cfg.k,
        cfg.j,
        cfg.seed,
        cfg.scheme,
        cfg.dt,
        cfg.n_steps
    );

    let (trajectory, subgrid) = solve_observed(
        &integrator,
        &model,
        &params,
        &u0,
        0.0,
        cfg.n_steps,
        cfg.save_every,
        SubgridObserver,
    )?;
    Ok(ExperimentRun {
        config: cfg.clone(),
        trajectory,
        subgrid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorenz96_physics::TwoLayerLayout;
    use lorenz96_types::{IntegrationScheme, L96Error};

    fn small_config() -> ExperimentConfig {
        ExperimentConfig {
            k: 4,
            j: 5,
            n_steps: 40,
            save_every: 8,
            seed: 7,
            ..Default::default()
        }
    }

    #[test]
    fn test_uses_every_config_field() {
        let cfg = small_config();
        let run = run_experiment(&cfg).unwrap();

        // n_steps / save_every: t0 plus steps 8, 16, 24, 32, 40
        assert_eq!(run.trajectory.len(), 6);
        assert_eq!(run.subgrid.len(), 6);
        assert!((run.trajectory.t[5] - 40.0 * cfg.dt).abs() < 1e-12);

        // k, j, seed
        let layout = TwoLayerLayout::new(4, 5).unwrap();
        assert_eq!(run.trajectory.u[0], default_initial_condition_seeded(&layout, 7));
        assert!(run.subgrid.saveval.iter().all(|s| s.len() == 4));
        assert_eq!(run.config, cfg);
    }

    #[test]
    fn test_reproducible() {
        let a = run_experiment(&small_config()).unwrap();
        let b = run_experiment(&small_config()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_and_scheme_change_the_run() {
        let base = run_experiment(&small_config()).unwrap();
        let reseeded = run_experiment(&ExperimentConfig {
            seed: 8,
            ..small_config()
        })
        .unwrap();
        let euler = run_experiment(&ExperimentConfig {
            scheme: IntegrationScheme::Euler,
            ..small_config()
        })
        .unwrap();
        assert_ne!(base.trajectory.u[0], reseeded.trajectory.u[0]);
        assert_eq!(base.trajectory.u[0], euler.trajectory.u[0]);
        assert_ne!(base.trajectory.last(), euler.trajectory.last());
    }

    #[test]
    fn test_parameters_reach_the_diagnostic() {
        // h = 0 switches the coupling off, so the saved forcing is zero.
        let run = run_experiment(&ExperimentConfig {
            h: 0.0,
            ..small_config()
        })
        .unwrap();
        assert!(run.subgrid.saveval.iter().flatten().all(|&v| v == 0.0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = run_experiment(&ExperimentConfig {
            save_every: 0,
            ..small_config()
        })
        .unwrap_err();
        assert!(matches!(err, L96Error::Config(_)));
    }
}
