//! Run execution service.
//!
//! All work limits are enforced here, before the engine allocates anything.

use pt_sim::{PipeConfig, SimProgress, ThermalTransportIntegrator};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::request::{DEFAULT_INTERVAL_S, SimulateRequest, validate_interval};
use crate::response::SimulateResponse;

/// Upper bounds on the work one request may cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    pub max_samples: usize,
    /// Bound on samples × sub-steps per sample
    pub max_total_substeps: u64,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            max_samples: 1_000_000,
            max_total_substeps: 50_000_000,
        }
    }
}

/// Options for running simulations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    pub default_interval_s: f64,
    pub limits: RunLimits,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            default_interval_s: DEFAULT_INTERVAL_S,
            limits: RunLimits::default(),
        }
    }
}

pub fn run_simulation(
    config: &PipeConfig,
    request: &SimulateRequest,
    options: &RunOptions,
) -> AppResult<SimulateResponse> {
    run_simulation_with_progress(config, request, options, None)
}

/// Validate, bound, run and package one request.
pub fn run_simulation_with_progress(
    config: &PipeConfig,
    request: &SimulateRequest,
    options: &RunOptions,
    progress: Option<&mut dyn FnMut(SimProgress)>,
) -> AppResult<SimulateResponse> {
    let interval_s = validate_interval(request.interval_or(options.default_interval_s))?;
    let integrator = ThermalTransportIntegrator::new(config.clone())?;

    let ambient_len = request.ambient.as_ref().map_or(usize::MAX, Vec::len);
    let samples = request.inlet.len().min(ambient_len);
    let limits = &options.limits;
    if samples > limits.max_samples {
        return Err(AppError::LimitExceeded {
            what: "samples",
            value: samples as u64,
            limit: limits.max_samples as u64,
        });
    }

    let plan = integrator.plan(interval_s)?;
    let total_substeps = (samples as u64).saturating_mul(plan.substeps as u64);
    if total_substeps > limits.max_total_substeps {
        return Err(AppError::LimitExceeded {
            what: "total sub-steps",
            value: total_substeps,
            limit: limits.max_total_substeps,
        });
    }

    info!(
        samples,
        interval_s,
        substeps_per_sample = plan.substeps,
        total_substeps,
        "running pipe simulation"
    );

    let record = integrator
        .run_with_progress(
            &request.inlet,
            request.ambient.as_deref(),
            interval_s,
            progress,
        )
        .map_err(|e| AppError::Simulation(e.to_string()))?;

    let ambient = match &request.ambient {
        Some(a) => a.clone(),
        None => vec![request.inlet.first().copied().unwrap_or(0.0); request.inlet.len()],
    };

    Ok(SimulateResponse {
        interval_s,
        n_points: request.inlet.len(),
        final_temperature: record.final_outlet(),
        time: record.time,
        inlet: request.inlet.clone(),
        ambient,
        outlet: record.outlet,
        final_wall: record.final_wall,
        substeps_per_sample: plan.substeps,
        substep_s: plan.substep_s,
        warnings: record.warnings.iter().map(ToString::to_string).collect(),
    })
}
