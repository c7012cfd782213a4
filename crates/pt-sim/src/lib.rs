//! Thermal transport simulation for a single heated or cooled pipe.
//!
//! Provides:
//! - Immutable pipe configuration with named model presets
//! - Per-cell geometry and thermal capacity precomputation
//! - CFL / diffusion stability bounds and sub-step planning
//! - Explicit double-buffered integration of fluid and lumped wall temperatures

pub mod config;
pub mod error;
pub mod geometry;
pub mod integrator;
pub mod record;
pub mod stability;
pub mod state;

// Re-exports for public API
pub use config::{FluidProps, NumericsConfig, PipeConfig, StepRounding, WallInit, WallProps};
pub use error::{SimError, SimResult};
pub use geometry::PipeGeometry;
pub use integrator::ThermalTransportIntegrator;
pub use record::{SimProgress, SimRecord, SimWarning};
pub use stability::{StabilityBounds, SubStepPlan};
pub use state::PipeState;

/// Integrate one inlet/ambient series with a fresh integrator.
pub fn simulate(
    config: PipeConfig,
    inlet: &[f64],
    ambient: Option<&[f64]>,
    interval_s: f64,
) -> SimResult<SimRecord> {
    ThermalTransportIntegrator::new(config)?.run(inlet, ambient, interval_s)
}
