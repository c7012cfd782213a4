//! Explicit-scheme stability bounds and sub-step planning.

use crate::config::{NumericsConfig, StepRounding};
use crate::error::{SimError, SimResult};
use crate::geometry::PipeGeometry;

/// Upper bounds on the internal step of the explicit update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityBounds {
    /// CFL bound for upwind advection: dx / v (s)
    pub advective_s: f64,
    /// Bound for the explicit second-difference term: dx² / (2α) (s).
    /// `None` when axial diffusion is not modeled.
    pub diffusive_s: Option<f64>,
}

impl StabilityBounds {
    pub fn new(geometry: &PipeGeometry, velocity_m_per_s: f64, axial_diffusion: bool) -> Self {
        let dx = geometry.dx;
        Self {
            advective_s: dx / velocity_m_per_s,
            diffusive_s: axial_diffusion.then(|| dx * dx / (2.0 * geometry.diffusivity)),
        }
    }

    /// Tightest applicable bound (s).
    pub fn limiting_s(&self) -> f64 {
        match self.diffusive_s {
            Some(d) => self.advective_s.min(d),
            None => self.advective_s,
        }
    }
}

/// How one external sample interval is integrated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubStepPlan {
    pub bounds: StabilityBounds,
    /// Safety-scaled maximum internal step (s)
    pub max_step_s: f64,
    /// External sample interval (s)
    pub interval_s: f64,
    /// Sub-steps per external sample, always >= 1
    pub substeps: usize,
    /// Actual sub-step duration: interval_s / substeps (s)
    pub substep_s: f64,
}

impl SubStepPlan {
    /// Split `interval_s` into equal sub-steps no longer than the stable step.
    pub fn new(
        bounds: StabilityBounds,
        numerics: &NumericsConfig,
        interval_s: f64,
    ) -> SimResult<Self> {
        if !interval_s.is_finite() || interval_s <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "sample interval must be finite and positive",
            });
        }

        let max_step_s = bounds.limiting_s() * numerics.safety_factor;
        let ratio = interval_s / max_step_s;
        let count = match numerics.rounding {
            StepRounding::Ceil => ratio.ceil(),
            StepRounding::FloorPlusOne => ratio.floor() + 1.0,
        };
        if !count.is_finite() || count > usize::MAX as f64 {
            return Err(SimError::InvalidArg {
                what: "sample interval requires too many sub-steps",
            });
        }
        let substeps = (count as usize).max(1);

        Ok(Self {
            bounds,
            max_step_s,
            interval_s,
            substeps,
            substep_s: interval_s / substeps as f64,
        })
    }

    /// Courant number of the advection term at the planned sub-step.
    pub fn courant(&self) -> f64 {
        self.substep_s / self.bounds.advective_s
    }
}
