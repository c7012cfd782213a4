//! Run results, warnings and progress reporting.

use std::fmt;

use crate::stability::SubStepPlan;

/// Recoverable conditions observed during a run.
#[derive(Clone, Debug, PartialEq)]
pub enum SimWarning {
    /// Inlet and ambient series differ in length; the shorter one governs.
    LengthMismatch {
        inlet_len: usize,
        ambient_len: usize,
        simulated: usize,
    },
}

impl fmt::Display for SimWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimWarning::LengthMismatch {
                inlet_len,
                ambient_len,
                simulated,
            } => write!(
                f,
                "inlet ({inlet_len} samples) and ambient ({ambient_len} samples) differ in length; \
                 simulated the first {simulated}"
            ),
        }
    }
}

/// Output of one integrator run.
#[derive(Clone, Debug)]
pub struct SimRecord {
    /// Elapsed time per output sample (s), starting at 0
    pub time: Vec<f64>,
    /// Outlet fluid temperature per output sample (°C)
    pub outlet: Vec<f64>,
    /// Wall profile after the last sample (°C); empty when nothing ran
    pub final_wall: Vec<f64>,
    /// `None` when the input was empty and nothing was planned
    pub plan: Option<SubStepPlan>,
    pub warnings: Vec<SimWarning>,
}

impl SimRecord {
    pub(crate) fn empty(warnings: Vec<SimWarning>) -> Self {
        Self {
            time: Vec::new(),
            outlet: Vec::new(),
            final_wall: Vec::new(),
            plan: None,
            warnings,
        }
    }

    pub fn len(&self) -> usize {
        self.outlet.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlet.is_empty()
    }

    /// Last outlet temperature, if any sample was processed.
    pub fn final_outlet(&self) -> Option<f64> {
        self.outlet.last().copied()
    }
}

/// Progress snapshot emitted after each external sample.
#[derive(Clone, Debug)]
pub struct SimProgress {
    /// Samples processed so far
    pub sample: usize,
    pub total_samples: usize,
    /// Elapsed simulated time at the end of this sample (s)
    pub sim_time_s: f64,
    pub outlet_c: f64,
}

impl SimProgress {
    pub fn fraction_complete(&self) -> f64 {
        if self.total_samples == 0 {
            1.0
        } else {
            self.sample as f64 / self.total_samples as f64
        }
    }
}
