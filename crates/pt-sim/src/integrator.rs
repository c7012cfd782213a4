//! Explicit finite-volume integrator for fluid and wall temperatures.
//!
//! Each internal sub-step reads only the current profiles and writes a
//! separate next-state buffer; the buffers are swapped afterwards. Updating
//! in place would let a cell see its upstream neighbour's new value.

use tracing::{debug, warn};

use crate::config::PipeConfig;
use crate::error::{SimError, SimResult};
use crate::geometry::PipeGeometry;
use crate::record::{SimProgress, SimRecord, SimWarning};
use crate::stability::{StabilityBounds, SubStepPlan};
use crate::state::PipeState;

/// Per-cell rate coefficients, fixed for a configuration.
#[derive(Debug, Clone, Copy)]
struct Coefficients {
    /// v / dx (1/s)
    advection: f64,
    /// α / dx² (1/s), zero when axial diffusion is off
    diffusion: f64,
    axial_diffusion: bool,
    /// h_inner · A_inner (W/K)
    inner_conductance: f64,
    /// h_outer · A_outer (W/K)
    outer_conductance: f64,
    fluid_capacity: f64,
    wall_capacity: f64,
}

impl Coefficients {
    fn new(config: &PipeConfig, g: &PipeGeometry) -> Self {
        let axial_diffusion = config.numerics.axial_diffusion;
        Self {
            advection: config.velocity_m_per_s / g.dx,
            diffusion: if axial_diffusion {
                g.diffusivity / (g.dx * g.dx)
            } else {
                0.0
            },
            axial_diffusion,
            inner_conductance: config.h_inner * g.inner_exchange_area,
            outer_conductance: config.h_outer * g.outer_exchange_area,
            fluid_capacity: g.fluid_capacity,
            wall_capacity: g.wall_capacity,
        }
    }
}

/// Thermal transport integrator for one pipe configuration.
///
/// Construction validates the configuration and precomputes geometry and
/// stability bounds; runs borrow the integrator immutably and own their
/// buffers, so one integrator can serve any number of runs.
#[derive(Debug, Clone)]
pub struct ThermalTransportIntegrator {
    config: PipeConfig,
    geometry: PipeGeometry,
    bounds: StabilityBounds,
    coeffs: Coefficients,
}

impl ThermalTransportIntegrator {
    pub fn new(config: PipeConfig) -> SimResult<Self> {
        config.validate()?;
        let geometry = PipeGeometry::from_config(&config);
        let bounds = StabilityBounds::new(
            &geometry,
            config.velocity_m_per_s,
            config.numerics.axial_diffusion,
        );
        let coeffs = Coefficients::new(&config, &geometry);
        Ok(Self {
            config,
            geometry,
            bounds,
            coeffs,
        })
    }

    pub fn config(&self) -> &PipeConfig {
        &self.config
    }

    pub fn geometry(&self) -> &PipeGeometry {
        &self.geometry
    }

    pub fn bounds(&self) -> StabilityBounds {
        self.bounds
    }

    /// Sub-step plan for an external sample interval.
    pub fn plan(&self, interval_s: f64) -> SimResult<SubStepPlan> {
        SubStepPlan::new(self.bounds, &self.config.numerics, interval_s)
    }

    /// Uniform starting state for a run.
    pub fn initial_state(&self, first_inlet_c: f64, first_ambient_c: f64) -> PipeState {
        let wall_c = self.config.wall_init.resolve(first_ambient_c);
        PipeState::initial(self.config.cells, first_inlet_c, wall_c)
    }

    /// Advance `current` by one sub-step of `dt` seconds into `next`.
    ///
    /// `next` must have the same number of cells as `current`; its previous
    /// contents are overwritten. Wall cell 0 sits under the fixed inlet cell
    /// and is carried over unchanged.
    pub fn substep(
        &self,
        current: &PipeState,
        next: &mut PipeState,
        inlet_c: f64,
        ambient_c: f64,
        dt: f64,
    ) {
        let k = &self.coeffs;
        let fluid = &current.fluid;
        let wall = &current.wall;
        let last = fluid.len() - 1;

        next.copy_from(current);
        next.fluid[0] = inlet_c;

        for j in 1..=last {
            let t = fluid[j];
            let upstream = fluid[j - 1];

            let advection = k.advection * (upstream - t);
            let diffusion = if k.axial_diffusion {
                // Zero-gradient outflow past the last cell
                let downstream = if j < last { fluid[j + 1] } else { t };
                k.diffusion * (downstream - 2.0 * t + upstream)
            } else {
                0.0
            };

            // Positive when the wall heats the fluid
            let q_wall_to_fluid = k.inner_conductance * (wall[j] - t);
            next.fluid[j] = t + (advection + diffusion + q_wall_to_fluid / k.fluid_capacity) * dt;

            // Positive when the ambient heats the wall
            let q_ambient_to_wall = k.outer_conductance * (ambient_c - wall[j]);
            next.wall[j] =
                wall[j] + (q_ambient_to_wall - q_wall_to_fluid) / k.wall_capacity * dt;
        }
    }

    /// Integrate the inlet/ambient series sampled every `interval_s` seconds.
    ///
    /// Without an ambient series the ambient is held at the first inlet value.
    pub fn run(
        &self,
        inlet: &[f64],
        ambient: Option<&[f64]>,
        interval_s: f64,
    ) -> SimResult<SimRecord> {
        self.run_with_progress(inlet, ambient, interval_s, None)
    }

    /// Same as [`run`](Self::run), reporting after every external sample.
    pub fn run_with_progress(
        &self,
        inlet: &[f64],
        ambient: Option<&[f64]>,
        interval_s: f64,
        mut progress: Option<&mut dyn FnMut(SimProgress)>,
    ) -> SimResult<SimRecord> {
        check_samples(inlet, "inlet")?;
        if let Some(ambient) = ambient {
            check_samples(ambient, "ambient")?;
        }

        let fallback;
        let ambient = match ambient {
            Some(a) => a,
            None => {
                fallback = vec![inlet.first().copied().unwrap_or(0.0); inlet.len()];
                fallback.as_slice()
            }
        };

        let mut warnings = Vec::new();
        let samples = inlet.len().min(ambient.len());
        if inlet.len() != ambient.len() {
            warn!(
                inlet_len = inlet.len(),
                ambient_len = ambient.len(),
                "inlet and ambient series differ in length; simulating the shorter one"
            );
            warnings.push(SimWarning::LengthMismatch {
                inlet_len: inlet.len(),
                ambient_len: ambient.len(),
                simulated: samples,
            });
        }
        if samples == 0 {
            return Ok(SimRecord::empty(warnings));
        }

        let plan = self.plan(interval_s)?;
        debug!(
            substeps = plan.substeps,
            substep_s = plan.substep_s,
            courant = plan.courant(),
            "planned sub-steps per sample"
        );

        let mut current = self.initial_state(inlet[0], ambient[0]);
        let mut next = current.clone();

        let mut time = Vec::with_capacity(samples);
        let mut outlet = Vec::with_capacity(samples);
        let mut elapsed = 0.0;

        for (i, (&inlet_c, &ambient_c)) in inlet.iter().zip(ambient).enumerate() {
            for _ in 0..plan.substeps {
                self.substep(&current, &mut next, inlet_c, ambient_c, plan.substep_s);
                std::mem::swap(&mut current, &mut next);
            }

            time.push(elapsed);
            outlet.push(current.outlet());
            elapsed += interval_s;

            if let Some(cb) = progress.as_deref_mut() {
                cb(SimProgress {
                    sample: i + 1,
                    total_samples: samples,
                    sim_time_s: elapsed,
                    outlet_c: current.outlet(),
                });
            }
        }

        Ok(SimRecord {
            time,
            outlet,
            final_wall: current.wall,
            plan: Some(plan),
            warnings,
        })
    }
}

fn check_samples(samples: &[f64], series: &'static str) -> SimResult<()> {
    match samples.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(SimError::NonFiniteSample {
            series,
            index,
            value: samples[index],
        }),
        None => Ok(()),
    }
}
