//! Physical constants and numerical settings for a pipe run.
//!
//! Model variants are parameterizations of [`PipeConfig`], not separate
//! code paths: the wall-exchange model and the transport-only model differ
//! only in the values held here.

use pt_core::units::{Density, Length, SpecHeat, ThermalCond, Time, Velocity};
use pt_core::{ensure_finite, ensure_non_negative, ensure_positive};

use crate::error::{SimError, SimResult};

/// Thermophysical properties of the flowing fluid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidProps {
    /// Density (kg/m³)
    pub density: f64,
    /// Specific heat (J/(kg·K))
    pub specific_heat: f64,
    /// Thermal conductivity (W/(m·K)), only used for axial diffusion
    pub conductivity: f64,
}

impl FluidProps {
    /// Liquid water near room temperature.
    pub fn water() -> Self {
        Self {
            density: 997.0,
            specific_heat: 4178.0,
            conductivity: 0.6,
        }
    }

    pub fn density(&self) -> Density {
        pt_core::kg_per_m3(self.density)
    }

    pub fn specific_heat(&self) -> SpecHeat {
        pt_core::j_per_kg_k(self.specific_heat)
    }

    pub fn conductivity(&self) -> ThermalCond {
        pt_core::w_per_m_k(self.conductivity)
    }
}

/// Properties of the pipe wall material.
///
/// The wall is lumped radially, so its conductivity never enters the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallProps {
    /// Density (kg/m³)
    pub density: f64,
    /// Specific heat (J/(kg·K))
    pub specific_heat: f64,
}

impl WallProps {
    pub fn copper() -> Self {
        Self {
            density: 8960.0,
            specific_heat: 385.0,
        }
    }

    pub fn density(&self) -> Density {
        pt_core::kg_per_m3(self.density)
    }

    pub fn specific_heat(&self) -> SpecHeat {
        pt_core::j_per_kg_k(self.specific_heat)
    }
}

/// Initial wall temperature policy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WallInit {
    /// Uniform wall temperature (°C), independent of the input series.
    Fixed(f64),
    /// Uniform wall temperature equal to the first ambient sample.
    #[default]
    FirstAmbient,
}

impl WallInit {
    /// Resolve the starting wall temperature for a run.
    pub fn resolve(self, first_ambient: f64) -> f64 {
        match self {
            WallInit::Fixed(t) => t,
            WallInit::FirstAmbient => first_ambient,
        }
    }
}

/// How the external interval is divided into internal sub-steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepRounding {
    /// `ceil(interval / step)`: never more sub-steps than needed.
    #[default]
    Ceil,
    /// `floor(interval / step) + 1`: always at least one extra when the
    /// ratio is integral.
    FloorPlusOne,
}

/// Numerical settings of the explicit scheme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericsConfig {
    /// Multiplier applied to the tightest stability bound, in (0, 1].
    pub safety_factor: f64,
    pub rounding: StepRounding,
    /// Include the centered second-difference axial conduction term.
    pub axial_diffusion: bool,
}

impl Default for NumericsConfig {
    fn default() -> Self {
        Self {
            safety_factor: 0.5,
            rounding: StepRounding::Ceil,
            axial_diffusion: true,
        }
    }
}

/// Immutable physical configuration of one pipe.
///
/// All lengths in meters, temperatures in °C, everything else SI.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeConfig {
    /// Pipe length (m)
    pub length_m: f64,
    /// Internal radius (m)
    pub inner_radius_m: f64,
    /// Wall thickness (m)
    pub wall_thickness_m: f64,
    /// Mean fluid velocity (m/s), flow from cell 0 to the last cell
    pub velocity_m_per_s: f64,
    /// Number of axial cells
    pub cells: usize,
    pub fluid: FluidProps,
    pub wall: WallProps,
    /// Fluid to wall convective coefficient (W/(m²·K)); zero decouples the wall
    pub h_inner: f64,
    /// Wall to ambient convective coefficient (W/(m²·K)); zero insulates the pipe
    pub h_outer: f64,
    pub wall_init: WallInit,
    pub numerics: NumericsConfig,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self::wall_exchange()
    }
}

impl PipeConfig {
    /// Water in a thin copper tube exposed to air, with axial diffusion.
    pub fn wall_exchange() -> Self {
        Self {
            length_m: 1.87,
            inner_radius_m: 0.005,
            wall_thickness_m: 0.0014,
            velocity_m_per_s: 0.5,
            cells: 100,
            fluid: FluidProps::water(),
            wall: WallProps::copper(),
            h_inner: 1200.0,
            h_outer: 25.0,
            wall_init: WallInit::Fixed(39.0),
            numerics: NumericsConfig::default(),
        }
    }

    /// Pure plug-flow transport: no wall exchange and no axial diffusion.
    pub fn transport_only() -> Self {
        Self {
            length_m: 4.0,
            inner_radius_m: 0.0035,
            wall_thickness_m: 0.0014,
            velocity_m_per_s: 0.5,
            cells: 50,
            fluid: FluidProps::water(),
            wall: WallProps::copper(),
            h_inner: 0.0,
            h_outer: 0.0,
            wall_init: WallInit::FirstAmbient,
            numerics: NumericsConfig {
                safety_factor: 0.9,
                rounding: StepRounding::FloorPlusOne,
                axial_diffusion: false,
            },
        }
    }

    /// Check every invariant the integrator relies on.
    pub fn validate(&self) -> SimResult<()> {
        ensure_positive(self.length_m, "length_m")?;
        ensure_positive(self.inner_radius_m, "inner_radius_m")?;
        ensure_positive(self.wall_thickness_m, "wall_thickness_m")?;
        ensure_positive(self.velocity_m_per_s, "velocity_m_per_s")?;
        ensure_positive(self.fluid.density, "fluid.density")?;
        ensure_positive(self.fluid.specific_heat, "fluid.specific_heat")?;
        ensure_positive(self.fluid.conductivity, "fluid.conductivity")?;
        ensure_positive(self.wall.density, "wall.density")?;
        ensure_positive(self.wall.specific_heat, "wall.specific_heat")?;
        ensure_non_negative(self.h_inner, "h_inner")?;
        ensure_non_negative(self.h_outer, "h_outer")?;
        if let WallInit::Fixed(t) = self.wall_init {
            ensure_finite(t, "wall_init temperature")?;
        }

        if self.cells < 2 {
            return Err(SimError::InvalidConfig {
                message: format!("cells must be at least 2 (got {})", self.cells),
            });
        }

        let safety = ensure_positive(self.numerics.safety_factor, "numerics.safety_factor")?;
        if safety > 1.0 {
            return Err(SimError::InvalidConfig {
                message: format!("numerics.safety_factor must be <= 1 (got {safety})"),
            });
        }

        Ok(())
    }

    pub fn length(&self) -> Length {
        pt_core::m(self.length_m)
    }

    pub fn inner_radius(&self) -> Length {
        pt_core::m(self.inner_radius_m)
    }

    pub fn outer_radius(&self) -> Length {
        pt_core::m(self.inner_radius_m + self.wall_thickness_m)
    }

    pub fn velocity(&self) -> Velocity {
        pt_core::mps(self.velocity_m_per_s)
    }

    /// Time for a fluid parcel to cross the pipe (s).
    pub fn transit_time_s(&self) -> f64 {
        let transit: Time = self.length() / self.velocity();
        transit.value
    }
}
