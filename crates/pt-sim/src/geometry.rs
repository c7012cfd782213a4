//! Per-cell geometry and thermal capacities.

use std::f64::consts::PI;

use pt_core::units::{Area, Length, Volume};

use crate::config::PipeConfig;

/// Geometry of one axial cell, identical for every cell of the pipe.
///
/// Values are stored as plain SI numbers because they are read in the
/// innermost loop of the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeGeometry {
    /// Cell length (m)
    pub dx: f64,
    /// Flow cross-section (m²)
    pub flow_area: f64,
    /// Wall annulus cross-section (m²)
    pub wall_area: f64,
    /// Fluid/wall interchange area per cell (m²)
    pub inner_exchange_area: f64,
    /// Wall/ambient interchange area per cell (m²)
    pub outer_exchange_area: f64,
    /// Fluid volume per cell (m³)
    pub fluid_volume: f64,
    /// Wall volume per cell (m³)
    pub wall_volume: f64,
    /// Energy to raise one fluid cell by one kelvin (J/K)
    pub fluid_capacity: f64,
    /// Energy to raise one wall cell by one kelvin (J/K)
    pub wall_capacity: f64,
    /// Fluid thermal diffusivity (m²/s)
    pub diffusivity: f64,
}

impl PipeGeometry {
    pub fn from_config(config: &PipeConfig) -> Self {
        let dx: Length = config.length() / config.cells as f64;
        let r_i = config.inner_radius();
        let r_o = config.outer_radius();

        let flow_area: Area = PI * r_i * r_i;
        let wall_area: Area = PI * (r_o * r_o - r_i * r_i);
        let inner_exchange_area: Area = 2.0 * PI * r_i * dx;
        let outer_exchange_area: Area = 2.0 * PI * r_o * dx;
        let fluid_volume: Volume = flow_area * dx;
        let wall_volume: Volume = wall_area * dx;

        let fluid = &config.fluid;
        let rho_c_fluid = fluid.density().value * fluid.specific_heat().value;
        let rho_c_wall = config.wall.density().value * config.wall.specific_heat().value;

        Self {
            dx: dx.value,
            flow_area: flow_area.value,
            wall_area: wall_area.value,
            inner_exchange_area: inner_exchange_area.value,
            outer_exchange_area: outer_exchange_area.value,
            fluid_volume: fluid_volume.value,
            wall_volume: wall_volume.value,
            fluid_capacity: fluid_volume.value * rho_c_fluid,
            wall_capacity: wall_volume.value * rho_c_wall,
            diffusivity: fluid.conductivity().value / rho_c_fluid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pt_core::{Tolerances, nearly_equal};

    #[test]
    fn wall_exchange_geometry() {
        let g = PipeGeometry::from_config(&PipeConfig::wall_exchange());
        let tol = Tolerances::default();

        assert!(nearly_equal(g.dx, 0.0187, tol));
        assert!(nearly_equal(g.flow_area, PI * 0.005 * 0.005, tol));
        assert!(nearly_equal(
            g.wall_area,
            PI * (0.0064 * 0.0064 - 0.005 * 0.005),
            tol
        ));
        assert!(nearly_equal(g.inner_exchange_area, 2.0 * PI * 0.005 * 0.0187, tol));
        assert!(nearly_equal(g.outer_exchange_area, 2.0 * PI * 0.0064 * 0.0187, tol));
        assert!(nearly_equal(g.diffusivity, 0.6 / (997.0 * 4178.0), tol));
    }

    #[test]
    fn capacities_are_positive_and_consistent() {
        let cfg = PipeConfig::wall_exchange();
        let g = PipeGeometry::from_config(&cfg);
        assert!(g.fluid_capacity > 0.0);
        assert!(g.wall_capacity > 0.0);

        let expected = g.fluid_volume * cfg.fluid.density * cfg.fluid.specific_heat;
        assert!(nearly_equal(g.fluid_capacity, expected, Tolerances::default()));
    }

    #[test]
    fn cells_tile_the_pipe() {
        let cfg = PipeConfig::transport_only();
        let g = PipeGeometry::from_config(&cfg);
        let total = g.dx * cfg.cells as f64;
        assert!(nearly_equal(total, cfg.length_m, Tolerances::default()));
    }
}
