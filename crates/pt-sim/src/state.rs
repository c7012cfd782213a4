//! Fluid and wall temperature profiles.

use crate::geometry::PipeGeometry;

/// Temperatures of every cell (°C), index 0 at the pipe inlet.
#[derive(Clone, Debug, PartialEq)]
pub struct PipeState {
    pub fluid: Vec<f64>,
    pub wall: Vec<f64>,
}

impl PipeState {
    /// Uniform profiles: fluid at the first inlet sample, wall at `wall_c`.
    pub fn initial(cells: usize, first_inlet_c: f64, wall_c: f64) -> Self {
        Self {
            fluid: vec![first_inlet_c; cells],
            wall: vec![wall_c; cells],
        }
    }

    pub fn cells(&self) -> usize {
        self.fluid.len()
    }

    /// Outlet (last cell) fluid temperature.
    pub fn outlet(&self) -> f64 {
        self.fluid[self.fluid.len() - 1]
    }

    /// Overwrite `self` with `other` without reallocating.
    pub fn copy_from(&mut self, other: &PipeState) {
        self.fluid.copy_from_slice(&other.fluid);
        self.wall.copy_from_slice(&other.wall);
    }

    /// Thermal energy relative to 0 °C summed over all cells (J).
    pub fn thermal_energy(&self, geometry: &PipeGeometry) -> f64 {
        let fluid: f64 = self.fluid.iter().sum();
        let wall: f64 = self.wall.iter().sum();
        geometry.fluid_capacity * fluid + geometry.wall_capacity * wall
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipeConfig;

    #[test]
    fn initial_profiles_are_uniform() {
        let s = PipeState::initial(5, 80.0, 39.0);
        assert_eq!(s.cells(), 5);
        assert!(s.fluid.iter().all(|&t| t == 80.0));
        assert!(s.wall.iter().all(|&t| t == 39.0));
        assert_eq!(s.outlet(), 80.0);
    }

    #[test]
    fn copy_from_keeps_buffers() {
        let mut a = PipeState::initial(3, 0.0, 0.0);
        let b = PipeState::initial(3, 1.0, 2.0);
        let ptr = a.fluid.as_ptr();
        a.copy_from(&b);
        assert_eq!(a, b);
        assert_eq!(a.fluid.as_ptr(), ptr);
    }

    #[test]
    fn energy_scales_with_capacity() {
        let cfg = PipeConfig::wall_exchange();
        let g = PipeGeometry::from_config(&cfg);
        let s = PipeState::initial(cfg.cells, 1.0, 0.0);
        let e = s.thermal_energy(&g);
        assert!((e - g.fluid_capacity * cfg.cells as f64).abs() < 1e-9 * e);
    }
}
