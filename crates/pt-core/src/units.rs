// pt-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Length as UomLength, MassDensity as UomMassDensity,
    SpecificHeatCapacity as UomSpecificHeatCapacity, ThermalConductivity as UomThermalConductivity,
    Time as UomTime, Velocity as UomVelocity, Volume as UomVolume,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Density = UomMassDensity;
pub type Length = UomLength;
pub type SpecHeat = UomSpecificHeatCapacity;
pub type ThermalCond = UomThermalConductivity;
pub type Time = UomTime;
pub type Velocity = UomVelocity;
pub type Volume = UomVolume;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn j_per_kg_k(v: f64) -> SpecHeat {
    use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
    SpecHeat::new::<joule_per_kilogram_kelvin>(v)
}

#[inline]
pub fn w_per_m_k(v: f64) -> ThermalCond {
    use uom::si::thermal_conductivity::watt_per_meter_kelvin;
    ThermalCond::new::<watt_per_meter_kelvin>(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = m(2.0);
        let _v = mps(0.5);
        let _rho = kg_per_m3(997.0);
        let _cp = j_per_kg_k(4178.0);
        let _k = w_per_m_k(0.6);
    }

    #[test]
    fn derived_quantities_keep_si_values() {
        let r = m(0.5);
        let area: Area = std::f64::consts::PI * r * r;
        assert!((area.value - std::f64::consts::PI * 0.25).abs() < 1e-12);

        let volume: Volume = area * m(2.0);
        assert!((volume.value - std::f64::consts::PI * 0.5).abs() < 1e-12);

        let transit: Time = m(1.87) / mps(0.5);
        assert!((transit.value - 3.74).abs() < 1e-12);
    }
}
