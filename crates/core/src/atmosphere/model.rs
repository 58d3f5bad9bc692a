//! Single-altitude evaluation of the standard atmosphere
//!
//! # Equations
//!
//! Within a layer with base altitude `hb`, base temperature `Tb`, base
//! pressure `Pb` and lapse rate `L`:
//!
//! - Temperature: `T = Tb + L·(h − hb)`
//! - Pressure, isothermal (`L = 0`): `P = Pb·exp(−g0·(h − hb) / (R·T))`
//! - Pressure, gradient (`L ≠ 0`): `P = Pb·(T/Tb)^(−g0 / (L·R))`
//! - Density (ideal gas): `ρ = P / (R·T)`
//! - Speed of sound: `a = √(γ·R·T)`
//! - Dynamic viscosity (Sutherland): `μ = μ0·(T/T0)^1.5·(T0 + S)/(T + S)`
//! - Kinematic viscosity: `ν = μ/ρ`
//!
//! # References
//! - ICAO (1993). "Manual of the ICAO Standard Atmosphere", Doc 7488/3.
//! - NOAA/NASA/USAF (1976). "U.S. Standard Atmosphere, 1976".
//! - Sutherland, W. (1893). "The viscosity of gases and molecular force."

use crate::atmosphere::layers::{AtmosphericLayer, LayerTable, MAX_ALTITUDE, MIN_ALTITUDE};
use crate::core_types::constants::{sutherland, PhysicalConstants, STANDARD_CONSTANTS};
use crate::core_types::units::{AltitudeUnit, PressureUnit, TemperatureUnit};
use crate::error::Result;
use serde::Serialize;
use tracing::trace;

/// Saturate an altitude into the modeled range `[0, 86000]` m.
///
/// Out-of-range inputs are not rejected; they take the nearest bound's values.
#[inline]
pub fn clamp_altitude(altitude: f64) -> f64 {
    altitude.clamp(MIN_ALTITUDE, MAX_ALTITUDE)
}

/// Temperature (K) at `altitude` using `layer`'s linear profile.
#[inline]
pub fn layer_temperature(layer: &AtmosphericLayer, altitude: f64) -> f64 {
    layer.base_temperature + layer.lapse_rate * (altitude - layer.base_altitude)
}

/// Pressure (Pa) at `altitude` inside `layer`, given this altitude's temperature.
pub fn layer_pressure(
    layer: &AtmosphericLayer,
    altitude: f64,
    temperature: f64,
    constants: &PhysicalConstants,
) -> f64 {
    if layer.lapse_rate == 0.0 {
        let dh = altitude - layer.base_altitude;
        layer.base_pressure * (-constants.g0 * dh / (constants.r * temperature)).exp()
    } else {
        let exponent = -constants.g0 / (layer.lapse_rate * constants.r);
        layer.base_pressure * (temperature / layer.base_temperature).powf(exponent)
    }
}

/// Dynamic viscosity (Pa·s) of air at `temperature` (K) by Sutherland's law.
#[inline]
pub fn sutherland_viscosity(temperature: f64) -> f64 {
    sutherland::MU0
        * (temperature / sutherland::T0).powf(1.5)
        * (sutherland::T0 + sutherland::S)
        / (temperature + sutherland::S)
}

/// Full atmospheric state at one altitude.
///
/// Values are plain SI numbers; unit-aware display is built by the caller from
/// the conversion tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtmosphericResult {
    /// Clamped geopotential altitude (m)
    pub altitude: f64,
    /// Temperature (K)
    pub temperature_k: f64,
    /// Temperature (°C)
    pub temperature_c: f64,
    /// Static pressure (Pa)
    pub pressure: f64,
    /// Density (kg/m³)
    pub density: f64,
    /// Speed of sound (m/s)
    pub speed_of_sound: f64,
    /// Dynamic viscosity (Pa·s)
    pub dynamic_viscosity: f64,
    /// Kinematic viscosity (m²/s)
    pub kinematic_viscosity: f64,
    /// Index into the standard layer table
    pub layer_index: usize,
}

impl AtmosphericResult {
    /// The layer this sample was resolved into.
    ///
    /// Looks `layer_index` up in [`STANDARD_LAYERS`](crate::atmosphere::layers::STANDARD_LAYERS),
    /// which matches the producing model only while every [`LayerTable`] is
    /// [`LayerTable::standard`].
    pub fn layer(&self) -> &'static AtmosphericLayer {
        &crate::atmosphere::layers::STANDARD_LAYERS[self.layer_index]
    }

    pub fn layer_name(&self) -> &'static str {
        self.layer().name
    }

    /// Mach number for a true airspeed (m/s) at this altitude.
    pub fn mach_for(&self, true_airspeed: f64) -> f64 {
        true_airspeed / self.speed_of_sound
    }

    /// θ = T / T0
    pub fn temperature_ratio(&self) -> f64 {
        self.temperature_k / STANDARD_CONSTANTS.t0
    }

    /// δ = P / P0
    pub fn pressure_ratio(&self) -> f64 {
        self.pressure / STANDARD_CONSTANTS.p0
    }

    /// σ = ρ / ρ0
    pub fn density_ratio(&self) -> f64 {
        self.density / STANDARD_CONSTANTS.rho0
    }

    pub fn altitude_in(&self, unit: AltitudeUnit) -> f64 {
        unit.express_meters(self.altitude)
    }

    pub fn pressure_in(&self, unit: PressureUnit) -> f64 {
        unit.express_pascals(self.pressure)
    }

    pub fn temperature_in(&self, unit: TemperatureUnit) -> f64 {
        TemperatureUnit::Kelvin.convert(self.temperature_k, unit)
    }
}

/// Evaluator for the standard atmosphere.
///
/// Holds only shared references to the immutable constants and layer table,
/// so it is `Copy` and safe to use from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct AtmosphereModel {
    constants: &'static PhysicalConstants,
    table: LayerTable,
}

impl Default for AtmosphereModel {
    fn default() -> Self {
        Self::standard()
    }
}

impl AtmosphereModel {
    pub const fn standard() -> Self {
        Self {
            constants: &STANDARD_CONSTANTS,
            table: LayerTable::standard(),
        }
    }

    pub fn constants(&self) -> &'static PhysicalConstants {
        self.constants
    }

    pub fn table(&self) -> LayerTable {
        self.table
    }

    /// Compute the full property set at `altitude` meters.
    ///
    /// Total over all inputs: the altitude is clamped into `[0, 86000]` first.
    pub fn compute(&self, altitude: f64) -> AtmosphericResult {
        let h = clamp_altitude(altitude);
        if h != altitude {
            trace!(requested = altitude, clamped = h, "altitude saturated to modeled range");
        }

        let layer_index = self.table.resolve_index(h);
        let layer = &self.table.layers()[layer_index];
        let c = self.constants;

        let temperature_k = layer_temperature(layer, h);
        let pressure = layer_pressure(layer, h, temperature_k, c);
        let density = pressure / (c.r * temperature_k);
        let speed_of_sound = (c.gamma * c.r * temperature_k).sqrt();
        let dynamic_viscosity = sutherland_viscosity(temperature_k);
        let kinematic_viscosity = dynamic_viscosity / density;

        AtmosphericResult {
            altitude: h,
            temperature_k,
            temperature_c: TemperatureUnit::Kelvin.convert(temperature_k, TemperatureUnit::Celsius),
            pressure,
            density,
            speed_of_sound,
            dynamic_viscosity,
            kinematic_viscosity,
            layer_index,
        }
    }

    /// Compute at an altitude expressed in `unit`.
    pub fn compute_in(&self, altitude: f64, unit: AltitudeUnit) -> AtmosphericResult {
        self.compute(unit.to_meters(altitude))
    }

    /// Compute at an altitude whose unit is given by table identifier (`m`, `km`, `ft`).
    pub fn compute_str(&self, altitude: f64, unit: &str) -> Result<AtmosphericResult> {
        let unit: AltitudeUnit = unit.parse()?;
        Ok(self.compute_in(altitude, unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::layers::STANDARD_LAYERS;
    use crate::error::AtmosError;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_sea_level() {
        let r = AtmosphereModel::standard().compute(0.0);
        assert_eq!(r.temperature_k, 288.15);
        assert_eq!(r.pressure, 101_325.0);
        assert_abs_diff_eq!(r.temperature_c, 15.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.density, 1.225, epsilon = 1e-4);
        assert_abs_diff_eq!(r.speed_of_sound, 340.294, epsilon = 1e-3);
        // Sutherland reference temperature equals sea level, so μ = μ0
        assert_relative_eq!(r.dynamic_viscosity, sutherland::MU0, max_relative = 1e-12);
        assert_eq!(r.layer_name(), "Troposphere");
    }

    #[test]
    fn test_isothermal_branch_uses_exponential_form() {
        let model = AtmosphereModel::standard();
        let r = model.compute(15_000.0);
        let layer = &STANDARD_LAYERS[1];
        assert_eq!(r.temperature_k, 216.65);
        let expected = layer.base_pressure
            * (-STANDARD_CONSTANTS.g0 * 4_000.0 / (STANDARD_CONSTANTS.r * 216.65)).exp();
        assert_relative_eq!(r.pressure, expected, max_relative = 1e-14);
    }

    #[test]
    fn test_gradient_branch_uses_power_form() {
        let r = AtmosphereModel::standard().compute(5_000.0);
        assert_abs_diff_eq!(r.temperature_k, 255.65, epsilon = 1e-9);
        let exponent = -STANDARD_CONSTANTS.g0 / (-0.0065 * STANDARD_CONSTANTS.r);
        let expected = 101_325.0 * (255.65_f64 / 288.15).powf(exponent);
        assert_relative_eq!(r.pressure, expected, max_relative = 1e-12);
        assert_abs_diff_eq!(r.pressure, 54_019.9, epsilon = 1.0);
    }

    #[test]
    fn test_clamping_saturates_to_bounds() {
        let model = AtmosphereModel::standard();
        assert_eq!(model.compute(-500.0), model.compute(0.0));
        assert_eq!(model.compute(200_000.0), model.compute(86_000.0));
        assert_eq!(model.compute(f64::INFINITY).altitude, 86_000.0);
        assert_eq!(model.compute(f64::NEG_INFINITY).altitude, 0.0);
    }

    #[test]
    fn test_result_layer_matches_model_table() {
        let model = AtmosphereModel::standard();
        for h in [0.0, 11_000.0, 47_500.0, 85_999.0, 86_000.0] {
            let r = model.compute(h);
            assert!(std::ptr::eq(r.layer(), &model.table().layers()[r.layer_index]));
            assert!(std::ptr::eq(r.layer(), model.table().resolve(r.altitude)));
        }
    }

    #[test]
    fn test_kinematic_viscosity_is_derived() {
        let r = AtmosphereModel::standard().compute(30_000.0);
        assert_relative_eq!(r.kinematic_viscosity, r.dynamic_viscosity / r.density);
    }

    #[test]
    fn test_ratios_and_mach() {
        let r = AtmosphereModel::standard().compute(0.0);
        assert_relative_eq!(r.temperature_ratio(), 1.0);
        assert_relative_eq!(r.pressure_ratio(), 1.0);
        assert_relative_eq!(r.density_ratio(), 1.0, max_relative = 1e-7);
        assert_relative_eq!(r.mach_for(r.speed_of_sound), 1.0);
    }

    #[test]
    fn test_compute_in_other_units() {
        let model = AtmosphereModel::standard();
        assert_eq!(model.compute_in(11.0, AltitudeUnit::Kilometers), model.compute(11_000.0));
        let ft = model.compute_in(36_089.24, AltitudeUnit::Feet);
        assert_abs_diff_eq!(ft.altitude, 11_000.0, epsilon = 0.01);
        assert_abs_diff_eq!(ft.pressure_in(PressureUnit::Hectopascals), 226.32, epsilon = 0.01);
    }

    #[test]
    fn test_compute_str_rejects_unknown_unit() {
        let model = AtmosphereModel::standard();
        assert!(model.compute_str(1.0, "km").is_ok());
        assert!(matches!(
            model.compute_str(1.0, "nmi"),
            Err(AtmosError::UnknownUnit { kind: "altitude", .. })
        ));
    }
}
