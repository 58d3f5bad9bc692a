//! Physical unit types and conversion tables
//!
//! Two layers live here:
//! - Temperature newtypes ([`Kelvin`], [`Celsius`]) with total ordering, for
//!   display in front ends.
//! - Closed conversion tables for altitude, pressure and temperature. Each
//!   linear unit is defined by a scale factor relative to its canonical unit
//!   (meters, Pascals), so `convert(v, from, to) = v * factor(from) / factor(to)`.
//!
//! # Usage
//! ```
//! use atmos_core::core_types::units::{convert_altitude, AltitudeUnit, Celsius, Kelvin};
//!
//! let temp = Celsius::new(15.0);
//! let kelvin: Kelvin = temp.into();
//! assert!((*kelvin - 288.15).abs() < 1e-9);
//!
//! let ft = AltitudeUnit::Meters.convert(1000.0, AltitudeUnit::Feet);
//! assert!((ft - 3280.839895).abs() < 1e-6);
//!
//! // String-keyed boundary rejects identifiers outside the table
//! assert!(convert_altitude(1.0, "m", "furlong").is_err());
//! ```

use crate::error::{AtmosError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// TEMPERATURE TYPES
// ============================================================================

/// Celsius to Kelvin conversion offset (0°C = 273.15 K)
const CELSIUS_KELVIN_OFFSET: f64 = 273.15;

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(transparent)]
pub struct Celsius(f64);

impl Eq for Celsius {}

impl PartialOrd for Celsius {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Celsius {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Celsius {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Celsius {
    /// Create a new Celsius temperature. Asserts value >= absolute zero (-273.15°C).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(
            value >= -CELSIUS_KELVIN_OFFSET,
            "Celsius::new: value is below absolute zero (-273.15°C)"
        );
        Celsius(value)
    }

    /// Convert to Kelvin
    #[inline]
    #[must_use]
    pub fn to_kelvin(self) -> Kelvin {
        Kelvin(self.0 + CELSIUS_KELVIN_OFFSET)
    }
}

impl From<Celsius> for Kelvin {
    fn from(c: Celsius) -> Kelvin {
        c.to_kelvin()
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°C", self.0)
    }
}

/// Absolute temperature in Kelvin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(transparent)]
pub struct Kelvin(f64);

impl Eq for Kelvin {}

impl PartialOrd for Kelvin {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Kelvin {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Kelvin {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Kelvin {
    /// Create a new Kelvin temperature. Asserts value >= absolute zero (0 K).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f64) -> Self {
        assert!(value >= 0.0, "Kelvin::new: value is below absolute zero (0 K)");
        Kelvin(value)
    }

    /// Convert to Celsius
    #[inline]
    #[must_use]
    pub fn to_celsius(self) -> Celsius {
        Celsius::new(self.0 - CELSIUS_KELVIN_OFFSET)
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Celsius {
        k.to_celsius()
    }
}

impl fmt::Display for Kelvin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} K", self.0)
    }
}

// ============================================================================
// CONVERSION TABLES
// ============================================================================

/// Altitude units, canonical unit is meters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AltitudeUnit {
    #[default]
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "ft")]
    Feet,
}

impl AltitudeUnit {
    /// Every unit in the table, in display order.
    pub const ALL: [AltitudeUnit; 3] = [Self::Meters, Self::Kilometers, Self::Feet];

    /// Meters per one of this unit.
    #[inline]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Kilometers => 1000.0,
            Self::Feet => 0.3048,
        }
    }

    /// Table key used by the string-keyed conversion boundary.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Kilometers => "km",
            Self::Feet => "ft",
        }
    }

    /// Convert `value` expressed in `self` into `to`.
    #[inline]
    pub fn convert(self, value: f64, to: AltitudeUnit) -> f64 {
        value * self.factor() / to.factor()
    }

    #[inline]
    pub fn to_meters(self, value: f64) -> f64 {
        self.convert(value, Self::Meters)
    }

    /// Express a value in meters in this unit.
    #[inline]
    pub fn express_meters(self, meters: f64) -> f64 {
        Self::Meters.convert(meters, self)
    }
}

impl FromStr for AltitudeUnit {
    type Err = AtmosError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.symbol() == s)
            .ok_or_else(|| AtmosError::unknown_unit("altitude", s))
    }
}

impl fmt::Display for AltitudeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Pressure units, canonical unit is Pascals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PressureUnit {
    #[default]
    #[serde(rename = "Pa")]
    Pascals,
    #[serde(rename = "hPa")]
    Hectopascals,
    #[serde(rename = "mbar")]
    Millibars,
    #[serde(rename = "atm")]
    Atmospheres,
    #[serde(rename = "psi")]
    Psi,
}

impl PressureUnit {
    pub const ALL: [PressureUnit; 5] = [
        Self::Pascals,
        Self::Hectopascals,
        Self::Millibars,
        Self::Atmospheres,
        Self::Psi,
    ];

    /// Pascals per one of this unit.
    #[inline]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Pascals => 1.0,
            Self::Hectopascals | Self::Millibars => 100.0,
            Self::Atmospheres => 101_325.0,
            Self::Psi => 6_894.757_293_168,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Pascals => "Pa",
            Self::Hectopascals => "hPa",
            Self::Millibars => "mbar",
            Self::Atmospheres => "atm",
            Self::Psi => "psi",
        }
    }

    #[inline]
    pub fn convert(self, value: f64, to: PressureUnit) -> f64 {
        value * self.factor() / to.factor()
    }

    /// Express a value in Pascals in this unit.
    #[inline]
    pub fn express_pascals(self, pascals: f64) -> f64 {
        Self::Pascals.convert(pascals, self)
    }
}

impl FromStr for PressureUnit {
    type Err = AtmosError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.symbol() == s)
            .ok_or_else(|| AtmosError::unknown_unit("pressure", s))
    }
}

impl fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Temperature units. Affine rather than linear, so conversions pass through Kelvin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "K")]
    Kelvin,
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 3] = [Self::Kelvin, Self::Celsius, Self::Fahrenheit];

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Kelvin => "K",
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }

    fn kelvin_of(self, value: f64) -> f64 {
        match self {
            Self::Kelvin => value,
            Self::Celsius => value + CELSIUS_KELVIN_OFFSET,
            Self::Fahrenheit => (value - 32.0) * 5.0 / 9.0 + CELSIUS_KELVIN_OFFSET,
        }
    }

    fn express_kelvin(self, kelvin: f64) -> f64 {
        match self {
            Self::Kelvin => kelvin,
            Self::Celsius => kelvin - CELSIUS_KELVIN_OFFSET,
            Self::Fahrenheit => (kelvin - CELSIUS_KELVIN_OFFSET) * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn convert(self, value: f64, to: TemperatureUnit) -> f64 {
        if self == to {
            return value;
        }
        to.express_kelvin(self.kelvin_of(value))
    }
}

impl FromStr for TemperatureUnit {
    type Err = AtmosError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.symbol() == s)
            .ok_or_else(|| AtmosError::unknown_unit("temperature", s))
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Convert an altitude between two unit identifiers from the altitude table.
pub fn convert_altitude(value: f64, from: &str, to: &str) -> Result<f64> {
    let from: AltitudeUnit = from.parse()?;
    let to: AltitudeUnit = to.parse()?;
    Ok(from.convert(value, to))
}

/// Convert a pressure between two unit identifiers from the pressure table.
pub fn convert_pressure(value: f64, from: &str, to: &str) -> Result<f64> {
    let from: PressureUnit = from.parse()?;
    let to: PressureUnit = to.parse()?;
    Ok(from.convert(value, to))
}

/// Convert a temperature between two unit identifiers from the temperature table.
pub fn convert_temperature(value: f64, from: &str, to: &str) -> Result<f64> {
    let from: TemperatureUnit = from.parse()?;
    let to: TemperatureUnit = to.parse()?;
    Ok(from.convert(value, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_kelvin_celsius_round_trip() {
        let k = Kelvin::new(216.65);
        let c = k.to_celsius();
        assert_abs_diff_eq!(*c, -56.5, epsilon = 1e-12);
        assert_abs_diff_eq!(*c.to_kelvin(), 216.65, epsilon = 1e-12);
        assert_eq!(Celsius::from(k), c);
        assert_eq!(Kelvin::from(c), c.to_kelvin());
        assert_eq!(k.to_string(), "216.65 K");
        assert_eq!(c.to_string(), "-56.50°C");
    }

    #[test]
    #[should_panic(expected = "below absolute zero")]
    fn test_kelvin_rejects_negative() {
        let _ = Kelvin::new(-1.0);
    }

    #[test]
    fn test_temperature_ordering_is_total() {
        let mut temps = [Kelvin::new(270.65), Kelvin::new(186.87), Kelvin::new(288.15)];
        temps.sort();
        assert_eq!(temps[0], Kelvin::new(186.87));
        assert_eq!(temps[2], Kelvin::new(288.15));
    }

    #[test]
    fn test_altitude_factors() {
        assert_relative_eq!(AltitudeUnit::Feet.to_meters(1.0), 0.3048);
        assert_relative_eq!(AltitudeUnit::Kilometers.to_meters(11.0), 11_000.0);
        assert_relative_eq!(AltitudeUnit::Feet.express_meters(0.3048), 1.0);
        assert_relative_eq!(AltitudeUnit::Kilometers.convert(1.0, AltitudeUnit::Feet), 3280.839_895_013_123, max_relative = 1e-12);
    }

    #[test]
    fn test_pressure_factors() {
        assert_relative_eq!(PressureUnit::Atmospheres.convert(1.0, PressureUnit::Hectopascals), 1013.25);
        assert_relative_eq!(PressureUnit::Millibars.convert(1.0, PressureUnit::Hectopascals), 1.0);
        assert_relative_eq!(PressureUnit::Pascals.convert(101_325.0, PressureUnit::Psi), 14.695_948_8, max_relative = 1e-8);
    }

    #[test]
    fn test_temperature_conversions() {
        assert_abs_diff_eq!(TemperatureUnit::Kelvin.convert(288.15, TemperatureUnit::Celsius), 15.0, epsilon = 1e-9);
        assert_abs_diff_eq!(TemperatureUnit::Celsius.convert(15.0, TemperatureUnit::Fahrenheit), 59.0, epsilon = 1e-9);
        assert_abs_diff_eq!(TemperatureUnit::Fahrenheit.convert(-40.0, TemperatureUnit::Celsius), -40.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parse_accepts_table_keys_only() {
        for unit in AltitudeUnit::ALL {
            assert_eq!(unit.symbol().parse::<AltitudeUnit>().unwrap(), unit);
        }
        for unit in PressureUnit::ALL {
            assert_eq!(unit.symbol().parse::<PressureUnit>().unwrap(), unit);
        }
        // Keys are case-sensitive
        assert!("M".parse::<AltitudeUnit>().is_err());
        assert!("pa".parse::<PressureUnit>().is_err());
    }

    #[test]
    fn test_string_conversion_reports_unknown_unit() {
        let err = convert_pressure(1.0, "Pa", "torr").unwrap_err();
        assert_eq!(
            err,
            AtmosError::UnknownUnit {
                kind: "pressure",
                unit: "torr".to_string()
            }
        );
        assert!(convert_temperature(1.0, "R", "K").is_err());
        assert_relative_eq!(convert_altitude(1.0, "km", "m").unwrap(), 1000.0);
    }
}
