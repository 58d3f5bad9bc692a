//! Core types: physical constants and unit handling

pub mod constants;
pub mod units;

pub use constants::{sutherland, PhysicalConstants, STANDARD_CONSTANTS};
pub use units::{
    convert_altitude, convert_pressure, convert_temperature, AltitudeUnit, Celsius, Kelvin,
    PressureUnit, TemperatureUnit,
};
