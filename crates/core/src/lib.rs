//! Standard Atmosphere Core Library
//!
//! Computes atmospheric state as a function of geopotential altitude using the
//! piecewise ICAO Standard Atmosphere from sea level to 86 km: temperature,
//! pressure, density, speed of sound and viscosity.
//!
//! ## Layout
//!
//! - [`atmosphere`]: layer table, single-altitude model and profile sampling
//! - [`core_types`]: physical constants and unit conversion tables
//! - [`export`]: CSV and JSON text for computed samples
//!
//! ## Example
//! ```
//! use atmos_core::{AtmosphereModel, ProfileGenerator};
//!
//! let model = AtmosphereModel::standard();
//! let sea_level = model.compute(0.0);
//! assert!((sea_level.density - 1.225).abs() < 1e-4);
//!
//! let profile = ProfileGenerator::new(model).generate(0.0, 10_000.0, 1_000.0).unwrap();
//! assert_eq!(profile.len(), 11);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Model and sampling
pub mod atmosphere;

// Text exports
pub mod export;

// Re-export core types
pub use core_types::{AltitudeUnit, PhysicalConstants, PressureUnit, TemperatureUnit, STANDARD_CONSTANTS};
pub use error::{AtmosError, Result};

// Re-export model types
pub use atmosphere::{
    AtmosphereModel, AtmosphericLayer, AtmosphericProfile, AtmosphericResult, LayerTable,
    ProfileConfig, ProfileGenerator,
};
