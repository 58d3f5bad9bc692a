//! Profile request configuration
//!
//! Deserializable so front ends can load a request from a file instead of flags.

use crate::atmosphere::profile::{AtmosphericProfile, ProfileGenerator};
use crate::core_types::units::AltitudeUnit;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Altitude range and step for a profile, expressed in `altitude_unit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub start: f64,
    pub end: f64,
    pub step: f64,
    pub altitude_unit: AltitudeUnit,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 86_000.0,
            step: 1_000.0,
            altitude_unit: AltitudeUnit::Meters,
        }
    }
}

impl ProfileConfig {
    /// Bounds and step converted to meters.
    pub fn in_meters(&self) -> (f64, f64, f64) {
        let unit = self.altitude_unit;
        (unit.to_meters(self.start), unit.to_meters(self.end), unit.to_meters(self.step))
    }

    pub fn generate(&self) -> Result<AtmosphericProfile> {
        self.generate_with(&ProfileGenerator::default(), false)
    }

    /// Run the request on `generator`, optionally across the rayon pool.
    pub fn generate_with(&self, generator: &ProfileGenerator, parallel: bool) -> Result<AtmosphericProfile> {
        let (start, end, step) = self.in_meters();
        if parallel {
            generator.generate_par(start, end, step)
        } else {
            generator.generate(start, end, step)
        }
    }
}
