//! Process-wide physical constants for the standard atmosphere
//!
//! Values follow the ICAO Standard Atmosphere (1993) / U.S. Standard
//! Atmosphere (1976) below 86 km.

use serde::Serialize;

/// Immutable constant set shared by every computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhysicalConstants {
    /// Standard gravity (m/s²)
    pub g0: f64,
    /// Specific gas constant for dry air (J/(kg·K))
    #[serde(rename = "R")]
    pub r: f64,
    /// Ratio of specific heats (dimensionless)
    pub gamma: f64,
    /// Sea-level reference temperature (K)
    #[serde(rename = "T0")]
    pub t0: f64,
    /// Sea-level reference pressure (Pa)
    #[serde(rename = "P0")]
    pub p0: f64,
    /// Sea-level reference density (kg/m³)
    pub rho0: f64,
}

/// The standard constant set.
pub static STANDARD_CONSTANTS: PhysicalConstants = PhysicalConstants {
    g0: 9.80665,
    r: 287.05287,
    gamma: 1.4,
    t0: 288.15,
    p0: 101_325.0,
    rho0: 1.225,
};

/// Sutherland's law reference values for air.
///
/// These belong to the viscosity fit and are kept apart from the sea-level
/// constants even where the numbers coincide.
pub mod sutherland {
    /// Reference dynamic viscosity (Pa·s)
    pub const MU0: f64 = 1.7894e-5;
    /// Reference temperature (K)
    pub const T0: f64 = 288.15;
    /// Sutherland constant for air (K)
    pub const S: f64 = 110.4;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sea_level_density_consistent_with_gas_law() {
        let c = STANDARD_CONSTANTS;
        assert_relative_eq!(c.p0 / (c.r * c.t0), c.rho0, max_relative = 1e-7);
    }
}
