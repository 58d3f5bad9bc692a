//! Standard atmosphere layer table and altitude-to-layer resolution
//!
//! Eight layers from the troposphere to the mesopause. Base pressures are
//! precomputed by evaluating each layer's closed form at the next layer's base,
//! so temperature and pressure are continuous across the internal boundaries
//! up to 71 km. The mesopause entry carries the tabulated 86 km values.

use serde::Serialize;
use std::ffi::CStr;

/// One atmospheric layer and its base conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtmosphericLayer {
    pub name: &'static str,
    /// `name` with a trailing NUL, for C callers
    #[serde(skip)]
    pub c_name: &'static CStr,
    /// Geopotential altitude of the layer base (m)
    pub base_altitude: f64,
    /// Temperature at the layer base (K)
    pub base_temperature: f64,
    /// Temperature gradient (K/m). Exactly `0.0` for isothermal layers.
    pub lapse_rate: f64,
    /// Pressure at the layer base (Pa)
    pub base_pressure: f64,
}

impl AtmosphericLayer {
    /// Isothermal layers are stored with a literal zero lapse rate.
    #[inline]
    pub fn is_isothermal(&self) -> bool {
        self.lapse_rate == 0.0
    }
}

/// Number of layers in the standard table.
pub const LAYER_COUNT: usize = 8;

/// Lowest modeled altitude (m)
pub const MIN_ALTITUDE: f64 = 0.0;

/// Highest modeled altitude (m)
pub const MAX_ALTITUDE: f64 = 86_000.0;

const fn nul_terminated(name: &'static str) -> &'static CStr {
    match CStr::from_bytes_with_nul(name.as_bytes()) {
        Ok(c_name) => c_name,
        Err(_) => panic!("layer name must not contain NUL"),
    }
}

/// Builds a layer whose C name is derived from the same literal as `name`.
macro_rules! layer {
    (
        name: $name:literal,
        base_altitude: $base_altitude:expr,
        base_temperature: $base_temperature:expr,
        lapse_rate: $lapse_rate:expr,
        base_pressure: $base_pressure:expr $(,)?
    ) => {
        AtmosphericLayer {
            name: $name,
            c_name: nul_terminated(concat!($name, "\0")),
            base_altitude: $base_altitude,
            base_temperature: $base_temperature,
            lapse_rate: $lapse_rate,
            base_pressure: $base_pressure,
        }
    };
}

/// Ordered by strictly increasing base altitude, starting at sea level.
pub static STANDARD_LAYERS: [AtmosphericLayer; LAYER_COUNT] = [
    layer! {
        name: "Troposphere",
        base_altitude: 0.0,
        base_temperature: 288.15,
        lapse_rate: -0.0065,
        base_pressure: 101_325.0,
    },
    layer! {
        name: "Tropopause",
        base_altitude: 11_000.0,
        base_temperature: 216.65,
        lapse_rate: 0.0,
        base_pressure: 22_632.040_095_007_8,
    },
    layer! {
        name: "Stratosphere",
        base_altitude: 20_000.0,
        base_temperature: 216.65,
        lapse_rate: 0.001,
        base_pressure: 5_474.877_424_281_05,
    },
    layer! {
        name: "Upper Stratosphere",
        base_altitude: 32_000.0,
        base_temperature: 228.65,
        lapse_rate: 0.0028,
        base_pressure: 868.015_776_620_215,
    },
    layer! {
        name: "Stratopause",
        base_altitude: 47_000.0,
        base_temperature: 270.65,
        lapse_rate: 0.0,
        base_pressure: 110.905_773_367_310,
    },
    layer! {
        name: "Mesosphere",
        base_altitude: 51_000.0,
        base_temperature: 270.65,
        lapse_rate: -0.0028,
        base_pressure: 66.938_528_121_180,
    },
    layer! {
        name: "Upper Mesosphere",
        base_altitude: 71_000.0,
        base_temperature: 214.65,
        lapse_rate: -0.002,
        base_pressure: 3.956_392_160_396_62,
    },
    layer! {
        name: "Mesopause",
        base_altitude: 86_000.0,
        base_temperature: 186.87,
        lapse_rate: 0.0,
        base_pressure: 0.3734,
    },
];

/// Read access to an ordered layer table.
#[derive(Debug, Clone, Copy)]
pub struct LayerTable {
    layers: &'static [AtmosphericLayer],
}

impl Default for LayerTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl LayerTable {
    pub const fn standard() -> Self {
        Self {
            layers: &STANDARD_LAYERS,
        }
    }

    #[inline]
    pub fn layers(&self) -> &'static [AtmosphericLayer] {
        self.layers
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&'static AtmosphericLayer> {
        self.layers.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Index of the layer with the greatest base altitude `<= altitude`.
    ///
    /// Altitudes below the first base resolve to the first layer. NaN also
    /// resolves to the first layer since it compares false against every base.
    pub fn resolve_index(&self, altitude: f64) -> usize {
        // Number of layers whose base lies at or below the altitude
        let above = self
            .layers
            .partition_point(|layer| layer.base_altitude <= altitude);
        above.saturating_sub(1)
    }

    /// The layer containing `altitude`.
    pub fn resolve(&self, altitude: f64) -> &'static AtmosphericLayer {
        &self.layers[self.resolve_index(altitude)]
    }
}
