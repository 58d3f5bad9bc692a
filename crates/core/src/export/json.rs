//! Structured document export
//!
//! ```json
//! {
//!   "metadata": { "model": "...", "generated_at": "...", "sample_count": 2, "constants": { ... } },
//!   "data": [ { "altitude_m": 0.0, "temperature_K": 288.15, ... } ]
//! }
//! ```

use crate::atmosphere::model::AtmosphericResult;
use crate::core_types::constants::{PhysicalConstants, STANDARD_CONSTANTS};
use crate::export::format::{round_scientific, round_value};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Model identifier written into every document.
pub const MODEL_IDENTIFIER: &str = "ICAO Standard Atmosphere (1993), 0-86 km geopotential";

#[derive(Debug, Serialize)]
struct ExportMetadata {
    model: &'static str,
    generated_at: String,
    sample_count: usize,
    constants: &'static PhysicalConstants,
}

/// One exported sample, values rounded as in the CSV table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRecord {
    pub altitude_m: f64,
    #[serde(rename = "temperature_K")]
    pub temperature_k: f64,
    #[serde(rename = "temperature_C")]
    pub temperature_c: f64,
    #[serde(rename = "pressure_Pa")]
    pub pressure_pa: f64,
    pub density_kgm3: f64,
    pub speed_of_sound_ms: f64,
    #[serde(rename = "dynamic_viscosity_Pas")]
    pub dynamic_viscosity_pas: f64,
    pub kinematic_viscosity_m2s: f64,
    pub layer: &'static str,
}

impl From<&AtmosphericResult> for ExportRecord {
    fn from(result: &AtmosphericResult) -> Self {
        Self {
            altitude_m: round_value(result.altitude),
            temperature_k: round_value(result.temperature_k),
            temperature_c: round_value(result.temperature_c),
            pressure_pa: round_value(result.pressure),
            density_kgm3: round_scientific(result.density),
            speed_of_sound_ms: round_value(result.speed_of_sound),
            dynamic_viscosity_pas: round_scientific(result.dynamic_viscosity),
            kinematic_viscosity_m2s: round_scientific(result.kinematic_viscosity),
            layer: result.layer_name(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ExportDocument {
    metadata: ExportMetadata,
    data: Vec<ExportRecord>,
}

/// Pretty-printed document stamped with the current UTC time.
pub fn to_json(results: &[AtmosphericResult]) -> serde_json::Result<String> {
    to_json_at(results, Utc::now())
}

/// Pretty-printed document stamped with `generated_at`.
pub fn to_json_at(
    results: &[AtmosphericResult],
    generated_at: DateTime<Utc>,
) -> serde_json::Result<String> {
    let document = ExportDocument {
        metadata: ExportMetadata {
            model: MODEL_IDENTIFIER,
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            sample_count: results.len(),
            constants: &STANDARD_CONSTANTS,
        },
        data: results.iter().map(ExportRecord::from).collect(),
    };
    serde_json::to_string_pretty(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::AtmosphereModel;
    use chrono::TimeZone;
    use serde_json::Value;

    #[test]
    fn test_record_field_names() {
        let record = ExportRecord::from(&AtmosphereModel::standard().compute(11_000.0));
        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "altitude_m",
            "temperature_K",
            "temperature_C",
            "pressure_Pa",
            "density_kgm3",
            "speed_of_sound_ms",
            "dynamic_viscosity_Pas",
            "kinematic_viscosity_m2s",
            "layer",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj["layer"], "Tropopause");
        assert_eq!(obj["temperature_K"], 216.65);
        assert_eq!(obj["pressure_Pa"], 22_632.0401);
    }

    #[test]
    fn test_document_metadata() {
        let stamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let model = AtmosphereModel::standard();
        let results = [model.compute(0.0), model.compute(1_000.0)];
        let doc: Value = serde_json::from_str(&to_json_at(&results, stamp).unwrap()).unwrap();

        assert_eq!(doc["metadata"]["model"], MODEL_IDENTIFIER);
        assert_eq!(doc["metadata"]["generated_at"], "2024-03-01T12:00:00Z");
        assert_eq!(doc["metadata"]["sample_count"], 2);
        assert_eq!(doc["metadata"]["constants"]["g0"], 9.80665);
        assert_eq!(doc["metadata"]["constants"]["R"], 287.05287);
        assert_eq!(doc["metadata"]["constants"]["gamma"], 1.4);
        assert_eq!(doc["data"].as_array().unwrap().len(), 2);
        assert_eq!(doc["data"][1]["altitude_m"], 1_000.0);
    }
}
