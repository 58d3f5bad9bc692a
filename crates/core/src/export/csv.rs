//! Delimited text table export

use crate::atmosphere::model::AtmosphericResult;
use crate::export::format::{format_scientific, format_value};

/// Fixed header row, one column per exported field.
pub const CSV_HEADER: [&str; 9] = [
    "Altitude (m)",
    "Temperature (K)",
    "Temperature (°C)",
    "Pressure (Pa)",
    "Density (kg/m³)",
    "Speed of Sound (m/s)",
    "Dynamic Viscosity (Pa·s)",
    "Kinematic Viscosity (m²/s)",
    "Layer",
];

fn escape_field(field: &str) -> String {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\n')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// One comma-separated row for `result`, without a line terminator.
pub fn csv_row(result: &AtmosphericResult) -> String {
    [
        format_value(result.altitude),
        format_value(result.temperature_k),
        format_value(result.temperature_c),
        format_value(result.pressure),
        format_scientific(result.density),
        format_value(result.speed_of_sound),
        format_scientific(result.dynamic_viscosity),
        format_scientific(result.kinematic_viscosity),
        escape_field(result.layer_name()),
    ]
    .join(",")
}

/// Header plus one row per sample, `\n` terminated.
pub fn to_csv(results: &[AtmosphericResult]) -> String {
    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(CSV_HEADER.join(","));
    lines.extend(results.iter().map(csv_row));
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::AtmosphereModel;

    #[test]
    fn test_sea_level_row() {
        let row = csv_row(&AtmosphereModel::standard().compute(0.0));
        assert_eq!(
            row,
            "0.0000,288.1500,15.0000,101325.0000,1.225000e+0,340.2940,1.789400e-5,1.460735e-5,Troposphere"
        );
    }

    #[test]
    fn test_empty_input_has_header_only() {
        let csv = to_csv(&[]);
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.starts_with("Altitude (m),Temperature (K)"));
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("Mesopause"), "Mesopause");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
