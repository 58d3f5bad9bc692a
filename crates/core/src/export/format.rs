//! Numeric formatting shared by the text exports
//!
//! Fixed-point fields print with four decimals. Magnitudes below 0.001 or at
//! or above 1e6 switch to scientific notation with six fractional digits and
//! an explicitly signed exponent (`1.789400e-5`, `1.013250e+6`).

/// Decimal places for fixed-point fields.
pub const FIXED_DECIMALS: usize = 4;

/// Fractional digits of the scientific mantissa.
pub const SCIENTIFIC_DIGITS: usize = 6;

const SCIENTIFIC_BELOW: f64 = 1e-3;
const SCIENTIFIC_FROM: f64 = 1e6;

/// Scientific notation, e.g. `1.225000e+0`.
pub fn format_scientific(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let raw = format!("{:.*e}", SCIENTIFIC_DIGITS, value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => raw,
    }
}

/// Four decimals, or scientific outside `[0.001, 1e6)` magnitude. Zero stays fixed.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    if value != 0.0 && !(SCIENTIFIC_BELOW..SCIENTIFIC_FROM).contains(&magnitude) {
        format_scientific(value)
    } else {
        format!("{:.*}", FIXED_DECIMALS, value)
    }
}

/// Round `value` the way [`format_value`] prints it.
pub(crate) fn round_value(value: f64) -> f64 {
    format_value(value).parse().unwrap_or(value)
}

/// Round `value` the way [`format_scientific`] prints it.
pub(crate) fn round_scientific(value: f64) -> f64 {
    format_scientific(value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_range() {
        assert_eq!(format_value(288.15), "288.1500");
        assert_eq!(format_value(-56.5), "-56.5000");
        assert_eq!(format_value(101_325.0), "101325.0000");
        assert_eq!(format_value(0.001), "0.0010");
        assert_eq!(format_value(0.0), "0.0000");
    }

    #[test]
    fn test_switches_to_scientific() {
        assert_eq!(format_value(0.000_5), "5.000000e-4");
        assert_eq!(format_value(1_000_000.0), "1.000000e+6");
        assert_eq!(format_value(-2.5e-7), "-2.500000e-7");
    }

    #[test]
    fn test_scientific_sign_and_digits() {
        assert_eq!(format_scientific(1.225), "1.225000e+0");
        assert_eq!(format_scientific(1.7894e-5), "1.789400e-5");
        assert_eq!(format_scientific(12_345.678), "1.234568e+4");
        assert_eq!(format_scientific(f64::NAN), "NaN");
    }

    #[test]
    fn test_rounding_helpers_parse_back() {
        assert_eq!(round_value(288.150_049), 288.15);
        assert_eq!(round_scientific(1.789_412_3e-5), 1.789_412e-5);
    }
}
