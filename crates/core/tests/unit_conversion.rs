//! Integration tests for the string-keyed unit conversion boundary
use approx::assert_relative_eq;
use atmos_core::core_types::{convert_altitude, convert_pressure, convert_temperature};
use atmos_core::{AltitudeUnit, AtmosError, AtmosphereModel, PressureUnit};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_altitude_round_trip_meters_feet() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1_000 {
        let x: f64 = rng.random_range(-1.0e6..1.0e6);
        let ft = convert_altitude(x, "m", "ft").unwrap();
        let back = convert_altitude(ft, "ft", "m").unwrap();
        assert_relative_eq!(back, x, max_relative = 1e-12, epsilon = 1e-9);
    }
}

#[test]
fn test_every_pressure_pair_round_trips() {
    for from in PressureUnit::ALL {
        for to in PressureUnit::ALL {
            let there = convert_pressure(1_234.5, from.symbol(), to.symbol()).unwrap();
            let back = convert_pressure(there, to.symbol(), from.symbol()).unwrap();
            assert_relative_eq!(back, 1_234.5, max_relative = 1e-12);
        }
    }
}

#[test]
fn test_sea_level_pressure_in_display_units() {
    let r = AtmosphereModel::standard().compute(0.0);
    assert_relative_eq!(r.pressure_in(PressureUnit::Atmospheres), 1.0);
    assert_relative_eq!(r.pressure_in(PressureUnit::Millibars), 1_013.25);
    assert_relative_eq!(r.pressure_in(PressureUnit::Psi), 14.695_95, max_relative = 1e-6);
    assert_relative_eq!(r.altitude_in(AltitudeUnit::Feet), 0.0);
}

#[test]
fn test_unknown_units_fail_fast() {
    assert_eq!(
        convert_altitude(1.0, "m", "yd"),
        Err(AtmosError::UnknownUnit {
            kind: "altitude",
            unit: "yd".to_string()
        })
    );
    assert!(convert_pressure(1.0, "inHg", "Pa").is_err());
    assert!(convert_temperature(1.0, "K", "kelvin").is_err());
    assert_relative_eq!(convert_temperature(0.0, "C", "K").unwrap(), 273.15);
}
