use atmos_core::core_types::{convert_altitude, convert_pressure, convert_temperature};
use atmos_core::Result as CoreResult;
use std::os::raw::c_char;

use crate::error::{AtmosErrorCode, DefaultAtmosFfiError};
use crate::helpers::{handle_ffi_result_error, str_from_ptr, track_error};

/// Shared body for the string-keyed conversions.
///
/// # Safety
/// `from` and `to` must be null or valid null-terminated strings; `out_value` must be non-null and writable.
unsafe fn convert_with(
    convert: fn(f64, &str, &str) -> CoreResult<f64>,
    value: f64,
    from: *const c_char,
    to: *const c_char,
    out_value: *mut f64,
) -> AtmosErrorCode {
    if out_value.is_null() {
        return track_error(&DefaultAtmosFfiError::null_pointer("out_value"));
    }

    handle_ffi_result_error(|| {
        let from = unsafe { str_from_ptr(from, "from")? };
        let to = unsafe { str_from_ptr(to, "to")? };
        let converted = convert(value, from, to).map_err(DefaultAtmosFfiError::from)?;
        unsafe {
            *out_value = converted;
        }
        Ok::<(), DefaultAtmosFfiError>(())
    })
}

#[no_mangle]
/// Convert an altitude between `m`, `km` and `ft`.
///
/// Returns
/// - `AtmosErrorCode::Ok` (0) on success
/// - `AtmosErrorCode::NullPointer` if any pointer is null
/// - `AtmosErrorCode::InvalidString` if a unit is not valid UTF-8
/// - `AtmosErrorCode::UnknownUnit` if a unit is not in the altitude table
///
/// # Safety
///
/// - `from` and `to` must be valid null-terminated C strings.
/// - `out_value` must be a valid, non-null pointer to a `double` that this function will write to.
pub unsafe extern "C" fn atmos_convert_altitude(
    value: f64,
    from: *const c_char,
    to: *const c_char,
    out_value: *mut f64,
) -> AtmosErrorCode {
    unsafe { convert_with(convert_altitude, value, from, to, out_value) }
}

#[no_mangle]
/// Convert a pressure between `Pa`, `hPa`, `mbar`, `atm` and `psi`.
///
/// Error codes as for `atmos_convert_altitude`.
///
/// # Safety
///
/// - `from` and `to` must be valid null-terminated C strings.
/// - `out_value` must be a valid, non-null pointer to a `double` that this function will write to.
pub unsafe extern "C" fn atmos_convert_pressure(
    value: f64,
    from: *const c_char,
    to: *const c_char,
    out_value: *mut f64,
) -> AtmosErrorCode {
    unsafe { convert_with(convert_pressure, value, from, to, out_value) }
}

#[no_mangle]
/// Convert a temperature between `K`, `C` and `F`.
///
/// Error codes as for `atmos_convert_altitude`.
///
/// # Safety
///
/// - `from` and `to` must be valid null-terminated C strings.
/// - `out_value` must be a valid, non-null pointer to a `double` that this function will write to.
pub unsafe extern "C" fn atmos_convert_temperature(
    value: f64,
    from: *const c_char,
    to: *const c_char,
    out_value: *mut f64,
) -> AtmosErrorCode {
    unsafe { convert_with(convert_temperature, value, from, to, out_value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::atmos_get_last_error;
    use std::ffi::CStr;
    use std::ptr;

    #[test]
    fn test_convert_altitude_feet_to_meters() {
        let mut out = 0.0;
        let code = unsafe { atmos_convert_altitude(1_000.0, c"ft".as_ptr(), c"m".as_ptr(), &mut out) };
        assert_eq!(code, AtmosErrorCode::Ok);
        assert!((out - 304.8).abs() < 1e-9);
    }

    #[test]
    fn test_convert_pressure_and_temperature() {
        let mut out = 0.0;
        let code = unsafe { atmos_convert_pressure(1.0, c"atm".as_ptr(), c"hPa".as_ptr(), &mut out) };
        assert_eq!(code, AtmosErrorCode::Ok);
        assert!((out - 1_013.25).abs() < 1e-9);

        let code = unsafe { atmos_convert_temperature(288.15, c"K".as_ptr(), c"C".as_ptr(), &mut out) };
        assert_eq!(code, AtmosErrorCode::Ok);
        assert!((out - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_unit_sets_last_error() {
        let mut out = 0.0;
        let code = unsafe { atmos_convert_altitude(1.0, c"m".as_ptr(), c"yd".as_ptr(), &mut out) };
        assert_eq!(code, AtmosErrorCode::UnknownUnit);
        let msg = unsafe { CStr::from_ptr(atmos_get_last_error()) };
        assert_eq!(msg.to_str().unwrap(), "unknown altitude unit 'yd'");
    }

    #[test]
    fn test_null_arguments() {
        let mut out = 0.0;
        let code = unsafe { atmos_convert_pressure(1.0, ptr::null(), c"Pa".as_ptr(), &mut out) };
        assert_eq!(code, AtmosErrorCode::NullPointer);
        let code = unsafe { atmos_convert_pressure(1.0, c"Pa".as_ptr(), c"Pa".as_ptr(), ptr::null_mut()) };
        assert_eq!(code, AtmosErrorCode::NullPointer);
    }
}
