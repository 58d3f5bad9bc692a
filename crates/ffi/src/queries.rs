use atmos_core::atmosphere::{sample_count, LAYER_COUNT, STANDARD_LAYERS};
use atmos_core::{AtmosphereModel, AtmosphericResult, ProfileGenerator};
use std::os::raw::c_char;
use std::ptr;

use crate::error::{AtmosErrorCode, DefaultAtmosFfiError};
use crate::helpers::{clear_last_error, handle_ffi_result_error, track_error};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
/// FFI-friendly atmospheric state at one altitude.
/// Keep this layout stable for C/C++/C# consumers.
pub struct AtmosResult {
    /// Clamped geopotential altitude (m).
    pub altitude: f64,

    /// Temperature (K).
    pub temperature_k: f64,

    /// Temperature (°C).
    pub temperature_c: f64,

    /// Static pressure (Pa).
    pub pressure: f64,

    /// Density (kg/m³).
    pub density: f64,

    /// Speed of sound (m/s).
    pub speed_of_sound: f64,

    /// Dynamic viscosity (Pa·s).
    pub dynamic_viscosity: f64,

    /// Kinematic viscosity (m²/s).
    pub kinematic_viscosity: f64,

    /// Layer index, resolve the name with `atmos_layer_name`.
    pub layer_index: usize,
}

impl From<&AtmosphericResult> for AtmosResult {
    fn from(r: &AtmosphericResult) -> Self {
        Self {
            altitude: r.altitude,
            temperature_k: r.temperature_k,
            temperature_c: r.temperature_c,
            pressure: r.pressure,
            density: r.density,
            speed_of_sound: r.speed_of_sound,
            dynamic_viscosity: r.dynamic_viscosity,
            kinematic_viscosity: r.kinematic_viscosity,
            layer_index: r.layer_index,
        }
    }
}

#[no_mangle]
/// Compute the atmospheric state at `altitude_m`.
///
/// Altitudes outside 0-86000 m are clamped, never rejected.
///
/// Returns
/// - `AtmosErrorCode::Ok` (0) on success
/// - `AtmosErrorCode::NullPointer` if `out_result` is null
///
/// # Safety
///
/// - `out_result` must be a valid, non-null pointer to an `AtmosResult` that this function will write to.
pub unsafe extern "C" fn atmos_compute(altitude_m: f64, out_result: *mut AtmosResult) -> AtmosErrorCode {
    if out_result.is_null() {
        return track_error(&DefaultAtmosFfiError::null_pointer("out_result"));
    }

    let result = AtmosphereModel::standard().compute(altitude_m);
    unsafe {
        *out_result = AtmosResult::from(&result);
    }
    clear_last_error();
    AtmosErrorCode::Ok
}

#[no_mangle]
/// Number of layers in the standard table.
pub extern "C" fn atmos_layer_count() -> usize {
    LAYER_COUNT
}

#[no_mangle]
/// Static, null-terminated name of layer `index`, or null if out of range.
///
/// **DO NOT FREE THIS POINTER** - it lives for the duration of the program.
pub extern "C" fn atmos_layer_name(index: usize) -> *const c_char {
    STANDARD_LAYERS
        .get(index)
        .map_or(ptr::null(), |layer| layer.c_name.as_ptr())
}

#[no_mangle]
/// Number of samples `atmos_generate_profile` produces for the same arguments.
///
/// Returns
/// - `AtmosErrorCode::Ok` (0) on success; `start > end` yields 0 samples
/// - `AtmosErrorCode::NullPointer` if `out_len` is null
/// - `AtmosErrorCode::InvalidStep` if `step` is not finite and positive
/// - `AtmosErrorCode::InvalidRange` if `start` or `end` is not finite
/// - `AtmosErrorCode::TooManySamples` if the request exceeds the sample limit
///
/// # Safety
///
/// - `out_len` must be a valid, non-null pointer to a `usize` that this function will write to.
pub unsafe extern "C" fn atmos_profile_len(
    start: f64,
    end: f64,
    step: f64,
    out_len: *mut usize,
) -> AtmosErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultAtmosFfiError::null_pointer("out_len"));
    }

    handle_ffi_result_error(|| {
        let count = sample_count(start, end, step).map_err(DefaultAtmosFfiError::from)?;
        unsafe {
            *out_len = count;
        }
        Ok::<(), DefaultAtmosFfiError>(())
    })
}

#[no_mangle]
/// Sample `[start, end]` every `step` meters into a caller-owned buffer.
///
/// `out_len` always receives the number of samples the request produces, so a
/// caller can retry with a larger buffer after `BufferTooSmall`.
///
/// Returns
/// - `AtmosErrorCode::Ok` (0) on success with `*out_len` samples written to `out_buffer`
/// - `AtmosErrorCode::NullPointer` if `out_len` is null, or `out_buffer` is null while samples are produced
/// - `AtmosErrorCode::BufferTooSmall` if `capacity < *out_len`
/// - `AtmosErrorCode::InvalidStep`, `InvalidRange`, `TooManySamples` as for `atmos_profile_len`
///
/// # Safety
///
/// - `out_buffer` must be null or valid for writes of `capacity` consecutive `AtmosResult` values.
/// - `out_len` must be a valid, non-null pointer to a `usize` that this function will write to.
///
/// # Example Usage (C)
/// ```c
/// uintptr_t len = 0;
/// atmos_profile_len(0.0, 86000.0, 1000.0, &len);
/// AtmosResult* samples = malloc(len * sizeof(AtmosResult));
/// if (atmos_generate_profile(0.0, 86000.0, 1000.0, samples, len, &len) != Ok) {
///     fprintf(stderr, "%s\n", atmos_get_last_error());
/// }
/// ```
pub unsafe extern "C" fn atmos_generate_profile(
    start: f64,
    end: f64,
    step: f64,
    out_buffer: *mut AtmosResult,
    capacity: usize,
    out_len: *mut usize,
) -> AtmosErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultAtmosFfiError::null_pointer("out_len"));
    }

    handle_ffi_result_error(|| {
        let required = sample_count(start, end, step).map_err(DefaultAtmosFfiError::from)?;
        unsafe {
            *out_len = required;
        }
        if required == 0 {
            return Ok(());
        }
        if out_buffer.is_null() {
            return Err(DefaultAtmosFfiError::null_pointer("out_buffer"));
        }
        if capacity < required {
            return Err(DefaultAtmosFfiError::buffer_too_small(required, capacity));
        }

        let profile = ProfileGenerator::default()
            .generate(start, end, step)
            .map_err(DefaultAtmosFfiError::from)?;
        let out = unsafe { std::slice::from_raw_parts_mut(out_buffer, profile.len()) };
        for (slot, sample) in out.iter_mut().zip(profile.iter()) {
            *slot = AtmosResult::from(sample);
        }
        Ok(())
    })
}
