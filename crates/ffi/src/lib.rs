//! C ABI for the standard atmosphere model
//!
//! All functions are stateless apart from the per-thread last-error slot, so
//! they may be called concurrently from any thread.

mod conversions;
mod error;
mod helpers;
mod queries;

pub use conversions::{atmos_convert_altitude, atmos_convert_pressure, atmos_convert_temperature};
pub use error::{atmos_get_last_error, atmos_get_last_error_code, AtmosErrorCode};
pub use queries::{
    atmos_compute, atmos_generate_profile, atmos_layer_count, atmos_layer_name, atmos_profile_len,
    AtmosResult,
};
