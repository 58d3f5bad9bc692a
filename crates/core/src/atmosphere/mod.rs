//! Standard atmosphere model, 0 to 86 km
//!
//! - [`layers`]: the eight-layer table and altitude-to-layer resolution
//! - [`model`]: single-altitude evaluation
//! - [`profile`]: fixed-step sampling over a range
//! - [`config`]: serializable profile requests

pub mod config;
pub mod layers;
pub mod model;
pub mod profile;

pub use config::ProfileConfig;
pub use layers::{AtmosphericLayer, LayerTable, LAYER_COUNT, MAX_ALTITUDE, MIN_ALTITUDE, STANDARD_LAYERS};
pub use model::{AtmosphereModel, AtmosphericResult};
pub use profile::{generate, sample_count, AtmosphericProfile, ProfileGenerator, MAX_PROFILE_SAMPLES};
