//! Error type for the caller-misuse boundary
//!
//! Single-altitude computation is total; only unit lookup by identifier and
//! profile requests can fail.

use thiserror::Error;

/// Errors raised when a caller passes arguments outside the supported tables or ranges.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AtmosError {
    /// Unit identifier not present in the named conversion table
    #[error("unknown {kind} unit '{unit}'")]
    UnknownUnit { kind: &'static str, unit: String },

    /// Profile step must be finite and strictly positive
    #[error("profile step must be finite and positive, got {0}")]
    InvalidStep(f64),

    /// Profile bounds must be finite
    #[error("profile range must be finite, got [{start}, {end}]")]
    InvalidRange { start: f64, end: f64 },

    /// Requested profile would exceed the sample limit
    #[error("profile would contain {requested} samples, limit is {limit}")]
    TooManySamples { requested: usize, limit: usize },
}

impl AtmosError {
    pub(crate) fn unknown_unit(kind: &'static str, unit: &str) -> Self {
        Self::UnknownUnit {
            kind,
            unit: unit.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AtmosError>;
