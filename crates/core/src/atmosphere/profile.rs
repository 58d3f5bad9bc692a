//! Fixed-step sampling of the atmosphere model over an altitude range

use crate::atmosphere::model::{AtmosphereModel, AtmosphericResult};
use crate::error::{AtmosError, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::ops::Index;
use tracing::debug;

/// Upper bound on samples in a single profile request.
pub const MAX_PROFILE_SAMPLES: usize = 1_000_000;

/// Slack, in units of `f64::EPSILON` relative to the step quotient, applied
/// before flooring the sample count so `end` survives rounding
/// (e.g. `0.3 / 0.1 = 2.9999999999999996`).
const STEP_COUNT_ULPS: f64 = 4.0;

/// Altitude-ascending sequence of samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AtmosphericProfile {
    samples: Vec<AtmosphericResult>,
}

impl AtmosphericProfile {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[AtmosphericResult] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AtmosphericResult> {
        self.samples.iter()
    }

    pub fn first(&self) -> Option<&AtmosphericResult> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&AtmosphericResult> {
        self.samples.last()
    }

    pub fn into_vec(self) -> Vec<AtmosphericResult> {
        self.samples
    }
}

impl Index<usize> for AtmosphericProfile {
    type Output = AtmosphericResult;

    fn index(&self, index: usize) -> &AtmosphericResult {
        &self.samples[index]
    }
}

impl IntoIterator for AtmosphericProfile {
    type Item = AtmosphericResult;
    type IntoIter = std::vec::IntoIter<AtmosphericResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

impl<'a> IntoIterator for &'a AtmosphericProfile {
    type Item = &'a AtmosphericResult;
    type IntoIter = std::slice::Iter<'a, AtmosphericResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Number of samples in `[start, end]` at `step`, validating the request.
///
/// `start > end` is not an error and yields zero samples.
pub fn sample_count(start: f64, end: f64, step: f64) -> Result<usize> {
    if !step.is_finite() || step <= 0.0 {
        return Err(AtmosError::InvalidStep(step));
    }
    if !start.is_finite() || !end.is_finite() {
        return Err(AtmosError::InvalidRange { start, end });
    }
    if start > end {
        return Ok(0);
    }

    let quotient = (end - start) / step;
    let slack = quotient.abs().max(1.0) * STEP_COUNT_ULPS * f64::EPSILON;
    let steps = (quotient + slack).floor();
    if steps >= MAX_PROFILE_SAMPLES as f64 {
        return Err(AtmosError::TooManySamples {
            requested: if steps >= usize::MAX as f64 {
                usize::MAX
            } else {
                steps as usize + 1
            },
            limit: MAX_PROFILE_SAMPLES,
        });
    }
    Ok(steps as usize + 1)
}

/// Samples an [`AtmosphereModel`] at fixed altitude increments.
///
/// Bounds are passed to the model unclamped, so a range reaching past 86 km
/// repeats the 86 km state for every sample above it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileGenerator {
    model: AtmosphereModel,
}

impl ProfileGenerator {
    pub fn new(model: AtmosphereModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &AtmosphereModel {
        &self.model
    }

    #[inline]
    fn altitude_at(start: f64, end: f64, step: f64, index: usize) -> f64 {
        (start + index as f64 * step).min(end)
    }

    /// Sample `[start, end]` inclusive every `step` meters.
    ///
    /// Samples lie on the grid `start + k·step`. When `end` sits within
    /// rounding error below a grid point, that point is emitted as `end`
    /// itself; an `end` further off the grid is never emitted.
    pub fn generate(&self, start: f64, end: f64, step: f64) -> Result<AtmosphericProfile> {
        let count = sample_count(start, end, step)?;
        let samples: Vec<AtmosphericResult> = (0..count)
            .map(|i| self.model.compute(Self::altitude_at(start, end, step, i)))
            .collect();

        debug!(start, end, step, samples = samples.len(), "generated atmospheric profile");
        Ok(AtmosphericProfile { samples })
    }

    /// Same result as [`generate`](Self::generate), evaluated across the rayon pool.
    pub fn generate_par(&self, start: f64, end: f64, step: f64) -> Result<AtmosphericProfile> {
        let count = sample_count(start, end, step)?;
        let model = self.model;
        let samples: Vec<AtmosphericResult> = (0..count)
            .into_par_iter()
            .map(|i| model.compute(Self::altitude_at(start, end, step, i)))
            .collect();

        debug!(start, end, step, samples = samples.len(), "generated atmospheric profile (parallel)");
        Ok(AtmosphericProfile { samples })
    }
}

/// Generate a profile with the standard model.
pub fn generate(start: f64, end: f64, step: f64) -> Result<AtmosphericProfile> {
    ProfileGenerator::default().generate(start, end, step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count_inclusive_end() {
        assert_eq!(sample_count(0.0, 10_000.0, 1_000.0).unwrap(), 11);
        assert_eq!(sample_count(0.0, 10_500.0, 1_000.0).unwrap(), 11);
        assert_eq!(sample_count(0.0, 0.3, 0.1).unwrap(), 4);
        assert_eq!(sample_count(5.0, 5.0, 1.0).unwrap(), 1);
    }

    #[test]
    fn test_sample_count_reversed_range_is_empty() {
        assert_eq!(sample_count(10_000.0, 0.0, 1_000.0).unwrap(), 0);
    }

    #[test]
    fn test_sample_count_rejects_bad_step() {
        assert_eq!(sample_count(0.0, 1.0, 0.0), Err(AtmosError::InvalidStep(0.0)));
        assert_eq!(sample_count(0.0, 1.0, -5.0), Err(AtmosError::InvalidStep(-5.0)));
        assert!(matches!(
            sample_count(0.0, 1.0, f64::NAN),
            Err(AtmosError::InvalidStep(_))
        ));
        assert!(matches!(
            sample_count(0.0, 1.0, f64::INFINITY),
            Err(AtmosError::InvalidStep(_))
        ));
    }

    #[test]
    fn test_sample_count_rejects_non_finite_range() {
        assert!(matches!(
            sample_count(f64::NAN, 1.0, 1.0),
            Err(AtmosError::InvalidRange { .. })
        ));
        assert!(matches!(
            sample_count(0.0, f64::INFINITY, 1.0),
            Err(AtmosError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_sample_count_limit() {
        assert_eq!(
            sample_count(0.0, 86_000.0, 0.0625),
            Err(AtmosError::TooManySamples {
                requested: 1_376_001,
                limit: MAX_PROFILE_SAMPLES
            })
        );
        assert!(sample_count(0.0, 999_999.0, 1.0).is_ok());
        assert!(sample_count(0.0, 1.0e300, 1.0e-300).is_err());
    }

    #[test]
    fn test_end_off_grid_is_not_emitted() {
        let profile = generate(0.0, 999.999_999_5, 1_000.0).unwrap();
        assert_eq!(profile.len(), 1);
        assert_eq!(profile[0].altitude, 0.0);
        assert_eq!(sample_count(0.0, 2_999.999, 1_000.0).unwrap(), 3);
    }

    #[test]
    fn test_last_sample_never_overshoots_end() {
        let profile = generate(0.0, 0.3, 0.1).unwrap();
        assert_eq!(profile.len(), 4);
        assert!(profile.last().unwrap().altitude <= 0.3);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let generator = ProfileGenerator::default();
        let seq = generator.generate(-1_000.0, 90_000.0, 250.0).unwrap();
        let par = generator.generate_par(-1_000.0, 90_000.0, 250.0).unwrap();
        assert_eq!(seq, par);
    }
}
