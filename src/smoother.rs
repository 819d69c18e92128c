//! Exponential low-pass filter for 3-axis sensor streams
//!
//! Each sensor stream owns one [`LowPassFilter`]. The filter state starts at
//! zero and converges toward the true reading after a few samples, so a cold
//! start shows a brief transient rather than a wrong steady state.

use crate::error::{CompassError, CompassResult};
use crate::types::TriAxisSample;
use nalgebra::ComplexField;

/// Default smoothing coefficient (weight given to each new sample)
pub const DEFAULT_SMOOTHING: f32 = 0.15;

/// Move `state` toward `raw` by `alpha`, per axis.
///
/// `state[i] = state[i] + alpha * (raw[i] - state[i])`
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use compass_fusion::smooth;
///
/// let mut state = Vector3::zeros();
/// smooth(Vector3::new(10.0, 0.0, -10.0), &mut state, 0.5);
/// assert_eq!(state, Vector3::new(5.0, 0.0, -5.0));
/// ```
pub fn smooth(raw: TriAxisSample, state: &mut TriAxisSample, alpha: f32) {
    *state += (raw - *state) * alpha;
}

/// Number of samples after which a constant input is within `ratio` of the
/// initial error.
///
/// The residual after `n` samples is `(1 - alpha)^n` of the starting error.
/// Returns 1 for `alpha == 1` and `None` for coefficients outside (0, 1] or a
/// `ratio` outside (0, 1).
pub fn samples_to_settle(alpha: f32, ratio: f32) -> Option<u32> {
    if !(alpha > 0.0 && alpha <= 1.0) || !(ratio > 0.0 && ratio < 1.0) {
        return None;
    }
    if alpha == 1.0 {
        return Some(1);
    }

    let samples = ratio.ln() / (1.0 - alpha).ln();
    Some(samples.ceil() as u32)
}

/// Low-pass filter owning the smoothed state of one sensor stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowPassFilter {
    state: TriAxisSample,
    alpha: f32,
}

impl LowPassFilter {
    /// Create a filter with the default coefficient and a zero state
    pub fn new() -> Self {
        Self {
            state: TriAxisSample::zeros(),
            alpha: DEFAULT_SMOOTHING,
        }
    }

    /// Create a filter with a custom coefficient
    pub fn with_alpha(alpha: f32) -> CompassResult<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(CompassError::InvalidSmoothing { alpha });
        }
        Ok(Self {
            state: TriAxisSample::zeros(),
            alpha,
        })
    }

    /// Feed a raw sample and return the updated smoothed state
    pub fn update(&mut self, raw: TriAxisSample) -> TriAxisSample {
        smooth(raw, &mut self.state, self.alpha);
        self.state
    }

    /// Change the coefficient, keeping the accumulated state
    pub fn set_alpha(&mut self, alpha: f32) -> CompassResult<()> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(CompassError::InvalidSmoothing { alpha });
        }
        self.alpha = alpha;
        Ok(())
    }

    pub fn state(&self) -> TriAxisSample {
        self.state
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

impl Default for LowPassFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_single_step() {
        let mut state = Vector3::new(1.0, 1.0, 1.0);
        smooth(Vector3::new(3.0, -1.0, 1.0), &mut state, 0.25);
        assert!((state - Vector3::new(1.5, 0.5, 1.0)).magnitude() < 1e-6);
    }

    #[test]
    fn test_alpha_one_tracks_input() {
        let mut filter = LowPassFilter::with_alpha(1.0).unwrap();
        let raw = Vector3::new(0.3, -9.8, 2.0);
        assert_eq!(filter.update(raw), raw);
    }

    #[test]
    fn test_converges_to_constant_input() {
        let mut filter = LowPassFilter::new();
        let target = Vector3::new(0.0, 22.0, -41.0);

        let mut previous_error = (target - filter.state()).magnitude();
        for _ in 0..200 {
            let error = (target - filter.update(target)).magnitude();
            assert!(error <= previous_error);
            previous_error = error;
        }
        assert!(previous_error < 1e-3);
    }

    #[test]
    fn test_settles_within_estimate() {
        let alpha = 0.15;
        let samples = samples_to_settle(alpha, 0.01).unwrap();
        let mut filter = LowPassFilter::with_alpha(alpha).unwrap();
        let target = Vector3::new(100.0, 0.0, 0.0);

        for _ in 0..samples {
            filter.update(target);
        }
        assert!((target - filter.state()).magnitude() <= 1.0 + 1e-3);
    }

    #[test]
    fn test_samples_to_settle_bounds() {
        assert_eq!(samples_to_settle(1.0, 0.01), Some(1));
        assert_eq!(samples_to_settle(0.5, 0.2), Some(3));
        assert_eq!(samples_to_settle(0.0, 0.01), None);
        assert_eq!(samples_to_settle(1.5, 0.01), None);
        assert_eq!(samples_to_settle(0.5, 1.0), None);
    }

    #[test]
    fn test_rejects_invalid_alpha() {
        assert_eq!(
            LowPassFilter::with_alpha(0.0),
            Err(CompassError::InvalidSmoothing { alpha: 0.0 })
        );
        assert!(LowPassFilter::with_alpha(f32::NAN).is_err());
        assert!(LowPassFilter::with_alpha(1.01).is_err());
    }
}
