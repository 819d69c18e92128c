//! Magnetometer hard and soft iron correction
//!
//! Ferrous parts of the device offset the measured field (hard iron) and
//! distort it into an ellipsoid (soft iron). Without correction the heading
//! error varies with the direction the device faces.

use crate::types::TriAxisSample;
use nalgebra::Matrix3;

/// Hard and soft iron correction for a magnetometer
///
/// Applied as `soft_iron_matrix * (uncalibrated - hard_iron_offset)`.
///
/// # Example
/// ```
/// use nalgebra::{Matrix3, Vector3};
/// use compass_fusion::MagnetometerCalibration;
///
/// let calibration = MagnetometerCalibration {
///     soft_iron_matrix: Matrix3::identity(),
///     hard_iron_offset: Vector3::new(10.0, 20.0, 30.0),
/// };
///
/// let calibrated = calibration.apply(Vector3::new(100.0, 200.0, 300.0));
/// assert_eq!(calibrated, Vector3::new(90.0, 180.0, 270.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MagnetometerCalibration {
    /// 3x3 soft iron correction matrix
    pub soft_iron_matrix: Matrix3<f32>,
    /// Hard iron offset, in the magnetometer's unit
    pub hard_iron_offset: TriAxisSample,
}

impl MagnetometerCalibration {
    /// Correction for a hard iron offset only
    pub fn hard_iron(offset: TriAxisSample) -> Self {
        Self {
            soft_iron_matrix: Matrix3::identity(),
            hard_iron_offset: offset,
        }
    }

    /// Calibrate a raw magnetometer reading
    pub fn apply(&self, uncalibrated: TriAxisSample) -> TriAxisSample {
        self.soft_iron_matrix * (uncalibrated - self.hard_iron_offset)
    }
}

impl Default for MagnetometerCalibration {
    fn default() -> Self {
        Self::hard_iron(TriAxisSample::zeros())
    }
}
