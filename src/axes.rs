//! Sensor axes remapping for a rotated display
//!
//! Heading is measured along the device's +Y axis, which is "up" on the
//! screen only in the natural orientation. When the UI is rotated into
//! landscape or upside-down, both sensor vectors are remapped so that +Y
//! follows the top of the displayed UI instead.
//!
//! # Example
//! ```
//! use nalgebra::Vector3;
//! use compass_fusion::DisplayRotation;
//!
//! // Device reading in the natural frame
//! let sensor = Vector3::new(1.0, 2.0, 3.0);
//!
//! // UI rotated 90° counter-clockwise: screen up is device +X
//! let screen = DisplayRotation::Rotation90.remap(sensor);
//!
//! assert_eq!(screen.x, -2.0); // Screen X = -Device Y
//! assert_eq!(screen.y, 1.0);  // Screen Y = +Device X
//! assert_eq!(screen.z, 3.0);  // Screen Z = +Device Z
//! ```

use crate::types::TriAxisSample;

/// Rotation of the displayed UI relative to the device's natural orientation
///
/// Rotations are counter-clockwise, matching how mobile platforms report
/// the display rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayRotation {
    /// Natural orientation, screen up is device +Y
    #[default]
    Rotation0,
    /// Screen up is device +X
    Rotation90,
    /// Screen up is device -Y
    Rotation180,
    /// Screen up is device -X
    Rotation270,
}

impl DisplayRotation {
    /// Remap a device-frame sample into the screen frame
    pub fn remap(self, sample: TriAxisSample) -> TriAxisSample {
        let (x, y, z) = (sample.x, sample.y, sample.z);
        match self {
            DisplayRotation::Rotation0 => sample,
            DisplayRotation::Rotation90 => TriAxisSample::new(-y, x, z),
            DisplayRotation::Rotation180 => TriAxisSample::new(-x, -y, z),
            DisplayRotation::Rotation270 => TriAxisSample::new(y, -x, z),
        }
    }
}
