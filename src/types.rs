//! Core types and settings for the compass pipeline

use crate::axes::DisplayRotation;
use crate::calibration::MagnetometerCalibration;
use crate::error::{CompassError, CompassResult};
use crate::smoother::DEFAULT_SMOOTHING;
use nalgebra::Vector3;

/// One reading from an accelerometer or magnetometer in the device frame.
///
/// The device frame follows the Android sensor convention: X points to the
/// right edge, Y to the top edge and Z out of the screen. Values are used
/// as delivered by the sensor; no unit conversion takes place.
pub type TriAxisSample = Vector3<f32>;

/// Sensor a sample was produced by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorKind {
    /// Gravity plus linear acceleration, in any consistent unit
    Accelerometer,
    /// Ambient magnetic field, in any consistent unit
    MagneticField,
}

/// Geographic position snapshot delivered by a location service
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoFix {
    /// Latitude in degrees, north positive
    pub latitude: f32,
    /// Longitude in degrees, east positive
    pub longitude: f32,
    /// Altitude above the WGS-84 ellipsoid in meters
    pub altitude: f32,
}

impl GeoFix {
    pub fn new(latitude: f32, longitude: f32, altitude: f32) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Check that the coordinates are finite and within geographic range
    pub fn validate(&self) -> CompassResult<()> {
        let valid = (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
            && self.altitude.is_finite();

        if valid {
            Ok(())
        } else {
            Err(CompassError::InvalidGeoFix {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Compass settings
///
/// # Example
/// ```
/// use compass_fusion::{CompassSettings, DisplayRotation};
///
/// let settings = CompassSettings {
///     smoothing: 0.05,                           // heavier smoothing
///     display_rotation: DisplayRotation::Rotation90, // landscape UI
///     ..Default::default()
/// };
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompassSettings {
    /// Low-pass coefficient applied to both sensor streams, within (0, 1]
    ///
    /// Weight given to each new sample. Lower values suppress more jitter
    /// but take longer to follow a real rotation.
    pub smoothing: f32,
    /// Rotation of the displayed UI relative to the device's natural orientation
    pub display_rotation: DisplayRotation,
    /// Hard and soft iron correction applied to raw magnetometer samples
    pub magnetometer_calibration: Option<MagnetometerCalibration>,
}

impl CompassSettings {
    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> CompassResult<()> {
        if self.smoothing > 0.0 && self.smoothing <= 1.0 {
            Ok(())
        } else {
            Err(CompassError::InvalidSmoothing {
                alpha: self.smoothing,
            })
        }
    }
}

impl Default for CompassSettings {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            display_rotation: DisplayRotation::default(),
            magnetometer_calibration: None,
        }
    }
}

/// Availability of the declination used for true heading
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DeclinationStatus {
    /// No geographic fix has been received yet
    #[default]
    NoFix,
    /// A fix arrived but the geomagnetic model could not resolve it
    Unknown,
    /// Declination in degrees, east positive
    Known(f32),
}

impl DeclinationStatus {
    pub fn degrees(&self) -> Option<f32> {
        match self {
            DeclinationStatus::Known(declination) => Some(*declination),
            _ => None,
        }
    }
}

/// Output of one pass through the compass pipeline
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompassReading {
    /// Magnetic heading in degrees, `[0, 360)`
    pub magnetic_heading: f32,
    /// Magnetic heading displayed before this pass, for animating the dial
    pub previous_heading: f32,
    /// True heading in degrees, `[0, 360)`, when a declination is known
    pub true_heading: Option<f32>,
    /// Declination state used for `true_heading`
    pub declination: DeclinationStatus,
    /// Whether the heading was held because the orientation was indeterminate
    pub held: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = CompassSettings::default();
        assert_eq!(settings.smoothing, 0.15);
        assert_eq!(settings.display_rotation, DisplayRotation::Rotation0);
        assert!(settings.magnetometer_calibration.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_smoothing() {
        for alpha in [0.0, -0.2, 1.5, f32::NAN] {
            let settings = CompassSettings {
                smoothing: alpha,
                ..Default::default()
            };
            assert!(settings.validate().is_err(), "alpha {alpha} accepted");
        }
    }

    #[test]
    fn test_geo_fix_validation() {
        assert!(GeoFix::new(47.6, -122.3, 50.0).validate().is_ok());
        assert!(GeoFix::new(90.0, 180.0, 0.0).validate().is_ok());
        assert_eq!(
            GeoFix::new(91.0, 0.0, 0.0).validate(),
            Err(CompassError::InvalidGeoFix {
                latitude: 91.0,
                longitude: 0.0
            })
        );
        assert!(GeoFix::new(0.0, -181.0, 0.0).validate().is_err());
        assert!(GeoFix::new(f32::NAN, 0.0, 0.0).validate().is_err());
        assert!(GeoFix::new(0.0, 0.0, f32::INFINITY).validate().is_err());
    }

    #[test]
    fn test_declination_status_degrees() {
        assert_eq!(DeclinationStatus::NoFix.degrees(), None);
        assert_eq!(DeclinationStatus::Unknown.degrees(), None);
        assert_eq!(DeclinationStatus::Known(-4.5).degrees(), Some(-4.5));
    }
}
