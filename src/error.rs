//! Error types for the compass pipeline
//!
//! None of these conditions is fatal. The tracker absorbs each of them into
//! "keep showing the best heading available": an indeterminate orientation
//! holds the previous heading, and a missing declination drops true heading
//! from the output while magnetic heading keeps updating.

use thiserror::Error;

/// Errors reported by the heading and declination computations
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CompassError {
    /// Gravity and magnetic field do not span a horizontal plane.
    ///
    /// Raised when either vector is zero, when the field is parallel to
    /// gravity, or when a reading is not finite.
    #[error("orientation is indeterminate: gravity and magnetic field are degenerate")]
    Indeterminate,

    /// The geomagnetic reference model produced no value for the fix
    #[error("geomagnetic model has no declination for the given position and date")]
    ModelUnavailable,

    /// Smoothing coefficient outside (0, 1]
    #[error("smoothing coefficient {alpha} must be within (0, 1]")]
    InvalidSmoothing {
        /// Rejected coefficient
        alpha: f32,
    },

    /// Coordinates outside the valid geographic range or not finite
    #[error("invalid geographic fix: latitude {latitude}, longitude {longitude}")]
    InvalidGeoFix {
        /// Rejected latitude in degrees
        latitude: f32,
        /// Rejected longitude in degrees
        longitude: f32,
    },
}

/// Result type for compass operations
pub type CompassResult<T> = Result<T, CompassError>;
