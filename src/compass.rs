//! Tilt-compensated compass
//!
//! Heading is derived from the accelerometer (gravity) and the magnetometer
//! using cross products to build the horizontal East and North axes in the
//! device frame. The heading is the azimuth of the device's +Y axis (the top
//! edge in the natural orientation) projected onto that horizontal plane.

use crate::error::{CompassError, CompassResult};
use crate::math::{rad_to_deg, wrap_to_360};
use crate::types::TriAxisSample;
use nalgebra::{ComplexField, RealField};

/// Minimum magnitude of a cross product, relative to the product of its
/// operand magnitudes, below which the orientation is indeterminate
const DEGENERACY_TOLERANCE: f32 = 1e-6;

/// Calculate tilt-compensated magnetic heading in radians
///
/// The accelerometer reading points away from the Earth when the device is
/// at rest, so a device lying flat reports roughly `(0, 0, +g)`.
///
/// # Arguments
/// * `gravity` - Accelerometer reading (gravity vector)
/// * `magnetic_field` - Magnetometer reading
///
/// # Returns
/// Heading in radians (range: -π to +π, 0 = magnetic north, clockwise
/// positive), or [`CompassError::Indeterminate`] when the vectors do not
/// define a horizontal plane.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use compass_fusion::estimate_heading_radians;
///
/// let gravity = Vector3::new(0.0, 0.0, 9.81);  // Device flat
/// let field = Vector3::new(0.0, 22.0, -41.0);  // Top edge facing magnetic north
/// let heading = estimate_heading_radians(gravity, field).unwrap();
/// assert!(heading.abs() < 1e-3);
/// ```
pub fn estimate_heading_radians(
    gravity: TriAxisSample,
    magnetic_field: TriAxisSample,
) -> CompassResult<f32> {
    // East vector: magnetic field × gravity
    let east = checked_normalize(
        magnetic_field.cross(&gravity),
        magnetic_field.magnitude() * gravity.magnitude(),
    )?;

    // North vector: gravity × east, already horizontal
    let north = checked_normalize(gravity.cross(&east), gravity.magnitude())?;

    Ok(east.y.atan2(north.y))
}

/// Calculate tilt-compensated magnetic heading in degrees, `[0, 360)`
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use compass_fusion::calculate_heading;
///
/// let gravity = Vector3::new(0.0, 0.0, 9.81);
/// let field = Vector3::new(22.0, 0.0, -41.0);  // Magnetic north off the right edge
/// let heading = calculate_heading(gravity, field).unwrap();
/// assert!((heading - 270.0).abs() < 0.1);      // Top edge faces west
/// ```
pub fn calculate_heading(
    gravity: TriAxisSample,
    magnetic_field: TriAxisSample,
) -> CompassResult<f32> {
    let heading = estimate_heading_radians(gravity, magnetic_field)?;
    Ok(wrap_to_360(rad_to_deg(heading)))
}

/// Normalize a cross product, rejecting it when it is too short relative to
/// `scale` or not finite
fn checked_normalize(vector: TriAxisSample, scale: f32) -> CompassResult<TriAxisSample> {
    let magnitude_squared = vector.magnitude_squared();

    // Squares in the subnormal range have already lost their precision
    if !magnitude_squared.is_finite() || magnitude_squared < f32::MIN_POSITIVE {
        return Err(CompassError::Indeterminate);
    }

    let magnitude = magnitude_squared.sqrt();
    if !(magnitude > DEGENERACY_TOLERANCE * scale) {
        return Err(CompassError::Indeterminate);
    }

    Ok(vector / magnitude)
}
