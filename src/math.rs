//! Angle conversion and wrapping for compass headings

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Convert an angle in radians to degrees
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * RAD_TO_DEG
}

/// Fold a heading into the canonical `[0, 360)` range with a single correction.
///
/// Negative inputs get 360° added once, inputs at or above 360° get 360°
/// subtracted once. This is not a general modulo.
///
/// # Precondition
/// `degrees` lies within `[-360, 720)`. Every caller in this crate satisfies
/// this: `atan2` yields `[-180, 180]` and a declination is well within
/// ±180°. Debug builds assert the precondition.
///
/// # Example
/// ```
/// use compass_fusion::wrap_to_360;
///
/// assert_eq!(wrap_to_360(-10.0), 350.0);
/// assert_eq!(wrap_to_360(362.0), 2.0);
/// assert_eq!(wrap_to_360(360.0), 0.0);
/// ```
pub fn wrap_to_360(degrees: f32) -> f32 {
    debug_assert!(
        degrees >= -360.0 && degrees < 720.0,
        "heading {degrees} needs more than one wrap correction"
    );

    let wrapped = if degrees < 0.0 {
        degrees + 360.0
    } else if degrees >= 360.0 {
        degrees - 360.0
    } else {
        degrees
    };

    // -1e-6 + 360 rounds to exactly 360 in f32
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, PI};
    use nalgebra::ComplexField;

    #[test]
    fn test_rad_to_deg_known_angles() {
        assert!((rad_to_deg(PI) - 180.0).abs() < 1e-4);
        assert!((rad_to_deg(FRAC_PI_2) - 90.0).abs() < 1e-4);
        assert!((rad_to_deg(-FRAC_PI_2) + 90.0).abs() < 1e-4);
        assert_eq!(rad_to_deg(0.0), 0.0);
    }

    #[test]
    fn test_wrap_to_360() {
        assert_eq!(wrap_to_360(-10.0), 350.0);
        assert_eq!(wrap_to_360(362.0), 2.0);
        assert_eq!(wrap_to_360(0.0), 0.0);
        assert_eq!(wrap_to_360(359.5), 359.5);
        assert_eq!(wrap_to_360(-180.0), 180.0);
        assert_eq!(wrap_to_360(360.0), 0.0);
        assert_eq!(wrap_to_360(-360.0), 0.0);
    }

    #[test]
    fn test_wrap_tiny_negative_stays_in_range() {
        let wrapped = wrap_to_360(-1e-6);
        assert!((0.0..360.0).contains(&wrapped), "got {wrapped}");
    }

    #[test]
    fn test_constants_are_reciprocal() {
        assert!((DEG_TO_RAD * RAD_TO_DEG - 1.0).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "more than one wrap correction")]
    #[cfg(debug_assertions)]
    fn test_wrap_rejects_multi_wrap_input() {
        wrap_to_360(-400.0);
    }
}
