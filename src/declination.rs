//! Magnetic declination and true heading
//!
//! Declination comes from a geomagnetic reference model. The model is an
//! injected capability: [`WorldMagneticModel`] evaluates the World Magnetic
//! Model coefficients shipped with the `world_magnetic_model` crate, and
//! [`FixedDeclination`] serves a known value, e.g. one supplied by the
//! platform's own geomagnetic calculator.

use crate::error::{CompassError, CompassResult};
use crate::math::wrap_to_360;
use crate::types::GeoFix;
use world_magnetic_model::GeomagneticField;
use world_magnetic_model::time::Date;
use world_magnetic_model::uom::si::angle::degree;
use world_magnetic_model::uom::si::f32::{Angle, Length};
use world_magnetic_model::uom::si::length::meter;

/// Geomagnetic reference model resolving declination for a position
pub trait GeomagneticModel {
    /// Declination in degrees, east positive, at the given position
    fn declination(&self, fix: &GeoFix) -> CompassResult<f32>;
}

/// World Magnetic Model evaluated at a fixed date
///
/// The date is supplied by the caller because declination drifts over the
/// years and this crate has no clock of its own.
///
/// # Example
/// ```
/// use compass_fusion::{GeoFix, GeomagneticModel, WorldMagneticModel};
/// use world_magnetic_model::time::Date;
///
/// let date = Date::from_ordinal_date(2024, 100).unwrap();
/// let model = WorldMagneticModel::new(date);
///
/// // Unsupported dates report an error instead of a wrong value
/// if let Ok(declination) = model.declination(&GeoFix::new(40.0, -105.3, 1650.0)) {
///     assert!(declination > 0.0); // Colorado lies east of the agonic line
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldMagneticModel {
    date: Date,
}

impl WorldMagneticModel {
    pub fn new(date: Date) -> Self {
        Self { date }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn set_date(&mut self, date: Date) {
        self.date = date;
    }
}

impl GeomagneticModel for WorldMagneticModel {
    fn declination(&self, fix: &GeoFix) -> CompassResult<f32> {
        let field = GeomagneticField::new(
            Length::new::<meter>(fix.altitude),
            Angle::new::<degree>(fix.latitude),
            Angle::new::<degree>(fix.longitude),
            self.date,
        )
        .map_err(|_| CompassError::ModelUnavailable)?;

        Ok(field.declination().get::<degree>())
    }
}

/// Model returning the same declination everywhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDeclination(pub f32);

impl GeomagneticModel for FixedDeclination {
    fn declination(&self, _fix: &GeoFix) -> CompassResult<f32> {
        Ok(self.0)
    }
}

/// Resolve the declination at `fix` through `model`
///
/// The fix is validated first. A model answer that is not finite or lies
/// outside ±180° is reported as [`CompassError::ModelUnavailable`].
pub fn declination<M: GeomagneticModel + ?Sized>(model: &M, fix: GeoFix) -> CompassResult<f32> {
    fix.validate()?;

    let declination = model.declination(&fix)?;
    if !(-180.0..=180.0).contains(&declination) {
        return Err(CompassError::ModelUnavailable);
    }

    Ok(declination)
}

/// Convert magnetic heading to true heading, `[0, 360)`
///
/// The sum is wrapped with a single correction, see
/// [`wrap_to_360`](crate::wrap_to_360).
///
/// # Example
/// ```
/// use compass_fusion::apply_declination;
///
/// assert_eq!(apply_declination(350.0, 15.0), 5.0);
/// assert_eq!(apply_declination(10.0, -15.0), 355.0);
/// ```
pub fn apply_declination(magnetic_heading: f32, declination: f32) -> f32 {
    wrap_to_360(magnetic_heading + declination)
}
