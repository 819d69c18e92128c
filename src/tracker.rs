//! Compass pipeline driven by sensor and location events
//!
//! [`CompassTracker`] owns the mutable state a compass screen needs: one
//! smoothed state per sensor stream, the last valid heading and the current
//! declination. Every numeric step is delegated to the pure functions in
//! [`smoother`](crate::smoother), [`compass`](crate::compass),
//! [`math`](crate::math) and [`declination`](crate::declination).
//!
//! All entry points take `&mut self` and never block. A host delivering
//! accelerometer and magnetometer events on different threads wraps the
//! tracker in a lock or funnels events onto one thread.

use crate::axes::DisplayRotation;
use crate::compass::calculate_heading;
use crate::declination::{GeomagneticModel, apply_declination, declination};
use crate::error::{CompassError, CompassResult};
use crate::smoother::LowPassFilter;
use crate::types::{
    CompassReading, CompassSettings, DeclinationStatus, GeoFix, SensorKind, TriAxisSample,
};

/// Compass heading tracker
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use compass_fusion::{CompassTracker, FixedDeclination, GeoFix, SensorKind};
///
/// let mut tracker = CompassTracker::new(FixedDeclination(10.0));
///
/// for _ in 0..100 {
///     tracker.on_sensor_event(SensorKind::Accelerometer, Vector3::new(0.0, 0.0, 9.81));
///     tracker.on_sensor_event(SensorKind::MagneticField, Vector3::new(0.0, 22.0, -41.0));
/// }
/// assert!(tracker.reading().true_heading.is_none());
///
/// tracker.on_geo_fix(GeoFix::new(47.0, 8.0, 400.0)).unwrap();
/// let reading = tracker.reading();
/// assert!(reading.magnetic_heading < 0.1 || reading.magnetic_heading > 359.9);
/// assert!((reading.true_heading.unwrap() - 10.0).abs() < 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct CompassTracker<M: GeomagneticModel> {
    settings: CompassSettings,
    model: M,
    accelerometer: LowPassFilter,
    magnetometer: LowPassFilter,
    geo_fix: Option<GeoFix>,
    reading: CompassReading,
    // Set once a heading has been computed from real data
    has_heading: bool,
}

impl<M: GeomagneticModel> CompassTracker<M> {
    /// Create a tracker with default settings
    pub fn new(model: M) -> Self {
        let settings = CompassSettings::default();
        Self {
            settings,
            model,
            accelerometer: LowPassFilter::new(),
            magnetometer: LowPassFilter::new(),
            geo_fix: None,
            reading: CompassReading::default(),
            has_heading: false,
        }
    }

    /// Create a tracker with specified settings
    pub fn with_settings(model: M, settings: CompassSettings) -> CompassResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            model,
            accelerometer: LowPassFilter::with_alpha(settings.smoothing)?,
            magnetometer: LowPassFilter::with_alpha(settings.smoothing)?,
            geo_fix: None,
            reading: CompassReading::default(),
            has_heading: false,
        })
    }

    /// Update settings, keeping the smoothed sensor history
    pub fn set_settings(&mut self, settings: CompassSettings) -> CompassResult<()> {
        settings.validate()?;
        self.accelerometer.set_alpha(settings.smoothing)?;
        self.magnetometer.set_alpha(settings.smoothing)?;
        self.settings = settings;
        Ok(())
    }

    pub fn settings(&self) -> CompassSettings {
        self.settings
    }

    /// Follow a change of the displayed UI orientation
    pub fn set_display_rotation(&mut self, rotation: DisplayRotation) {
        self.settings.display_rotation = rotation;
    }

    /// Process one raw sample and return the updated reading
    ///
    /// Only the state of the sample's own stream is smoothed; the heading is
    /// then recomputed from both smoothed states. When the orientation is
    /// indeterminate the previous heading is held. A sample with a NaN or
    /// infinite component is dropped before it reaches the filter.
    pub fn on_sensor_event(&mut self, kind: SensorKind, raw: TriAxisSample) -> CompassReading {
        if !raw.iter().all(|value| value.is_finite()) {
            log::debug!("dropping non-finite {:?} sample {:?}", kind, raw.as_slice());
            self.reading.previous_heading = self.reading.magnetic_heading;
            self.reading.held = true;
            return self.reading;
        }

        match kind {
            SensorKind::Accelerometer => {
                self.accelerometer.update(raw);
            }
            SensorKind::MagneticField => {
                let calibrated = match &self.settings.magnetometer_calibration {
                    Some(calibration) => calibration.apply(raw),
                    None => raw,
                };
                self.magnetometer.update(calibrated);
            }
        }

        let rotation = self.settings.display_rotation;
        let gravity = rotation.remap(self.accelerometer.state());
        let magnetic_field = rotation.remap(self.magnetometer.state());

        let previous_heading = self.reading.magnetic_heading;
        let (magnetic_heading, held) = match calculate_heading(gravity, magnetic_field) {
            Ok(heading) => {
                self.has_heading = true;
                (heading, false)
            }
            Err(err) => {
                log::debug!("holding heading {previous_heading:.1}°: {err}");
                (previous_heading, true)
            }
        };

        self.reading = CompassReading {
            magnetic_heading,
            previous_heading,
            true_heading: self.true_heading(magnetic_heading),
            declination: self.reading.declination,
            held,
        };

        log::trace!(
            "{:?} sample {:?} -> heading {:.1}°",
            kind,
            raw.as_slice(),
            magnetic_heading
        );

        self.reading
    }

    /// Accept a new geographic fix, replacing any previous one
    ///
    /// On success the declination is updated and returned. A fix the model
    /// cannot resolve leaves the declination unknown, so true heading is
    /// omitted until a usable fix arrives. An invalid fix is ignored.
    pub fn on_geo_fix(&mut self, fix: GeoFix) -> CompassResult<f32> {
        let result = declination(&self.model, fix);

        match result {
            Ok(value) => {
                log::info!(
                    "declination {value:.2}° at {:.4}, {:.4}",
                    fix.latitude,
                    fix.longitude
                );
                self.geo_fix = Some(fix);
                self.reading.declination = DeclinationStatus::Known(value);
            }
            Err(CompassError::InvalidGeoFix { .. }) => {
                log::warn!("ignoring invalid fix {fix:?}");
            }
            Err(err) => {
                log::warn!("declination unknown at {fix:?}: {err}");
                self.geo_fix = Some(fix);
                self.reading.declination = DeclinationStatus::Unknown;
            }
        }

        self.reading.true_heading = self.true_heading(self.reading.magnetic_heading);
        result
    }

    /// Latest reading
    pub fn reading(&self) -> CompassReading {
        self.reading
    }

    pub fn declination(&self) -> DeclinationStatus {
        self.reading.declination
    }

    /// Last accepted geographic fix
    pub fn geo_fix(&self) -> Option<GeoFix> {
        self.geo_fix
    }

    /// Smoothed accelerometer state in the device frame
    pub fn smoothed_gravity(&self) -> TriAxisSample {
        self.accelerometer.state()
    }

    /// Smoothed magnetometer state in the device frame, after calibration
    pub fn smoothed_magnetic_field(&self) -> TriAxisSample {
        self.magnetometer.state()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Replace the geomagnetic model; re-resolves the last fix if there is one
    pub fn set_model(&mut self, model: M) -> Option<CompassResult<f32>> {
        self.model = model;
        match self.geo_fix {
            Some(fix) => Some(self.on_geo_fix(fix)),
            None => None,
        }
    }

    fn true_heading(&self, magnetic_heading: f32) -> Option<f32> {
        if !self.has_heading {
            return None;
        }
        self.reading
            .declination
            .degrees()
            .map(|value| apply_declination(magnetic_heading, value))
    }
}
