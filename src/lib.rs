#![no_std]

//! Compass Fusion - tilt-compensated compass heading with declination correction
//!
//! This library turns two noisy 3-axis sensor streams, an accelerometer and
//! a magnetometer, into a stable compass heading. When the device's
//! geographic position is known, the magnetic heading is corrected to true
//! heading using the local magnetic declination.
//!
//! # Features
//!
//! - Exponential low-pass smoothing per sensor stream
//! - Tilt-compensated heading from gravity and magnetic field vectors
//! - Degenerate orientations reported instead of producing NaN headings
//! - Magnetic declination from the World Magnetic Model, or any injected model
//! - Display rotation remapping and magnetometer hard/soft iron correction
//! - `#![no_std]` compatible; all state is explicit and owned by the caller
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use compass_fusion::{CompassTracker, GeoFix, SensorKind, WorldMagneticModel};
//! use world_magnetic_model::time::Date;
//!
//! let date = Date::from_ordinal_date(2025, 200).unwrap();
//! let mut compass = CompassTracker::new(WorldMagneticModel::new(date));
//!
//! // Sensor events, in whatever order the platform delivers them
//! compass.on_sensor_event(SensorKind::Accelerometer, Vector3::new(0.1, 0.2, 9.8));
//! let field = Vector3::new(3.0, 21.0, -40.0);
//! let reading = compass.on_sensor_event(SensorKind::MagneticField, field);
//! println!("magnetic heading: {:.0}°", reading.magnetic_heading);
//!
//! // Location arrives at some point, possibly never
//! if compass.on_geo_fix(GeoFix::new(48.85, 2.35, 35.0)).is_ok() {
//!     println!("true heading: {:?}", compass.reading().true_heading);
//! }
//! ```
//!
//! The numeric building blocks are also available as free functions:
//! [`smooth`], [`estimate_heading_radians`], [`rad_to_deg`], [`wrap_to_360`],
//! [`declination()`] and [`apply_declination`].

pub mod axes;
pub mod calibration;
pub mod compass;
pub mod declination;
mod error;
mod math;
pub mod smoother;
pub mod tracker;
mod types;

// Re-export all public types and functions
pub use axes::DisplayRotation;
pub use calibration::MagnetometerCalibration;
pub use compass::{calculate_heading, estimate_heading_radians};
pub use declination::{
    FixedDeclination, GeomagneticModel, WorldMagneticModel, apply_declination, declination,
};
pub use error::{CompassError, CompassResult};
pub use math::{DEG_TO_RAD, RAD_TO_DEG, rad_to_deg, wrap_to_360};
pub use smoother::{DEFAULT_SMOOTHING, LowPassFilter, samples_to_settle, smooth};
pub use tracker::CompassTracker;
pub use types::*;
