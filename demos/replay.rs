//! Replay recorded sensor events through the compass pipeline
//!
//! The CSV holds one sensor event per row, in delivery order:
//!
//! ```text
//! Time (s),Sensor,X,Y,Z
//! 0.000,accelerometer,0.12,-0.08,9.79
//! 0.004,magnetic_field,4.1,20.7,-40.9
//! ```
//!
//! Run with: `cargo run --example replay -- demos/data/compass_turn.csv [lat lon alt]`

use compass_fusion::{
    CompassSettings, CompassTracker, GeoFix, SensorKind, WorldMagneticModel, samples_to_settle,
};
use nalgebra::Vector3;
use serde::Deserialize;
use std::error::Error;
use world_magnetic_model::time::Date;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Sensor {
    Accelerometer,
    MagneticField,
}

#[derive(Debug, Deserialize)]
struct SensorEvent {
    #[serde(rename = "Time (s)")]
    time: f32,
    #[serde(rename = "Sensor")]
    sensor: Sensor,
    #[serde(rename = "X")]
    x: f32,
    #[serde(rename = "Y")]
    y: f32,
    #[serde(rename = "Z")]
    z: f32,
}

fn parse_fix(args: &[String]) -> Result<Option<GeoFix>, Box<dyn Error>> {
    match args {
        [latitude, longitude, altitude] => Ok(Some(GeoFix::new(
            latitude.parse()?,
            longitude.parse()?,
            altitude.parse()?,
        ))),
        [] => Ok(None),
        _ => Err("expected latitude, longitude and altitude".into()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let path = args
        .first()
        .map(String::as_str)
        .unwrap_or("demos/data/compass_turn.csv");
    let fix = parse_fix(args.get(1..).unwrap_or_default())?;

    let settings = CompassSettings {
        smoothing: 0.1,
        ..Default::default()
    };
    println!(
        "Smoothing {:.2}: settles to 1% after {} samples",
        settings.smoothing,
        samples_to_settle(settings.smoothing, 0.01).unwrap_or_default()
    );

    let date = Date::from_ordinal_date(2025, 1).map_err(|err| err.to_string())?;
    let model = WorldMagneticModel::new(date);
    let mut compass = CompassTracker::with_settings(model, settings)?;

    if let Some(fix) = fix {
        match compass.on_geo_fix(fix) {
            Ok(declination) => println!("Declination: {declination:.2}"),
            Err(err) => println!("Declination: N/A ({err})"),
        }
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut held = 0;
    let mut events = 0;

    for result in reader.deserialize() {
        let event: SensorEvent = result?;
        let kind = match event.sensor {
            Sensor::Accelerometer => SensorKind::Accelerometer,
            Sensor::MagneticField => SensorKind::MagneticField,
        };

        let reading = compass.on_sensor_event(kind, Vector3::new(event.x, event.y, event.z));
        events += 1;
        if reading.held {
            held += 1;
        }

        if events % 25 == 0 {
            let true_heading = reading
                .true_heading
                .map(|heading| format!("{heading:.1}"))
                .unwrap_or_else(|| "N/A".to_string());
            println!(
                "{:>7.2}s  heading {:>5.1}  true {:>5}",
                event.time, reading.magnetic_heading, true_heading
            );
        }
    }

    println!("Processed {events} events, {held} with indeterminate orientation");
    Ok(())
}
