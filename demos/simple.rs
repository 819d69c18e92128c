use compass_fusion::{CompassTracker, FixedDeclination, GeoFix, SensorKind};
use nalgebra::Vector3;

const SAMPLE_PERIOD: f32 = 0.02; // 20 ms sample period

fn main() {
    // Replace with WorldMagneticModel for a real declination
    let mut compass = CompassTracker::new(FixedDeclination(2.5));

    for i in 0..200 {
        // this loop should run each time the platform delivers sensor events
        let turn = (i as f32 * SAMPLE_PERIOD * 18.0).to_radians(); // 18 deg/s clockwise
        let accelerometer = Vector3::new(0.0, 0.0, 9.81); // replace this with actual accelerometer data
        let magnetometer = Vector3::new(-22.0 * turn.sin(), 22.0 * turn.cos(), -41.0); // replace this with actual magnetometer data

        compass.on_sensor_event(SensorKind::Accelerometer, accelerometer);
        let reading = compass.on_sensor_event(SensorKind::MagneticField, magnetometer);

        if i == 100 {
            // location arrives once, whenever the location service has a fix
            let _ = compass.on_geo_fix(GeoFix::new(51.48, 0.0, 45.0));
        }

        if i % 10 == 0 {
            match reading.true_heading {
                Some(true_heading) => println!(
                    "Heading: {:.1}, True heading: {:.1}",
                    reading.magnetic_heading, true_heading
                ),
                None => println!("Heading: {:.1}, True heading: N/A", reading.magnetic_heading),
            }
        }
    }
}
