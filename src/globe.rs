//! Globe projection for the tech-vault skill pins.

use crate::content::SkillPin;

/// Radius pins sit at, just above the unit sphere's surface.
pub const PIN_RADIUS: f64 = 1.03;

/// Cartesian position of a latitude/longitude (degrees) on a sphere of
/// `radius`. Y is up; longitude 0 faces -X after the 180° turn.
pub fn to_xyz(lat: f64, lon: f64, radius: f64) -> [f64; 3] {
    let phi = (90.0 - lat).to_radians();
    let theta = (lon + 180.0).to_radians();
    [
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    ]
}

/// Where a pin is drawn on the globe.
pub fn pin_position(pin: &SkillPin) -> [f64; 3] {
    to_xyz(pin.lat, pin.lon, PIN_RADIUS)
}
