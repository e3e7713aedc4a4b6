//! Angles and the small amount of 2D vector math the raycaster needs.
//!
//! Vectors are `glam::DVec2` in math orientation (+y up). Grids use +y down,
//! the raycaster handles the flip.

use std::f64::consts::PI;

use glam::DVec2;

/// An angle, stored in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub fn from_degrees(degrees: f64) -> Self {
        Self(degrees.to_radians())
    }

    pub fn from_radians(radians: f64) -> Self {
        Self(radians)
    }

    /// Degrees normalised to [0, 360)
    pub fn degrees(&self) -> f64 {
        let degrees = self.0.to_degrees().rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negatives
        if degrees >= 360.0 { 0.0 } else { degrees }
    }

    /// Radians normalised to (-pi, pi]
    pub fn radians(&self) -> f64 {
        let r = self.0.sin().atan2(self.0.cos());
        if r <= -PI { PI } else { r }
    }
}

/// Vector of a given length pointing along `angle`.
pub fn vector_from_angle(angle: Angle, magnitude: f64) -> DVec2 {
    DVec2::from_angle(angle.radians()) * magnitude
}

/// Rotate a vector counter-clockwise by `angle`.
pub fn rotate(v: DVec2, angle: Angle) -> DVec2 {
    DVec2::from_angle(angle.radians()).rotate(v)
}

/// Direction of a vector measured counter-clockwise from +x.
pub fn angle_of(v: DVec2) -> Angle {
    Angle::from_radians(v.y.atan2(v.x))
}
