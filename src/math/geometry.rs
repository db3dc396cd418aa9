use nalgebra::{Rotation3, Vector3};

use std::f64::consts::PI;

/// Builds `Rz(outer) * Rx(tilt) * Rz(inner)`.
///
/// With `(lan, incl, argp)` this takes a vector in the orbital plane, with x
/// pointing at periapsis, into the reference frame: first rotate around z by
/// the argument of periapsis, tilt around x by the inclination, and finally
/// turn around z by the longitude of the ascending node. The same
/// composition describes a parent body's frame relative to the common one.
pub fn zxz_rotation(outer: f64, tilt: f64, inner: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), outer)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), tilt)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), inner)
}

pub fn rotation_from_angles(incl: f64, lan: f64, argp: f64) -> Rotation3<f64> {
    zxz_rotation(lan, incl, argp)
}

/// Angle from `u` to `v`, measured counterclockwise around `up`, in
/// `[0, 2pi)`. Both vectors are assumed perpendicular to `up`.
pub fn directed_angle(u: &Vector3<f64>, v: &Vector3<f64>, up: &Vector3<f64>) -> f64 {
    let sin_part = u.cross(v).dot(up) / up.norm();
    let cos_part = u.dot(v);
    normalize_angle(f64::atan2(sin_part, cos_part))
}

/// Normalizes an angle into `[0, 2pi)`.
pub fn normalize_angle(x: f64) -> f64 {
    x.rem_euclid(2.0 * PI)
}
