use std::f64::consts::PI;

use nalgebra::Rotation3;

use crate::consts::J2000_OBLIQUITY;
use crate::math::geometry::zxz_rotation;

/// Orientation of the frame an orbit is expressed in, relative to the common
/// J2000 ecliptic frame.
///
/// Moons are usually described against their planet's equator; this holds
/// the three angles that tilt that plane back into the ecliptic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParentFrame {
    /// Tilt of the parent's reference plane against the ecliptic.
    pub obliquity: f64,
    /// Ecliptic longitude of the node of the parent's reference plane.
    pub ascending_node: f64,
    /// Offset of the parent's reference direction along its own plane.
    pub j2000_longitude: f64,
}

impl ParentFrame {
    pub fn new(obliquity: f64, ascending_node: f64, j2000_longitude: f64) -> Self {
        Self {
            obliquity,
            ascending_node,
            j2000_longitude,
        }
    }

    /// The common frame itself.
    pub fn ecliptic() -> Self {
        Self::default()
    }

    /// Earth's mean equator at J2000.
    pub fn j2000_equatorial() -> Self {
        Self::new(J2000_OBLIQUITY, 0.0, 0.0)
    }

    /// Rotation taking vectors in this frame into the common frame.
    pub fn rotation(&self) -> Rotation3<f64> {
        zxz_rotation(self.ascending_node, self.obliquity, self.j2000_longitude)
    }
}

/// Perihelion-based element set shared by the elliptical family of orbits.
///
/// Distances are in AU, angles in radians, times in Julian days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub pericenter_distance: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub ascending_node: f64,
    pub arg_of_pericenter: f64,
    pub mean_anomaly_at_epoch: f64,
    /// Sidereal period, in days. For open orbits this only sets the mean
    /// motion `2pi / period`.
    pub period: f64,
    pub epoch: f64,
    pub parent_frame: ParentFrame,
}

impl OrbitalElements {
    pub fn is_closed(&self) -> bool {
        self.eccentricity < 1.0
    }

    /// Semi-major axis; negative for hyperbolas, infinite for parabolas.
    pub fn semimajor_axis(&self) -> f64 {
        self.pericenter_distance / (1.0 - self.eccentricity)
    }

    pub fn mean_motion(&self) -> f64 {
        2.0 * PI / self.period
    }

    pub fn mean_anomaly_at(&self, time: f64) -> f64 {
        self.mean_anomaly_at_epoch + (time - self.epoch) * self.mean_motion()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use super::*;

    #[test]
    fn test_equatorial_frame() {
        // The celestial pole sits at ecliptic latitude 90 - obliquity, on the
        // side of ecliptic longitude 270.
        let pole = ParentFrame::j2000_equatorial().rotation() * Vector3::z();
        assert_relative_eq!(
            pole,
            Vector3::new(0.0, -J2000_OBLIQUITY.sin(), J2000_OBLIQUITY.cos()),
            epsilon = 1e-15
        );

        // The equinox direction is shared by both frames
        let equinox = ParentFrame::j2000_equatorial().rotation() * Vector3::x();
        assert_relative_eq!(equinox, Vector3::x(), epsilon = 1e-15);

        assert_relative_eq!(ParentFrame::ecliptic().rotation(), Rotation3::identity());
    }

    #[test]
    fn test_element_helpers() {
        let elements = OrbitalElements {
            pericenter_distance: 0.5,
            eccentricity: 0.5,
            inclination: 0.0,
            ascending_node: 0.0,
            arg_of_pericenter: 0.0,
            mean_anomaly_at_epoch: 0.25,
            period: 100.0,
            epoch: 10.0,
            parent_frame: ParentFrame::default(),
        };
        assert!(elements.is_closed());
        assert_relative_eq!(elements.semimajor_axis(), 1.0);
        assert_relative_eq!(elements.mean_anomaly_at(60.0), 0.25 + PI, max_relative = 1e-14);
    }
}
