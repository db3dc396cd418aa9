use nalgebra::{Rotation3, Vector3};

use crate::astro::elements::OrbitalElements;
use crate::math::anomaly;
use crate::math::geometry::{normalize_angle, rotation_from_angles};
use crate::math::kepler::{solve_with_precision, SolverPrecision};

/// A Keplerian conic driven by mean anomaly.
///
/// Despite the name this also covers hyperbolic element sets; only exactly
/// parabolic ones are unsupported and sit at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipticalOrbit {
    elements: OrbitalElements,
    /// Orbital plane (x towards pericenter) to common frame: the parent frame
    /// rotation applied after `Rz(lan) Rx(incl) Rz(argp)`.
    rotation: Rotation3<f64>,
    precision: SolverPrecision,
}

impl EllipticalOrbit {
    pub fn new(elements: OrbitalElements) -> Self {
        assert!(
            elements.eccentricity >= 0.0,
            "Illegal orbit configuration: eccentricity {} is negative",
            elements.eccentricity
        );

        let rotation = elements.parent_frame.rotation()
            * rotation_from_angles(
                elements.inclination,
                elements.ascending_node,
                elements.arg_of_pericenter,
            );

        Self {
            elements,
            rotation,
            precision: SolverPrecision::default(),
        }
    }

    pub fn with_precision(mut self, precision: SolverPrecision) -> Self {
        self.precision = precision;
        self
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn precision(&self) -> SolverPrecision {
        self.precision
    }

    pub fn rotation(&self) -> Rotation3<f64> {
        self.rotation
    }

    pub fn eccentricity(&self) -> f64 {
        self.elements.eccentricity
    }

    pub fn pericenter_distance(&self) -> f64 {
        self.elements.pericenter_distance
    }

    pub fn semimajor_axis(&self) -> f64 {
        self.elements.semimajor_axis()
    }

    pub fn sidereal_period(&self) -> Option<f64> {
        if self.elements.is_closed() {
            Some(self.elements.period)
        } else {
            None
        }
    }

    /// Apocenter distance, `q(1+e)/(1-e)`. Open orbits are unbounded.
    pub fn bounding_radius(&self) -> Option<f64> {
        let OrbitalElements {
            pericenter_distance: q,
            eccentricity: e,
            ..
        } = self.elements;

        if e < 1.0 {
            Some(q * (1.0 + e) / (1.0 - e))
        } else {
            None
        }
    }

    pub fn eccentric_anomaly_at_time(&self, time: f64) -> f64 {
        let mean_anomaly = self.elements.mean_anomaly_at(time);
        solve_with_precision(mean_anomaly, self.elements.eccentricity, self.precision)
    }

    /// True anomaly in `[0, 2π)` for closed orbits. Open orbits give the
    /// signed angle from pericenter.
    pub fn true_anomaly_at_time(&self, time: f64) -> f64 {
        let e = self.elements.eccentricity;
        let ecc_anomaly = self.eccentric_anomaly_at_time(time);
        if e < 1.0 {
            normalize_angle(anomaly::eccentric_to_true(ecc_anomaly, e))
        } else if e > 1.0 {
            anomaly::hyperbolic_to_true(ecc_anomaly, e)
        } else {
            ecc_anomaly
        }
    }

    /// Position in the orbital plane, with x pointing at pericenter.
    pub fn position_at_anomaly(&self, ecc_anomaly: f64) -> Vector3<f64> {
        let e = self.elements.eccentricity;
        let a = self.semimajor_axis();

        if e < 1.0 {
            Vector3::new(
                a * (ecc_anomaly.cos() - e),
                a * (1.0 - e * e).sqrt() * ecc_anomaly.sin(),
                0.0,
            )
        } else if e > 1.0 {
            // a is negative here
            Vector3::new(
                a * (ecc_anomaly.cosh() - e),
                -a * (e * e - 1.0).sqrt() * ecc_anomaly.sinh(),
                0.0,
            )
        } else {
            // Parabolic element sets belong in CometOrbit
            Vector3::zeros()
        }
    }

    pub fn position_at_time(&self, time: f64) -> Vector3<f64> {
        let ecc_anomaly = self.eccentric_anomaly_at_time(time);
        self.rotation * self.position_at_anomaly(ecc_anomaly)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;
    use crate::astro::elements::ParentFrame;
    use crate::consts::J2000;
    use crate::math::geometry::directed_angle;

    fn earth_like() -> OrbitalElements {
        OrbitalElements {
            pericenter_distance: 0.983,
            eccentricity: 0.0167,
            inclination: 0.0,
            ascending_node: 0.0,
            arg_of_pericenter: 102.9_f64.to_radians(),
            mean_anomaly_at_epoch: 358.6_f64.to_radians(),
            period: 365.25,
            epoch: J2000,
            parent_frame: ParentFrame::default(),
        }
    }

    #[test]
    fn test_pericenter_at_epoch() {
        let elements = OrbitalElements {
            mean_anomaly_at_epoch: 0.0,
            inclination: 0.4,
            ascending_node: 1.2,
            ..earth_like()
        };
        let orbit = EllipticalOrbit::new(elements);

        let position = orbit.position_at_time(J2000);
        assert_relative_eq!(position.norm(), 0.983, max_relative = 1e-14);

        let expected_direction = orbit.rotation() * Vector3::x();
        assert_relative_eq!(position.normalize(), expected_direction, epsilon = 1e-14);

        // Before the orbital-plane rotation, that's just the x axis
        assert_relative_eq!(
            orbit.position_at_anomaly(0.0),
            Vector3::new(0.983, 0.0, 0.0),
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_earth_quarter_orbit() {
        let orbit = EllipticalOrbit::new(earth_like());
        let time = J2000 + 91.3;

        // Analytically, M = 88.588 deg, which puts the true anomaly at 90.501 deg
        let true_anomaly = orbit.true_anomaly_at_time(time).to_degrees();
        assert_abs_diff_eq!(true_anomaly, 90.5014, epsilon = 1e-3);
        assert!((true_anomaly - 90.0).abs() < 0.51);

        // The position agrees with the anomaly: measure it from pericenter
        let position = orbit.position_at_time(time);
        let pericenter = orbit.rotation() * Vector3::x();
        let measured = directed_angle(&pericenter, &position, &Vector3::z());
        assert_abs_diff_eq!(measured.to_degrees(), true_anomaly, epsilon = 1e-9);

        // r = a(1-e^2)/(1 + e cos v)
        let a = orbit.semimajor_axis();
        let e = orbit.eccentricity();
        let expected_r = a * (1.0 - e * e) / (1.0 + e * true_anomaly.to_radians().cos());
        assert_relative_eq!(position.norm(), expected_r, max_relative = 1e-12);
    }

    #[test]
    fn test_true_anomaly_stays_in_one_revolution() {
        let orbit = EllipticalOrbit::new(earth_like());
        let quarter = orbit.true_anomaly_at_time(J2000 + 91.3);

        for &revolutions in [-3.0_f64, -1.0, 1.0, 5.0].iter() {
            let v = orbit.true_anomaly_at_time(J2000 + 91.3 + revolutions * 365.25);
            assert!((0.0..2.0 * PI).contains(&v), "true anomaly {}", v);
            assert_abs_diff_eq!(v, quarter, epsilon = 1e-9);
        }

        // Just before pericenter is near 2pi, not a small negative angle
        let v = orbit.true_anomaly_at_time(J2000 - 1.0);
        assert!(v > 1.5 * PI && v < 2.0 * PI, "true anomaly {}", v);
    }

    #[test]
    fn test_orbit_repeats_after_period() {
        let orbit = EllipticalOrbit::new(OrbitalElements {
            eccentricity: 0.6,
            inclination: 0.3,
            ..earth_like()
        });
        let p1 = orbit.position_at_time(J2000 + 17.0);
        let p2 = orbit.position_at_time(J2000 + 17.0 + 365.25);
        assert_relative_eq!(p1, p2, epsilon = 1e-10);

        // Time runs backwards just as well
        let p3 = orbit.position_at_time(J2000 + 17.0 - 365.25);
        assert_relative_eq!(p1, p3, epsilon = 1e-10);
    }

    #[test]
    fn test_bounding_radius() {
        let orbit = EllipticalOrbit::new(OrbitalElements {
            pericenter_distance: 1.0,
            eccentricity: 0.5,
            ..earth_like()
        });
        assert_relative_eq!(orbit.bounding_radius().unwrap(), 3.0);
        assert_relative_eq!(orbit.semimajor_axis(), 2.0);
        assert_eq!(orbit.sidereal_period(), Some(365.25));

        let open = EllipticalOrbit::new(OrbitalElements {
            eccentricity: 1.5,
            ..earth_like()
        });
        assert_eq!(open.bounding_radius(), None);
        assert_eq!(open.sidereal_period(), None);
    }

    #[test]
    fn test_hyperbolic_branch() {
        let orbit = EllipticalOrbit::new(OrbitalElements {
            pericenter_distance: 2.0,
            eccentricity: 1.5,
            arg_of_pericenter: 0.0,
            mean_anomaly_at_epoch: 0.0,
            ..earth_like()
        });

        // Pericenter at the epoch, then it leaves on the +y side
        assert_relative_eq!(orbit.position_at_time(J2000), Vector3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
        let later = orbit.position_at_time(J2000 + 30.0);
        assert!(later.y > 0.0);
        assert!(later.norm() > 2.0);

        // r = p / (1 + e cos v) holds on hyperbolas too
        let v = orbit.true_anomaly_at_time(J2000 + 30.0);
        let p = 2.0 * (1.0 + 1.5);
        assert_relative_eq!(later.norm(), p / (1.0 + 1.5 * v.cos()), max_relative = 1e-12);

        // Symmetric before pericenter
        let earlier = orbit.position_at_time(J2000 - 30.0);
        assert_relative_eq!(earlier, Vector3::new(later.x, -later.y, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_parabolic_sits_at_origin() {
        let orbit = EllipticalOrbit::new(OrbitalElements {
            eccentricity: 1.0,
            ..earth_like()
        });
        assert_eq!(orbit.position_at_time(J2000 + 3.0), Vector3::zeros());
    }

    #[test]
    fn test_parent_frame_is_applied_last() {
        let frame = ParentFrame::new(0.4, 1.0, 0.2);
        let local = EllipticalOrbit::new(OrbitalElements {
            eccentricity: 0.3,
            ..earth_like()
        });
        let framed = EllipticalOrbit::new(OrbitalElements {
            eccentricity: 0.3,
            parent_frame: frame,
            ..earth_like()
        });

        let t = J2000 + 40.0;
        assert_relative_eq!(
            framed.position_at_time(t),
            frame.rotation() * local.position_at_time(t),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_converged_precision_matches() {
        let fixed = EllipticalOrbit::new(OrbitalElements {
            eccentricity: 0.95,
            ..earth_like()
        });
        let precise = fixed.clone().with_precision(SolverPrecision::Converged);
        assert_eq!(precise.precision(), SolverPrecision::Converged);

        for k in 0..20 {
            let t = J2000 + k as f64 * 18.3;
            assert_relative_eq!(
                fixed.position_at_time(t),
                precise.position_at_time(t),
                epsilon = 1e-8
            );
        }
    }
}
