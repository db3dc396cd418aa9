use std::f64::consts::PI;

use nalgebra::{Rotation3, Vector3};
use tracing::warn;

use crate::astro::elements::ParentFrame;
use crate::consts::GAUSS_K;
use crate::math::geometry::{normalize_angle, rotation_from_angles};
use crate::math::kepler::solve_parabolic;
use crate::math::root_finding::newton_with_tolerance;

/// Step size below which the comet solvers stop iterating.
pub const COMET_TOLERANCE: f64 = 1e-10;
/// Upper bound on Newton steps; a converging solve needs well under 20.
pub const COMET_MAX_ITERATIONS: usize = 100;

/// Perihelion-time element set, the usual form for comets and for objects on
/// open trajectories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CometElements {
    pub pericenter_distance: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub ascending_node: f64,
    pub arg_of_pericenter: f64,
    /// Julian date of perihelion passage.
    pub perihelion_time: f64,
}

/// Heliocentric conic for comets, minor planets and interstellar objects.
///
/// Unlike [EllipticalOrbit](super::EllipticalOrbit) this handles the exact
/// parabola, and its solvers iterate until the Newton step is below
/// [COMET_TOLERANCE].
#[derive(Debug, Clone, PartialEq)]
pub struct CometOrbit {
    elements: CometElements,
    mean_motion: f64,
    rotation: Rotation3<f64>,
}

impl CometOrbit {
    pub fn new(elements: CometElements) -> Self {
        let CometElements {
            pericenter_distance: q,
            eccentricity: e,
            ..
        } = elements;
        assert!(e >= 0.0, "Illegal orbit configuration: eccentricity {} is negative", e);
        assert!(q > 0.0, "Illegal orbit configuration: pericenter distance {} is not positive", q);

        let rotation = rotation_from_angles(
            elements.inclination,
            elements.ascending_node,
            elements.arg_of_pericenter,
        );

        Self {
            elements,
            mean_motion: Self::default_mean_motion(q, e),
            rotation,
        }
    }

    /// Heliocentric mean motion in rad/day: `k / a^(3/2)`, or the parabolic
    /// `1.5 k / (q sqrt(2q))`, which is what the Barker solver expects.
    pub fn default_mean_motion(q: f64, e: f64) -> f64 {
        if e == 1.0 {
            1.5 * GAUSS_K / (q * (2.0 * q).sqrt())
        } else {
            let a = q / (1.0 - e).abs();
            GAUSS_K / (a * a.sqrt())
        }
    }

    /// Overrides the heliocentric mean motion, e.g. for a body orbiting a
    /// planet rather than the Sun.
    pub fn with_mean_motion(mut self, mean_motion: f64) -> Self {
        self.mean_motion = mean_motion;
        self
    }

    pub fn with_parent_frame(mut self, frame: ParentFrame) -> Self {
        self.rotation = frame.rotation()
            * rotation_from_angles(
                self.elements.inclination,
                self.elements.ascending_node,
                self.elements.arg_of_pericenter,
            );
        self
    }

    pub fn elements(&self) -> &CometElements {
        &self.elements
    }

    pub fn mean_motion(&self) -> f64 {
        self.mean_motion
    }

    pub fn sidereal_period(&self) -> Option<f64> {
        if self.elements.eccentricity < 1.0 {
            Some(2.0 * PI / self.mean_motion)
        } else {
            None
        }
    }

    pub fn bounding_radius(&self) -> Option<f64> {
        let q = self.elements.pericenter_distance;
        let e = self.elements.eccentricity;
        if e < 1.0 {
            Some(q * (1.0 + e) / (1.0 - e))
        } else {
            None
        }
    }

    /// Returns `(r cos v, r sin v)` in the orbital plane.
    fn plane_coordinates(&self, time: f64) -> (f64, f64) {
        let q = self.elements.pericenter_distance;
        let e = self.elements.eccentricity;
        let dt = time - self.elements.perihelion_time;

        if e < 1.0 {
            let a = q / (1.0 - e);
            let m = normalize_angle(self.mean_motion * dt);
            // Newton from E = M can cycle for very eccentric orbits; E = pi
            // converges for every M in [0, 2pi)
            let seed = if e < 0.8 { m } else { PI };
            let ecc_anomaly = self.newton(
                |x| (x - e * x.sin() - m, 1.0 - e * x.cos()),
                seed,
                m,
            );
            (
                a * (ecc_anomaly.cos() - e),
                a * (1.0 - e * e).sqrt() * ecc_anomaly.sin(),
            )
        } else if e > 1.0 {
            let a = q / (e - 1.0);
            let m = self.mean_motion * dt;
            let hyp_anomaly = self.newton(
                |x| (e * x.sinh() - x - m, e * x.cosh() - 1.0),
                (m / e).asinh(),
                m,
            );
            (
                a * (e - hyp_anomaly.cosh()),
                a * (e * e - 1.0).sqrt() * hyp_anomaly.sinh(),
            )
        } else {
            let tan_half_nu = solve_parabolic(self.mean_motion * dt);
            (
                q * (1.0 - tan_half_nu * tan_half_nu),
                2.0 * q * tan_half_nu,
            )
        }
    }

    fn newton(&self, f_and_f_prime: impl Fn(f64) -> (f64, f64), seed: f64, mean_anomaly: f64) -> f64 {
        let result = newton_with_tolerance(f_and_f_prime, seed, COMET_TOLERANCE, COMET_MAX_ITERATIONS);
        if !result.converged {
            warn!(
                e = self.elements.eccentricity,
                mean_anomaly,
                "comet solver hit its iteration cap"
            );
        }
        result.root
    }

    pub fn true_anomaly_at_time(&self, time: f64) -> f64 {
        let (x, y) = self.plane_coordinates(time);
        f64::atan2(y, x)
    }

    pub fn position_at_time(&self, time: f64) -> Vector3<f64> {
        let (x, y) = self.plane_coordinates(time);
        self.rotation * Vector3::new(x, y, 0.0)
    }
}
