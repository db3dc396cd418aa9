//! Converts a position/velocity pair into an equivalent elliptical orbit.
//!
//! Inputs use the converter's own convention: a right-handed frame whose y
//! axis is the ecliptic pole, obtained from the ecliptic frame by mapping
//! `(x, y, z)` to `(x, z, -y)`. Positions are in km and velocities in km/h.

use std::f64::consts::PI;

use nalgebra::Vector3;
use tracing::debug;

use super::elements::{OrbitalElements, ParentFrame};
use super::orbit::EllipticalOrbit;
use crate::consts::{AU_KM, HOURS_PER_DAY, NEWTON_G_KM, SECONDS_PER_DAY};
use crate::error::{OrbitError, OrbitResult};
use crate::math::anomaly::{eccentric_to_mean, true_to_eccentric};
use crate::math::geometry::{directed_angle, normalize_angle};

const SECONDS_PER_HOUR: f64 = SECONDS_PER_DAY / HOURS_PER_DAY;

/// Angular momentum below this fraction of `|R||V|` counts as radial motion.
pub const DEGENERATE_ANGULAR_MOMENTUM: f64 = 1e-10;

/// Position (km) and velocity (km/h) in the converter frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

/// Ecliptic frame to converter frame.
pub fn to_converter_frame(v: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.x, v.z, -v.y)
}

/// Converter frame to ecliptic frame.
pub fn from_converter_frame(v: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.x, -v.z, v.y)
}

impl StateVector {
    /// Builds a state vector from an ecliptic position in AU and velocity in
    /// AU/day.
    pub fn from_ecliptic_au(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self {
            position: to_converter_frame(&position) * AU_KM,
            velocity: to_converter_frame(&velocity) * (AU_KM / HOURS_PER_DAY),
        }
    }
}

/// Fits an elliptical orbit with a prescribed period to a state vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVectorConverter {
    period: f64,
    central_mass: f64,
    epoch: f64,
    parent_frame: ParentFrame,
}

impl StateVectorConverter {
    /// `period` is in days and `central_mass` in kg.
    pub fn new(
        period: f64,
        central_mass: f64,
        epoch: f64,
        parent_frame: ParentFrame,
    ) -> OrbitResult<Self> {
        if !(period.is_finite() && period > 0.0) {
            return Err(OrbitError::InvalidPeriod(period));
        }
        if !(central_mass.is_finite() && central_mass > 0.0) {
            return Err(OrbitError::InvalidMass(central_mass));
        }

        Ok(Self {
            period,
            central_mass,
            epoch,
            parent_frame,
        })
    }

    /// Gravitational parameter, km^3/s^2.
    pub fn mu(&self) -> f64 {
        NEWTON_G_KM * self.central_mass
    }

    /// Semi-major axis (km) of an orbit with the target period.
    pub fn semimajor_axis(&self) -> f64 {
        let period_seconds = self.period * SECONDS_PER_DAY;
        (self.mu() * period_seconds * period_seconds / (4.0 * PI * PI)).cbrt()
    }

    pub fn convert(&self, state: &StateVector) -> OrbitResult<EllipticalOrbit> {
        let mu = self.mu();
        let a = self.semimajor_axis();

        let position = state.position;
        let r = position.norm();

        // Keep the direction of motion, but take the speed vis-viva gives for
        // the target semi-major axis
        let energy_term = 2.0 / r - 1.0 / a;
        if !(energy_term > 0.0) {
            return Err(OrbitError::PeriodTooShort {
                radius: r,
                semimajor_axis: a,
            });
        }
        let raw_velocity = state.velocity / SECONDS_PER_HOUR;
        let speed = (mu * energy_term).sqrt();
        let velocity = raw_velocity.normalize() * speed;

        let ang_mom = position.cross(&velocity);
        let h = ang_mom.norm();
        if !(h > DEGENERATE_ANGULAR_MOMENTUM * r * speed) {
            return Err(OrbitError::DegenerateStateVector {
                angular_momentum: h,
            });
        }
        let normal = ang_mom / h;

        // The pole is +y here
        let incl = normal.y.clamp(-1.0, 1.0).acos();
        let lan = normalize_angle(f64::atan2(normal.x, normal.z));
        let node = Vector3::new(lan.cos(), 0.0, -lan.sin());

        // True anomaly from the radial and transverse velocity, with no
        // division by e
        let radial = position / r;
        let transverse = normal.cross(&radial);
        let semi_latus_factor = h / mu;
        let e_sin_nu = velocity.dot(&radial) * semi_latus_factor;
        let e_cos_nu = velocity.dot(&transverse) * semi_latus_factor - 1.0;
        let ecc = e_sin_nu.hypot(e_cos_nu);
        // Nearly radial motion can still round to a parabola
        if !(ecc < 1.0) {
            return Err(OrbitError::DegenerateStateVector {
                angular_momentum: h,
            });
        }
        let true_anomaly = f64::atan2(e_sin_nu, e_cos_nu);

        let periapsis = radial * true_anomaly.cos() - transverse * true_anomaly.sin();
        let argp = directed_angle(&node, &periapsis, &normal);

        let mean_anomaly = eccentric_to_mean(true_to_eccentric(true_anomaly, ecc), ecc);

        let elements = OrbitalElements {
            pericenter_distance: a * (1.0 - ecc) / AU_KM,
            eccentricity: ecc,
            inclination: incl,
            ascending_node: lan,
            arg_of_pericenter: argp,
            mean_anomaly_at_epoch: mean_anomaly,
            period: self.period,
            epoch: self.epoch,
            parent_frame: self.parent_frame,
        };
        debug!(
            epoch = self.epoch,
            e = ecc,
            q = elements.pericenter_distance,
            incl,
            "fitted orbit to state vector"
        );

        Ok(EllipticalOrbit::new(elements))
    }
}
