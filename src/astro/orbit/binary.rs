use std::cell::{Cell, OnceCell};
use std::rc::{Rc, Weak};

use nalgebra::{Rotation3, Vector3};

use super::Orbit;
use crate::astro::elements::ParentFrame;
use crate::error::{OrbitError, OrbitResult};

/// A shared, read-only view of a body's most recently computed position.
///
/// The owner writes it once per update; orbits that depend on other bodies
/// read it afterwards.
#[derive(Debug, Clone, Default)]
pub struct TrackedPosition(Rc<Cell<Vector3<f64>>>);

impl TrackedPosition {
    pub fn new(initial: Vector3<f64>) -> Self {
        Self(Rc::new(Cell::new(initial)))
    }

    pub fn get(&self) -> Vector3<f64> {
        self.0.get()
    }

    pub fn set(&self, position: Vector3<f64>) {
        self.0.set(position)
    }
}

/// The primary of a two-body system, placed opposite its secondary around
/// their common barycenter.
///
/// The secondary is usually defined after the primary, so it is attached
/// later with [bind_secondary](Self::bind_secondary).
#[derive(Debug, Clone)]
pub struct BinaryOrbit {
    barycenter: Box<Orbit>,
    /// `m2 / (m1 + m2)`
    mass_ratio: f64,
    secondary: OnceCell<Weak<Orbit>>,
}

impl BinaryOrbit {
    pub fn new(barycenter: Orbit, mass_ratio: f64) -> Self {
        Self {
            barycenter: Box::new(barycenter),
            mass_ratio,
            secondary: OnceCell::new(),
        }
    }

    /// Mass ratio from the two masses.
    pub fn from_masses(barycenter: Orbit, primary_mass: f64, secondary_mass: f64) -> OrbitResult<Self> {
        let total = primary_mass + secondary_mass;
        if !(primary_mass >= 0.0 && secondary_mass >= 0.0 && total > 0.0) {
            return Err(OrbitError::InvalidMass(total));
        }
        Ok(Self::new(barycenter, secondary_mass / total))
    }

    /// Attaches the secondary's orbit. Panics if one is already attached.
    pub fn bind_secondary(&self, secondary: &Rc<Orbit>) {
        let bound = self.secondary.set(Rc::downgrade(secondary));
        assert!(bound.is_ok(), "BinaryOrbit secondary is already bound");
    }

    pub fn is_bound(&self) -> bool {
        self.secondary.get().is_some()
    }

    pub fn mass_ratio(&self) -> f64 {
        self.mass_ratio
    }

    pub fn barycenter(&self) -> &Orbit {
        &self.barycenter
    }

    fn secondary(&self) -> Rc<Orbit> {
        let weak = self
            .secondary
            .get()
            .expect("BinaryOrbit evaluated before its secondary was bound");
        weak.upgrade()
            .expect("BinaryOrbit secondary was dropped while the primary is still in use")
    }

    pub fn position_at_time(&self, time: f64) -> Vector3<f64> {
        self.barycenter.position_at_time(time) - self.mass_ratio * self.secondary().position_at_time(time)
    }

    pub fn fast_position_at_time(&self, reference_epoch: f64, time: f64) -> Vector3<f64> {
        self.barycenter.fast_position_at_time(reference_epoch, time)
            - self.mass_ratio * self.secondary().fast_position_at_time(reference_epoch, time)
    }

    pub fn is_stable(&self, time: f64) -> bool {
        self.barycenter.is_stable(time) && self.secondary().is_stable(time)
    }

    pub fn sidereal_period(&self) -> Option<f64> {
        self.barycenter.sidereal_period()
    }

    pub fn bounding_radius(&self) -> Option<f64> {
        self.barycenter.bounding_radius()
    }
}

/// The barycenter of two bodies, computed from where they were last placed.
///
/// Both bodies must already be positioned for the current time when this is
/// evaluated.
#[derive(Debug, Clone)]
pub struct BarycenterOrbit {
    body_a: TrackedPosition,
    body_b: TrackedPosition,
    mass_a: f64,
    mass_b: f64,
    rotation: Rotation3<f64>,
}

impl BarycenterOrbit {
    pub fn new(
        body_a: TrackedPosition,
        mass_a: f64,
        body_b: TrackedPosition,
        mass_b: f64,
    ) -> OrbitResult<Self> {
        let total = mass_a + mass_b;
        if !(mass_a >= 0.0 && mass_b >= 0.0 && total > 0.0) {
            return Err(OrbitError::InvalidMass(total));
        }

        Ok(Self {
            body_a,
            body_b,
            mass_a,
            mass_b,
            rotation: Rotation3::identity(),
        })
    }

    /// Rotation from the frame the tracked positions are in to the common
    /// frame. The identity by default.
    pub fn with_parent_frame(mut self, frame: ParentFrame) -> Self {
        self.rotation = frame.rotation();
        self
    }

    pub fn position_at_time(&self, _time: f64) -> Vector3<f64> {
        let a = self.body_a.get();
        let b = self.body_b.get();
        let fraction = self.mass_b / (self.mass_a + self.mass_b);
        self.rotation * (a + (b - a) * fraction)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::astro::orbit::FixedOrbit;
    use crate::consts::J2000_OBLIQUITY;

    #[test]
    fn test_binary_offset() {
        let primary = BinaryOrbit::new(FixedOrbit::new(Vector3::zeros()).into(), 0.0123);
        let secondary = Rc::new(Orbit::from(FixedOrbit::new(Vector3::new(1.0, 0.0, 0.0))));
        primary.bind_secondary(&secondary);

        assert_eq!(primary.position_at_time(0.0), Vector3::new(-0.0123, 0.0, 0.0));
    }

    #[test]
    fn test_binary_follows_barycenter() {
        let barycenter = Vector3::new(5.0, -2.0, 0.5);
        let primary = BinaryOrbit::from_masses(FixedOrbit::new(barycenter).into(), 3.0, 1.0).unwrap();
        assert_relative_eq!(primary.mass_ratio(), 0.25);

        let secondary = Rc::new(Orbit::from(FixedOrbit::new(Vector3::new(0.0, 4.0, 0.0))));
        primary.bind_secondary(&secondary);
        assert!(primary.is_bound());

        assert_relative_eq!(primary.position_at_time(10.0), barycenter - Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(primary.sidereal_period(), None);
        assert!(primary.is_stable(10.0));
    }

    #[test]
    #[should_panic(expected = "before its secondary was bound")]
    fn test_unbound_panics() {
        let primary = BinaryOrbit::new(FixedOrbit::new(Vector3::zeros()).into(), 0.5);
        primary.position_at_time(0.0);
    }

    #[test]
    #[should_panic(expected = "already bound")]
    fn test_double_bind_panics() {
        let primary = BinaryOrbit::new(FixedOrbit::new(Vector3::zeros()).into(), 0.5);
        let secondary = Rc::new(Orbit::from(FixedOrbit::new(Vector3::x())));
        primary.bind_secondary(&secondary);
        primary.bind_secondary(&secondary);
    }

    #[test]
    #[should_panic(expected = "dropped")]
    fn test_dropped_secondary_panics() {
        let primary = BinaryOrbit::new(FixedOrbit::new(Vector3::zeros()).into(), 0.5);
        {
            let secondary = Rc::new(Orbit::from(FixedOrbit::new(Vector3::x())));
            primary.bind_secondary(&secondary);
        }
        primary.position_at_time(0.0);
    }

    #[test]
    fn test_barycenter_reads_tracked_positions() {
        let sun = TrackedPosition::new(Vector3::zeros());
        let jupiter = TrackedPosition::new(Vector3::new(5.2, 0.0, 0.0));
        let orbit = BarycenterOrbit::new(sun.clone(), 1047.0, jupiter.clone(), 1.0).unwrap();
        assert_relative_eq!(orbit.position_at_time(0.0), Vector3::new(5.2 / 1048.0, 0.0, 0.0));

        // Picks up later writes without being rebuilt
        jupiter.set(Vector3::new(0.0, 5.2, 0.0));
        sun.set(Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(
            orbit.position_at_time(0.0),
            Vector3::new(0.0, 5.2 / 1048.0, 1.0 - 1.0 / 1048.0),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_barycenter_rejects_massless_pair() {
        let result = BarycenterOrbit::new(TrackedPosition::default(), 0.0, TrackedPosition::default(), 0.0);
        assert_eq!(result.unwrap_err(), OrbitError::InvalidMass(0.0));
    }

    #[test]
    fn test_barycenter_rotates_into_common_frame() {
        let a = TrackedPosition::new(Vector3::zeros());
        let b = TrackedPosition::new(Vector3::new(0.0, 2.0, 0.0));
        let orbit = BarycenterOrbit::new(a, 1.0, b, 1.0)
            .unwrap()
            .with_parent_frame(ParentFrame::j2000_equatorial());

        // Equatorial +y tilts up out of the ecliptic by the obliquity
        let expected = Vector3::new(0.0, J2000_OBLIQUITY.cos(), J2000_OBLIQUITY.sin());
        assert_relative_eq!(orbit.position_at_time(0.0), expected, epsilon = 1e-12);
        assert_relative_eq!(orbit.position_at_time(0.0).norm(), 1.0, epsilon = 1e-12);
    }
}
