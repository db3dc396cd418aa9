//! A registry of bodies that advances them all to a common time.
//!
//! Bodies are updated in the order they were added. A body's parent, and any
//! body a barycenter refers to, must already be in the orrery, so their
//! positions are always current by the time they are read.

use std::rc::Rc;

use nalgebra::Vector3;
use tracing::{debug, info};

use crate::astro::ephemeris;
use crate::astro::{BarycenterOrbit, FixedOrbit, Orbit, SpecialEphemerisOrbit, TrackedPosition};
use crate::error::{OrbitError, OrbitResult};
use crate::model::path::{BodyClass, PathSampler};

mod body;

pub use body::{Body, BodyID};

#[derive(Debug)]
pub struct Orrery {
    bodies: Vec<Body>,
    time: f64,
}

impl Orrery {
    pub fn new(time: f64) -> Self {
        Self {
            bodies: Vec::new(),
            time,
        }
    }

    /// The Sun at the origin, and every built-in ephemeris with a sampled
    /// path, positioned at `time`.
    pub fn solar_system(time: f64) -> OrbitResult<Self> {
        let mut orrery = Self::new(time);
        let sun = orrery.add_body("Sun", FixedOrbit::new(Vector3::zeros()), None);

        for entry in ephemeris::entries() {
            let parent = match entry.parent {
                Some(name) => orrery.find(name),
                None => Some(sun),
            };
            let orbit = SpecialEphemerisOrbit::from_registry(entry.name)?;
            let id = orrery.add_body(entry.name, orbit, parent);

            let class = if entry.parent.is_some() {
                BodyClass::Moon
            } else {
                BodyClass::Planet
            };
            orrery.enable_path(id, class)?;
        }

        orrery.update_time(time);
        info!(bodies = orrery.bodies.len(), time, "built solar system");
        Ok(orrery)
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.bodies.iter()
    }

    pub fn body(&self, id: BodyID) -> &Body {
        &self.bodies[id.0]
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<BodyID> {
        self.bodies
            .iter()
            .find(|body| body.name.eq_ignore_ascii_case(name))
            .map(|body| body.id)
    }

    pub fn add_body(
        &mut self,
        name: impl Into<String>,
        orbit: impl Into<Orbit>,
        parent: Option<BodyID>,
    ) -> BodyID {
        let id = BodyID(self.bodies.len());
        if let Some(parent) = parent {
            assert!(
                parent < id,
                "Parent {:?} must be added before its child {:?}",
                parent,
                id
            );
        }

        let orbit: Rc<Orbit> = Rc::new(orbit.into());
        let name = name.into();
        debug!(?id, %name, kind = orbit.kind(), ?parent, "adding body");

        self.bodies.push(Body {
            id,
            name,
            parent,
            orbit,
            position: TrackedPosition::default(),
            relative_position: Vector3::zeros(),
            path: None,
            path_visibility: 1.0,
        });
        id
    }

    /// Adds the barycenter of two existing bodies. It has no parent, since
    /// it is placed from their heliocentric positions.
    pub fn add_barycenter(
        &mut self,
        name: impl Into<String>,
        body_a: BodyID,
        mass_a: f64,
        body_b: BodyID,
        mass_b: f64,
    ) -> OrbitResult<BodyID> {
        let orbit = BarycenterOrbit::new(
            self.tracked_position(body_a),
            mass_a,
            self.tracked_position(body_b),
            mass_b,
        )?;
        Ok(self.add_body(name, orbit, None))
    }

    /// Shared handle to a body's heliocentric position.
    pub fn tracked_position(&self, id: BodyID) -> TrackedPosition {
        self.bodies[id.0].position.clone()
    }

    /// Completes a binary pair once both bodies exist. `primary` must have a
    /// [BinaryOrbit](crate::astro::BinaryOrbit).
    pub fn bind_binary_secondary(&mut self, primary: BodyID, secondary: BodyID) {
        let secondary_orbit = Rc::clone(&self.bodies[secondary.0].orbit);
        let body = &self.bodies[primary.0];
        match body.orbit.as_binary() {
            Some(binary) => binary.bind_secondary(&secondary_orbit),
            None => panic!("Body {} does not have a binary orbit", body.name),
        }
    }

    /// Starts sampling a path for this body, one sidereal period long.
    pub fn enable_path(&mut self, id: BodyID, class: BodyClass) -> OrbitResult<()> {
        let body = &mut self.bodies[id.0];
        let period = body
            .orbit
            .sidereal_period()
            .ok_or_else(|| OrbitError::NoSiderealPeriod(body.name.clone()))?;

        let mut sampler = PathSampler::for_class(class);
        sampler.init(period);
        debug!(name = %body.name, ?class, period, "enabled path");
        body.path = Some(sampler);
        Ok(())
    }

    pub fn set_path_visibility(&mut self, id: BodyID, visibility: f64) {
        self.bodies[id.0].path_visibility = visibility;
    }

    pub fn position(&self, id: BodyID) -> Vector3<f64> {
        self.bodies[id.0].position()
    }

    pub fn relative_position(&self, id: BodyID) -> Vector3<f64> {
        self.bodies[id.0].relative_position()
    }

    pub fn path(&self, id: BodyID) -> Option<&PathSampler> {
        self.bodies[id.0].path()
    }

    /// Moves every body to `time`, in insertion order, and refreshes paths.
    pub fn update_time(&mut self, time: f64) {
        self.time = time;

        for index in 0..self.bodies.len() {
            let parent_position = match self.bodies[index].parent {
                Some(parent) => self.bodies[parent.0].position.get(),
                None => Vector3::zeros(),
            };

            let body = &mut self.bodies[index];
            let relative = body.orbit.position_at_time(time);
            body.relative_position = relative;
            body.position.set(parent_position + relative);

            if let Some(path) = body.path.as_mut() {
                path.compute(&body.orbit, time, body.path_visibility);
            }
        }
    }
}
