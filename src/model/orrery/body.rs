use std::rc::Rc;

use nalgebra::Vector3;

use crate::astro::{Orbit, TrackedPosition};
use crate::model::path::PathSampler;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

#[derive(Debug)]
pub struct Body {
    pub id: BodyID,
    pub name: String,
    pub parent: Option<BodyID>,
    pub(super) orbit: Rc<Orbit>,
    // Heliocentric, as of the last update
    pub(super) position: TrackedPosition,
    pub(super) relative_position: Vector3<f64>,
    pub(super) path: Option<PathSampler>,
    pub(super) path_visibility: f64,
}

impl Body {
    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    pub fn position(&self) -> Vector3<f64> {
        self.position.get()
    }

    /// Position relative to the parent body.
    pub fn relative_position(&self) -> Vector3<f64> {
        self.relative_position
    }

    /// The sampled path, relative to the parent body.
    pub fn path(&self) -> Option<&PathSampler> {
        self.path.as_ref()
    }
}
