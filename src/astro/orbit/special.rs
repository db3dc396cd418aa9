use nalgebra::{Rotation3, Vector3};
use tracing::debug;

use crate::astro::elements::ParentFrame;
use crate::astro::ephemeris::{self, EphemerisFn, OsculatingFn};
use crate::error::{OrbitError, OrbitResult};

/// An orbit backed by an external position function, usually a
/// high-precision series.
#[derive(Debug, Clone)]
pub struct SpecialEphemerisOrbit {
    name: String,
    position: EphemerisFn,
    osculating: Option<OsculatingFn>,
    period: Option<f64>,
    bounding_radius: Option<f64>,
    stable: bool,
    frame: ParentFrame,
    rotation: Rotation3<f64>,
}

impl SpecialEphemerisOrbit {
    pub fn new(name: impl Into<String>, position: EphemerisFn) -> Self {
        Self {
            name: name.into(),
            position,
            osculating: None,
            period: None,
            bounding_radius: None,
            stable: true,
            frame: ParentFrame::ecliptic(),
            rotation: Rotation3::identity(),
        }
    }

    /// Builds the orbit for a registered ephemeris.
    pub fn from_registry(name: &str) -> OrbitResult<Self> {
        let entry =
            ephemeris::lookup(name).ok_or_else(|| OrbitError::UnknownEphemeris(name.to_owned()))?;
        debug!(name = entry.name, stable = entry.stable, "loaded special ephemeris");

        Ok(Self::new(entry.name, entry.position)
            .with_osculating(entry.osculating)
            .with_period(entry.series.period())
            .with_bounding_radius(entry.series.bounding_radius())
            .with_stability(entry.stable))
    }

    pub fn with_osculating(mut self, osculating: OsculatingFn) -> Self {
        self.osculating = Some(osculating);
        self
    }

    pub fn with_period(mut self, period: f64) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_bounding_radius(mut self, radius: f64) -> Self {
        self.bounding_radius = Some(radius);
        self
    }

    /// Marks whether a sampled path of this orbit can be reused from one
    /// frame to the next.
    pub fn with_stability(mut self, stable: bool) -> Self {
        self.stable = stable;
        self
    }

    pub fn with_parent_frame(mut self, frame: ParentFrame) -> Self {
        self.frame = frame;
        self.rotation = frame.rotation();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_frame(&self) -> ParentFrame {
        self.frame
    }

    pub fn has_osculating(&self) -> bool {
        self.osculating.is_some()
    }

    pub fn is_stable(&self) -> bool {
        self.stable
    }

    pub fn sidereal_period(&self) -> Option<f64> {
        self.period
    }

    pub fn bounding_radius(&self) -> Option<f64> {
        self.bounding_radius
    }

    /// The raw function output, before the parent frame is applied.
    pub fn local_position_at_time(&self, time: f64) -> Vector3<f64> {
        (self.position)(time)
    }

    pub fn position_at_time(&self, time: f64) -> Vector3<f64> {
        self.rotation * self.local_position_at_time(time)
    }

    /// Cheaper evaluation valid near `reference_epoch`. Falls back to the full
    /// series when there is no osculating function.
    pub fn fast_position_at_time(&self, reference_epoch: f64, time: f64) -> Vector3<f64> {
        match self.osculating {
            Some(osculating) => self.rotation * osculating(reference_epoch, time),
            None => self.position_at_time(time),
        }
    }
}
