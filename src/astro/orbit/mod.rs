//! Every way a body can move.
//!
//! [Orbit] is a closed set of motion laws, each a function from time (JDE) to
//! a position in AU, relative to the body's parent and expressed in the
//! common ecliptic frame.

use nalgebra::Vector3;

mod binary;
mod comet;
mod elliptical;
mod fixed;
mod mixed;
mod special;

pub use binary::{BarycenterOrbit, BinaryOrbit, TrackedPosition};
pub use comet::{CometElements, CometOrbit, COMET_MAX_ITERATIONS, COMET_TOLERANCE};
pub use elliptical::EllipticalOrbit;
pub use fixed::{FixedOrbit, InterpolatedOrbit};
pub use mixed::{MixedBranch, MixedOrbit};
pub use special::SpecialEphemerisOrbit;

#[derive(Debug, Clone)]
pub enum Orbit {
    Elliptical(EllipticalOrbit),
    Comet(CometOrbit),
    SpecialEphemeris(SpecialEphemerisOrbit),
    Mixed(MixedOrbit),
    Binary(BinaryOrbit),
    Barycenter(BarycenterOrbit),
    Fixed(FixedOrbit),
    Interpolated(InterpolatedOrbit),
}

impl Orbit {
    pub fn position_at_time(&self, time: f64) -> Vector3<f64> {
        match self {
            Orbit::Elliptical(orbit) => orbit.position_at_time(time),
            Orbit::Comet(orbit) => orbit.position_at_time(time),
            Orbit::SpecialEphemeris(orbit) => orbit.position_at_time(time),
            Orbit::Mixed(orbit) => orbit.position_at_time(time),
            Orbit::Binary(orbit) => orbit.position_at_time(time),
            Orbit::Barycenter(orbit) => orbit.position_at_time(time),
            Orbit::Fixed(orbit) => orbit.position_at_time(time),
            Orbit::Interpolated(orbit) => orbit.position_at_time(time),
        }
    }

    /// Approximate position, accurate near `reference_epoch`. Only orbits
    /// with an osculating refinement differ from [position_at_time](Self::position_at_time).
    pub fn fast_position_at_time(&self, reference_epoch: f64, time: f64) -> Vector3<f64> {
        match self {
            Orbit::SpecialEphemeris(orbit) => orbit.fast_position_at_time(reference_epoch, time),
            Orbit::Mixed(orbit) => orbit.fast_position_at_time(reference_epoch, time),
            Orbit::Binary(orbit) => orbit.fast_position_at_time(reference_epoch, time),
            _ => self.position_at_time(time),
        }
    }

    /// Whether a path sampled around `time` can be reused as time moves on.
    pub fn is_stable(&self, time: f64) -> bool {
        match self {
            Orbit::SpecialEphemeris(orbit) => orbit.is_stable(),
            Orbit::Mixed(orbit) => orbit.is_stable(time),
            Orbit::Binary(orbit) => orbit.is_stable(time),
            Orbit::Barycenter(_) => false,
            Orbit::Elliptical(_) | Orbit::Comet(_) | Orbit::Fixed(_) | Orbit::Interpolated(_) => true,
        }
    }

    /// Sidereal period in days, for orbits that repeat.
    pub fn sidereal_period(&self) -> Option<f64> {
        match self {
            Orbit::Elliptical(orbit) => orbit.sidereal_period(),
            Orbit::Comet(orbit) => orbit.sidereal_period(),
            Orbit::SpecialEphemeris(orbit) => orbit.sidereal_period(),
            Orbit::Mixed(orbit) => orbit.sidereal_period(),
            Orbit::Binary(orbit) => orbit.sidereal_period(),
            Orbit::Barycenter(_) | Orbit::Fixed(_) | Orbit::Interpolated(_) => None,
        }
    }

    /// Greatest distance from the parent, when there is one.
    pub fn bounding_radius(&self) -> Option<f64> {
        match self {
            Orbit::Elliptical(orbit) => orbit.bounding_radius(),
            Orbit::Comet(orbit) => orbit.bounding_radius(),
            Orbit::SpecialEphemeris(orbit) => orbit.bounding_radius(),
            Orbit::Mixed(orbit) => orbit.bounding_radius(),
            Orbit::Binary(orbit) => orbit.bounding_radius(),
            Orbit::Fixed(orbit) => Some(orbit.position_at_time(0.0).norm()),
            Orbit::Barycenter(_) | Orbit::Interpolated(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Orbit::Elliptical(_) => "elliptical",
            Orbit::Comet(_) => "comet",
            Orbit::SpecialEphemeris(_) => "special ephemeris",
            Orbit::Mixed(_) => "mixed",
            Orbit::Binary(_) => "binary",
            Orbit::Barycenter(_) => "barycenter",
            Orbit::Fixed(_) => "fixed",
            Orbit::Interpolated(_) => "interpolated",
        }
    }

    pub fn as_binary(&self) -> Option<&BinaryOrbit> {
        match self {
            Orbit::Binary(orbit) => Some(orbit),
            _ => None,
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($inner:ty)),* $(,)?) => {
        $(
            impl From<$inner> for Orbit {
                fn from(orbit: $inner) -> Self {
                    Orbit::$variant(orbit)
                }
            }
        )*
    };
}

impl_from_variant!(
    Elliptical(EllipticalOrbit),
    Comet(CometOrbit),
    SpecialEphemeris(SpecialEphemerisOrbit),
    Mixed(MixedOrbit),
    Binary(BinaryOrbit),
    Barycenter(BarycenterOrbit),
    Fixed(FixedOrbit),
    Interpolated(InterpolatedOrbit),
);
