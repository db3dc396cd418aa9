//! Positions of celestial bodies as functions of time.
//!
//! - [Orbit] is the motion law of a single body, one variant per family.
//! - [OrbitalElements] and [ParentFrame] describe Keplerian orbits and the
//!   frame they are given in.
//! - [ephemeris] holds the built-in named series.
//! - [StateVectorConverter] turns a position and velocity into an ellipse.

pub mod elements;
pub mod ephemeris;
pub mod orbit;
pub mod state_vector;

pub use elements::{OrbitalElements, ParentFrame};
pub use orbit::{
    BarycenterOrbit, BinaryOrbit, CometElements, CometOrbit, EllipticalOrbit, FixedOrbit,
    InterpolatedOrbit, MixedBranch, MixedOrbit, Orbit, SpecialEphemerisOrbit, TrackedPosition,
};
pub use state_vector::{StateVector, StateVectorConverter};
