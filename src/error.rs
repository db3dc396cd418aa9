//! Construction-time failures.
//!
//! Evaluating an orbit never fails; only building one can. Contract violations
//! (an inverted time window, an unbound binary secondary) panic instead.

use thiserror::Error;

pub type OrbitResult<T> = Result<T, OrbitError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrbitError {
    #[error("no special ephemeris is registered under the name {0:?}")]
    UnknownEphemeris(String),

    #[error("state vector is degenerate: angular momentum {angular_momentum:e} km^2/s is too small")]
    DegenerateStateVector { angular_momentum: f64 },

    #[error("orbital period must be positive and finite, got {0}")]
    InvalidPeriod(f64),

    #[error("central mass must be positive and finite, got {0}")]
    InvalidMass(f64),

    #[error(
        "target period is too short: a body at {radius:e} km cannot be bound with semi-major axis {semimajor_axis:e} km"
    )]
    PeriodTooShort { radius: f64, semimajor_axis: f64 },

    #[error("body {0:?} has no sidereal period, so its path cannot be sampled")]
    NoSiderealPeriod(String),

    #[error("root finding did not converge after {iterations} iterations near {estimate}")]
    NoConvergence { iterations: usize, estimate: f64 },
}
