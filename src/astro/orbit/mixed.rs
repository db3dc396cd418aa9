use nalgebra::Vector3;
use tracing::debug;

use super::elliptical::EllipticalOrbit;
use super::special::SpecialEphemerisOrbit;
use crate::astro::state_vector::{StateVector, StateVectorConverter};
use crate::consts::ONE_MINUTE;
use crate::error::OrbitResult;
use crate::math::intervals::Interval;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixedBranch {
    BeforeWindow,
    InWindow,
    AfterWindow,
}

/// A special ephemeris that is only trusted inside `[begin, end)`. Outside
/// that window it continues along elliptical orbits fitted to the ephemeris
/// at the window's edges.
#[derive(Debug, Clone)]
pub struct MixedOrbit {
    primary: SpecialEphemerisOrbit,
    window: Interval,
    before: EllipticalOrbit,
    after: EllipticalOrbit,
}

impl MixedOrbit {
    /// `period` (days) and `central_mass` (kg) shape the fitted orbits.
    ///
    /// Panics if `end <= begin`.
    pub fn new(
        primary: SpecialEphemerisOrbit,
        begin: f64,
        end: f64,
        period: f64,
        central_mass: f64,
    ) -> OrbitResult<Self> {
        assert!(
            end > begin,
            "Illegal orbit configuration: validity window [{}, {}) is empty",
            begin,
            end
        );

        let before = Self::fit_at(&primary, begin, period, central_mass)?;
        let after = Self::fit_at(&primary, end, period, central_mass)?;
        debug!(
            name = primary.name(),
            begin,
            end,
            before_e = before.eccentricity(),
            after_e = after.eccentricity(),
            "built mixed orbit"
        );

        Ok(Self {
            primary,
            window: Interval::new(begin, end),
            before,
            after,
        })
    }

    /// Fits an ellipse to the primary's unrotated position and a one-minute
    /// forward difference. The fitted orbit reuses the primary's frame.
    fn fit_at(
        primary: &SpecialEphemerisOrbit,
        epoch: f64,
        period: f64,
        central_mass: f64,
    ) -> OrbitResult<EllipticalOrbit> {
        let p0 = primary.local_position_at_time(epoch);
        let p1 = primary.local_position_at_time(epoch + ONE_MINUTE);
        let velocity = (p1 - p0) / ONE_MINUTE;

        let converter =
            StateVectorConverter::new(period, central_mass, epoch, primary.parent_frame())?;
        converter.convert(&StateVector::from_ecliptic_au(p0, velocity))
    }

    pub fn branch_at(&self, time: f64) -> MixedBranch {
        if time < self.window.lo() {
            MixedBranch::BeforeWindow
        } else if self.window.contains_half_open(time) {
            MixedBranch::InWindow
        } else {
            MixedBranch::AfterWindow
        }
    }

    pub fn window(&self) -> Interval {
        self.window
    }

    pub fn primary(&self) -> &SpecialEphemerisOrbit {
        &self.primary
    }

    pub fn before(&self) -> &EllipticalOrbit {
        &self.before
    }

    pub fn after(&self) -> &EllipticalOrbit {
        &self.after
    }

    pub fn position_at_time(&self, time: f64) -> Vector3<f64> {
        match self.branch_at(time) {
            MixedBranch::BeforeWindow => self.before.position_at_time(time),
            MixedBranch::InWindow => self.primary.position_at_time(time),
            MixedBranch::AfterWindow => self.after.position_at_time(time),
        }
    }

    pub fn fast_position_at_time(&self, reference_epoch: f64, time: f64) -> Vector3<f64> {
        match self.branch_at(time) {
            MixedBranch::InWindow => self.primary.fast_position_at_time(reference_epoch, time),
            _ => self.position_at_time(time),
        }
    }

    pub fn is_stable(&self, time: f64) -> bool {
        match self.branch_at(time) {
            MixedBranch::InWindow => self.primary.is_stable(),
            _ => true,
        }
    }

    pub fn sidereal_period(&self) -> Option<f64> {
        self.before.sidereal_period()
    }

    pub fn bounding_radius(&self) -> Option<f64> {
        let fitted = self
            .before
            .bounding_radius()
            .into_iter()
            .chain(self.after.bounding_radius())
            .chain(self.primary.bounding_radius());
        fitted.reduce(f64::max)
    }
}
