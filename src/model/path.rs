//! Sampled orbit paths that follow the current time.
//!
//! A [PathSampler] holds one revolution of positions centered on the last
//! sampled time. When time moves by a few sample intervals, the samples are
//! shifted and only the exposed end is recomputed. Sample times sit on an
//! integer grid anchored at the last full resample, so stepping forward and
//! back again reproduces the same samples bit for bit.

use nalgebra::Vector3;
use tracing::trace;

use crate::astro::Orbit;

/// Paths fainter than this aren't sampled at all.
pub const VISIBILITY_THRESHOLD: f64 = 1e-3;

/// What kind of body a path belongs to. Decides how finely it is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyClass {
    Planet,
    Moon,
    Asteroid,
    Comet,
    Artificial,
}

impl BodyClass {
    pub fn sample_count(self) -> usize {
        match self {
            BodyClass::Planet => 360,
            BodyClass::Moon => 180,
            BodyClass::Asteroid => 720,
            // Highly eccentric; most of the curvature is near perihelion
            BodyClass::Comet => 4800,
            BodyClass::Artificial => 180,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PathSampler {
    points: Vec<Vector3<f64>>,
    sample_interval: f64,
    // Sample d is taken at anchor_time + (shift + d - N/2) * sample_interval
    anchor_time: f64,
    shift: i64,
    cached: bool,
    evaluations: u64,
}

impl PathSampler {
    pub fn new(sample_count: usize) -> Self {
        assert!(
            sample_count >= 2,
            "Must have at least two samples, sample_count was {}",
            sample_count
        );
        Self {
            points: vec![Vector3::zeros(); sample_count],
            sample_interval: 0.0,
            anchor_time: 0.0,
            shift: 0,
            cached: false,
            evaluations: 0,
        }
    }

    pub fn for_class(class: BodyClass) -> Self {
        Self::new(class.sample_count())
    }

    /// Spreads the samples over one `period` (days) and drops the cache.
    pub fn init(&mut self, period: f64) {
        self.sample_interval = period / self.points.len() as f64;
        self.cached = false;
    }

    pub fn sample_count(&self) -> usize {
        self.points.len()
    }

    pub fn sample_interval(&self) -> f64 {
        self.sample_interval
    }

    /// The samples in time order; the middle one is at [last_sampled_time](Self::last_sampled_time).
    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    pub fn last_sampled_time(&self) -> f64 {
        self.anchor_time + self.shift as f64 * self.sample_interval
    }

    /// Time at which sample `index` was taken.
    pub fn sample_time(&self, index: usize) -> f64 {
        let center = (self.points.len() / 2) as i64;
        let offset = self.shift + index as i64 - center;
        self.anchor_time + offset as f64 * self.sample_interval
    }

    pub fn is_cached(&self) -> bool {
        self.cached
    }

    /// Total number of orbit evaluations made so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Brings the samples up to date for `now`, reusing as many as possible.
    pub fn compute(&mut self, orbit: &Orbit, now: f64, visibility: f64) {
        if visibility <= VISIBILITY_THRESHOLD || !(self.sample_interval > 0.0) {
            return;
        }

        let n = self.points.len() as i64;
        let offset = (now - self.last_sampled_time()) / self.sample_interval;
        let delta = if offset > 0.0 {
            (offset + 0.5) as i64
        } else {
            (offset - 0.5) as i64
        };

        if self.cached && 0 < delta && delta < n {
            trace!(delta, "shifting path forward");
            self.shift_forward(orbit, delta as usize);
        } else if self.cached && -n < delta && delta < 0 {
            trace!(delta, "shifting path backward");
            self.shift_backward(orbit, (-delta) as usize);
        } else if delta != 0 || !self.cached {
            trace!(delta, cached = self.cached, "resampling whole path");
            self.resample(orbit, now);
        } else {
            return;
        }

        self.cached = orbit.is_stable(now);
    }

    fn shift_forward(&mut self, orbit: &Orbit, delta: usize) {
        let n = self.points.len();
        self.shift += delta as i64;
        self.points.copy_within(delta.., 0);
        self.fill(orbit, n - delta..n);
    }

    fn shift_backward(&mut self, orbit: &Orbit, delta: usize) {
        let n = self.points.len();
        self.shift -= delta as i64;
        self.points.copy_within(..n - delta, delta);
        self.fill(orbit, 0..delta);
    }

    fn resample(&mut self, orbit: &Orbit, now: f64) {
        self.anchor_time = now;
        self.shift = 0;
        self.fill(orbit, 0..self.points.len());
    }

    fn fill(&mut self, orbit: &Orbit, indices: std::ops::Range<usize>) {
        let reference_epoch = self.last_sampled_time();
        for index in indices {
            let time = self.sample_time(index);
            self.points[index] = orbit.fast_position_at_time(reference_epoch, time);
            self.evaluations += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::astro::{EllipticalOrbit, OrbitalElements, ParentFrame, SpecialEphemerisOrbit};
    use crate::consts::J2000;

    const PERIOD: f64 = 360.0;

    fn stable_orbit() -> Orbit {
        EllipticalOrbit::new(OrbitalElements {
            pericenter_distance: 1.0,
            eccentricity: 0.3,
            inclination: 0.2,
            ascending_node: 0.5,
            arg_of_pericenter: 1.0,
            mean_anomaly_at_epoch: 0.0,
            period: PERIOD,
            epoch: J2000,
            parent_frame: ParentFrame::default(),
        })
        .into()
    }

    fn sampled(orbit: &Orbit, count: usize, now: f64) -> PathSampler {
        let mut sampler = PathSampler::new(count);
        sampler.init(PERIOD);
        sampler.compute(orbit, now, 1.0);
        sampler
    }

    #[test]
    fn test_samples_are_centered_on_now() {
        let orbit = stable_orbit();
        let sampler = sampled(&orbit, 36, J2000 + 7.0);

        assert_eq!(sampler.sample_interval(), 10.0);
        assert_eq!(sampler.last_sampled_time(), J2000 + 7.0);
        assert_eq!(sampler.points()[18], orbit.position_at_time(J2000 + 7.0));
        assert_eq!(sampler.points()[0], orbit.position_at_time(J2000 + 7.0 - 180.0));
        assert_eq!(sampler.evaluations(), 36);
        assert!(sampler.is_cached());
    }

    #[test]
    fn test_same_time_is_free() {
        let orbit = stable_orbit();
        let mut sampler = sampled(&orbit, 36, J2000);
        let before = sampler.points().to_vec();

        sampler.compute(&orbit, J2000, 1.0);
        sampler.compute(&orbit, J2000 + 4.9, 1.0);
        assert_eq!(sampler.evaluations(), 36);
        assert_eq!(sampler.points(), &before[..]);
    }

    #[test]
    fn test_forward_shift_computes_only_the_tail() {
        let orbit = stable_orbit();
        let mut sampler = sampled(&orbit, 36, J2000);

        sampler.compute(&orbit, J2000 + 30.0, 1.0);
        assert_eq!(sampler.evaluations(), 36 + 3);
        assert_eq!(sampler.last_sampled_time(), J2000 + 30.0);

        // Same samples as a fresh path, up to rounding in the sample times
        let fresh = sampled(&orbit, 36, J2000 + 30.0);
        for (shifted, expected) in sampler.points().iter().zip(fresh.points()) {
            assert_relative_eq!(shifted, expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_backward_shift_computes_only_the_head() {
        let orbit = stable_orbit();
        let mut sampler = sampled(&orbit, 36, J2000);

        sampler.compute(&orbit, J2000 - 21.0, 1.0);
        assert_eq!(sampler.evaluations(), 36 + 2);
        assert_eq!(sampler.last_sampled_time(), J2000 - 20.0);
        assert_relative_eq!(sampler.points()[18], orbit.position_at_time(J2000 - 20.0), epsilon = 1e-12);
    }

    #[test]
    fn test_forward_then_back_is_bit_identical() {
        let orbit = stable_orbit();
        let mut sampler = sampled(&orbit, 36, J2000 + 0.3);
        let original = sampler.points().to_vec();
        let dt = sampler.sample_interval();

        sampler.compute(&orbit, J2000 + 0.3 + dt, 1.0);
        assert_ne!(sampler.points(), &original[..]);
        sampler.compute(&orbit, J2000 + 0.3, 1.0);

        assert_eq!(sampler.points(), &original[..]);
        assert_eq!(sampler.last_sampled_time(), J2000 + 0.3);
        assert_eq!(sampler.evaluations(), 36 + 2);
    }

    #[test]
    fn test_rounding_is_symmetric() {
        let orbit = stable_orbit();
        let mut sampler = sampled(&orbit, 36, J2000);

        // Just under half an interval either way stays put
        sampler.compute(&orbit, J2000 + 4.99, 1.0);
        sampler.compute(&orbit, J2000 - 4.99, 1.0);
        assert_eq!(sampler.evaluations(), 36);

        // Exactly half an interval rounds away from zero
        sampler.compute(&orbit, J2000 - 5.0, 1.0);
        assert_eq!(sampler.last_sampled_time(), J2000 - 10.0);
        assert_eq!(sampler.evaluations(), 37);
    }

    #[test]
    fn test_large_jump_resamples() {
        let orbit = stable_orbit();
        let mut sampler = sampled(&orbit, 36, J2000);

        sampler.compute(&orbit, J2000 + 360.0, 1.0);
        assert_eq!(sampler.evaluations(), 72);
        assert_eq!(sampler.last_sampled_time(), J2000 + 360.0);

        sampler.compute(&orbit, J2000 - 1000.0, 1.0);
        assert_eq!(sampler.evaluations(), 108);
    }

    #[test]
    fn test_unstable_orbit_always_resamples() {
        let moon = Orbit::from(SpecialEphemerisOrbit::from_registry("Moon").unwrap());
        let mut sampler = PathSampler::for_class(BodyClass::Moon);
        sampler.init(27.3);

        sampler.compute(&moon, J2000, 1.0);
        assert!(!sampler.is_cached());
        sampler.compute(&moon, J2000, 1.0);
        assert_eq!(sampler.evaluations(), 2 * 180);
    }

    #[test]
    fn test_invisible_or_uninitialized_does_nothing() {
        let orbit = stable_orbit();

        let mut sampler = PathSampler::new(36);
        sampler.compute(&orbit, J2000, 1.0);
        assert_eq!(sampler.evaluations(), 0);

        sampler.init(PERIOD);
        sampler.compute(&orbit, J2000, 0.0);
        sampler.compute(&orbit, J2000, VISIBILITY_THRESHOLD);
        assert_eq!(sampler.evaluations(), 0);

        sampler.init(-1.0);
        sampler.compute(&orbit, J2000, 1.0);
        assert_eq!(sampler.evaluations(), 0);
    }

    #[test]
    fn test_init_drops_cache() {
        let orbit = stable_orbit();
        let mut sampler = sampled(&orbit, 36, J2000);
        sampler.init(PERIOD);
        assert!(!sampler.is_cached());

        sampler.compute(&orbit, J2000, 1.0);
        assert_eq!(sampler.evaluations(), 72);
    }

    #[test]
    fn test_sample_counts() {
        assert_eq!(PathSampler::for_class(BodyClass::Planet).sample_count(), 360);
        assert_eq!(PathSampler::for_class(BodyClass::Comet).sample_count(), 4800);
        assert_eq!(BodyClass::Asteroid.sample_count(), 720);
    }
}
