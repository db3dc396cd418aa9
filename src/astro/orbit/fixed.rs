use nalgebra::Vector3;

use crate::math::intervals::Interval;

/// A body that doesn't move relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedOrbit {
    position: Vector3<f64>,
}

impl FixedOrbit {
    pub fn new(position: Vector3<f64>) -> Self {
        Self { position }
    }

    pub fn position_at_time(&self, _time: f64) -> Vector3<f64> {
        self.position
    }
}

/// Straight-line motion between two points over a time window. Outside the
/// window the body waits at the nearest endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatedOrbit {
    start: Vector3<f64>,
    end: Vector3<f64>,
    window: Interval,
}

impl InterpolatedOrbit {
    pub fn new(start: Vector3<f64>, end: Vector3<f64>, start_time: f64, end_time: f64) -> Self {
        assert!(
            end_time >= start_time,
            "Illegal orbit configuration: interpolation ends at {} before it starts at {}",
            end_time,
            start_time
        );
        Self {
            start,
            end,
            window: Interval::new(start_time, end_time),
        }
    }

    pub fn window(&self) -> Interval {
        self.window
    }

    pub fn position_at_time(&self, time: f64) -> Vector3<f64> {
        let s = self.window.clamped_fraction(time);
        self.start.lerp(&self.end, s)
    }
}
