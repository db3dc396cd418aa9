use std::fmt::Display;

/// A closed interval `[lo, hi]` on the real line. Used both as a root-finding
/// bracket and as a time window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    pub fn new(lo: f64, hi: f64) -> Interval {
        if lo <= hi {
            Self { lo, hi }
        } else {
            Self { lo: hi, hi: lo }
        }
    }

    fn new_unchecked(lo: f64, hi: f64) -> Interval {
        debug_assert!(lo <= hi);
        Self { lo, hi }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn split_left(&self, mid: f64) -> Self {
        assert!(self.contains(mid));
        Self::new_unchecked(self.lo, mid)
    }

    pub fn split_right(&self, mid: f64) -> Self {
        assert!(self.contains(mid));
        Self::new_unchecked(mid, self.hi)
    }

    pub fn width(&self) -> f64 {
        debug_assert!(self.lo <= self.hi);
        self.hi - self.lo
    }

    pub fn midpoint(&self) -> f64 {
        (self.lo + self.hi) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    /// Membership in `[lo, hi)`.
    pub fn contains_half_open(&self, value: f64) -> bool {
        self.lo <= value && value < self.hi
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.lo).min(self.hi)
    }

    /// Where `value` sits in the interval, as a fraction clamped to [0, 1].
    /// A degenerate interval jumps from 0 to 1 at its single point.
    pub fn clamped_fraction(&self, value: f64) -> f64 {
        if self.width() <= 0.0 {
            return if value < self.lo { 0.0 } else { 1.0 };
        }
        (self.clamp(value) - self.lo) / self.width()
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_membership() {
        let window = Interval::new(10.0, 20.0);
        assert!(window.contains(10.0));
        assert!(window.contains(20.0));
        assert!(window.contains_half_open(10.0));
        assert!(!window.contains_half_open(20.0));
        assert!(!window.contains_half_open(9.999));

        // Endpoints get sorted
        assert_eq!(Interval::new(3.0, -1.0), Interval::new(-1.0, 3.0));
    }

    #[test]
    fn test_clamping() {
        let window = Interval::new(0.0, 4.0);
        assert_eq!(window.clamp(-3.0), 0.0);
        assert_eq!(window.clamp(5.0), 4.0);
        assert_eq!(window.clamped_fraction(1.0), 0.25);
        assert_eq!(window.clamped_fraction(100.0), 1.0);
        assert_eq!(Interval::new(2.0, 2.0).clamped_fraction(1.0), 0.0);
        assert_eq!(Interval::new(2.0, 2.0).clamped_fraction(7.0), 1.0);
    }
}
