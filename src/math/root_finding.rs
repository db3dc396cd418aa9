use super::intervals::Interval;
use crate::error::{OrbitError, OrbitResult};

/// Very primitive way to construct a bracket for future root-finding.
/// Simply doubles the radius until a bracket with opposite signs at the
/// endpoints is found.
pub fn find_root_bracket(
    f: impl Fn(f64) -> f64,
    center: f64,
    mut radius: f64,
    num_iterations: usize,
) -> OrbitResult<Interval> {
    for _ in 0..num_iterations {
        let a = center - radius;
        let b = center + radius;

        if f(a) * f(b) < 0.0 {
            return Ok(Interval::new(a, b));
        }

        // Double the search radius
        radius *= 2.0;
    }

    Err(OrbitError::NoConvergence {
        iterations: num_iterations,
        estimate: center,
    })
}

// Adapted from `rtsafe` in http://www.grad.hr/nastava/gs/prg/NumericalRecipesinC.pdf
#[allow(clippy::float_cmp)]
pub fn newton_plus_bisection(
    f_and_f_prime: impl Fn(f64) -> (f64, f64),
    mut interval: Interval,
    num_iterations: usize,
) -> OrbitResult<f64> {
    // Initial setup: we guess right in the middle of the interval. Also, we need to
    // determine which way f is oriented.
    let mut guess = interval.midpoint();
    let lo_is_neg = f_and_f_prime(interval.lo()).0 < 0.0;

    for _ in 0..num_iterations {
        let (f, f_prime) = f_and_f_prime(guess);
        if f == 0.0 {
            return Ok(guess);
        }

        // Update the bracket
        interval = match (lo_is_neg, f < 0.0) {
            (true, true) => interval.split_right(guess),   // - - +
            (true, false) => interval.split_left(guess),   // - + +
            (false, true) => interval.split_left(guess),   // + - -
            (false, false) => interval.split_right(guess), // + + -
        };

        // If the interval is too small, return
        let midpoint = interval.midpoint();
        if midpoint == interval.lo() || midpoint == interval.hi() {
            return Ok(guess);
        }

        // Newton step, unless it escapes the bracket
        let newton_guess = guess - f / f_prime;
        guess = if interval.contains(newton_guess)
            && newton_guess != interval.lo()
            && newton_guess != interval.hi()
        {
            newton_guess
        } else {
            interval.midpoint()
        };
    }

    Err(OrbitError::NoConvergence {
        iterations: num_iterations,
        estimate: guess,
    })
}

/// Outcome of an unbracketed Newton iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonResult {
    pub root: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Plain Newton iteration from `x0`, stopping once a step is smaller than
/// `tolerance` or after `max_iterations` steps. The last iterate is returned
/// either way.
pub fn newton_with_tolerance(
    f_and_f_prime: impl Fn(f64) -> (f64, f64),
    x0: f64,
    tolerance: f64,
    max_iterations: usize,
) -> NewtonResult {
    let mut x = x0;
    for iteration in 1..=max_iterations {
        let (f, f_prime) = f_and_f_prime(x);
        let step = f / f_prime;
        x -= step;
        if step.abs() < tolerance {
            return NewtonResult {
                root: x,
                iterations: iteration,
                converged: true,
            };
        }
    }

    NewtonResult {
        root: x,
        iterations: max_iterations,
        converged: false,
    }
}
