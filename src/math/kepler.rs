//! Solvers for Kepler's equation.
//!
//! The real-time solvers run a fixed number of iterations per eccentricity
//! regime, so every call costs the same no matter how badly conditioned the
//! input is. Converged variants are provided for callers that can afford a
//! bracketed search instead (exports, scripting, tests).

use tracing::warn;

use super::intervals::Interval;
use super::root_finding::{find_root_bracket, newton_plus_bisection};

/// Successive substitution steps for `0 < e < 0.2`.
pub const SUBSTITUTION_ITERATIONS: usize = 5;
/// Newton steps for `0.2 <= e < 0.9`.
pub const NEWTON_ITERATIONS: usize = 6;
/// Laguerre-Conway steps for `0.9 <= e < 1`.
pub const LAGUERRE_CONWAY_ITERATIONS: usize = 8;
/// Laguerre-Conway steps for hyperbolic orbits.
pub const HYPERBOLIC_ITERATIONS: usize = 30;

pub const LOW_ECCENTRICITY_LIMIT: f64 = 0.2;
pub const HIGH_ECCENTRICITY_LIMIT: f64 = 0.9;

/// Cap for the converged solvers. Bisection alone exhausts an f64 bracket
/// well before this.
pub const CONVERGED_MAX_ITERATIONS: usize = 200;

/// How an orbit should solve Kepler's equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverPrecision {
    /// Fixed iteration budget per regime. Predictable cost, used every frame.
    #[default]
    FixedIterations,
    /// Bracketed Newton iteration run to machine precision.
    Converged,
}

/// Sign function with `sign(0) == 0`, unlike `f64::signum`.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Solves Kepler's equation for the eccentric anomaly (or, when `e > 1`, the
/// hyperbolic anomaly) using a fixed iteration budget chosen by `e`.
///
/// `e == 1` returns `mean_anomaly` unchanged: parabolic motion is not solved
/// here, see [solve_parabolic].
pub fn solve_elliptical(mean_anomaly: f64, e: f64) -> f64 {
    debug_assert!(e >= 0.0, "negative eccentricity {}", e);
    let m = mean_anomaly;

    if e == 0.0 {
        m
    } else if e < LOW_ECCENTRICITY_LIMIT {
        let mut ecc_anomaly = m;
        for _ in 0..SUBSTITUTION_ITERATIONS {
            ecc_anomaly = m + e * ecc_anomaly.sin();
        }
        ecc_anomaly
    } else if e < HIGH_ECCENTRICITY_LIMIT {
        let mut ecc_anomaly = m;
        for _ in 0..NEWTON_ITERATIONS {
            ecc_anomaly +=
                (m + e * ecc_anomaly.sin() - ecc_anomaly) / (1.0 - e * ecc_anomaly.cos());
        }
        ecc_anomaly
    } else if e < 1.0 {
        let mut ecc_anomaly = m + 0.85 * e * sign(m.sin());
        for _ in 0..LAGUERRE_CONWAY_ITERATIONS {
            let s = e * ecc_anomaly.sin();
            let c = e * ecc_anomaly.cos();
            ecc_anomaly += laguerre_conway_step(ecc_anomaly - s - m, 1.0 - c, s);
        }
        ecc_anomaly
    } else if e == 1.0 {
        m
    } else {
        solve_hyperbolic(m, e)
    }
}

fn solve_hyperbolic(mean_anomaly: f64, e: f64) -> f64 {
    // The equation is odd in M, and the seed below is only defined for M >= 0
    let m = mean_anomaly.abs();

    let mut hyp_anomaly = (2.0 * m / e + 1.85).ln();
    for _ in 0..HYPERBOLIC_ITERATIONS {
        let s = e * hyp_anomaly.sinh();
        let c = e * hyp_anomaly.cosh();
        hyp_anomaly += laguerre_conway_step(s - hyp_anomaly - m, c - 1.0, s);
    }

    hyp_anomaly.copysign(mean_anomaly)
}

/// One Laguerre-Conway correction for `f`, `f'` and `f''` at the current
/// estimate. The denominator is not guarded against zero.
#[inline]
fn laguerre_conway_step(f: f64, f1: f64, f2: f64) -> f64 {
    -5.0 * f / (f1 + sign(f1) * (16.0 * f1 * f1 - 20.0 * f * f2).abs().sqrt())
}

/// Solves Barker's equation in closed form. `scaled_time` is `n·(t - T)`
/// with the parabolic mean motion `n = 1.5·k / (q·sqrt(2q))`. Returns
/// `tan(ν/2)`.
pub fn solve_parabolic(scaled_time: f64) -> f64 {
    let a = scaled_time;
    let h = (a * a + 1.0).sqrt();
    let c = (a.abs() + h).cbrt();
    let c = c * c;
    2.0 * a / (1.0 + c + 1.0 / c)
}

/// Elliptic Kepler equation solved to machine precision with a bracketed
/// Newton search. Falls back to [solve_elliptical] if the search fails.
pub fn solve_elliptical_converged(mean_anomaly: f64, e: f64) -> f64 {
    assert!(e < 1.0, "converged elliptic solver needs e < 1, got {}", e);
    let m = mean_anomaly;

    // E - e sin E - M is negative at M - e - 0.1 and positive at M + e + 0.1
    let kepler = |x: f64| (x - e * x.sin() - m, 1.0 - e * x.cos());
    let bracket = Interval::new(m - e - 0.1, m + e + 0.1);

    newton_plus_bisection(kepler, bracket, CONVERGED_MAX_ITERATIONS).unwrap_or_else(|err| {
        warn!(e, mean_anomaly, %err, "converged Kepler solve failed, using fixed iterations");
        solve_elliptical(m, e)
    })
}

/// Hyperbolic Kepler equation solved to machine precision.
pub fn solve_hyperbolic_converged(mean_anomaly: f64, e: f64) -> f64 {
    assert!(e > 1.0, "converged hyperbolic solver needs e > 1, got {}", e);
    let m = mean_anomaly;

    let kepler = |x: f64| e * x.sinh() - x - m;
    let kepler_der = |x: f64| (kepler(x), e * x.cosh() - 1.0);

    find_root_bracket(kepler, (m / e).asinh(), 1.0, 64)
        .and_then(|bracket| newton_plus_bisection(kepler_der, bracket, CONVERGED_MAX_ITERATIONS))
        .unwrap_or_else(|err| {
            warn!(e, mean_anomaly, %err, "converged hyperbolic solve failed, using fixed iterations");
            solve_hyperbolic(m, e)
        })
}

/// Dispatches on `precision`. Parabolic input passes through unchanged.
pub fn solve_with_precision(mean_anomaly: f64, e: f64, precision: SolverPrecision) -> f64 {
    match precision {
        SolverPrecision::FixedIterations => solve_elliptical(mean_anomaly, e),
        SolverPrecision::Converged if e < 1.0 => solve_elliptical_converged(mean_anomaly, e),
        SolverPrecision::Converged if e > 1.0 => solve_hyperbolic_converged(mean_anomaly, e),
        SolverPrecision::Converged => mean_anomaly,
    }
}
