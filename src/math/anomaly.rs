use super::kepler::solve_elliptical;

pub fn eccentric_to_mean(eccentric_anomaly: f64, e: f64) -> f64 {
    assert!(e < 1.0);
    eccentric_anomaly - e * eccentric_anomaly.sin()
}

pub fn hyperbolic_to_mean(hyperbolic_anomaly: f64, e: f64) -> f64 {
    assert!(e > 1.0);
    e * hyperbolic_anomaly.sinh() - hyperbolic_anomaly
}

pub fn eccentric_to_true(eccentric_anomaly: f64, e: f64) -> f64 {
    // We have that tan(theta/2) = sqrt((1+e)/(1-e)) * tan(E/2). The atan2
    // form keeps theta in the same half-turn as E, so the result lies in
    // (-2pi, 2pi] and callers wanting a single revolution must wrap it.
    let half = eccentric_anomaly / 2.0;
    2.0 * f64::atan2((1.0 + e).sqrt() * half.sin(), (1.0 - e).sqrt() * half.cos())
}

pub fn true_to_eccentric(true_anomaly: f64, e: f64) -> f64 {
    let half = true_anomaly / 2.0;
    2.0 * f64::atan2((1.0 - e).sqrt() * half.sin(), (1.0 + e).sqrt() * half.cos())
}

pub fn hyperbolic_to_true(hyperbolic_anomaly: f64, e: f64) -> f64 {
    // We have that tanh(H/2) = sqrt((e-1)/(e+1)) tan(theta/2)
    let tanh_half_hyp = (hyperbolic_anomaly / 2.0).tanh();
    let tan_half_theta = tanh_half_hyp / ((e - 1.0) / (e + 1.0)).sqrt();
    2.0 * tan_half_theta.atan()
}

pub fn true_to_hyperbolic(true_anomaly: f64, e: f64) -> f64 {
    let tan_half_theta = (true_anomaly / 2.0).tan();
    let tanh_half_hyp = tan_half_theta * ((e - 1.0) / (e + 1.0)).sqrt();
    2.0 * tanh_half_hyp.atanh()
}

pub fn parabolic_to_true(tan_half_theta: f64) -> f64 {
    2.0 * tan_half_theta.atan()
}

/// True anomaly for a mean anomaly, using the real-time solver. Parabolic
/// orbits are not handled (the solver passes `M` through).
pub fn mean_to_true(mean_anomaly: f64, e: f64) -> f64 {
    let anomaly = solve_elliptical(mean_anomaly, e);
    if e < 1.0 {
        eccentric_to_true(anomaly, e)
    } else if e > 1.0 {
        hyperbolic_to_true(anomaly, e)
    } else {
        anomaly
    }
}

pub fn true_to_mean(true_anomaly: f64, e: f64) -> f64 {
    if e < 1.0 {
        eccentric_to_mean(true_to_eccentric(true_anomaly, e), e)
    } else {
        hyperbolic_to_mean(true_to_hyperbolic(true_anomaly, e), e)
    }
}
