use std::f64::consts::PI;

// Astronomical unit, in km (IAU 2012)
pub const AU_KM: f64 = 149_597_870.7;

// Gaussian gravitational constant, in AU^(3/2) / day
pub const GAUSS_K: f64 = 0.017_202_098_95;

// Newton's gravitational constant, in km^3 / (kg s^2)
pub const NEWTON_G_KM: f64 = 6.674_30e-20;

// Mass of the Sun, in kg
pub const SOLAR_MASS: f64 = 1.988_47e30;

// Julian ephemeris date of the J2000.0 epoch
pub const J2000: f64 = 2_451_545.0;

pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const HOURS_PER_DAY: f64 = 24.0;
pub const ONE_MINUTE: f64 = 1.0 / 1_440.0;

// Mean obliquity of the ecliptic at J2000, in radians
pub const J2000_OBLIQUITY: f64 = 23.439_280_8 * PI / 180.0;

pub fn get_period(a: f64, gm: f64) -> f64 {
    2.0 * PI * (a.powi(3) / gm).sqrt()
}
