//! Built-in ephemerides, looked up by name.
//!
//! Each entry is a mean-element series: Keplerian elements plus linear rates
//! per Julian century, referred to the J2000 ecliptic and equinox. Planet
//! values are the JPL approximate-position elements for 1800-2050 (Earth is
//! the Earth-Moon barycenter); the Moon's are geocentric mean elements with
//! general precession removed from the longitude rates.
//!
//! A series position at `t` solves Kepler's equation with the elements
//! evaluated at `t`. The osculating variant freezes the elements at a
//! reference epoch and propagates that conic instead, which keeps a sampled
//! path closed.

use nalgebra::Vector3;

use super::elements::{OrbitalElements, ParentFrame};
use super::orbit::EllipticalOrbit;
use crate::consts::{DAYS_PER_JULIAN_CENTURY, J2000};

/// Full series evaluation: time (JDE) to position (AU).
pub type EphemerisFn = fn(f64) -> Vector3<f64>;
/// Two-epoch evaluation: reference epoch and time (JDE) to position (AU).
pub type OsculatingFn = fn(f64, f64) -> Vector3<f64>;

/// Element values at J2000 and their rates per Julian century. Angles are in
/// degrees, distances in AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanElementSeries {
    pub semimajor_axis: (f64, f64),
    pub eccentricity: (f64, f64),
    pub inclination: (f64, f64),
    pub mean_longitude: (f64, f64),
    pub longitude_of_perihelion: (f64, f64),
    pub ascending_node: (f64, f64),
}

fn at_century((value, rate): (f64, f64), centuries: f64) -> f64 {
    value + rate * centuries
}

impl MeanElementSeries {
    /// Osculating elements at `time`, with `time` as their epoch.
    pub fn elements_at(&self, time: f64) -> OrbitalElements {
        let centuries = (time - J2000) / DAYS_PER_JULIAN_CENTURY;

        let a = at_century(self.semimajor_axis, centuries);
        let e = at_century(self.eccentricity, centuries);
        let incl = at_century(self.inclination, centuries);
        let mean_longitude = at_century(self.mean_longitude, centuries);
        let perihelion = at_century(self.longitude_of_perihelion, centuries);
        let node = at_century(self.ascending_node, centuries);

        OrbitalElements {
            pericenter_distance: a * (1.0 - e),
            eccentricity: e,
            inclination: incl.to_radians(),
            ascending_node: node.to_radians(),
            arg_of_pericenter: (perihelion - node).to_radians(),
            mean_anomaly_at_epoch: (mean_longitude - perihelion).to_radians(),
            period: self.period(),
            epoch: time,
            parent_frame: ParentFrame::ecliptic(),
        }
    }

    /// Sidereal period in days, from the mean longitude rate.
    pub fn period(&self) -> f64 {
        let degrees_per_day = self.mean_longitude.1 / DAYS_PER_JULIAN_CENTURY;
        360.0 / degrees_per_day
    }

    /// Aphelion distance at J2000.
    pub fn bounding_radius(&self) -> f64 {
        self.semimajor_axis.0 * (1.0 + self.eccentricity.0)
    }

    pub fn position_at(&self, time: f64) -> Vector3<f64> {
        self.osculating_position(time, time)
    }

    pub fn osculating_position(&self, epoch: f64, time: f64) -> Vector3<f64> {
        EllipticalOrbit::new(self.elements_at(epoch)).position_at_time(time)
    }
}

/// One named ephemeris.
#[derive(Debug, Clone, Copy)]
pub struct EphemerisEntry {
    pub name: &'static str,
    /// Body whose position this ephemeris is relative to; `None` for the Sun.
    pub parent: Option<&'static str>,
    pub series: &'static MeanElementSeries,
    pub position: EphemerisFn,
    pub osculating: OsculatingFn,
    /// Whether the sampled path repeats from one revolution to the next.
    pub stable: bool,
}

macro_rules! ephemeris_registry {
    ($($name:literal, parent: $parent:expr, stable: $stable:expr => $series:ident, $position:ident, $osculating:ident;)*) => {
        $(
            fn $position(time: f64) -> Vector3<f64> {
                $series.position_at(time)
            }

            fn $osculating(epoch: f64, time: f64) -> Vector3<f64> {
                $series.osculating_position(epoch, time)
            }
        )*

        static REGISTRY: &[EphemerisEntry] = &[
            $(
                EphemerisEntry {
                    name: $name,
                    parent: $parent,
                    series: &$series,
                    position: $position,
                    osculating: $osculating,
                    stable: $stable,
                },
            )*
        ];
    };
}

pub static MERCURY: MeanElementSeries = MeanElementSeries {
    semimajor_axis: (0.387_099_27, 0.000_000_37),
    eccentricity: (0.205_635_93, 0.000_019_06),
    inclination: (7.004_979_02, -0.005_947_49),
    mean_longitude: (252.250_323_50, 149_472.674_111_75),
    longitude_of_perihelion: (77.457_796_28, 0.160_476_89),
    ascending_node: (48.330_765_93, -0.125_340_81),
};

pub static VENUS: MeanElementSeries = MeanElementSeries {
    semimajor_axis: (0.723_335_66, 0.000_003_90),
    eccentricity: (0.006_776_72, -0.000_041_07),
    inclination: (3.394_676_05, -0.000_788_90),
    mean_longitude: (181.979_099_50, 58_517.815_387_29),
    longitude_of_perihelion: (131.602_467_18, 0.002_683_29),
    ascending_node: (76.679_842_55, -0.277_694_18),
};

pub static EARTH_MOON_BARYCENTER: MeanElementSeries = MeanElementSeries {
    semimajor_axis: (1.000_002_61, 0.000_005_62),
    eccentricity: (0.016_711_23, -0.000_043_92),
    inclination: (-0.000_015_31, -0.012_946_68),
    mean_longitude: (100.464_571_66, 35_999.372_449_81),
    longitude_of_perihelion: (102.937_681_93, 0.323_273_64),
    ascending_node: (0.0, 0.0),
};

pub static MARS: MeanElementSeries = MeanElementSeries {
    semimajor_axis: (1.523_710_34, 0.000_018_47),
    eccentricity: (0.093_394_10, 0.000_078_82),
    inclination: (1.849_691_42, -0.008_131_31),
    mean_longitude: (-4.553_432_05, 19_140.302_684_99),
    longitude_of_perihelion: (-23.943_629_59, 0.444_410_88),
    ascending_node: (49.559_538_91, -0.292_573_43),
};

pub static JUPITER: MeanElementSeries = MeanElementSeries {
    semimajor_axis: (5.202_887_00, -0.000_116_07),
    eccentricity: (0.048_386_24, -0.000_132_53),
    inclination: (1.304_396_95, -0.001_837_14),
    mean_longitude: (34.396_440_51, 3_034.746_127_75),
    longitude_of_perihelion: (14.728_479_83, 0.212_526_68),
    ascending_node: (100.473_909_09, 0.204_691_06),
};

pub static SATURN: MeanElementSeries = MeanElementSeries {
    semimajor_axis: (9.536_675_94, -0.001_250_60),
    eccentricity: (0.053_861_79, -0.000_509_91),
    inclination: (2.485_991_87, 0.001_936_09),
    mean_longitude: (49.954_244_23, 1_222.493_622_01),
    longitude_of_perihelion: (92.598_878_31, -0.418_972_16),
    ascending_node: (113.662_424_48, -0.288_677_94),
};

pub static URANUS: MeanElementSeries = MeanElementSeries {
    semimajor_axis: (19.189_164_64, -0.001_961_76),
    eccentricity: (0.047_257_44, -0.000_043_97),
    inclination: (0.772_637_83, -0.002_429_39),
    mean_longitude: (313.238_104_51, 428.482_027_85),
    longitude_of_perihelion: (170.954_276_30, 0.408_052_81),
    ascending_node: (74.016_925_03, 0.042_405_89),
};

pub static NEPTUNE: MeanElementSeries = MeanElementSeries {
    semimajor_axis: (30.069_922_76, 0.000_262_91),
    eccentricity: (0.008_590_48, 0.000_051_05),
    inclination: (1.770_043_47, 0.000_353_72),
    mean_longitude: (-55.120_029_69, 218.459_453_25),
    longitude_of_perihelion: (44.964_762_27, -0.322_414_64),
    ascending_node: (131.784_225_74, -0.005_086_64),
};

pub static PLUTO: MeanElementSeries = MeanElementSeries {
    semimajor_axis: (39.482_116_75, -0.000_315_96),
    eccentricity: (0.248_827_30, 0.000_051_70),
    inclination: (17.140_012_06, 0.000_048_18),
    mean_longitude: (238.929_038_33, 145.207_805_15),
    longitude_of_perihelion: (224.068_916_29, -0.040_629_42),
    ascending_node: (110.303_936_84, -0.011_834_82),
};

// Geocentric. Mean distance 384,400 km.
pub static MOON: MeanElementSeries = MeanElementSeries {
    semimajor_axis: (0.002_569_555_3, 0.0),
    eccentricity: (0.054_9, 0.0),
    inclination: (5.145_4, 0.0),
    mean_longitude: (218.316_2, 481_266.484_3),
    longitude_of_perihelion: (83.353_3, 4_067.616_7),
    ascending_node: (125.043_4, -1_935.533_3),
};

ephemeris_registry! {
    "Mercury", parent: None, stable: true => MERCURY, mercury_position, mercury_osculating;
    "Venus", parent: None, stable: true => VENUS, venus_position, venus_osculating;
    "Earth", parent: None, stable: true => EARTH_MOON_BARYCENTER, earth_position, earth_osculating;
    "Mars", parent: None, stable: true => MARS, mars_position, mars_osculating;
    "Jupiter", parent: None, stable: true => JUPITER, jupiter_position, jupiter_osculating;
    "Saturn", parent: None, stable: true => SATURN, saturn_position, saturn_osculating;
    "Uranus", parent: None, stable: true => URANUS, uranus_position, uranus_osculating;
    "Neptune", parent: None, stable: true => NEPTUNE, neptune_position, neptune_osculating;
    "Pluto", parent: None, stable: true => PLUTO, pluto_position, pluto_osculating;
    // Apsides and nodes turn fast enough that one month's path never closes
    "Moon", parent: Some("Earth"), stable: false => MOON, moon_position, moon_osculating;
}

/// Case-insensitive lookup.
pub fn lookup(name: &str) -> Option<&'static EphemerisEntry> {
    REGISTRY
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(name))
}

pub fn entries() -> &'static [EphemerisEntry] {
    REGISTRY
}

pub fn registered_names() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|entry| entry.name)
}
