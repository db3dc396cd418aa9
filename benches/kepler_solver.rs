use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rust_orrery::astro::{Orbit, SpecialEphemerisOrbit};
use rust_orrery::consts::J2000;
use rust_orrery::math::kepler::{solve_elliptical, solve_elliptical_converged};
use rust_orrery::model::path::{BodyClass, PathSampler};

const MEAN_ANOMALIES: [f64; 8] = [-3.0, -1.5, -0.2, 0.0, 0.1, 0.9, 2.0, 3.1];

fn bench_elliptical(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_elliptical");

    // One eccentricity per iteration regime
    for &e in [0.05_f64, 0.5, 0.95].iter() {
        group.bench_with_input(BenchmarkId::new("fixed", e), &e, |b, &e| {
            b.iter(|| {
                for &m in MEAN_ANOMALIES.iter() {
                    black_box(solve_elliptical(black_box(m), e));
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("converged", e), &e, |b, &e| {
            b.iter(|| {
                for &m in MEAN_ANOMALIES.iter() {
                    black_box(solve_elliptical_converged(black_box(m), e));
                }
            })
        });
    }

    group.finish();
}

fn bench_path_sampler(c: &mut Criterion) {
    let mars = Orbit::from(SpecialEphemerisOrbit::from_registry("Mars").unwrap());
    let period = mars.sidereal_period().unwrap();

    let mut group = c.benchmark_group("path_sampler");

    group.bench_function("full_resample", |b| {
        let mut sampler = PathSampler::for_class(BodyClass::Planet);
        b.iter(|| {
            sampler.init(period);
            sampler.compute(&mars, black_box(J2000), 1.0);
        })
    });

    group.bench_function("one_step_shift", |b| {
        let mut sampler = PathSampler::for_class(BodyClass::Planet);
        sampler.init(period);
        sampler.compute(&mars, J2000, 1.0);
        let step = sampler.sample_interval();
        let mut now = J2000;
        b.iter(|| {
            now += step;
            sampler.compute(&mars, black_box(now), 1.0);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_elliptical, bench_path_sampler);
criterion_main!(benches);
