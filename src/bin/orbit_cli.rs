use std::error::Error;

use clap::{Parser, Subcommand};
use plotters::prelude::*;
use tracing::info;

use rust_orrery::astro::ephemeris;
use rust_orrery::consts::J2000;
use rust_orrery::error::OrbitError;
use rust_orrery::model::orrery::Orrery;
use rust_orrery::model::path::PathSampler;

#[derive(Debug, Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print where a body is at the given time
    Position {
        name: String,
        #[arg(long, default_value_t = J2000)]
        jde: f64,
    },
    /// Plot one revolution of a body's path, seen from above the ecliptic
    Path {
        name: String,
        #[arg(long, default_value_t = J2000)]
        jde: f64,
        #[arg(long, default_value_t = 360)]
        samples: usize,
        #[arg(long, default_value = "path.svg")]
        output: String,
    },
    /// List the built-in ephemerides
    List,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    match args.command {
        Command::Position { name, jde } => print_position(&name, jde)?,
        Command::Path {
            name,
            jde,
            samples,
            output,
        } => plot_path(&name, jde, samples, &output)?,
        Command::List => {
            for entry in ephemeris::entries() {
                println!(
                    "{:<8} parent: {:<6} period: {:>10.3} d",
                    entry.name,
                    entry.parent.unwrap_or("Sun"),
                    entry.series.period()
                );
            }
        }
    }

    Ok(())
}

fn print_position(name: &str, jde: f64) -> Result<(), OrbitError> {
    let orrery = Orrery::solar_system(jde)?;
    let id = orrery
        .find(name)
        .ok_or_else(|| OrbitError::UnknownEphemeris(name.to_owned()))?;
    let body = orrery.body(id);
    let orbit = body.orbit();

    println!("Position of {} at JDE {}", body.name, jde);
    println!("- Orbit: {}", orbit.kind());
    println!("- Heliocentric (AU): {:?}", body.position().as_slice());
    println!("- Relative to parent (AU): {:?}", body.relative_position().as_slice());
    println!("- Distance from parent (AU): {}", body.relative_position().norm());
    println!("- Sidereal period (days): {:?}", orbit.sidereal_period());
    println!("- Bounding radius (AU): {:?}", orbit.bounding_radius());
    Ok(())
}

fn plot_path(name: &str, jde: f64, samples: usize, output: &str) -> Result<(), Box<dyn Error>> {
    let orrery = Orrery::solar_system(jde)?;
    let id = orrery
        .find(name)
        .ok_or_else(|| OrbitError::UnknownEphemeris(name.to_owned()))?;
    let body = orrery.body(id);
    let period = body
        .orbit()
        .sidereal_period()
        .ok_or_else(|| OrbitError::NoSiderealPeriod(body.name.clone()))?;

    let mut sampler = PathSampler::new(samples.max(2));
    sampler.init(period);
    sampler.compute(body.orbit(), jde, 1.0);

    let extent = sampler
        .points()
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(0.0, f64::max)
        * 1.1;
    draw_path(output, sampler.points().iter().map(|p| (p.x, p.y)), extent)?;

    info!(
        name = %body.name,
        output,
        samples = sampler.sample_count(),
        "wrote path"
    );
    Ok(())
}

fn draw_path(
    name: &str,
    points: impl Iterator<Item = (f64, f64)>,
    extent: f64,
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(name, (640, 640)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(5)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    chart.draw_series(LineSeries::new(points, &RED))?;
    chart.draw_series(std::iter::once(Circle::new((0.0, 0.0), 3, BLACK.filled())))?;
    root.present()?;

    Ok(())
}
