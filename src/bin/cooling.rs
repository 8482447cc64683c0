//! Computes a recommended cooling level from room conditions.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fuzzy_cooling::{CoolingController, CoolingInputs, FuzzyError, Recommendation, SystemConfig};

#[derive(Parser)]
#[command(name = "cooling")]
#[command(about = "Fuzzy logic cooling control", long_about = None)]
struct Cli {
    /// Room temperature in degrees Celsius (15 to 35)
    #[arg(short, long, default_value_t = 28.)]
    temperature: f64,

    /// Relative humidity in percent (30 to 80)
    #[arg(short = 'u', long, default_value_t = 65.)]
    humidity: f64,

    /// Number of people in the room (0 to 20)
    #[arg(short, long, default_value_t = 5.)]
    occupancy: f64,

    /// Evaluate a TOML system description instead of the built-in controller
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match &cli.config {
        Some(path) => run_config(path, &cli),
        None => run_builtin(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    }
}

fn run_builtin(cli: &Cli) -> Result<(), FuzzyError> {
    let controller = CoolingController::new()?;
    let report = controller.compute(CoolingInputs {
        temperature: cli.temperature,
        humidity: cli.humidity,
        occupancy: cli.occupancy,
    })?;

    println!("Temperature: {} °C", report.inputs.temperature);
    println!("Humidity: {} %", report.inputs.humidity);
    println!("Room Occupancy: {} people", report.inputs.occupancy);
    println!();
    println!("Recommended Cooling Level: {:.2}/100", report.level);
    println!("Recommendation: {}", report.recommendation);
    println!();
    print_degrees("temperature", report.temperature.iter().map(|(t, d)| (format!("{t:?}"), *d)));
    print_degrees("humidity", report.humidity.iter().map(|(t, d)| (format!("{t:?}"), *d)));
    print_degrees("occupancy", report.occupancy.iter().map(|(t, d)| (format!("{t:?}"), *d)));

    Ok(())
}

fn run_config(path: &Path, cli: &Cli) -> Result<(), FuzzyError> {
    let engine = SystemConfig::load_from_file(path)?.build()?;
    let outputs = engine.evaluate_named([
        ("temperature", cli.temperature),
        ("humidity", cli.humidity),
        ("occupancy", cli.occupancy),
    ])?;
    let mut outputs: Vec<_> = outputs.into_iter().collect();

    outputs.sort_by(|a, b| a.0.cmp(&b.0));

    for (name, value) in outputs {
        println!("{name}: {value:.2} ({})", Recommendation::from_level(value));
    }

    Ok(())
}

fn print_degrees(name: &str, degrees: impl Iterator<Item = (String, f64)>) {
    let mut degrees: Vec<_> = degrees.collect();

    degrees.sort_by(|a, b| a.0.cmp(&b.0));

    let degrees: Vec<_> = degrees.iter().map(|(t, d)| format!("{t}={d:.2}")).collect();

    println!("{name}: {}", degrees.join(" "));
}
