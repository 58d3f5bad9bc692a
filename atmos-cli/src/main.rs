use atmos_core::core_types::{Kelvin, PressureUnit};
use atmos_core::export::{format_scientific, format_value, to_csv, to_json};
use atmos_core::{
    AltitudeUnit, AtmosError, AtmosphereModel, AtmosphericResult, ProfileConfig, ProfileGenerator,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Standard atmosphere calculator
#[derive(Parser, Debug)]
#[command(name = "atmos-cli")]
#[command(about = "ICAO standard atmosphere calculator (0-86 km)", long_about = None)]
struct Args {
    /// Log diagnostics to stderr (overrides `RUST_LOG`)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the atmospheric state at a single altitude
    Point {
        /// Altitude, clamped to 0-86 km after unit conversion
        #[arg(allow_negative_numbers = true, value_parser = parse_finite)]
        altitude: f64,

        /// Altitude unit (m, km, ft)
        #[arg(short, long, default_value = "m")]
        unit: AltitudeUnit,

        /// Pressure display unit (`Pa`, `hPa`, `mbar`, `atm`, `psi`)
        #[arg(short, long, default_value = "Pa")]
        pressure_unit: PressureUnit,
    },

    /// Sample the atmosphere over an altitude range
    Profile {
        /// Start altitude (default 0)
        #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
        start: Option<f64>,

        /// End altitude, inclusive (default 86000 m)
        #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
        end: Option<f64>,

        /// Altitude increment (default 1000 m)
        #[arg(long, allow_negative_numbers = true)]
        step: Option<f64>,

        /// Unit for start, end and step (m, km, ft), including values read from `--config`
        #[arg(short, long)]
        unit: Option<AltitudeUnit>,

        /// JSON file with a profile request; flags override its fields
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Evaluate samples across all cores
        #[arg(long)]
        parallel: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Atmosphere(#[from] AtmosError),

    #[error("failed to read config '{}': {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config '{}': {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize profile: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn parse_finite(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{s}' is not a finite number"))
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<ProfileConfig, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

fn print_point(result: &AtmosphericResult, unit: AltitudeUnit, pressure_unit: PressureUnit) {
    let temperature = Kelvin::new(result.temperature_k);

    println!(
        "=== Standard Atmosphere @ {} {} ===\n",
        format_value(result.altitude_in(unit)),
        unit
    );
    println!("Layer:               {}", result.layer_name());
    println!("Temperature:         {} ({})", temperature, temperature.to_celsius());
    println!(
        "Pressure:            {} {}",
        format_value(result.pressure_in(pressure_unit)),
        pressure_unit
    );
    println!("Density:             {} kg/m³", format_scientific(result.density));
    println!("Speed of sound:      {} m/s", format_value(result.speed_of_sound));
    println!("Dynamic viscosity:   {} Pa·s", format_scientific(result.dynamic_viscosity));
    println!("Kinematic viscosity: {} m²/s", format_scientific(result.kinematic_viscosity));
    println!(
        "Ratios:              θ={:.4}  δ={:.4e}  σ={:.4e}",
        result.temperature_ratio(),
        result.pressure_ratio(),
        result.density_ratio()
    );
}

fn render_table(samples: &[AtmosphericResult]) -> String {
    let mut lines = Vec::with_capacity(samples.len() + 2);
    lines.push(format!(
        "{:>12} {:>10} {:>10} {:>14} {:>14} {:>10} {:>14} {:>14}  {}",
        "Alt (m)", "T (K)", "T (°C)", "P (Pa)", "ρ (kg/m³)", "a (m/s)", "μ (Pa·s)", "ν (m²/s)", "Layer"
    ));
    lines.push("-".repeat(126));
    for r in samples {
        lines.push(format!(
            "{:>12} {:>10} {:>10} {:>14} {:>14} {:>10} {:>14} {:>14}  {}",
            format_value(r.altitude),
            format_value(r.temperature_k),
            format_value(r.temperature_c),
            format_value(r.pressure),
            format_scientific(r.density),
            format_value(r.speed_of_sound),
            format_scientific(r.dynamic_viscosity),
            format_scientific(r.kinematic_viscosity),
            r.layer_name()
        ));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Point {
            altitude,
            unit,
            pressure_unit,
        } => {
            let result = AtmosphereModel::standard().compute_in(altitude, unit);
            print_point(&result, unit, pressure_unit);
        }
        Command::Profile {
            start,
            end,
            step,
            unit,
            config,
            format,
            output,
            parallel,
        } => {
            let mut request = match &config {
                Some(path) => load_config(path)?,
                None => ProfileConfig::default(),
            };
            if let Some(unit) = unit {
                request.altitude_unit = unit;
            }
            if let Some(start) = start {
                request.start = start;
            }
            if let Some(end) = end {
                request.end = end;
            }
            if let Some(step) = step {
                request.step = step;
            }
            debug!(?request, parallel, "profile request");

            let profile = request.generate_with(&ProfileGenerator::default(), parallel)?;
            let text = match format {
                OutputFormat::Table => render_table(profile.as_slice()),
                OutputFormat::Csv => to_csv(profile.as_slice()),
                OutputFormat::Json => to_json(profile.as_slice())?,
            };

            match output {
                Some(path) => {
                    fs::write(&path, text).map_err(|source| CliError::Write {
                        path: path.clone(),
                        source,
                    })?;
                    info!(samples = profile.len(), path = %path.display(), "wrote profile");
                }
                None => print!("{text}"),
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
