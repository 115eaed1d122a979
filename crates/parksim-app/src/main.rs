//! PARKSIM command line.
//!
//! Lists the vehicle catalog, replays drive scripts deterministically, or
//! drives a vehicle in real time for a fixed duration. Snapshots are
//! printed to stdout as JSON; logs go to stderr.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::EnvFilter;

use parksim_app::game_loop::{replay_script, start_drive_loop};
use parksim_app::script::DriveScript;
use parksim_app::state::AppState;
use parksim_core::commands::SceneCommand;
use parksim_core::constants::*;
use parksim_core::enums::{Gear, ScenarioId, SteerDirection};
use parksim_core::state::SceneSnapshot;
use parksim_sim::engine::{ParkingSimulator, SimConfig};

/// Interactive parking simulator (headless driver)
#[derive(Parser)]
#[command(name = "parksim")]
#[command(about = "Kinematic parking simulator with wheel-trail recording")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    tuning: Tuning,

    #[command(subcommand)]
    command: Commands,
}

/// Simulator tuning shared by every subcommand.
#[derive(Args)]
struct Tuning {
    /// Driving speed in feet per second
    #[arg(long, global = true, default_value_t = DRIVE_SPEED)]
    speed: f64,

    /// Largest time step integrated at once (seconds)
    #[arg(long, global = true, default_value_t = MAX_STEP_DT)]
    max_step_dt: f64,

    /// Record a trail sample every N steps
    #[arg(long, global = true, default_value_t = TRAIL_SAMPLE_INTERVAL)]
    trail_interval: u32,

    /// Maximum trail points kept per wheel
    #[arg(long, global = true, default_value_t = MAX_TRAIL_POINTS)]
    trail_capacity: usize,
}

impl Tuning {
    fn to_config(&self) -> Result<SimConfig> {
        let config = SimConfig {
            speed: self.speed,
            max_step_dt: self.max_step_dt,
            trail_sample_interval: self.trail_interval,
            trail_capacity: self.trail_capacity,
            ..SimConfig::default()
        };
        config.validate().context("Invalid simulator tuning")?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the vehicle catalog
    Vehicles {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a drive script with a synthetic clock
    Replay {
        /// Path to the script JSON file
        script: PathBuf,

        /// Override the script's frame rate
        #[arg(long)]
        fps: Option<f64>,
    },

    /// Drive in real time for a fixed duration
    Run {
        /// Seconds to hold the throttle
        #[arg(short, long, default_value_t = 5.0)]
        seconds: f64,

        /// Vehicle to drive when no scenario is loaded
        #[arg(long, default_value = "Toyota Corolla")]
        vehicle: String,

        /// Preset layout (Empty, ParallelSpot, PerpendicularRow, RandomLot)
        #[arg(long, value_parser = parse_named::<ScenarioId>)]
        scenario: Option<ScenarioId>,

        /// Seed for the RandomLot scenario
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Steering (Left, Straight, Right)
        #[arg(long, default_value = "Straight", value_parser = parse_named::<SteerDirection>)]
        steer: SteerDirection,

        /// Gear (Forward, Reverse)
        #[arg(long, default_value = "Forward", value_parser = parse_named::<Gear>)]
        gear: Gear,

        /// Display frame rate
        #[arg(long, default_value_t = DEFAULT_FPS)]
        fps: f64,
    },
}

/// Parse a unit enum variant by its serialized name.
fn parse_named<T: DeserializeOwned>(value: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| format!("unrecognized value `{value}`"))
}

/// How long `run` holds the throttle.
fn hold_duration(seconds: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(seconds)
        .with_context(|| format!("--seconds must be a non-negative duration, got {seconds}"))
}

fn print_snapshot(snapshot: &SceneSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.tuning.to_config()?;

    match cli.command {
        Commands::Vehicles { json } => {
            let sim = ParkingSimulator::new(config)?;
            if json {
                let specs: Vec<_> = sim.list_vehicles().iter().map(|s| s.as_ref()).collect();
                println!("{}", serde_json::to_string_pretty(&specs)?);
            } else {
                println!(
                    "{:<20} {:>8} {:>7} {:>10} {:>10}",
                    "vehicle", "length", "width", "wheelbase", "radius"
                );
                for spec in sim.list_vehicles() {
                    println!(
                        "{:<20} {:>7.1}' {:>6.1}' {:>9.1}' {:>9.1}'",
                        spec.name,
                        spec.length_feet(),
                        spec.width_feet(),
                        spec.wheelbase_feet(),
                        spec.turning_radius_feet()
                    );
                }
            }
        }
        Commands::Replay { script, fps } => {
            let mut drive_script = DriveScript::load(&script)?;
            if let Some(fps) = fps {
                drive_script.fps = fps;
                drive_script.validate()?;
            }
            info!(
                script = %script.display(),
                frames = drive_script.frames,
                fps = drive_script.fps,
                "replaying"
            );

            let mut sim = ParkingSimulator::new(config)?;
            let snapshot = replay_script(&mut sim, &drive_script)
                .with_context(|| format!("Replay of {} failed", script.display()))?;
            print_snapshot(&snapshot)?;
        }
        Commands::Run {
            seconds,
            vehicle,
            scenario,
            seed,
            steer,
            gear,
            fps,
        } => {
            let hold = hold_duration(seconds)?;

            let mut sim = ParkingSimulator::new(config)?;
            match scenario {
                Some(scenario) => sim.load_scenario(scenario, seed)?,
                None => {
                    sim.place_player(&vehicle, 0.0, 0.0)?;
                }
            }

            let state = AppState::new();
            let handle =
                start_drive_loop(&state, sim, fps).context("Failed to spawn drive loop")?;
            state
                .send_command(SceneCommand::SetControl {
                    steer,
                    gear,
                    throttle: true,
                })
                .map_err(|e| anyhow!(e))?;

            std::thread::sleep(hold);
            state.shutdown().map_err(|e| anyhow!(e))?;

            let snapshot = handle
                .join()
                .map_err(|_| anyhow!("drive loop thread panicked"))?;
            print_snapshot(&snapshot)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning(speed: f64, max_step_dt: f64) -> Tuning {
        Tuning {
            speed,
            max_step_dt,
            trail_interval: TRAIL_SAMPLE_INTERVAL,
            trail_capacity: MAX_TRAIL_POINTS,
        }
    }

    #[test]
    fn test_default_tuning_is_valid() {
        let config = tuning(DRIVE_SPEED, MAX_STEP_DT).to_config().unwrap();
        assert_eq!(config.speed, DRIVE_SPEED);
        assert_eq!(config.max_step_dt, MAX_STEP_DT);
    }

    #[test]
    fn test_bad_tuning_rejected() {
        assert!(tuning(0.0, MAX_STEP_DT).to_config().is_err());
        assert!(tuning(-4.0, MAX_STEP_DT).to_config().is_err());
        assert!(tuning(DRIVE_SPEED, 0.0).to_config().is_err());
        assert!(tuning(DRIVE_SPEED, f64::NAN).to_config().is_err());
    }

    #[test]
    fn test_hold_duration_bounds() {
        assert_eq!(hold_duration(1.5).unwrap(), Duration::from_millis(1500));
        assert_eq!(hold_duration(0.0).unwrap(), Duration::ZERO);
        assert!(hold_duration(-1.0).is_err());
        assert!(hold_duration(f64::NAN).is_err());
        assert!(hold_duration(1e20).is_err());
    }
}
