//! Headless Forage Runner
//!
//! Runs a foraging simulation without a console and prints a JSON or text
//! summary of how each vehicle type fared.

use clap::Parser;
use forage_sim::core::error::Result;
use forage_sim::core::types::VehicleType;
use forage_sim::world::{CostClass, Simulation, SimulationEvent};
use forage_sim::SimulationConfig;
use serde::Serialize;

/// Headless Forage Runner - distance vs energy vehicles
#[derive(Parser, Debug)]
#[command(name = "forage_runner")]
#[command(about = "Run a foraging simulation and report per-type survival")]
struct Args {
    /// TOML file overriding the default configuration
    #[arg(long)]
    config: Option<String>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks to run (stops early when every vehicle is dead)
    #[arg(long, default_value_t = 20_000)]
    ticks: u64,

    /// Number of distance-scaled vehicles
    #[arg(long, default_value_t = 3)]
    distance: usize,

    /// Number of energy-scaled vehicles
    #[arg(long, default_value_t = 3)]
    energy: usize,

    /// Vehicle size (defaults to the configured size)
    #[arg(long)]
    size: Option<u32>,

    /// Number of random terrain patches, cycling through the cost classes
    #[arg(long, default_value_t = 4)]
    terrain: usize,

    /// Food pairs dropped at the start
    #[arg(long, default_value_t = 10)]
    food: usize,

    /// Food pairs dropped on each refill (defaults to the configured amount)
    #[arg(long)]
    refill_amount: Option<usize>,

    /// Ticks between refills (defaults to the configured interval, 0 disables)
    #[arg(long)]
    refill_every: Option<u64>,

    /// Do not replace vehicles that die
    #[arg(long)]
    no_respawn: bool,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every simulation event to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// How one vehicle type fared
#[derive(Serialize)]
struct TypeSummary {
    kind: VehicleType,
    alive: usize,
    dead: usize,
    food_eaten: usize,
    energy_eaten: u64,
    mean_energy: f64,
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    all_dead: bool,
    food_remaining: usize,
    types: Vec<TypeSummary>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forage_sim=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let output = run(&args).and_then(|summary| render(&summary, &args.format));
    match output {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Format the summary as JSON (the default) or plain text
fn render(summary: &RunSummary, format: &str) -> Result<String> {
    match format {
        "text" => Ok(format_text(summary)),
        other => {
            if other != "json" {
                tracing::warn!("Unknown format '{}', defaulting to json", other);
            }
            Ok(serde_json::to_string_pretty(summary)?)
        }
    }
}

fn run(args: &Args) -> Result<RunSummary> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if args.no_respawn {
        config.auto_respawn = false;
    }
    let refill_amount = args.refill_amount.unwrap_or(config.food_refill_amount);
    let refill_every = args.refill_every.unwrap_or(config.food_refill_interval);

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut sim = Simulation::new(config, seed)?;

    for _ in 0..args.distance {
        sim.spawn_vehicle(VehicleType::Distance, args.size)?;
    }
    for _ in 0..args.energy {
        sim.spawn_vehicle(VehicleType::Energy, args.size)?;
    }
    for i in 0..args.terrain {
        let class = CostClass::ALL[i % CostClass::ALL.len()];
        sim.field.add_random_terrain(class, None)?;
    }
    sim.replenish_food(args.food);

    let mut food_eaten = [0usize; 2];
    let mut energy_eaten = [0u64; 2];

    while sim.current_tick < args.ticks && !sim.is_paused() {
        // The runner plays the part of the refill timer
        if refill_every > 0 && sim.current_tick > 0 && sim.current_tick % refill_every == 0 {
            sim.replenish_food(refill_amount);
        }

        for event in sim.run_tick() {
            if args.verbose {
                eprintln!("{:?}", event);
            }
            if let SimulationEvent::FoodEaten { vehicle, value, .. } = event {
                if let Some(eater) = sim.vehicle(vehicle) {
                    let slot = type_slot(eater.kind());
                    food_eaten[slot] += 1;
                    energy_eaten[slot] += value as u64;
                }
            }
        }
    }

    let types = VehicleType::ALL
        .iter()
        .map(|&kind| {
            let living: Vec<f64> = sim
                .vehicles()
                .iter()
                .filter(|v| v.kind() == kind && !v.is_deceased())
                .map(|v| v.energy())
                .collect();
            let mean_energy = if living.is_empty() {
                0.0
            } else {
                living.iter().sum::<f64>() / living.len() as f64
            };
            TypeSummary {
                kind,
                alive: living.len(),
                dead: sim.field.cemetery().of(kind).len(),
                food_eaten: food_eaten[type_slot(kind)],
                energy_eaten: energy_eaten[type_slot(kind)],
                mean_energy,
            }
        })
        .collect();

    Ok(RunSummary {
        seed,
        ticks: sim.current_tick,
        all_dead: sim.all_dead(),
        food_remaining: VehicleType::ALL.iter().map(|&k| sim.field.food(k).len()).sum(),
        types,
    })
}

fn type_slot(kind: VehicleType) -> usize {
    match kind {
        VehicleType::Distance => 0,
        VehicleType::Energy => 1,
    }
}

fn format_text(summary: &RunSummary) -> String {
    let mut out = String::new();
    out.push_str("Forage Run\n");
    out.push_str("==========\n");
    out.push_str(&format!("Ticks: {}\n", summary.ticks));
    out.push_str(&format!("All dead: {}\n", summary.all_dead));
    out.push_str(&format!("Food remaining: {}\n\n", summary.food_remaining));
    for t in &summary.types {
        out.push_str(&format!(
            "{:<8} alive {:>3}  dead {:>3}  ate {:>4} ({} energy)  mean energy {:.2}\n",
            t.kind.name(),
            t.alive,
            t.dead,
            t.food_eaten,
            t.energy_eaten,
            t.mean_energy
        ));
    }
    out.push_str(&format!("\nSeed: {}", summary.seed));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use forage_sim::core::error::ForageError;

    fn args(format: &str) -> Args {
        Args::parse_from([
            "forage_runner",
            "--seed",
            "3",
            "--ticks",
            "50",
            "--format",
            format,
        ])
    }

    #[test]
    fn test_json_summary_round_trips_counts() {
        let args = args("json");
        let summary = run(&args).unwrap();
        let json = render(&summary, &args.format).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["seed"], 3);
        assert_eq!(value["ticks"], 50);
        assert_eq!(value["types"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_text_summary_lists_each_type() {
        let args = args("text");
        let summary = run(&args).unwrap();
        let text = render(&summary, &args.format).unwrap();
        assert!(text.starts_with("Forage Run"));
        assert!(text.contains("distance"));
        assert!(text.contains("energy"));
        assert!(text.ends_with("Seed: 3"));
    }

    #[test]
    fn test_serialization_failure_is_serde_error() {
        let err: ForageError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, ForageError::SerdeError(_)));
    }
}
