//! Forage Sim - Entry Point
//!
//! Interactive console for the foraging simulation. Sets up a field with a
//! few vehicles, food and terrain, then reads commands from stdin to step
//! the simulation and inspect it.

use forage_sim::core::error::Result;
use forage_sim::core::types::VehicleType;
use forage_sim::simulation::tick::run_simulation_tick;
use forage_sim::world::{CostClass, Simulation, SimulationEvent};
use forage_sim::SimulationConfig;

use std::io::{self, Write};

const DEFAULT_SEED: u64 = 42;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forage_sim=info".into()),
        )
        .init();

    tracing::info!("Forage Sim starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load(&path)?,
        None => SimulationConfig::default(),
    };
    let mut sim = Simulation::new(config, DEFAULT_SEED)?;
    populate(&mut sim)?;

    println!("\n=== FORAGE SIM ===");
    println!("Distance- and energy-scaled vehicles foraging on costly terrain");
    println!();
    println!("Commands:");
    println!("  tick / t                       - Advance simulation by one tick");
    println!("  run <n>                        - Run n simulation ticks");
    println!("  status / s                     - Show detailed status");
    println!("  spawn <distance|energy> [size] - Add a vehicle at a random spot");
    println!("  food <n>                       - Drop n pairs of food");
    println!("  terrain <fair|medium|steep> [radius] - Add a terrain patch");
    println!("  pause / resume                 - Stop or restart the clock");
    println!("  reset                          - Clear the field");
    println!("  quit / q                       - Exit");
    println!();

    loop {
        display_status(&sim);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let mut words = input.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match command {
            "quit" | "q" => break,
            "tick" | "t" => {
                let events = run_simulation_tick(&mut sim);
                report_events(&events);
                println!("Tick {} complete.", sim.current_tick);
            }
            "run" => match args.first().and_then(|n| n.parse::<u32>().ok()) {
                Some(n) => {
                    println!("Running {} ticks...", n);
                    for _ in 0..n {
                        let events = run_simulation_tick(&mut sim);
                        report_events(&events);
                        if sim.is_paused() {
                            break;
                        }
                    }
                    println!("Now at tick {}.", sim.current_tick);
                }
                None => println!("Usage: run <number>"),
            },
            "status" | "s" => display_detailed_status(&sim),
            "spawn" => {
                let kind = args.first().and_then(|name| VehicleType::parse(name));
                let size = args.get(1).and_then(|s| s.parse::<u32>().ok());
                match kind {
                    Some(kind) => match sim.spawn_vehicle(kind, size) {
                        Ok(id) => println!("Spawned {} vehicle {:?}", kind.name(), id),
                        Err(e) => println!("Could not spawn: {}", e),
                    },
                    None => println!("Usage: spawn <distance|energy> [size]"),
                }
            }
            "food" => match args.first().and_then(|n| n.parse::<usize>().ok()) {
                Some(n) => {
                    sim.replenish_food(n);
                    println!("Dropped {} food pairs", n);
                }
                None => println!("Usage: food <number>"),
            },
            "terrain" => {
                let class = args.first().and_then(|name| CostClass::parse(name));
                let radius = args.get(1).and_then(|r| r.parse::<f64>().ok());
                match class {
                    Some(class) => match sim.field.add_random_terrain(class, radius) {
                        Ok(id) => println!("Added {:?} terrain {:?}", class, id),
                        Err(e) => println!("Could not add terrain: {}", e),
                    },
                    None => println!("Usage: terrain <fair|medium|steep> [radius]"),
                }
            }
            "pause" => {
                sim.pause();
                println!("Paused.");
            }
            "resume" => {
                sim.resume();
                println!("Running.");
            }
            "reset" => {
                sim.reset();
                println!("Field cleared.");
            }
            _ => println!(
                "Unknown command. Available: tick, run <n>, status, spawn, food, terrain, pause, resume, reset, quit"
            ),
        }
    }

    println!(
        "\nGoodbye! Final state: {} vehicles ({} alive), {} ticks elapsed.",
        sim.vehicles().len(),
        sim.living_count(),
        sim.current_tick
    );
    Ok(())
}

/// Starting field: one vehicle of each type, some food and one patch per class
fn populate(sim: &mut Simulation) -> Result<()> {
    for kind in VehicleType::ALL {
        sim.spawn_vehicle(kind, None)?;
    }
    sim.replenish_food(5);
    for class in CostClass::ALL {
        sim.field.add_random_terrain(class, None)?;
    }
    tracing::info!(
        "Populated field with {} vehicles and {} terrain patches",
        sim.vehicles().len(),
        sim.field.terrain().len()
    );
    Ok(())
}

fn report_events(events: &[SimulationEvent]) {
    for event in events {
        match event {
            SimulationEvent::FoodEaten { vehicle, value, .. } => {
                println!("  vehicle {} ate food worth {}", vehicle.0, value)
            }
            SimulationEvent::VehicleDied { vehicle, kind, .. } => {
                println!("  {} vehicle {} died", kind.name(), vehicle.0)
            }
            SimulationEvent::VehicleRespawned { vehicle, kind, .. } => {
                println!("  {} vehicle {} spawned", kind.name(), vehicle.0)
            }
            SimulationEvent::AllDead { tick } => println!("  all vehicles dead at tick {}", tick),
        }
    }
}

/// Display a brief status summary
fn display_status(sim: &Simulation) {
    println!();
    println!(
        "--- Tick {} | Vehicles: {} alive / {} | Food: {} + {} | {} ---",
        sim.current_tick,
        sim.living_count(),
        sim.vehicles().len(),
        sim.field.food(VehicleType::Distance).len(),
        sim.field.food(VehicleType::Energy).len(),
        if sim.is_paused() { "paused" } else { "running" }
    );
}

/// Display detailed status of all vehicles
fn display_detailed_status(sim: &Simulation) {
    let config = sim.config();
    println!();
    println!("=== Detailed Status (Tick {}) ===", sim.current_tick);
    println!();

    for vehicle in sim.vehicles() {
        let position = vehicle.position();
        println!(
            "{:?} {} (size {}){}",
            vehicle.id,
            vehicle.kind().name(),
            vehicle.size(),
            if vehicle.is_deceased() { " - deceased" } else { "" }
        );
        println!(
            "  Pose: ({:.1}, {:.1}) facing {:.0} deg",
            position.x,
            position.y,
            vehicle.heading().to_degrees().rem_euclid(360.0)
        );
        println!(
            "  Energy: {:.2} (bar {:.0}/{:.0})",
            vehicle.energy(),
            vehicle.display_energy(config),
            config.display_energy_max
        );
        match vehicle.target() {
            Some(food) => println!(
                "  Target: {:?}, crossing {} patch(es)",
                food,
                vehicle.terrain_to_cross().len()
            ),
            None => println!("  Target: none"),
        }
        println!();
    }

    let cemetery = sim.field.cemetery();
    println!(
        "Dead: {} (distance {}, energy {}) | Eaten food: {}",
        sim.field.dead_count(),
        cemetery.distance.len(),
        cemetery.energy.len(),
        sim.field.eaten_food().len()
    );
}
