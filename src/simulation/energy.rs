//! Energy ledger - travel debits, eating credits and death

use crate::core::config::SimulationConfig;
use crate::core::types::{FoodId, Vec2};
use crate::entity::Vehicle;
use crate::world::terrain::Terrain;
use crate::world::World;

/// Energy spent covering `distance` at `multiplier` times the flat rate
pub fn travel_cost(distance: f64, multiplier: f64, config: &SimulationConfig) -> f64 {
    distance / config.energy_divisor * multiplier
}

/// Cost multiplier of the ground under a body
///
/// Taken from the first patch in scan order that contains any body corner;
/// flat when none does.
pub fn terrain_multiplier(corners: &[Vec2], terrain: &[Terrain], config: &SimulationConfig) -> f64 {
    terrain
        .iter()
        .find(|patch| corners.iter().any(|corner| patch.contains_point(*corner)))
        .map(|patch| patch.cost_multiplier(config))
        .unwrap_or(config.flat_terrain_cost)
}

/// Debit for one step; never negative
///
/// A step that covered no distance at all costs the idle rate.
pub fn step_cost(distance: f64, corners: &[Vec2], terrain: &[Terrain], config: &SimulationConfig) -> f64 {
    if distance == 0.0 {
        return config.idle_energy_cost;
    }
    travel_cost(distance.abs(), terrain_multiplier(corners, terrain, config), config)
}

/// Consume a piece of food the vehicle is touching
///
/// Credits the food's value and briefly stops the vehicle. Food that is no
/// longer live has no effect. Returns the credited value.
pub fn eat<W: World + ?Sized>(vehicle: &mut Vehicle, world: &mut W, food: FoodId) -> Option<u32> {
    let config_speed = world.config().step_speed;
    let eaten = world.notify_eat(vehicle.id, vehicle.kind(), food)?;
    vehicle.speed = 0.0;
    vehicle.energy += eaten.value() as f64;
    vehicle.speed = config_speed;
    tracing::debug!(
        vehicle = vehicle.id.0,
        food = food.0,
        value = eaten.value(),
        energy = vehicle.energy,
        "Vehicle ate food"
    );
    Some(eaten.value())
}

/// Run the death procedure if the vehicle's energy is exhausted
///
/// Fires at most once per vehicle. Returns whether the vehicle is dead.
pub fn check_death<W: World + ?Sized>(vehicle: &mut Vehicle, world: &mut W) -> bool {
    if vehicle.deceased {
        return true;
    }
    if vehicle.energy > 0.0 {
        return false;
    }

    vehicle.speed = 0.0;
    vehicle.deceased = true;
    world.notify_death(vehicle);
    tracing::info!(
        vehicle = vehicle.id.0,
        kind = vehicle.kind().name(),
        energy = vehicle.energy,
        "Vehicle died"
    );

    if world.auto_respawn() {
        if let Some(replacement) = world.spawn_vehicle(vehicle.kind(), vehicle.size()) {
            tracing::info!(
                replaced = vehicle.id.0,
                vehicle = replacement.0,
                "Spawned replacement vehicle"
            );
        }
    }

    if world.vehicle_count() > 0 && world.living_vehicle_count() == 0 {
        tracing::info!("All vehicles dead, pausing");
        world.request_pause();
    }
    true
}
