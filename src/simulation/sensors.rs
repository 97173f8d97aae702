//! Sensor model - scalar readings from the two sensors of a vehicle

use crate::core::types::{Side, VehicleType};
use crate::entity::Vehicle;
use crate::world::World;

/// Both readings of one sensor
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorReading {
    pub food: f64,
    pub terrain: f64,
}

/// Readings for the left and right sensor, indexed by [`Side`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorReadings {
    pub left: SensorReading,
    pub right: SensorReading,
}

impl SensorReadings {
    pub fn side(&self, side: Side) -> SensorReading {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Distance from a sensor to the target food's anchor; 0 without a target
pub fn food_reading<W: World + ?Sized>(vehicle: &Vehicle, world: &W, side: Side) -> f64 {
    let Some(target) = vehicle.target() else {
        return 0.0;
    };
    match world.find_food(vehicle.kind(), target) {
        Some(food) => vehicle.geometry().sensor(side).distance(&food.anchor()),
        None => 0.0,
    }
}

/// Scaled boundary distance of the first patch in range of a sensor
///
/// Patches the vehicle has committed to cross are ignored. The first patch
/// in scan order whose boundary is within range wins, even when a later one
/// is closer. Inside a patch the reading is negative.
pub fn terrain_reading<W: World + ?Sized>(vehicle: &Vehicle, world: &W, side: Side) -> f64 {
    let config = world.config();
    let sensor = vehicle.geometry().sensor(side);
    world
        .terrain()
        .iter()
        .filter(|terrain| !vehicle.terrain_to_cross().contains(&terrain.id))
        .map(|terrain| terrain.boundary_distance(sensor))
        .find(|distance| *distance < config.terrain_sensor_range)
        .map(|distance| distance * config.terrain_sensor_gain)
        .unwrap_or(0.0)
}

/// Read both sensors. Only energy vehicles sense terrain.
pub fn read_sensors<W: World + ?Sized>(vehicle: &Vehicle, world: &W) -> SensorReadings {
    let read = |side| SensorReading {
        food: food_reading(vehicle, world, side),
        terrain: match vehicle.kind() {
            VehicleType::Energy => terrain_reading(vehicle, world, side),
            VehicleType::Distance => 0.0,
        },
    };
    SensorReadings {
        left: read(Side::Left),
        right: read(Side::Right),
    }
}
