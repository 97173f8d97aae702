//! The world the vehicles forage in
//!
//! `Field` owns food, terrain and death bookkeeping; `Simulation` adds the
//! vehicle list and the run/pause state. Vehicles never see either type
//! directly: they step against the [`World`] collaborator trait.

pub mod field;
pub mod simulation;
pub mod terrain;

pub use field::{Cemetery, Field};
pub use simulation::{Simulation, SimulationEvent, TickContext};
pub use terrain::{CostClass, Terrain};

use crate::core::config::SimulationConfig;
use crate::core::types::{FoodId, VehicleId, VehicleType};
use crate::entity::{Food, Vehicle};

/// What a vehicle may ask of, and report to, the world during a step
///
/// Reads are side-effect free. Mutations are limited to moving eaten food,
/// death bookkeeping, spawning, and asking the driving loop to pause.
pub trait World {
    fn config(&self) -> &SimulationConfig;

    /// Live food of the list matching a vehicle type, in insertion order
    fn food(&self, kind: VehicleType) -> &[Food];

    /// Terrain patches in scan order
    fn terrain(&self) -> &[Terrain];

    fn eaten_food(&self) -> &[Food];

    fn is_eaten(&self, id: FoodId) -> bool;

    fn vehicle_count(&self) -> usize;

    fn living_vehicle_count(&self) -> usize;

    fn auto_respawn(&self) -> bool;

    /// Move a live piece of food to the eaten list
    ///
    /// Returns `None` when the food is no longer live, so eating the same
    /// piece twice has no effect.
    fn notify_eat(&mut self, eater: VehicleId, kind: VehicleType, food: FoodId) -> Option<Food>;

    fn notify_death(&mut self, vehicle: &Vehicle);

    /// Spawn a vehicle at a random pose
    fn spawn_vehicle(&mut self, kind: VehicleType, size: u32) -> Option<VehicleId>;

    fn spawn_food_pairs(&mut self, count: usize);

    /// Ask the driving loop to stop stepping
    fn request_pause(&mut self);

    fn find_food(&self, kind: VehicleType, id: FoodId) -> Option<&Food> {
        self.food(kind).iter().find(|food| food.id == id)
    }
}
