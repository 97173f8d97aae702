//! Simulation container - the field plus every vehicle on it

use serde::Serialize;

use crate::core::config::SimulationConfig;
use crate::core::error::{ForageError, Result};
use crate::core::types::{FoodId, Tick, Vec2, VehicleId, VehicleType};
use crate::entity::{Food, Vehicle};
use crate::simulation::tick::run_simulation_tick;
use crate::world::field::Field;
use crate::world::terrain::Terrain;
use crate::world::World;

/// Things that happened during a tick, for display and logging
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimulationEvent {
    FoodEaten {
        tick: Tick,
        vehicle: VehicleId,
        food: FoodId,
        value: u32,
    },
    VehicleDied {
        tick: Tick,
        vehicle: VehicleId,
        kind: VehicleType,
    },
    VehicleRespawned {
        tick: Tick,
        vehicle: VehicleId,
        kind: VehicleType,
    },
    /// Every vehicle is dead; the simulation paused itself
    AllDead { tick: Tick },
}

/// The game world containing the field and all vehicles
#[derive(Debug)]
pub struct Simulation {
    pub current_tick: Tick,
    pub field: Field,
    pub(crate) vehicles: Vec<Vehicle>,
    pub(crate) paused: bool,
}

impl Simulation {
    /// A new, running simulation on an empty field
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self> {
        Ok(Self {
            current_tick: 0,
            field: Field::new(config, seed)?,
            vehicles: Vec::new(),
            paused: false,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        self.field.config()
    }

    /// Spawn a vehicle at a random pose; size defaults from the config
    pub fn spawn_vehicle(&mut self, kind: VehicleType, size: Option<u32>) -> Result<VehicleId> {
        let size = size.unwrap_or(self.field.config().default_vehicle_size);
        let vehicle = self.field.create_vehicle(kind, size)?;
        let id = vehicle.id;
        self.vehicles.push(vehicle);
        Ok(id)
    }

    /// Place a vehicle at an explicit pose
    pub fn add_vehicle(&mut self, position: Vec2, heading: f64, kind: VehicleType, size: u32) -> Result<VehicleId> {
        let id = self.field.next_vehicle_id();
        let vehicle = Vehicle::new(id, position, heading, kind, size, self.field.config())?;
        self.vehicles.push(vehicle);
        Ok(id)
    }

    /// Explicit removal; the only way a vehicle leaves the world
    pub fn remove_vehicle(&mut self, id: VehicleId) -> Result<Vehicle> {
        let index = self
            .vehicles
            .iter()
            .position(|v| v.id == id)
            .ok_or(ForageError::VehicleNotFound(id))?;
        Ok(self.vehicles.remove(index))
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn vehicle_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|v| v.id == id)
    }

    pub fn living_count(&self) -> usize {
        self.vehicles.iter().filter(|v| !v.is_deceased()).count()
    }

    pub fn living_of(&self, kind: VehicleType) -> usize {
        self.vehicles
            .iter()
            .filter(|v| v.kind() == kind && !v.is_deceased())
            .count()
    }

    /// True when there is at least one vehicle and none is alive
    pub fn all_dead(&self) -> bool {
        !self.vehicles.is_empty() && self.living_count() == 0
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Entry point for the external food timer
    pub fn replenish_food(&mut self, pairs: usize) -> Vec<(FoodId, FoodId)> {
        self.field.spawn_food_pairs(pairs)
    }

    /// Advance one tick; does nothing while paused
    pub fn run_tick(&mut self) -> Vec<SimulationEvent> {
        run_simulation_tick(self)
    }

    /// Clear vehicles, food, terrain and bookkeeping
    pub fn reset(&mut self) {
        self.vehicles.clear();
        self.field.reset();
        self.current_tick = 0;
        self.paused = false;
    }
}

/// The [`World`] a vehicle steps against during one tick
///
/// Wraps the field with the vehicle counts of the running tick. Vehicles
/// spawned while stepping are buffered and handed back by
/// [`TickContext::finish`].
pub struct TickContext<'a> {
    field: &'a mut Field,
    tick: Tick,
    vehicle_count: usize,
    living: usize,
    spawned: Vec<Vehicle>,
    pause_requested: bool,
    events: Vec<SimulationEvent>,
}

impl<'a> TickContext<'a> {
    pub fn new(field: &'a mut Field, tick: Tick, vehicle_count: usize, living: usize) -> Self {
        Self {
            field,
            tick,
            vehicle_count,
            living,
            spawned: Vec::new(),
            pause_requested: false,
            events: Vec::new(),
        }
    }

    pub fn pause_requested(&self) -> bool {
        self.pause_requested
    }

    /// Drain the vehicles spawned so far
    pub fn take_spawned(&mut self) -> Vec<Vehicle> {
        std::mem::take(&mut self.spawned)
    }

    /// Spawned vehicles, pause request and events of this context
    pub fn finish(self) -> (Vec<Vehicle>, bool, Vec<SimulationEvent>) {
        (self.spawned, self.pause_requested, self.events)
    }
}

impl World for TickContext<'_> {
    fn config(&self) -> &SimulationConfig {
        self.field.config()
    }

    fn food(&self, kind: VehicleType) -> &[Food] {
        self.field.food(kind)
    }

    fn terrain(&self) -> &[Terrain] {
        self.field.terrain()
    }

    fn eaten_food(&self) -> &[Food] {
        self.field.eaten_food()
    }

    fn is_eaten(&self, id: FoodId) -> bool {
        self.field.is_eaten(id)
    }

    fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    fn living_vehicle_count(&self) -> usize {
        self.living
    }

    fn auto_respawn(&self) -> bool {
        self.field.auto_respawn()
    }

    fn notify_eat(&mut self, eater: VehicleId, kind: VehicleType, food: FoodId) -> Option<Food> {
        let eaten = self.field.eat(kind, food)?;
        self.events.push(SimulationEvent::FoodEaten {
            tick: self.tick,
            vehicle: eater,
            food,
            value: eaten.value(),
        });
        Some(eaten)
    }

    fn notify_death(&mut self, vehicle: &Vehicle) {
        self.field.record_death(vehicle);
        self.living = self.living.saturating_sub(1);
        self.events.push(SimulationEvent::VehicleDied {
            tick: self.tick,
            vehicle: vehicle.id,
            kind: vehicle.kind(),
        });
    }

    fn spawn_vehicle(&mut self, kind: VehicleType, size: u32) -> Option<VehicleId> {
        match self.field.create_vehicle(kind, size) {
            Ok(vehicle) => {
                let id = vehicle.id;
                self.spawned.push(vehicle);
                self.vehicle_count += 1;
                self.living += 1;
                self.events.push(SimulationEvent::VehicleRespawned {
                    tick: self.tick,
                    vehicle: id,
                    kind,
                });
                Some(id)
            }
            Err(err) => {
                tracing::warn!("Could not spawn {} vehicle: {}", kind.name(), err);
                None
            }
        }
    }

    fn spawn_food_pairs(&mut self, count: usize) {
        self.field.spawn_food_pairs(count);
    }

    fn request_pause(&mut self) {
        if !self.pause_requested {
            self.pause_requested = true;
            self.events.push(SimulationEvent::AllDead { tick: self.tick });
        }
    }
}
