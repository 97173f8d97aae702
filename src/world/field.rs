//! The field: food lists, terrain patches and death bookkeeping
//!
//! All randomness used for spawning comes from a seeded ChaCha RNG so that
//! a run can be reproduced from its seed.

use ahash::AHashSet;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::core::config::SimulationConfig;
use crate::core::error::{ForageError, Result};
use crate::core::types::{FoodId, TerrainId, Vec2, VehicleId, VehicleType};
use crate::entity::{Food, Vehicle};
use crate::world::terrain::{CostClass, Terrain};

/// Deceased vehicles per type, in order of death (display only)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cemetery {
    pub distance: Vec<VehicleId>,
    pub energy: Vec<VehicleId>,
}

impl Cemetery {
    pub fn of(&self, kind: VehicleType) -> &[VehicleId] {
        match kind {
            VehicleType::Distance => &self.distance,
            VehicleType::Energy => &self.energy,
        }
    }

    fn record(&mut self, kind: VehicleType, id: VehicleId) {
        match kind {
            VehicleType::Distance => self.distance.push(id),
            VehicleType::Energy => self.energy.push(id),
        }
    }
}

pub struct Field {
    config: SimulationConfig,
    distance_food: Vec<Food>,
    energy_food: Vec<Food>,
    eaten: Vec<Food>,
    eaten_ids: AHashSet<FoodId>,
    terrain: Vec<Terrain>,
    dead_count: usize,
    cemetery: Cemetery,
    rng: ChaCha8Rng,
    next_food_id: u32,
    next_terrain_id: u32,
    next_vehicle_id: u32,
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("distance_food", &self.distance_food.len())
            .field("energy_food", &self.energy_food.len())
            .field("eaten", &self.eaten.len())
            .field("terrain", &self.terrain.len())
            .field("dead_count", &self.dead_count)
            .finish()
    }
}

impl Field {
    /// Create an empty field; the config is validated first
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            distance_food: Vec::new(),
            energy_food: Vec::new(),
            eaten: Vec::new(),
            eaten_ids: AHashSet::new(),
            terrain: Vec::new(),
            dead_count: 0,
            cemetery: Cemetery::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_food_id: 0,
            next_terrain_id: 0,
            next_vehicle_id: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn auto_respawn(&self) -> bool {
        self.config.auto_respawn
    }

    pub fn set_auto_respawn(&mut self, enabled: bool) {
        self.config.auto_respawn = enabled;
    }

    pub fn food(&self, kind: VehicleType) -> &[Food] {
        match kind {
            VehicleType::Distance => &self.distance_food,
            VehicleType::Energy => &self.energy_food,
        }
    }

    fn food_list_mut(&mut self, kind: VehicleType) -> &mut Vec<Food> {
        match kind {
            VehicleType::Distance => &mut self.distance_food,
            VehicleType::Energy => &mut self.energy_food,
        }
    }

    /// Live food of either type by id
    pub fn find_food_mut(&mut self, id: FoodId) -> Option<&mut Food> {
        self.distance_food
            .iter_mut()
            .chain(self.energy_food.iter_mut())
            .find(|food| food.id == id)
    }

    pub fn eaten_food(&self) -> &[Food] {
        &self.eaten
    }

    pub fn is_eaten(&self, id: FoodId) -> bool {
        self.eaten_ids.contains(&id)
    }

    pub fn terrain(&self) -> &[Terrain] {
        &self.terrain
    }

    pub fn terrain_mut(&mut self, id: TerrainId) -> Option<&mut Terrain> {
        self.terrain.iter_mut().find(|t| t.id == id)
    }

    pub fn dead_count(&self) -> usize {
        self.dead_count
    }

    pub fn cemetery(&self) -> &Cemetery {
        &self.cemetery
    }

    /// Place a piece of food explicitly
    pub fn add_food(&mut self, anchor: Vec2, value: u32, kind: VehicleType) -> FoodId {
        let id = FoodId(self.next_food_id);
        self.next_food_id += 1;
        let food = Food::new(id, anchor, value, kind, &self.config);
        self.food_list_mut(kind).push(food);
        id
    }

    /// Drop `count` pairs of food: one per type, equal value, independent positions
    pub fn spawn_food_pairs(&mut self, count: usize) -> Vec<(FoodId, FoodId)> {
        let mut pairs = Vec::with_capacity(count);
        for _ in 0..count {
            let distance_anchor = self.random_point();
            let energy_anchor = self.random_point();
            let value = self
                .rng
                .gen_range(self.config.food_value_min..=self.config.food_value_max);
            let distance = self.add_food(distance_anchor, value, VehicleType::Distance);
            let energy = self.add_food(energy_anchor, value, VehicleType::Energy);
            pairs.push((distance, energy));
        }
        if count > 0 {
            tracing::debug!("Dropped {} food pairs", count);
        }
        pairs
    }

    /// Remove live food (external delete)
    pub fn remove_food(&mut self, id: FoodId) -> Result<Food> {
        for kind in VehicleType::ALL {
            let list = self.food_list_mut(kind);
            if let Some(index) = list.iter().position(|food| food.id == id) {
                return Ok(list.remove(index));
            }
        }
        Err(ForageError::FoodNotFound(id))
    }

    /// Move a live piece of food to the eaten list
    pub fn eat(&mut self, kind: VehicleType, id: FoodId) -> Option<Food> {
        let list = self.food_list_mut(kind);
        let index = list.iter().position(|food| food.id == id)?;
        let food = list.remove(index);
        self.eaten_ids.insert(food.id);
        self.eaten.push(food.clone());
        Some(food)
    }

    pub fn add_terrain(&mut self, center: Vec2, radius: f64, class: CostClass) -> Result<TerrainId> {
        let id = TerrainId(self.next_terrain_id);
        let terrain = Terrain::new(id, center, radius, class)?;
        self.next_terrain_id += 1;
        self.terrain.push(terrain);
        Ok(id)
    }

    /// Add a patch at a random spot; radius is random unless given
    pub fn add_random_terrain(&mut self, class: CostClass, radius: Option<f64>) -> Result<TerrainId> {
        let center = self.random_point();
        let radius = match radius {
            Some(radius) => radius,
            None => self
                .rng
                .gen_range(self.config.terrain_radius_min..self.config.terrain_radius_max),
        };
        self.add_terrain(center, radius, class)
    }

    pub fn remove_terrain(&mut self, id: TerrainId) -> Result<Terrain> {
        let index = self
            .terrain
            .iter()
            .position(|t| t.id == id)
            .ok_or(ForageError::TerrainNotFound(id))?;
        Ok(self.terrain.remove(index))
    }

    /// Death bookkeeping: dead count and the type's cemetery
    pub fn record_death(&mut self, vehicle: &Vehicle) {
        self.dead_count += 1;
        self.cemetery.record(vehicle.kind(), vehicle.id);
    }

    pub fn next_vehicle_id(&mut self) -> VehicleId {
        let id = VehicleId(self.next_vehicle_id);
        self.next_vehicle_id += 1;
        id
    }

    /// Random anchor and heading (whole degrees) for a new vehicle
    pub fn random_vehicle_pose(&mut self) -> (Vec2, f64) {
        let position = self.random_point();
        let degrees: u32 = self.rng.gen_range(0..360);
        (position, (degrees as f64).to_radians())
    }

    /// Create a vehicle of the given type and size at a random pose
    pub fn create_vehicle(&mut self, kind: VehicleType, size: u32) -> Result<Vehicle> {
        let (position, heading) = self.random_vehicle_pose();
        let id = self.next_vehicle_id();
        Vehicle::new(id, position, heading, kind, size, &self.config)
    }

    /// Clear food, terrain and death bookkeeping
    pub fn reset(&mut self) {
        self.distance_food.clear();
        self.energy_food.clear();
        self.eaten.clear();
        self.eaten_ids.clear();
        self.terrain.clear();
        self.dead_count = 0;
        self.cemetery = Cemetery::default();
    }

    fn random_point(&mut self) -> Vec2 {
        let x = self.rng.gen_range(0.0..self.config.field_width);
        let y = self.rng.gen_range(0.0..self.config.field_height);
        Vec2::new(x, y)
    }
}
