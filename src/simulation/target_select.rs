//! Target selection - estimated path cost and net gain of each food
//!
//! Distance vehicles price every path as flat ground. Energy vehicles walk
//! the straight path from their centroid to the food's centre and, for each
//! terrain patch the path cuts, decide whether to cross it (chord at the
//! patch's rate) or go around it (arc at the flat rate).
//!
//! The food with the largest positive net gain wins; ties keep the first in
//! list order.

use serde::Serialize;

use crate::core::config::SimulationConfig;
use crate::core::types::{FoodId, TerrainId, Vec2, VehicleType};
use crate::entity::{Food, Vehicle};
use crate::simulation::energy::travel_cost;
use crate::spatial::{segment_distance, ChordGeometry};
use crate::world::terrain::Terrain;
use crate::world::World;

/// How a planned path deals with one terrain patch it cuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Crossing {
    /// The food lies inside the patch, so the path has to enter it
    Forced,
    /// Crossing is no dearer than going around
    Cross,
    /// Going around the arc at flat cost is cheaper
    Detour,
}

/// Cost estimate for reaching one piece of food
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathEstimate {
    pub food: FoodId,
    pub path_distance: f64,
    pub path_cost: f64,
    pub net_gain: f64,
    /// Every patch the straight path cuts, with the decision taken
    pub decisions: Vec<(TerrainId, Crossing)>,
}

impl PathEstimate {
    /// Patches the plan crosses rather than avoids
    pub fn terrain_to_cross(&self) -> Vec<TerrainId> {
        self.decisions
            .iter()
            .filter(|(_, crossing)| *crossing != Crossing::Detour)
            .map(|(id, _)| *id)
            .collect()
    }
}

/// Outcome of one selection pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    pub target: Option<FoodId>,
    pub net_gain: f64,
    pub terrain_to_cross: Vec<TerrainId>,
}

/// Flat-ground estimate from the centroid to the food anchor
pub fn estimate_flat(origin: Vec2, food: &Food, config: &SimulationConfig) -> PathEstimate {
    let path_distance = origin.distance(&food.anchor());
    let path_cost = travel_cost(path_distance, config.flat_terrain_cost, config);
    PathEstimate {
        food: food.id,
        path_distance,
        path_cost,
        net_gain: food.value() as f64 - path_cost,
        decisions: Vec::new(),
    }
}

/// Terrain-aware estimate from the centroid to the food centre
pub fn estimate_terrain_aware(
    origin: Vec2,
    food: &Food,
    terrain: &[Terrain],
    config: &SimulationConfig,
) -> PathEstimate {
    let destination = food.center();
    let flat = config.flat_terrain_cost;
    let mut path_distance = origin.distance(&destination);
    let mut path_cost = travel_cost(path_distance, flat, config);
    let mut decisions = Vec::new();

    for patch in terrain {
        let distance = segment_distance(patch.center(), origin, destination);
        let Some(chord) = ChordGeometry::new(patch.radius(), distance) else {
            continue;
        };
        let multiplier = patch.cost_multiplier(config);
        let flat_chord = travel_cost(chord.chord_length, flat, config);
        let cross_chord = travel_cost(chord.chord_length, multiplier, config);
        let flat_arc = travel_cost(chord.arc_length, flat, config);

        let crossing = if patch.contains_rect(&food.area()) {
            Crossing::Forced
        } else if cross_chord > flat_arc {
            Crossing::Detour
        } else {
            Crossing::Cross
        };

        match crossing {
            Crossing::Forced | Crossing::Cross => {
                path_cost += cross_chord - flat_chord;
            }
            Crossing::Detour => {
                path_distance += chord.arc_length - chord.chord_length;
                path_cost += flat_arc - flat_chord;
            }
        }
        decisions.push((patch.id, crossing));
    }

    PathEstimate {
        food: food.id,
        path_distance,
        path_cost,
        net_gain: food.value() as f64 - path_cost,
        decisions,
    }
}

/// Estimate the path to one piece of food the way a vehicle of `kind` would
pub fn estimate(
    kind: VehicleType,
    origin: Vec2,
    food: &Food,
    terrain: &[Terrain],
    config: &SimulationConfig,
) -> PathEstimate {
    match kind {
        VehicleType::Distance => estimate_flat(origin, food, config),
        VehicleType::Energy => estimate_terrain_aware(origin, food, terrain, config),
    }
}

/// Pick the best food for a vehicle without changing anything
pub fn select_target<W: World + ?Sized>(vehicle: &Vehicle, world: &W) -> Selection {
    let config = world.config();
    let origin = vehicle.centroid();
    let mut best = Selection::default();

    for food in world.food(vehicle.kind()) {
        if world.is_eaten(food.id) {
            continue;
        }
        let estimate = estimate(vehicle.kind(), origin, food, world.terrain(), config);
        if estimate.net_gain > best.net_gain {
            best = Selection {
                target: Some(food.id),
                net_gain: estimate.net_gain,
                terrain_to_cross: estimate.terrain_to_cross(),
            };
        }
    }
    best
}

/// Run a selection pass and commit the result to the vehicle
pub fn retarget<W: World + ?Sized>(vehicle: &mut Vehicle, world: &W) -> Selection {
    let selection = select_target(vehicle, world);
    match selection.target {
        Some(food) => tracing::debug!(
            vehicle = vehicle.id.0,
            food = food.0,
            net_gain = selection.net_gain,
            crossing = selection.terrain_to_cross.len(),
            "Selected target"
        ),
        None => tracing::trace!(vehicle = vehicle.id.0, "No food worth chasing"),
    }
    vehicle.target = selection.target;
    vehicle.terrain_to_cross = selection.terrain_to_cross.clone();
    selection
}

/// Whether the vehicle's current target still needs replacing
pub fn needs_target<W: World + ?Sized>(vehicle: &Vehicle, world: &W) -> bool {
    match vehicle.target() {
        None => true,
        Some(food) => world.is_eaten(food) || world.find_food(vehicle.kind(), food).is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{CostClass, Field, TickContext};

    fn config() -> SimulationConfig {
        SimulationConfig::default()
    }

    fn food(id: u32, anchor: Vec2, value: u32) -> Food {
        Food::new(FoodId(id), anchor, value, VehicleType::Energy, &config())
    }

    fn patch(id: u32, center: Vec2, radius: f64, class: CostClass) -> Terrain {
        Terrain::new(TerrainId(id), center, radius, class).unwrap()
    }

    #[test]
    fn test_flat_estimate_measures_to_anchor() {
        let config = config();
        let f = food(0, Vec2::new(300.0, 100.0), 8);
        let estimate = estimate_flat(Vec2::new(100.0, 100.0), &f, &config);
        assert!((estimate.path_distance - 200.0).abs() < 1e-9);
        assert!((estimate.path_cost - 1.0).abs() < 1e-9);
        assert!((estimate.net_gain - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_terrain_aware_without_terrain_is_flat_to_centre() {
        let config = config();
        let f = food(0, Vec2::new(288.0, 88.0), 8);
        // Centre at (300, 100)
        let estimate = estimate_terrain_aware(Vec2::new(100.0, 100.0), &f, &[], &config);
        assert!((estimate.path_distance - 200.0).abs() < 1e-9);
        assert!((estimate.net_gain - 7.0).abs() < 1e-9);
        assert!(estimate.decisions.is_empty());
    }

    #[test]
    fn test_steep_blocking_patch_is_detoured() {
        let config = config();
        let f = food(0, Vec2::new(288.0, 88.0), 8);
        let terrain = [patch(0, Vec2::new(200.0, 100.0), 50.0, CostClass::Steep)];
        let estimate = estimate_terrain_aware(Vec2::new(100.0, 100.0), &f, &terrain, &config);

        // Chord is the full diameter; the detour is half the circumference
        let arc = 50.0 * std::f64::consts::PI;
        assert_eq!(estimate.decisions, vec![(TerrainId(0), Crossing::Detour)]);
        assert!((estimate.path_distance - (200.0 - 100.0 + arc)).abs() < 1e-9);
        assert!((estimate.path_cost - (200.0 - 100.0 + arc) / 200.0).abs() < 1e-9);
        assert!(estimate.terrain_to_cross().is_empty());
    }

    #[test]
    fn test_cheap_patch_is_crossed_when_multiplier_allows() {
        let config = SimulationConfig {
            terrain_costs: vec![1.2, 15.0, 20.0],
            ..SimulationConfig::default()
        };
        let f = food(0, Vec2::new(288.0, 88.0), 8);
        let terrain = [patch(3, Vec2::new(200.0, 100.0), 50.0, CostClass::Fair)];
        let estimate = estimate_terrain_aware(Vec2::new(100.0, 100.0), &f, &terrain, &config);

        assert_eq!(estimate.decisions, vec![(TerrainId(3), Crossing::Cross)]);
        assert!((estimate.path_distance - 200.0).abs() < 1e-9);
        let expected_cost = 1.0 - 100.0 / 200.0 + 100.0 * 1.2 / 200.0;
        assert!((estimate.path_cost - expected_cost).abs() < 1e-9);
        assert_eq!(estimate.terrain_to_cross(), vec![TerrainId(3)]);
    }

    #[test]
    fn test_patch_holding_food_forces_crossing() {
        let config = config();
        // Food centre (300, 100) inside a steep patch centred on it
        let f = food(0, Vec2::new(288.0, 88.0), 8);
        let terrain = [patch(1, Vec2::new(300.0, 100.0), 60.0, CostClass::Steep)];
        let estimate = estimate_terrain_aware(Vec2::new(100.0, 100.0), &f, &terrain, &config);

        assert_eq!(estimate.decisions, vec![(TerrainId(1), Crossing::Forced)]);
        // Segment ends at the centre: chord = 2r even though only r is inside
        let expected_cost = 1.0 - 120.0 / 200.0 + 120.0 * 20.0 / 200.0;
        assert!((estimate.path_cost - expected_cost).abs() < 1e-9);
        assert!(estimate.net_gain < 0.0);
    }

    #[test]
    fn test_tangent_patch_is_ignored() {
        let config = config();
        let f = food(0, Vec2::new(288.0, 88.0), 8);
        let terrain = [patch(0, Vec2::new(200.0, 150.0), 50.0, CostClass::Steep)];
        let estimate = estimate_terrain_aware(Vec2::new(100.0, 100.0), &f, &terrain, &config);
        assert!(estimate.decisions.is_empty());
    }

    #[test]
    fn test_multiple_patches_accumulate() {
        let config = config();
        let f = food(0, Vec2::new(488.0, 88.0), 10);
        let terrain = [
            patch(0, Vec2::new(200.0, 100.0), 30.0, CostClass::Medium),
            patch(1, Vec2::new(400.0, 120.0), 40.0, CostClass::Steep),
        ];
        let origin = Vec2::new(100.0, 100.0);
        let estimate = estimate_terrain_aware(origin, &f, &terrain, &config);
        assert_eq!(estimate.decisions.len(), 2);

        let single_a = estimate_terrain_aware(origin, &f, &terrain[..1], &config);
        let single_b = estimate_terrain_aware(origin, &f, &terrain[1..], &config);
        let flat = estimate_terrain_aware(origin, &f, &[], &config);
        let combined = flat.path_cost
            + (single_a.path_cost - flat.path_cost)
            + (single_b.path_cost - flat.path_cost);
        assert!((estimate.path_cost - combined).abs() < 1e-9);
    }

    fn energy_vehicle(field: &mut Field) -> Vehicle {
        let id = field.next_vehicle_id();
        Vehicle::new(id, Vec2::new(100.0, 100.0), 0.0, VehicleType::Energy, 40, field.config()).unwrap()
    }

    #[test]
    fn test_select_keeps_first_of_equal_gains() {
        let mut field = Field::new(config(), 5).unwrap();
        let v = energy_vehicle(&mut field);
        // Centroid (110, 115); both food centres exactly 100 away
        let first = field.add_food(Vec2::new(198.0, 103.0), 8, VehicleType::Energy);
        field.add_food(Vec2::new(98.0, 203.0), 8, VehicleType::Energy);
        let ctx = TickContext::new(&mut field, 0, 1, 1);
        let selection = select_target(&v, &ctx);
        assert_eq!(selection.target, Some(first));
    }

    #[test]
    fn test_no_positive_gain_leaves_target_unset() {
        let config = SimulationConfig {
            energy_divisor: 1.0,
            ..SimulationConfig::default()
        };
        let mut field = Field::new(config, 5).unwrap();
        let mut v = energy_vehicle(&mut field);
        v.target = Some(FoodId(99));
        v.terrain_to_cross = vec![TerrainId(7)];
        field.add_food(Vec2::new(400.0, 400.0), 5, VehicleType::Energy);
        let ctx = TickContext::new(&mut field, 0, 1, 1);

        let selection = retarget(&mut v, &ctx);
        assert!(selection.target.is_none());
        assert!(v.target().is_none());
        assert!(v.terrain_to_cross().is_empty());
    }

    #[test]
    fn test_selection_only_considers_own_food_list() {
        let mut field = Field::new(config(), 5).unwrap();
        let v = energy_vehicle(&mut field);
        field.add_food(Vec2::new(150.0, 100.0), 10, VehicleType::Distance);
        let far = field.add_food(Vec2::new(500.0, 300.0), 6, VehicleType::Energy);
        let ctx = TickContext::new(&mut field, 0, 1, 1);
        assert_eq!(select_target(&v, &ctx).target, Some(far));
    }

    #[test]
    fn test_needs_target_after_food_vanishes() {
        let mut field = Field::new(config(), 5).unwrap();
        let mut v = energy_vehicle(&mut field);
        let eaten = field.add_food(Vec2::new(150.0, 100.0), 10, VehicleType::Energy);
        let deleted = field.add_food(Vec2::new(300.0, 100.0), 10, VehicleType::Energy);
        let live = field.add_food(Vec2::new(400.0, 100.0), 10, VehicleType::Energy);
        field.eat(VehicleType::Energy, eaten);
        field.remove_food(deleted).unwrap();
        let ctx = TickContext::new(&mut field, 0, 1, 1);

        assert!(needs_target(&v, &ctx));
        v.target = Some(eaten);
        assert!(needs_target(&v, &ctx));
        v.target = Some(deleted);
        assert!(needs_target(&v, &ctx));
        v.target = Some(live);
        assert!(!needs_target(&v, &ctx));
    }
}
