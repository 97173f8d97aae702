//! Tick system - orchestrates simulation updates
//!
//! Each living vehicle runs a fixed pipeline per step:
//! geometry -> eat -> target selection -> wheel speeds -> translate ->
//! rotate -> boundary -> trail -> energy debit -> death check.
//!
//! Vehicles are stepped one after another in list order. A replacement
//! spawned by a death is appended and stepped later in the same pass.

use serde::Serialize;

use crate::entity::Vehicle;
use crate::simulation::energy::{self, check_death, step_cost};
use crate::simulation::sensors::read_sensors;
use crate::simulation::steering::{clamp_to_field, heading_delta, translation, wheel_speeds};
use crate::simulation::target_select::{needs_target, retarget};
use crate::spatial::polygon_intersects_rect;
use crate::world::{Simulation, SimulationEvent, TickContext, World};

/// What happened to one vehicle during one step
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepOutcome {
    /// The vehicle was already dead and did nothing
    pub skipped: bool,
    /// Length of this step's displacement
    pub distance: f64,
    pub energy_spent: f64,
    /// Value of the food eaten this step
    pub ate: Option<u32>,
    pub retargeted: bool,
    pub clamped: bool,
    /// The vehicle died during this step
    pub died: bool,
}

impl Vehicle {
    /// Advance this vehicle by one step against `world`
    pub fn step<W: World + ?Sized>(&mut self, world: &mut W) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if self.deceased {
            outcome.skipped = true;
            return outcome;
        }
        // Energy may have been drained externally since the last step
        if check_death(self, world) {
            outcome.died = true;
            return outcome;
        }

        self.refresh_geometry();

        if let Some(target) = self.target {
            let area = world.find_food(self.kind(), target).map(|food| food.area());
            if let Some(area) = area {
                if polygon_intersects_rect(self.body(), &area) {
                    outcome.ate = energy::eat(self, world, target);
                }
            }
        }

        if needs_target(self, &*world) {
            retarget(self, &*world);
            outcome.retargeted = true;
        }

        let config = world.config();
        let readings = read_sensors(self, &*world);
        let wheels = wheel_speeds(self.kind(), &readings, config);

        // Terrain under the body is judged where the step starts
        let start_corners = self.geometry.corners;

        let delta = translation(self.heading, &wheels, self.speed);
        self.position = self.position + delta;
        self.heading += heading_delta(
            &wheels,
            self.speed,
            self.proportions().body_width,
            config.turn_multiplier,
        );
        self.refresh_geometry();
        outcome.clamped = clamp_to_field(self, config);

        self.steps_since_sample += 1;
        if self.steps_since_sample >= config.path_sample_interval {
            self.steps_since_sample = 0;
            self.trail.push(self.position);
        }

        outcome.distance = delta.length();
        outcome.energy_spent = step_cost(outcome.distance, &start_corners, world.terrain(), config);
        self.energy -= outcome.energy_spent;

        tracing::trace!(
            vehicle = self.id.0,
            x = self.position.x,
            y = self.position.y,
            heading = self.heading,
            energy = self.energy,
            "step"
        );

        outcome.died = check_death(self, world);
        outcome
    }
}

/// Run a single simulation tick
///
/// Does nothing while the simulation is paused. Pauses it when the tick
/// leaves every vehicle dead.
pub fn run_simulation_tick(sim: &mut Simulation) -> Vec<SimulationEvent> {
    if sim.paused {
        return Vec::new();
    }

    let tick = sim.current_tick;
    let total = sim.vehicles.len();
    let living = sim.living_count();
    let mut ctx = TickContext::new(&mut sim.field, tick, total, living);

    let mut index = 0;
    while index < sim.vehicles.len() {
        let vehicle = &mut sim.vehicles[index];
        if !vehicle.is_deceased() {
            vehicle.step(&mut ctx);
            let spawned = ctx.take_spawned();
            sim.vehicles.extend(spawned);
        }
        index += 1;
    }

    let (_, pause_requested, events) = ctx.finish();
    if pause_requested {
        tracing::info!(tick, "Simulation paused: all vehicles dead");
        sim.paused = true;
    }
    sim.current_tick += 1;
    events
}
