//! Vehicle state: pose, body geometry, energy and foraging plan
//!
//! The pose anchor is the left sensor. All other parts (right sensor,
//! wheels, body corners, centroid) are re-derived from the pose whenever it
//! changes. The per-tick behaviour lives in `simulation`.

use serde::Serialize;

use crate::core::config::SimulationConfig;
use crate::core::error::{ForageError, Result};
use crate::core::types::{FoodId, Side, TerrainId, Vec2, VehicleId, VehicleType};

/// Body dimensions, fixed by the vehicle size at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Proportions {
    pub body_width: f64,
    pub body_height: f64,
    pub wheel_width: f64,
    pub wheel_height: f64,
    pub sensor_diameter: f64,
}

impl Proportions {
    /// Whole-pixel proportions of a vehicle of the given size
    pub fn from_size(size: u32) -> Result<Self> {
        let scaled = |factor: f64| (size as f64 * factor).floor();
        let proportions = Self {
            body_width: scaled(0.5),
            body_height: scaled(0.75),
            wheel_width: scaled(0.2),
            wheel_height: scaled(0.2),
            sensor_diameter: scaled(0.1),
        };
        if proportions.body_width <= 0.0 {
            return Err(ForageError::InvalidVehicleSize(size));
        }
        Ok(proportions)
    }
}

/// Sensor, wheel and body positions derived from a pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleGeometry {
    pub sensors: [Vec2; 2],
    pub wheels: [Vec2; 2],
    /// Front-left, front-right, rear-right, rear-left
    pub corners: [Vec2; 4],
    pub centroid: Vec2,
}

impl VehicleGeometry {
    pub fn derive(anchor: Vec2, heading: f64, proportions: &Proportions) -> Self {
        let (sin, cos) = heading.sin_cos();
        let width = proportions.body_width;
        let height = proportions.body_height;

        let left_sensor = anchor;
        let right_sensor = Vec2::new(anchor.x + width * cos, anchor.y - width * sin);
        let left_wheel = Vec2::new(left_sensor.x + height * sin, left_sensor.y + height * cos);
        let right_wheel = Vec2::new(left_wheel.x + width * cos, left_wheel.y - width * sin);

        let corners = [left_sensor, right_sensor, right_wheel, left_wheel];
        let left_mid = (corners[0] + corners[3]) * 0.5;
        let right_mid = (corners[1] + corners[2]) * 0.5;

        Self {
            sensors: [left_sensor, right_sensor],
            wheels: [left_wheel, right_wheel],
            corners,
            centroid: (left_mid + right_mid) * 0.5,
        }
    }

    pub fn sensor(&self, side: Side) -> Vec2 {
        self.sensors[side.index()]
    }

    pub fn wheel(&self, side: Side) -> Vec2 {
        self.wheels[side.index()]
    }
}

/// A foraging vehicle
#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub(crate) position: Vec2,
    /// Heading in radians; 0 faces up the screen, increasing turns left
    pub(crate) heading: f64,
    kind: VehicleType,
    size: u32,
    proportions: Proportions,
    pub(crate) geometry: VehicleGeometry,
    pub(crate) speed: f64,
    pub(crate) energy: f64,
    /// Weak reference into the world's food list; re-validated every step
    pub(crate) target: Option<FoodId>,
    /// Patches the current plan crosses instead of avoiding
    pub(crate) terrain_to_cross: Vec<TerrainId>,
    pub(crate) deceased: bool,
    pub(crate) trail: Vec<Vec2>,
    pub(crate) steps_since_sample: u32,
}

impl Vehicle {
    /// Create a vehicle whose left sensor sits at `position`
    pub fn new(
        id: VehicleId,
        position: Vec2,
        heading: f64,
        kind: VehicleType,
        size: u32,
        config: &SimulationConfig,
    ) -> Result<Self> {
        let proportions = Proportions::from_size(size)?;
        Ok(Self {
            id,
            position,
            heading,
            kind,
            size,
            proportions,
            geometry: VehicleGeometry::derive(position, heading, &proportions),
            speed: config.step_speed,
            energy: config.initial_energy,
            target: None,
            terrain_to_cross: Vec::new(),
            deceased: false,
            trail: Vec::new(),
            steps_since_sample: 0,
        })
    }

    pub fn kind(&self) -> VehicleType {
        self.kind
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn proportions(&self) -> &Proportions {
        &self.proportions
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn geometry(&self) -> &VehicleGeometry {
        &self.geometry
    }

    pub fn body(&self) -> &[Vec2; 4] {
        &self.geometry.corners
    }

    pub fn centroid(&self) -> Vec2 {
        self.geometry.centroid
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Raw ledger value; may exceed the display range or be negative
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Energy as shown on the energy bar
    pub fn display_energy(&self, config: &SimulationConfig) -> f64 {
        self.energy.clamp(0.0, config.display_energy_max)
    }

    pub fn set_energy(&mut self, energy: f64) {
        self.energy = energy;
    }

    pub fn target(&self) -> Option<FoodId> {
        self.target
    }

    pub fn terrain_to_cross(&self) -> &[TerrainId] {
        &self.terrain_to_cross
    }

    pub fn is_deceased(&self) -> bool {
        self.deceased
    }

    pub fn trail(&self) -> &[Vec2] {
        &self.trail
    }

    /// Move the vehicle (external drag) and re-derive its geometry
    pub fn reposition(&mut self, position: Vec2) {
        self.position = position;
        self.refresh_geometry();
    }

    pub(crate) fn refresh_geometry(&mut self) {
        self.geometry = VehicleGeometry::derive(self.position, self.heading, &self.proportions);
    }
}
