//! Simulation configuration with documented constants
//!
//! Every tuning constant the engine depends on lives here so that tests and
//! runners can inject their own values. Defaults reproduce the classic
//! 700×550 foraging field.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{ForageError, Result};

/// Configuration for the foraging simulation
///
/// These values were tuned so that energy spent travelling stays comparable
/// to the energy a piece of food contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === FIELD ===
    /// Width of the field rectangle (pixels)
    ///
    /// Used for boundary clamping and for random spawn positions.
    pub field_width: f64,

    /// Height of the field rectangle (pixels)
    pub field_height: f64,

    // === KINEMATICS ===
    /// Per-step speed constant
    ///
    /// Average wheel speed × this constant is the distance moved per step.
    pub step_speed: f64,

    /// Multiplier applied to the rotation angle each step
    ///
    /// At 3.0 vehicles turn three times faster than the raw differential
    /// drive would, widening the effective turning response.
    pub turn_multiplier: f64,

    // === SENSORS ===
    /// Divisor that normalizes sensor readings into wheel speeds
    pub sensor_divisor: f64,

    /// Distance to a terrain boundary at which the terrain sensor fires
    pub terrain_sensor_range: f64,

    /// Gain applied to the terrain sensor reading
    pub terrain_sensor_gain: f64,

    // === ENERGY ===
    /// Divisor turning travelled distance into energy units
    ///
    /// cost = (distance / energy_divisor) × terrain multiplier
    pub energy_divisor: f64,

    /// Energy debited on a step where the vehicle did not move
    ///
    /// Moving vehicles spend roughly 1e-6 to 9e-5 per step, so idling
    /// sits at the low end of that band.
    pub idle_energy_cost: f64,

    /// Energy a newly spawned vehicle starts with
    pub initial_energy: f64,

    /// Upper bound of the energy display (the ledger itself is unclamped)
    pub display_energy_max: f64,

    // === TERRAIN ===
    /// Cost multiplier of flat ground
    pub flat_terrain_cost: f64,

    /// Cost multipliers indexed by terrain class (fair, medium, steep)
    pub terrain_costs: Vec<f64>,

    /// Lower bound for randomly sized terrain patches (inclusive)
    pub terrain_radius_min: f64,

    /// Upper bound for randomly sized terrain patches (exclusive)
    pub terrain_radius_max: f64,

    // === FOOD ===
    /// Smallest food value (inclusive)
    pub food_value_min: u32,

    /// Largest food value (inclusive)
    pub food_value_max: u32,

    /// Food anchors are kept this far inside the field edges
    pub food_margin: f64,

    /// Rendered food side length per unit of value
    pub food_scale: f64,

    // === VEHICLES ===
    /// Size given to vehicles when none is requested
    pub default_vehicle_size: u32,

    /// A trail point is recorded every this many steps
    pub path_sample_interval: u32,

    /// Spawn a replacement of the same type and size when a vehicle dies
    pub auto_respawn: bool,

    // === FOOD REFILL (runner side) ===
    /// Food pairs dropped by the refill timer each time it fires
    pub food_refill_amount: usize,

    /// Ticks between refills; 0 disables the refill timer
    pub food_refill_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            field_width: 700.0,
            field_height: 550.0,

            step_speed: 0.05,
            turn_multiplier: 3.0,

            sensor_divisor: 750.0,
            terrain_sensor_range: 1.0,
            terrain_sensor_gain: 2.5,

            energy_divisor: 200.0,
            idle_energy_cost: 0.000005,
            initial_energy: 50.0,
            display_energy_max: 100.0,

            // Fair / medium / steep against flat ground at 1
            flat_terrain_cost: 1.0,
            terrain_costs: vec![10.0, 15.0, 20.0],
            terrain_radius_min: 40.0,
            terrain_radius_max: 100.0,

            food_value_min: 5,
            food_value_max: 10,
            food_margin: 5.0,
            food_scale: 3.0,

            default_vehicle_size: 35,
            path_sample_interval: 100,
            auto_respawn: true,

            food_refill_amount: 1,
            food_refill_interval: 2000,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("step_speed", self.step_speed),
            ("turn_multiplier", self.turn_multiplier),
            ("sensor_divisor", self.sensor_divisor),
            ("terrain_sensor_range", self.terrain_sensor_range),
            ("terrain_sensor_gain", self.terrain_sensor_gain),
            ("energy_divisor", self.energy_divisor),
            ("idle_energy_cost", self.idle_energy_cost),
            ("initial_energy", self.initial_energy),
            ("display_energy_max", self.display_energy_max),
            ("flat_terrain_cost", self.flat_terrain_cost),
            ("terrain_radius_min", self.terrain_radius_min),
            ("terrain_radius_max", self.terrain_radius_max),
            ("food_margin", self.food_margin),
            ("food_scale", self.food_scale),
        ];
        // NaN and infinities slip past every ordered comparison below
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ForageError::InvalidConfig(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if let Some(cost) = self.terrain_costs.iter().find(|c| !c.is_finite()) {
            return Err(ForageError::InvalidConfig(format!(
                "terrain costs must be finite, got {}",
                cost
            )));
        }

        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return Err(ForageError::InvalidConfig(format!(
                "field dimensions must be positive, got {}x{}",
                self.field_width, self.field_height
            )));
        }

        let divisors = [
            ("sensor_divisor", self.sensor_divisor),
            ("energy_divisor", self.energy_divisor),
        ];
        for (name, value) in divisors {
            if value <= 0.0 {
                return Err(ForageError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.step_speed < 0.0 || self.idle_energy_cost < 0.0 {
            return Err("step_speed and idle_energy_cost must not be negative".into());
        }

        if self.terrain_costs.len() < 3 {
            return Err(ForageError::InvalidConfig(format!(
                "expected a cost for each of the 3 terrain classes, got {}",
                self.terrain_costs.len()
            )));
        }

        if self.terrain_costs.iter().any(|c| *c < 0.0) || self.flat_terrain_cost < 0.0 {
            return Err("terrain costs must not be negative".into());
        }

        if self.food_value_min == 0 || self.food_value_min > self.food_value_max {
            return Err(ForageError::InvalidConfig(format!(
                "food value range {}..={} is empty or starts at zero",
                self.food_value_min, self.food_value_max
            )));
        }

        if self.terrain_radius_min <= 0.0 || self.terrain_radius_min >= self.terrain_radius_max {
            return Err(ForageError::InvalidConfig(format!(
                "terrain radius range {}..{} must be positive and non-empty",
                self.terrain_radius_min, self.terrain_radius_max
            )));
        }

        if self.path_sample_interval == 0 {
            return Err("path_sample_interval must be at least 1".into());
        }

        Ok(())
    }
}
