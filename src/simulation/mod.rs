pub mod energy;
pub mod sensors;
pub mod steering;
pub mod target_select;
pub mod tick;

pub use energy::{check_death, step_cost, terrain_multiplier, travel_cost};
pub use sensors::{read_sensors, SensorReading, SensorReadings};
pub use steering::{clamp_to_field, heading_delta, translation, wheel_speeds, WheelSpeeds};
pub use target_select::{estimate, select_target, Crossing, PathEstimate, Selection};
pub use tick::{run_simulation_tick, StepOutcome};
