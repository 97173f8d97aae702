pub mod config;
pub mod error;
pub mod types;

pub use config::SimulationConfig;
pub use error::{ForageError, Result};
pub use types::{FoodId, Side, TerrainId, Tick, Vec2, VehicleId, VehicleType};
