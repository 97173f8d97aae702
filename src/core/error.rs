use thiserror::Error;

use crate::core::types::{FoodId, TerrainId, VehicleId};

#[derive(Error, Debug)]
pub enum ForageError {
    #[error("Terrain radius must be positive, got {0}")]
    InvalidTerrainRadius(f64),

    #[error("Unknown terrain class: {0}")]
    InvalidTerrainClass(usize),

    #[error("Vehicle size {0} is too small to give a positive body width")]
    InvalidVehicleSize(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Vehicle not found: {0:?}")]
    VehicleNotFound(VehicleId),

    #[error("Food not found: {0:?}")]
    FoodNotFound(FoodId),

    #[error("Terrain not found: {0:?}")]
    TerrainNotFound(TerrainId),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl From<&str> for ForageError {
    fn from(message: &str) -> Self {
        ForageError::InvalidConfig(message.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ForageError>;
