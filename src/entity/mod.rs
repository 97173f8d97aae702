pub mod food;
pub mod vehicle;

pub use food::Food;
pub use vehicle::{Proportions, Vehicle, VehicleGeometry};
