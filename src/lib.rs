//! Forage Sim - Braitenberg-style foraging vehicles on costly terrain
//!
//! Two kinds of vehicle hunt for food on a field strewn with circular
//! terrain patches. Distance vehicles go for the nearest food as if the
//! ground were flat; energy vehicles price in the terrain on the way and
//! choose between crossing a patch and going around it.

pub mod core;
pub mod entity;
pub mod simulation;
pub mod spatial;
pub mod world;

pub use crate::core::{ForageError, Result, SimulationConfig};
pub use crate::world::{Simulation, SimulationEvent};
