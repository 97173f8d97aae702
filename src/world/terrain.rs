//! Terrain patches: circular zones that are costly to traverse
//!
//! A patch is static once placed; only an external drag may reposition it.
//! Its cost class picks one of the configured multipliers of the flat
//! traversal rate.

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::error::{ForageError, Result};
use crate::core::types::{TerrainId, Vec2};
use crate::spatial::{circle_contains, Rect};

/// Traversal difficulty of a terrain patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostClass {
    Fair,
    Medium,
    Steep,
}

impl CostClass {
    pub const ALL: [CostClass; 3] = [CostClass::Fair, CostClass::Medium, CostClass::Steep];

    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(ForageError::InvalidTerrainClass(index))
    }

    pub fn index(&self) -> usize {
        match self {
            CostClass::Fair => 0,
            CostClass::Medium => 1,
            CostClass::Steep => 2,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fair" | "0" => Some(CostClass::Fair),
            "medium" | "1" => Some(CostClass::Medium),
            "steep" | "2" => Some(CostClass::Steep),
            _ => None,
        }
    }
}

/// A circular patch of costly terrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub id: TerrainId,
    center: Vec2,
    radius: f64,
    pub class: CostClass,
}

impl Terrain {
    /// Create a patch; a radius that is not strictly positive is rejected
    pub fn new(id: TerrainId, center: Vec2, radius: f64, class: CostClass) -> Result<Self> {
        if !(radius > 0.0) {
            return Err(ForageError::InvalidTerrainRadius(radius));
        }
        Ok(Self {
            id,
            center,
            radius,
            class,
        })
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Multiplier of the flat traversal rate for this patch
    pub fn cost_multiplier(&self, config: &SimulationConfig) -> f64 {
        config
            .terrain_costs
            .get(self.class.index())
            .copied()
            .unwrap_or(config.flat_terrain_cost)
    }

    /// Check if a point is within this patch
    pub fn contains_point(&self, point: Vec2) -> bool {
        circle_contains(self.center, self.radius, point)
    }

    /// Whether a whole rectangle (e.g. a food area) lies inside the patch
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        rect.corners().iter().all(|corner| self.contains_point(*corner))
    }

    /// Signed distance from a point to the patch boundary (negative inside)
    pub fn boundary_distance(&self, point: Vec2) -> f64 {
        point.distance(&self.center) - self.radius
    }

    /// Move the patch (external drag); radius and class never change
    pub fn reposition(&mut self, center: Vec2) {
        self.center = center;
    }
}
