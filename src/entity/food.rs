//! Food pieces scattered on the field
//!
//! Food comes in two flavours, one per vehicle type. A piece is immutable
//! except for its position (external drag) and which list owns it.

use serde::{Deserialize, Serialize};

use crate::core::config::SimulationConfig;
use crate::core::types::{FoodId, Vec2, VehicleType};
use crate::spatial::Rect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: FoodId,
    /// Upper-left corner of the food area
    anchor: Vec2,
    value: u32,
    kind: VehicleType,
    /// Side length of the (square) food area
    extent: f64,
}

impl Food {
    /// Create a piece of food, keeping the anchor inside the field margin
    pub fn new(id: FoodId, anchor: Vec2, value: u32, kind: VehicleType, config: &SimulationConfig) -> Self {
        let margin = config.food_margin;
        let x = anchor.x.max(margin).min(config.field_width - margin);
        let y = anchor.y.max(margin).min(config.field_height - margin);
        Self {
            id,
            anchor: Vec2::new(x, y),
            value,
            kind,
            extent: value as f64 * config.food_scale,
        }
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn kind(&self) -> VehicleType {
        self.kind
    }

    pub fn center(&self) -> Vec2 {
        self.area().center()
    }

    /// Rectangle a vehicle body must touch to eat this piece
    pub fn area(&self) -> Rect {
        Rect::new(self.anchor, self.extent, self.extent)
    }

    /// Move the food (external drag)
    pub fn reposition(&mut self, anchor: Vec2) {
        self.anchor = anchor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_area_scales_with_value() {
        let config = SimulationConfig::default();
        let food = Food::new(FoodId(1), Vec2::new(300.0, 100.0), 8, VehicleType::Energy, &config);
        assert_eq!(food.area().width(), 24.0);
        assert_eq!(food.area().height(), 24.0);
        assert_eq!(food.center(), Vec2::new(312.0, 112.0));
        assert_eq!(food.value(), 8);
        assert_eq!(food.kind(), VehicleType::Energy);
    }

    #[test]
    fn test_anchor_clamped_to_margin() {
        let config = SimulationConfig::default();
        let low = Food::new(FoodId(1), Vec2::new(-20.0, 2.0), 5, VehicleType::Distance, &config);
        assert_eq!(low.anchor(), Vec2::new(5.0, 5.0));
        let high = Food::new(FoodId(2), Vec2::new(900.0, 549.0), 5, VehicleType::Distance, &config);
        assert_eq!(high.anchor(), Vec2::new(695.0, 545.0));
    }

    #[test]
    fn test_reposition_moves_area() {
        let config = SimulationConfig::default();
        let mut food = Food::new(FoodId(1), Vec2::new(50.0, 50.0), 5, VehicleType::Distance, &config);
        food.reposition(Vec2::new(200.0, 210.0));
        assert_eq!(food.anchor(), Vec2::new(200.0, 210.0));
        assert_eq!(food.area().max, Vec2::new(215.0, 225.0));
    }
}
