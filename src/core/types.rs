//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for vehicles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(pub u32);

/// Unique identifier for pieces of food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FoodId(pub u32);

/// Unique identifier for terrain patches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TerrainId(pub u32);

/// Simulation tick counter
pub type Tick = u64;

/// Foraging strategy of a vehicle, and the food list it feeds from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    /// Seeks the nearest food assuming flat ground
    Distance,
    /// Seeks the food reachable at the lowest true energy cost
    Energy,
}

impl VehicleType {
    pub const ALL: [VehicleType; 2] = [VehicleType::Distance, VehicleType::Energy];

    pub fn name(&self) -> &'static str {
        match self {
            VehicleType::Distance => "distance",
            VehicleType::Energy => "energy",
        }
    }

    /// Parse a user-facing name ("distance" / "energy", or the first letter)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "distance" | "d" => Some(VehicleType::Distance),
            "energy" | "e" => Some(VehicleType::Energy),
            _ => None,
        }
    }
}

/// Sensor / wheel side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// 2D position in field coordinates (y grows downward)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl From<Vec2> for geo::Coord<f64> {
    fn from(v: Vec2) -> Self {
        geo::Coord { x: v.x, y: v.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!(((b - a).length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_vec2_ops() {
        let v = Vec2::new(1.0, 2.0) + Vec2::new(3.0, 4.0);
        assert_eq!(v, Vec2::new(4.0, 6.0));
        assert_eq!(v * 0.5, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_ne!(Side::Left.index(), Side::Right.index());
    }

    #[test]
    fn test_vehicle_type_parse() {
        assert_eq!(VehicleType::parse("distance"), Some(VehicleType::Distance));
        assert_eq!(VehicleType::parse(" Energy "), Some(VehicleType::Energy));
        assert_eq!(VehicleType::parse("e"), Some(VehicleType::Energy));
        assert_eq!(VehicleType::parse("walker"), None);
    }

    #[test]
    fn test_ids_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<FoodId, &str> = HashMap::new();
        map.insert(FoodId(1), "carrot");
        assert_eq!(map.get(&FoodId(1)), Some(&"carrot"));
        assert_eq!(map.get(&FoodId(2)), None);
    }
}
