//! Geometry helpers shared by the terrain model and the vehicle engine

pub mod geometry;

pub use geometry::{circle_contains, polygon_intersects_rect, segment_distance, ChordGeometry, Rect};
