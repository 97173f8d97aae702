//! Planar geometry for the foraging field
//!
//! Circle/segment chord math used by the path cost estimator, plus the
//! rectangle and polygon tests used for eating and boundary handling.

use geo::{EuclideanDistance, Intersects, Line, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;

/// Axis-aligned rectangle given by its upper-left and lower-right corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, width: f64, height: f64) -> Self {
        Self {
            min: origin,
            max: Vec2::new(origin.x + width, origin.y + height),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.min.x + self.max.x) / 2.0, (self.min.y + self.max.y) / 2.0)
    }

    /// Corners in clockwise screen order starting at the upper-left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    fn to_geo(self) -> geo::Rect<f64> {
        geo::Rect::new(self.min, self.max)
    }
}

/// Intersection of a straight path with a circular patch
///
/// `chord_length` is the part of the straight path inside the circle,
/// `arc_length` the flat-ground detour around the same stretch of boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordGeometry {
    pub chord_length: f64,
    /// Angle subtended by the chord (radians)
    pub theta: f64,
    pub arc_length: f64,
}

impl ChordGeometry {
    /// Chord of a circle of `radius` cut by a line `distance` from its center
    ///
    /// Returns `None` when the line misses the circle (`distance >= radius`).
    pub fn new(radius: f64, distance: f64) -> Option<Self> {
        if radius <= 0.0 || distance >= radius {
            return None;
        }
        let chord_length = 2.0 * (radius * radius - distance * distance).max(0.0).sqrt();
        // Rounding can push the ratio a hair past 1 when the line hits the center
        let half_ratio = (chord_length / (2.0 * radius)).clamp(-1.0, 1.0);
        let theta = 2.0 * half_ratio.asin();
        Some(Self {
            chord_length,
            theta,
            arc_length: radius * theta,
        })
    }
}

/// Shortest distance from `point` to the segment `start`–`end`
///
/// A zero-length segment degrades to point distance.
pub fn segment_distance(point: Vec2, start: Vec2, end: Vec2) -> f64 {
    let line = Line::new(start, end);
    Point::from(geo::Coord::from(point)).euclidean_distance(&line)
}

fn polygon_from(corners: &[Vec2]) -> Polygon<f64> {
    let ring: Vec<geo::Coord<f64>> = corners.iter().map(|c| (*c).into()).collect();
    Polygon::new(LineString::from(ring), vec![])
}

/// Whether a (convex) polygon given by its corners touches a rectangle
pub fn polygon_intersects_rect(corners: &[Vec2], rect: &Rect) -> bool {
    if corners.is_empty() {
        return false;
    }
    polygon_from(corners).intersects(&rect.to_geo())
}

/// Check if a point lies within `radius` of `center` (boundary included)
pub fn circle_contains(center: Vec2, radius: f64, point: Vec2) -> bool {
    center.distance(&point) <= radius
}
