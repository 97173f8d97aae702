//! Steering and kinematics - wheel speeds, translation, rotation, boundary

use std::f64::consts::{FRAC_PI_2, PI};

use crate::core::config::SimulationConfig;
use crate::core::types::{Side, Vec2, VehicleType};
use crate::entity::Vehicle;
use crate::simulation::sensors::SensorReadings;
use crate::spatial::{polygon_intersects_rect, Rect};

/// Speeds of the left and right wheel for one step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelSpeeds {
    pub left: f64,
    pub right: f64,
}

impl WheelSpeeds {
    pub fn average(&self) -> f64 {
        (self.left + self.right) / 2.0
    }
}

/// Map sensor readings to wheel speeds
///
/// Distance vehicles wire each food sensor to the wheel on the same side.
/// Energy vehicles add the opposite side's terrain reading, which steers
/// them away from patches they do not plan to cross.
pub fn wheel_speeds(kind: VehicleType, readings: &SensorReadings, config: &SimulationConfig) -> WheelSpeeds {
    let speed = |side: Side| {
        let food = readings.side(side).food;
        match kind {
            VehicleType::Distance => food / config.sensor_divisor,
            VehicleType::Energy => (food + readings.side(side.opposite()).terrain) / config.sensor_divisor,
        }
    };
    WheelSpeeds {
        left: speed(Side::Left),
        right: speed(Side::Right),
    }
}

/// Displacement for one step along `heading`
///
/// Heading 0 faces up the screen (negative y) and increasing heading turns
/// toward negative x.
pub fn translation(heading: f64, wheels: &WheelSpeeds, step_speed: f64) -> Vec2 {
    let distance = wheels.average() * step_speed;
    let (sin, cos) = heading.sin_cos();
    Vec2::new(-sin * distance, -cos * distance)
}

/// Signed heading change; positive when the right wheel is faster
pub fn heading_delta(wheels: &WheelSpeeds, step_speed: f64, body_width: f64, turn_multiplier: f64) -> f64 {
    let differential = (wheels.left - wheels.right).abs() * step_speed;
    let magnitude = (differential / body_width).atan() * turn_multiplier;
    if wheels.right > wheels.left {
        magnitude
    } else if wheels.left > wheels.right {
        -magnitude
    } else {
        0.0
    }
}

/// Snap a vehicle that left the field back onto the nearest edge
///
/// Only acts when the body polygon no longer touches the field rectangle.
/// Edges are checked left, right, top, bottom; a later match overrides the
/// heading of an earlier one. Returns whether the vehicle was clamped.
pub fn clamp_to_field(vehicle: &mut Vehicle, config: &SimulationConfig) -> bool {
    let field = Rect::new(Vec2::new(0.0, 0.0), config.field_width, config.field_height);
    if polygon_intersects_rect(vehicle.body(), &field) {
        return false;
    }

    let mut position = vehicle.position();
    let mut heading = vehicle.heading();
    if position.x <= 0.0 {
        position.x = 0.0;
        heading = 3.0 * FRAC_PI_2;
    }
    if position.x >= config.field_width {
        position.x = config.field_width;
        heading = FRAC_PI_2;
    }
    if position.y <= 0.0 {
        position.y = 0.0;
        heading = PI;
    }
    if position.y >= config.field_height {
        position.y = config.field_height;
        heading = 0.0;
    }

    tracing::trace!(vehicle = vehicle.id.0, "clamped to field edge");
    vehicle.position = position;
    vehicle.heading = heading;
    vehicle.refresh_geometry();
    true
}
