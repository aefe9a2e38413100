use tracing::warn;

use crate::constants::{EARTH_RADIUS, HARD_LANDING_SPEED};
use crate::utils::vector2d::Vector2D;

/// Planet-centred kinematic state: meters, m/s and m/s².
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kinematics {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
}

impl Kinematics {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Kinematics {
            position,
            velocity,
            acceleration: Vector2D::ZERO,
        }
    }

    /// Semi-implicit Euler: velocity first, then position with the new velocity.
    pub fn advance(&mut self, acceleration: Vector2D, delta_time: f64) {
        self.acceleration = acceleration;
        self.velocity += acceleration * delta_time;
        self.position += self.velocity * delta_time;
    }

    pub fn resolve_ground_collision(&mut self) -> Option<f64> {
        if self.get_radius() >= EARTH_RADIUS {
            return None;
        }

        let impact_speed = self.get_velocity_magnitude();
        self.position = self.position.normalize() * EARTH_RADIUS;
        self.velocity = Vector2D::ZERO;

        if impact_speed > HARD_LANDING_SPEED {
            hard_landing(impact_speed);
        }

        Some(impact_speed)
    }

    pub fn get_radius(&self) -> f64 {
        self.position.magnitude()
    }

    pub fn get_altitude(&self) -> f64 {
        self.get_radius() - EARTH_RADIUS
    }

    pub fn get_velocity_magnitude(&self) -> f64 {
        self.velocity.magnitude()
    }
}

fn hard_landing(impact_speed: f64) {
    warn!(impact_speed_mps = impact_speed, "Hard ground contact");
}
