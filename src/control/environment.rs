use crate::constants::{
    AIR_DENSITY_SEA_LEVEL, ATMOSPHERE_CEILING, EARTH_MU, EARTH_RADIUS, SCALE_HEIGHT,
};
use crate::utils::vector2d::Vector2D;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub radius: f64,
    pub altitude: f64,
    pub air_density: f64,
    pub gravity: f64,
    pub gravity_direction: Vector2D,
}

impl Environment {
    pub fn at(position: &Vector2D) -> Self {
        let radius = position.magnitude();
        let altitude = radius - EARTH_RADIUS;

        Environment {
            radius,
            altitude,
            air_density: air_density(altitude),
            gravity: gravity_at_radius(radius),
            gravity_direction: (-*position).normalize(),
        }
    }

    pub fn is_in_atmosphere(&self) -> bool {
        self.altitude <= ATMOSPHERE_CEILING
    }

    /// Radial outward unit vector, the attitude reference for `rotation`.
    pub fn local_up(&self) -> Vector2D {
        -self.gravity_direction
    }

    pub fn gravity_acceleration(&self) -> Vector2D {
        self.gravity_direction * self.gravity
    }
}

pub fn air_density(altitude: f64) -> f64 {
    if altitude < 0.0 {
        AIR_DENSITY_SEA_LEVEL
    } else if altitude > ATMOSPHERE_CEILING {
        0.0
    } else {
        AIR_DENSITY_SEA_LEVEL * (-altitude / SCALE_HEIGHT).exp()
    }
}

pub fn gravity_at_radius(radius: f64) -> f64 {
    EARTH_MU / radius.powi(2)
}
