use serde::{Deserialize, Serialize};

use crate::constants::{EARTH_MU, EARTH_RADIUS};
use crate::utils::vector2d::Vector2D;

/// Two-body orbit derived from a planet-centred state vector. Apsides are
/// altitudes above the surface, not radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub specific_energy: f64, // J/kg
    pub semi_major_axis_m: f64,
    pub eccentricity: f64,
    pub apoapsis_m: f64,
    pub periapsis_m: f64,
}

impl OrbitalElements {
    pub fn from_position_velocity(position: &Vector2D, velocity: &Vector2D) -> Self {
        Self::from_state_vectors(position, velocity, EARTH_MU, EARTH_RADIUS)
    }

    pub fn from_state_vectors(
        position: &Vector2D,
        velocity: &Vector2D,
        mu: f64,
        body_radius: f64,
    ) -> Self {
        let r = position.magnitude();
        let v_squared = velocity.magnitude_squared();

        let specific_energy = v_squared / 2.0 - mu / r;
        let semi_major_axis_m = -mu / (2.0 * specific_energy);

        let radial_term = v_squared - mu / r;
        let r_dot_v = position.dot(velocity);
        let eccentricity_vector = (*position * radial_term - *velocity * r_dot_v) / mu;
        let eccentricity = eccentricity_vector.magnitude();

        let (apoapsis_m, periapsis_m) = if specific_energy >= 0.0 {
            (f64::INFINITY, f64::NEG_INFINITY)
        } else {
            (
                semi_major_axis_m * (1.0 + eccentricity) - body_radius,
                semi_major_axis_m * (1.0 - eccentricity) - body_radius,
            )
        };

        OrbitalElements {
            specific_energy,
            semi_major_axis_m,
            eccentricity,
            apoapsis_m,
            periapsis_m,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.specific_energy < 0.0
    }
}
