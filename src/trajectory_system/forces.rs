use crate::control::environment::Environment;
use crate::control::propulsion::{self, PropulsionOutput};
use crate::control::rocket::SimulationState;
use crate::utils::vector2d::Vector2D;

use super::aerodynamics::{Aerodynamics, DragState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceBreakdown {
    pub environment: Environment,
    pub drag: DragState,
    pub propulsion: PropulsionOutput,
    pub gravity: Vector2D,
    pub thrust: Vector2D,
    pub total_mass: f64,
}

impl ForceBreakdown {
    /// Mass is taken as it stands, before this tick's burn.
    pub fn evaluate(state: &SimulationState, aerodynamics: &Aerodynamics) -> Self {
        let environment = Environment::at(&state.position);
        let total_mass = state.total_mass_kg();

        let drag = aerodynamics.calculate_drag(state.velocity, environment.air_density);

        let propulsion = propulsion::evaluate(
            state.active_stage(),
            state.throttle(),
            environment.altitude,
        );
        let thrust_direction = environment
            .local_up()
            .rotate(state.rotation_deg().to_radians());

        ForceBreakdown {
            environment,
            drag,
            propulsion,
            gravity: environment.gravity_acceleration() * total_mass,
            thrust: thrust_direction * propulsion.thrust_n,
            total_mass,
        }
    }

    pub fn net_force(&self) -> Vector2D {
        self.gravity + self.drag.force + self.thrust
    }

    pub fn is_inert(&self) -> bool {
        self.total_mass <= 0.0
    }

    pub fn acceleration(&self) -> Vector2D {
        if self.is_inert() {
            Vector2D::ZERO
        } else {
            self.net_force() / self.total_mass
        }
    }
}
