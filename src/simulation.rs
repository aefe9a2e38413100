use tracing::{debug, info};

use crate::control::guidance::{self, GuidanceInput};
use crate::control::rocket::SimulationState;
use crate::telemetry_system::telemetry::TelemetryData;
use crate::trajectory_system::aerodynamics::Aerodynamics;
use crate::trajectory_system::forces::ForceBreakdown;
use crate::trajectory_system::kinematics::Kinematics;
use crate::trajectory_system::orbit::OrbitalElements;

pub fn step(state: SimulationState) -> (SimulationState, TelemetryData) {
    step_with(state, &Aerodynamics::default())
}

pub fn step_with(
    mut state: SimulationState,
    aerodynamics: &Aerodynamics,
) -> (SimulationState, TelemetryData) {
    let dt = state.dt_s;
    let running = !state.is_paused;

    let guidance_input = GuidanceInput {
        altitude: state.altitude_m(),
        speed: state.velocity.magnitude(),
        position: state.position,
        velocity: state.velocity,
    };

    let forces = ForceBreakdown::evaluate(&state, aerodynamics);

    if running {
        burn_fuel(&mut state, forces.propulsion.mass_flow_kg_s * dt);
    }

    let mut kinematics = Kinematics {
        position: state.position,
        velocity: state.velocity,
        acceleration: forces.acceleration(),
    };
    if forces.is_inert() {
        debug!(time = state.time_s, "No vehicle mass left, holding state");
    } else if running {
        kinematics.advance(forces.acceleration(), dt);
    }

    let orbit = OrbitalElements::from_position_velocity(&kinematics.position, &kinematics.velocity);

    if running {
        kinematics.resolve_ground_collision();
    }

    state.position = kinematics.position;
    state.velocity = kinematics.velocity;
    state.acceleration = kinematics.acceleration;

    if running {
        state.rotation_deg =
            guidance::correct_attitude(state.autopilot, state.rotation_deg, &guidance_input, dt);
        state.time_s += dt;
    }

    let reported = ForceBreakdown::evaluate(&state, aerodynamics);
    let telemetry = TelemetryData::assemble(&state, &reported, &orbit);

    (state, telemetry)
}

fn burn_fuel(state: &mut SimulationState, amount: f64) {
    if amount <= 0.0 {
        return;
    }

    let time = state.time_s;
    if let Some(stage) = state.structure.active_stage_mut() {
        stage.consume_fuel(amount);
        if stage.is_depleted() {
            info!(stage = stage.id, name = %stage.name, time, "Stage burnout");
        }
    }
}
