use serde::{Deserialize, Serialize};

use crate::constants::{
    GRAVITY_TURN_GAIN, GRAVITY_TURN_MAX_PITCH, GRAVITY_TURN_RATE, GRAVITY_TURN_START_ALTITUDE,
    PROGRADE_GAIN, PROGRADE_MIN_SPEED,
};
use crate::utils::vector2d::Vector2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutoPilotMode {
    #[default]
    Off,
    GravityTurn,
    Prograde,
    /// Selectable, but holds attitude exactly like `Off`.
    Retrograde,
}

#[derive(Debug, Clone, Copy)]
pub struct GuidanceInput {
    pub altitude: f64,
    pub speed: f64,
    pub position: Vector2D,
    pub velocity: Vector2D,
}

pub fn correct_attitude(
    mode: AutoPilotMode,
    rotation_deg: f64,
    input: &GuidanceInput,
    delta_time: f64,
) -> f64 {
    match mode {
        AutoPilotMode::GravityTurn if input.altitude > GRAVITY_TURN_START_ALTITUDE => {
            let target = gravity_turn_target(input.altitude);
            rotation_deg + (target - rotation_deg) * delta_time * GRAVITY_TURN_GAIN
        }
        AutoPilotMode::Prograde if input.speed > PROGRADE_MIN_SPEED => {
            let target = prograde_target(&input.position, &input.velocity);
            rotation_deg + (target - rotation_deg) * delta_time * PROGRADE_GAIN
        }
        // TODO: give Retrograde its own target once the hold direction is decided.
        _ => rotation_deg,
    }
}

pub fn gravity_turn_target(altitude: f64) -> f64 {
    ((altitude - GRAVITY_TURN_START_ALTITUDE) * GRAVITY_TURN_RATE).min(GRAVITY_TURN_MAX_PITCH)
}

/// Signed angle from local up to the velocity vector, counter-clockwise positive.
pub fn prograde_target(position: &Vector2D, velocity: &Vector2D) -> f64 {
    let up = position.normalize();
    let angle = up.cross(velocity).atan2(up.dot(velocity));
    normalize_angle(angle.to_degrees())
}

/// Wraps an angle in degrees into (-180, 180].
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
