use serde::Serialize;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::constants::EARTH_RADIUS;
use crate::errors::SimulationError;
use crate::utils::vector2d::Vector2D;

use super::{guidance::AutoPilotMode, launch_stages::RocketStage, structure::Structure};

/// `rotation_deg` is the attitude commanded for the next tick: the autopilot
/// writes it at the end of a tick and the thrust model reads it at the start of
/// the following one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationState {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
    pub(crate) rotation_deg: f64,
    pub(crate) throttle: f64,
    pub(crate) structure: Structure,
    pub(crate) time_s: f64,
    pub(crate) dt_s: f64,
    pub(crate) is_paused: bool,
    pub(crate) autopilot: AutoPilotMode,
}

impl SimulationState {
    pub fn new(stages: Vec<RocketStage>, dt_s: f64) -> Result<Self, SimulationError> {
        Self::from_structure(Structure::new(stages)?, dt_s)
    }

    pub fn from_structure(structure: Structure, dt_s: f64) -> Result<Self, SimulationError> {
        if !(dt_s.is_finite() && dt_s > 0.0) {
            return Err(SimulationError::InitializationError(format!(
                "time step must be positive, got {}",
                dt_s
            )));
        }

        Ok(SimulationState {
            position: Vector2D::new(0.0, EARTH_RADIUS),
            velocity: Vector2D::ZERO,
            acceleration: Vector2D::ZERO,
            rotation_deg: 0.0,
            throttle: 0.0,
            structure,
            time_s: 0.0,
            dt_s,
            is_paused: true,
            autopilot: AutoPilotMode::Off,
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut state = Self::new(config.build_stages(), config.dt_s)?;
        state.throttle = config.throttle.clamp(0.0, 1.0);
        state.rotation_deg = config.rotation_deg;
        state.autopilot = config.autopilot;
        state.is_paused = config.start_paused;
        Ok(state)
    }

    pub fn with_kinematics(mut self, position: Vector2D, velocity: Vector2D) -> Self {
        self.position = position;
        self.velocity = velocity;
        self
    }

    /// Clamps to [0, 1], NaN counts as closed. Opening the throttle while paused
    /// resumes the simulation.
    pub fn set_throttle(&mut self, throttle: f64) {
        self.throttle = if throttle.is_nan() {
            0.0
        } else {
            throttle.clamp(0.0, 1.0)
        };
        if self.is_paused && self.throttle > 0.0 {
            self.is_paused = false;
            info!(throttle = self.throttle, "Throttle up, resuming simulation");
        }
    }

    pub fn set_pitch(&mut self, rotation_deg: f64) {
        self.rotation_deg = rotation_deg;
        if self.autopilot != AutoPilotMode::Off {
            info!(previous = ?self.autopilot, "Manual pitch, autopilot disengaged");
        }
        self.autopilot = AutoPilotMode::Off;
    }

    pub fn stage(&mut self) -> bool {
        match self.structure.separate() {
            Some(_) => {
                self.throttle = 1.0;
                true
            }
            None => {
                debug!("Stage command ignored, already on the last stage");
                false
            }
        }
    }

    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
        info!(paused = self.is_paused, "Pause toggled");
    }

    pub fn set_autopilot(&mut self, mode: AutoPilotMode) {
        if self.autopilot != mode {
            info!(from = ?self.autopilot, to = ?mode, "Autopilot mode changed");
        }
        self.autopilot = mode;
    }

    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    pub fn dt_s(&self) -> f64 {
        self.dt_s
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn autopilot(&self) -> AutoPilotMode {
        self.autopilot
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn stages(&self) -> &[RocketStage] {
        self.structure.stages()
    }

    pub fn current_stage_index(&self) -> usize {
        self.structure.current_stage_index()
    }

    pub fn active_stage(&self) -> Option<&RocketStage> {
        self.structure.active_stage()
    }

    pub fn total_mass_kg(&self) -> f64 {
        self.structure.get_total_mass()
    }

    pub fn altitude_m(&self) -> f64 {
        self.position.magnitude() - EARTH_RADIUS
    }
}
