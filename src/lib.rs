pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod simulation;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use config::{SimulationConfig, StageConfig};
pub use constants::*;
pub use control::environment::Environment;
pub use control::guidance::AutoPilotMode;
pub use control::launch_stages::RocketStage;
pub use control::rocket::SimulationState;
pub use control::structure::Structure;
pub use errors::SimulationError;
pub use simulation::{step, step_with};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::Aerodynamics;
pub use trajectory_system::orbit::OrbitalElements;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{FlightRecorder, TelemetryData};

// Re-export commonly used utilities
pub use utils::vector2d::Vector2D;
