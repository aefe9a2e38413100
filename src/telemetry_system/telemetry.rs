use serde::Serialize;
use tracing::info;

use crate::control::rocket::SimulationState;
use crate::trajectory_system::forces::ForceBreakdown;
use crate::trajectory_system::orbit::OrbitalElements;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TelemetryData {
    pub altitude_m: f64,
    pub speed_mps: f64,
    pub acceleration_mps2: f64,
    pub dynamic_pressure_pa: f64,
    pub mach: f64,
    pub pitch_deg: f64,
    pub apoapsis_m: f64,
    pub periapsis_m: f64,
    pub drag_n: f64,
    pub thrust_n: f64,
    pub gravity_n: f64,
    pub mass_kg: f64,
    pub air_density_kg_m3: f64,
    pub stage_fuel_pct: f64,
}

impl TelemetryData {
    /// Projects a post-tick state. `forces` must be evaluated on that same state;
    /// the apsides come from `orbit`, which is computed before ground contact.
    pub fn assemble(
        state: &SimulationState,
        forces: &ForceBreakdown,
        orbit: &OrbitalElements,
    ) -> Self {
        TelemetryData {
            altitude_m: forces.environment.altitude,
            speed_mps: state.velocity.magnitude(),
            acceleration_mps2: state.acceleration.magnitude(),
            dynamic_pressure_pa: forces.drag.dynamic_pressure,
            mach: forces.drag.mach,
            pitch_deg: state.rotation_deg(),
            apoapsis_m: orbit.apoapsis_m,
            periapsis_m: orbit.periapsis_m,
            drag_n: forces.drag.magnitude,
            thrust_n: forces.propulsion.thrust_n,
            gravity_n: forces.gravity.magnitude(),
            mass_kg: forces.total_mass,
            air_density_kg_m3: forces.environment.air_density,
            stage_fuel_pct: state
                .active_stage()
                .map_or(0.0, |stage| stage.fuel_percent()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlightRecorder {
    pub samples: Vec<(f64, TelemetryData)>,
    sample_interval: f64,
    next_sample_time: f64,
    max_speed: f64,
    max_altitude: f64,
    max_acceleration: f64,
    max_dynamic_pressure: f64,
    max_q_time: f64,
    stage_events: Vec<(usize, f64)>,
    last_stage_index: Option<usize>,
    simulation_time: f64,
}

impl FlightRecorder {
    /// Keeps one telemetry sample every `sample_interval` seconds of flight.
    pub fn new(sample_interval: f64) -> Self {
        FlightRecorder {
            sample_interval,
            ..Default::default()
        }
    }

    pub fn record(&mut self, state: &SimulationState, telemetry: &TelemetryData) {
        self.simulation_time = state.time_s();

        self.max_speed = self.max_speed.max(telemetry.speed_mps);
        self.max_altitude = self.max_altitude.max(telemetry.altitude_m);
        self.max_acceleration = self.max_acceleration.max(telemetry.acceleration_mps2);
        if telemetry.dynamic_pressure_pa > self.max_dynamic_pressure {
            self.max_dynamic_pressure = telemetry.dynamic_pressure_pa;
            self.max_q_time = state.time_s();
        }

        let stage_index = state.current_stage_index();
        if self.last_stage_index != Some(stage_index) {
            if self.last_stage_index.is_some() {
                info!(
                    stage = stage_index,
                    time = %Self::format_time(state.time_s()),
                    "Staging recorded"
                );
            }
            self.stage_events.push((stage_index, state.time_s()));
            self.last_stage_index = Some(stage_index);
        }

        if self.sample_interval > 0.0 && state.time_s() >= self.next_sample_time {
            self.samples.push((state.time_s(), *telemetry));
            self.next_sample_time = state.time_s() + self.sample_interval;
        }
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn max_altitude(&self) -> f64 {
        self.max_altitude
    }

    pub fn max_acceleration(&self) -> f64 {
        self.max_acceleration
    }

    /// Peak dynamic pressure and the mission time it occurred at.
    pub fn max_q(&self) -> (f64, f64) {
        (self.max_dynamic_pressure, self.max_q_time)
    }

    pub fn stage_events(&self) -> &[(usize, f64)] {
        &self.stage_events
    }

    pub fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    pub fn format_altitude(altitude: f64) -> String {
        if altitude.is_infinite() {
            "escape".to_string()
        } else if altitude.abs() >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    pub fn format_sample(time: f64, telemetry: &TelemetryData) -> String {
        format!(
            "T+{} | Alt: {} | Vel: {:.1} m/s | Acc: {:.2} m/s² | Q: {:.0} Pa (M {:.2}) | \
             Pitch: {:.2}° | Ap: {} | Pe: {} | Mass: {:.0} kg | Fuel: {:.1}%",
            Self::format_time(time),
            Self::format_altitude(telemetry.altitude_m),
            telemetry.speed_mps,
            telemetry.acceleration_mps2,
            telemetry.dynamic_pressure_pa,
            telemetry.mach,
            telemetry.pitch_deg,
            Self::format_altitude(telemetry.apoapsis_m),
            Self::format_altitude(telemetry.periapsis_m),
            telemetry.mass_kg,
            telemetry.stage_fuel_pct,
        )
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![
            "--- Flight Summary ---".to_string(),
            format!("Flight Time: {}", Self::format_time(self.simulation_time)),
            format!("Max Velocity: {:.2} m/s", self.max_speed),
            format!("Max Altitude: {}", Self::format_altitude(self.max_altitude)),
            format!("Max Acceleration: {:.2} m/s²", self.max_acceleration),
            format!(
                "Max Q: {:.0} Pa at {}",
                self.max_dynamic_pressure,
                Self::format_time(self.max_q_time)
            ),
            "--- Stage Events ---".to_string(),
        ];
        lines.extend(self.stage_events.iter().map(|(stage, time)| {
            format!("Stage {} active from {}", stage, Self::format_time(*time))
        }));
        lines.join("\n")
    }
}
