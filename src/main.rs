use rocket_flight::*;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Periapsis that counts as a stable orbit, above the sensible atmosphere.
const TARGET_PERIAPSIS: f64 = 80_000.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };

    let mut state = SimulationState::from_config(&config)?;
    state.set_autopilot(AutoPilotMode::GravityTurn);
    state.set_throttle(1.0);

    let mut recorder = FlightRecorder::new(10.0);

    while state.time_s() < MAX_SIMULATION_TIME {
        let (next, telemetry) = step(state);
        state = next;
        recorder.record(&state, &telemetry);

        if telemetry.periapsis_m > TARGET_PERIAPSIS {
            state.set_throttle(0.0);
            info!(
                apoapsis = %FlightRecorder::format_altitude(telemetry.apoapsis_m),
                periapsis = %FlightRecorder::format_altitude(telemetry.periapsis_m),
                "Orbit achieved, main engine cut-off"
            );
            break;
        }

        let burned_out = state.active_stage().map_or(true, |stage| stage.is_depleted());
        if burned_out && !state.stage() && state.throttle() > 0.0 {
            warn!("Final stage burned out before reaching orbit");
            state.set_throttle(0.0);
        }

        if state.time_s() > 1.0 && state.altitude_m() <= 0.0 && state.velocity == Vector2D::ZERO {
            info!("Vehicle is back on the ground. Ending simulation.");
            break;
        }
    }

    for (time, telemetry) in &recorder.samples {
        println!("{}", FlightRecorder::format_sample(*time, telemetry));
    }
    println!("\n{}", recorder.summary());

    Ok(())
}
