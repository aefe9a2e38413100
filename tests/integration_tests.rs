use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rocket_flight::{
    step, AutoPilotMode, RocketStage, SimulationConfig, SimulationError, SimulationState,
    Structure, TelemetryData, Vector2D, EARTH_MU, EARTH_RADIUS, STANDARD_GRAVITY,
};

// Helper function to create the standard two-stage vehicle on the pad
fn create_test_rocket() -> SimulationState {
    SimulationState::from_config(&SimulationConfig::default())
        .expect("Default config should produce a valid state")
}

fn create_three_stage_rocket() -> SimulationState {
    let stages = vec![
        RocketStage::new(0, "Booster", 4_000.0, 20_000.0, 1_200_000.0, 280.0, 300.0),
        RocketStage::new(1, "Sustainer", 1_500.0, 6_000.0, 300_000.0, 300.0, 330.0),
        RocketStage::new(2, "Kick", 300.0, 900.0, 40_000.0, 310.0, 345.0),
    ];
    SimulationState::new(stages, 1.0 / 60.0).expect("Three-stage vehicle should be valid")
}

fn in_orbit(position: Vector2D, velocity: Vector2D) -> SimulationState {
    let mut state = create_test_rocket().with_kinematics(position, velocity);
    state.toggle_pause();
    state
}

// Steps with the booster staged away as soon as it runs dry
fn run_simulation(
    mut state: SimulationState,
    duration_seconds: f64,
) -> (SimulationState, Vec<TelemetryData>) {
    let mut history = Vec::new();
    let end_time = state.time_s() + duration_seconds;

    while state.time_s() < end_time {
        let (next, telemetry) = step(state);
        state = next;
        history.push(telemetry);

        if state.active_stage().map_or(false, |stage| stage.is_depleted()) {
            state.stage();
        }

        if (state.time_s() % 10.0) < state.dt_s() {
            println!(
                "t={:.1}s | Stage: {} | Alt: {:.1}m | Vel: {:.1}m/s | Pitch: {:.2}°",
                state.time_s(),
                state.current_stage_index(),
                telemetry.altitude_m,
                telemetry.speed_mps,
                telemetry.pitch_deg
            );
        }
    }

    (state, history)
}

#[test]
fn test_first_tick_burns_expected_fuel() {
    let mut state = create_test_rocket();
    state.set_throttle(1.0);
    assert!(!state.is_paused(), "Throttle up should resume the simulation");

    let (next, telemetry) = step(state);

    let expected = 8000.0 - (800_000.0 / (300.0 * STANDARD_GRAVITY)) * (1.0 / 60.0);
    assert_relative_eq!(next.stages()[0].fuel_mass_kg, expected, epsilon = 1e-9);
    assert_abs_diff_eq!(next.stages()[0].fuel_mass_kg, 7995.468, epsilon = 1e-3);
    assert!(
        next.velocity.y > 0.0,
        "Net upward thrust should exceed weight, got vy = {}",
        next.velocity.y
    );
    assert_eq!(next.stages()[1].fuel_mass_kg, 3_500.0);
    assert_eq!(telemetry.mass_kg, next.total_mass_kg());
}

#[test]
fn test_launch_and_gravity_turn() {
    let mut state = create_test_rocket();
    state.set_autopilot(AutoPilotMode::GravityTurn);
    state.set_throttle(1.0);

    let (state, history) = run_simulation(state, 20.0);
    let last = history.last().expect("Simulation should produce telemetry");

    assert!(
        last.altitude_m > 2_000.0,
        "Rocket should climb during the first 20 s, got {:.1} m",
        last.altitude_m
    );
    assert!(
        state.rotation_deg() > 0.0,
        "Gravity turn should have started pitching over"
    );
    assert!(state.rotation_deg() <= 90.0);
    assert!(state.velocity.x < 0.0, "Positive pitch leans counter-clockwise");
    assert_eq!(state.autopilot(), AutoPilotMode::GravityTurn);

    let max_q = history
        .iter()
        .map(|t| t.dynamic_pressure_pa)
        .fold(0.0, f64::max);
    assert!(max_q > 0.0, "Ascent through the atmosphere should load the airframe");
}

#[test]
fn test_multi_stage_flight() {
    let mut state = create_test_rocket();
    state.set_autopilot(AutoPilotMode::GravityTurn);
    state.set_throttle(1.0);

    let (state, history) = run_simulation(state, 45.0);

    assert_eq!(state.current_stage_index(), 1, "Booster should have been staged");
    assert!(state.stages()[0].has_separated);
    assert!(!state.stages()[0].is_active);
    assert!(state.stages()[1].is_active);
    assert_eq!(state.throttle(), 1.0, "Staging ignites the next stage");
    assert!(state.stages()[1].fuel_mass_kg < 3_500.0, "Upper stage should be burning");

    let masses: Vec<f64> = history.iter().map(|t| t.mass_kg).collect();
    assert!(
        masses.windows(2).any(|pair| pair[0] - pair[1] > 1_900.0),
        "Separation should drop the booster's dry mass"
    );
}

#[test]
fn test_staging_monotonicity() {
    let mut state = create_three_stage_rocket();
    let stage_count = state.stages().len();

    for expected_index in 1..stage_count {
        assert!(state.stage());
        assert_eq!(state.current_stage_index(), expected_index);

        let separated = state.stages().iter().filter(|s| s.has_separated).count();
        assert_eq!(separated, expected_index);
        assert_eq!(state.stages().iter().filter(|s| s.is_active).count(), 1);
    }

    let before = state.clone();
    assert!(!state.stage(), "Staging past the last stage must be a no-op");
    assert_eq!(state, before);
}

#[test]
fn test_fuel_is_monotonic_and_non_negative() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..25 {
        let mut state = create_three_stage_rocket();
        let altitude = rng.gen_range(0.0..120_000.0);
        let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        let up = Vector2D::new(angle.cos(), angle.sin());
        let velocity = Vector2D::new(rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0));
        state = state.with_kinematics(up * (EARTH_RADIUS + altitude), velocity);
        state.set_throttle(rng.gen_range(0.01..1.0));
        state.set_pitch(rng.gen_range(-180.0..180.0));

        let mut previous = state.stages()[0].fuel_mass_kg;
        for _ in 0..120 {
            state = step(state).0;
            let fuel = state.stages()[0].fuel_mass_kg;
            assert!(fuel <= previous, "Fuel went up: {} -> {}", previous, fuel);
            assert!(fuel >= 0.0);
            previous = fuel;
        }
        assert!(previous < 20_000.0, "An open throttle should burn fuel");
    }
}

#[test]
fn test_fuel_floor_at_burnout() {
    let stages = vec![RocketStage::new(0, "Tiny", 100.0, 0.5, 50_000.0, 250.0, 260.0)];
    let mut state = SimulationState::new(stages, 1.0 / 60.0).unwrap();
    state.set_throttle(1.0);

    for _ in 0..10 {
        state = step(state).0;
        assert!(state.stages()[0].fuel_mass_kg >= 0.0);
    }
    assert_eq!(state.stages()[0].fuel_mass_kg, 0.0);
}

#[test]
fn test_nan_throttle_keeps_fuel() {
    let mut state = create_test_rocket();
    state.set_throttle(1.0);
    state.set_throttle(f64::NAN);

    let (next, telemetry) = step(state);

    assert_eq!(next.throttle(), 0.0);
    assert_eq!(next.stages()[0].fuel_mass_kg, 8_000.0);
    assert_eq!(telemetry.thrust_n, 0.0);
    assert!(next.position.x.is_finite() && next.position.y.is_finite());
    assert!(next.velocity.x.is_finite() && next.velocity.y.is_finite());
}

#[test]
fn test_pause_idempotence() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = create_test_rocket();
    state.set_autopilot(AutoPilotMode::Prograde);
    state.set_throttle(1.0);
    let (mut state, _) = run_simulation(state, 5.0);

    state.toggle_pause();
    let frozen = state.clone();

    let mut telemetry = Vec::new();
    for _ in 0..rng.gen_range(5..50) {
        let (next, t) = step(state);
        state = next;
        telemetry.push(t);
    }

    assert_eq!(state.position, frozen.position);
    assert_eq!(state.velocity, frozen.velocity);
    assert_eq!(state.rotation_deg(), frozen.rotation_deg());
    assert_eq!(state.time_s(), frozen.time_s());
    for (stage, original) in state.stages().iter().zip(frozen.stages()) {
        assert_eq!(stage.fuel_mass_kg, original.fuel_mass_kg);
    }
    assert!(
        telemetry.windows(2).all(|pair| pair[0] == pair[1]),
        "Paused ticks should keep reporting the same snapshot"
    );
}

#[test]
fn test_ground_collision_clamp() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
        let up = Vector2D::new(angle.cos(), angle.sin());
        let sideways = Vector2D::new(-up.y, up.x);
        let velocity = up * rng.gen_range(-400.0..-5.0) + sideways * rng.gen_range(-50.0..50.0);

        let mut state = create_test_rocket().with_kinematics(up * EARTH_RADIUS, velocity);
        state.toggle_pause();

        let (next, telemetry) = step(state);

        assert_relative_eq!(next.position.magnitude(), EARTH_RADIUS, max_relative = 1e-12);
        assert_eq!(next.velocity, Vector2D::ZERO);
        assert_eq!(telemetry.speed_mps, 0.0);
        assert!(next.position.dot(&up) > 0.0, "Clamp stays on the same side of the planet");
    }
}

#[test]
fn test_vacuum_coast_traces_conic() {
    let r_p = EARTH_RADIUS + 200_000.0;
    let r_a = EARTH_RADIUS + 1_000_000.0;
    let a = (r_p + r_a) / 2.0;
    let speed = (EARTH_MU * (2.0 / r_p - 1.0 / a)).sqrt();

    let mut state = in_orbit(Vector2D::new(r_p, 0.0), Vector2D::new(0.0, speed));
    let (next, first) = step(state);
    state = next;

    for _ in 0..6_000 {
        state = step(state).0;
    }
    let (_, later) = step(state);

    assert_eq!(later.drag_n, 0.0);
    assert_eq!(later.thrust_n, 0.0);
    assert_abs_diff_eq!(first.apoapsis_m, later.apoapsis_m, epsilon = 200.0);
    assert_abs_diff_eq!(first.periapsis_m, later.periapsis_m, epsilon = 200.0);
    assert_abs_diff_eq!(first.apoapsis_m, 1_000_000.0, epsilon = 1_000.0);
    assert_abs_diff_eq!(first.periapsis_m, 200_000.0, epsilon = 1_000.0);
}

#[test]
fn test_escape_trajectory_reports_open_orbit() {
    let radius = EARTH_RADIUS + 300_000.0;
    let escape_speed = (2.0 * EARTH_MU / radius).sqrt();

    for paused in [true, false] {
        let mut state = in_orbit(
            Vector2D::new(radius, 0.0),
            Vector2D::new(0.0, escape_speed * 1.01),
        );
        if paused {
            state.toggle_pause();
        }

        let (_, telemetry) = step(state);

        assert_eq!(telemetry.apoapsis_m, f64::INFINITY);
        assert_eq!(telemetry.periapsis_m, f64::NEG_INFINITY);
    }
}

#[test]
fn test_fully_separated_vehicle_is_inert() {
    let mut stages = vec![
        RocketStage::new(0, "Spent", 1_000.0, 0.0, 100_000.0, 280.0, 300.0),
        RocketStage::new(1, "Also spent", 500.0, 12.0, 50_000.0, 300.0, 320.0),
    ];
    for stage in &mut stages {
        stage.has_separated = true;
    }
    let structure = Structure::from_parts(stages, 1).expect("Terminal stack should be valid");
    let position = Vector2D::new(0.0, EARTH_RADIUS + 10_000.0);
    let velocity = Vector2D::new(150.0, 20.0);
    let mut state = SimulationState::from_structure(structure, 1.0 / 60.0)
        .unwrap()
        .with_kinematics(position, velocity);
    state.set_throttle(1.0);

    let (next, telemetry) = step(state);

    assert_eq!(next.position, position);
    assert_eq!(next.velocity, velocity);
    assert_eq!(next.acceleration, Vector2D::ZERO);
    assert_relative_eq!(next.time_s(), 1.0 / 60.0);
    assert_eq!(telemetry.mass_kg, 0.0);
    assert_eq!(telemetry.thrust_n, 0.0);
    assert_eq!(telemetry.gravity_n, 0.0);
    assert_eq!(telemetry.acceleration_mps2, 0.0);
    assert_eq!(telemetry.stage_fuel_pct, 0.0);
    assert!(telemetry.drag_n.is_finite());
    assert!(telemetry.apoapsis_m.is_finite());

    let mut staged = next.clone();
    assert!(!staged.stage(), "Nothing left to stage");
    assert_eq!(staged, next);
}

#[test]
fn test_retrograde_holds_attitude() {
    let radius = EARTH_RADIUS + 150_000.0;
    let mut state = in_orbit(
        Vector2D::new(radius, 0.0),
        Vector2D::new(0.0, (EARTH_MU / radius).sqrt()),
    );
    state.set_pitch(33.0);
    state.set_autopilot(AutoPilotMode::Retrograde);

    let (state, _) = run_simulation(state, 2.0);

    assert_eq!(state.rotation_deg(), 33.0);
}

#[test]
fn test_prograde_tracks_velocity() {
    let radius = EARTH_RADIUS + 150_000.0;
    let mut state = in_orbit(
        Vector2D::new(radius, 0.0),
        Vector2D::new(0.0, (EARTH_MU / radius).sqrt()),
    );
    state.set_autopilot(AutoPilotMode::Prograde);

    let (state, _) = run_simulation(state, 10.0);

    // Velocity is a quarter turn counter-clockwise from local up.
    assert_abs_diff_eq!(state.rotation_deg(), 90.0, epsilon = 0.5);
}

#[test]
fn test_manual_pitch_overrides_autopilot() {
    let mut state = create_test_rocket();
    state.set_autopilot(AutoPilotMode::GravityTurn);
    state.set_throttle(1.0);
    let (mut state, _) = run_simulation(state, 15.0);

    state.set_pitch(5.0);
    assert_eq!(state.autopilot(), AutoPilotMode::Off);

    let (state, _) = run_simulation(state, 1.0);
    assert_eq!(state.rotation_deg(), 5.0);
}

#[test]
fn test_simulation_is_deterministic() {
    let run = || {
        let mut state = create_test_rocket();
        state.set_autopilot(AutoPilotMode::GravityTurn);
        state.set_throttle(1.0);
        run_simulation(state, 40.0)
    };

    let (state_a, history_a) = run();
    let (state_b, history_b) = run();

    assert_eq!(state_a, state_b);
    assert_eq!(history_a, history_b);
}

#[test]
fn test_load_bundled_config() {
    let config = SimulationConfig::load("config/two_stage.toml").expect("Bundled config loads");
    let state = SimulationState::from_config(&config).unwrap();

    assert_eq!(state.stages().len(), 2);
    assert_eq!(state.stages()[0].name, "S-IC Booster");
    assert!(state.is_paused());
}

#[test]
fn test_missing_config_file() {
    let result = SimulationConfig::load("config/does_not_exist.toml");
    assert!(matches!(result, Err(SimulationError::Io(_))));
}
