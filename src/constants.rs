// Physical Constants
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11; // N⋅m²/kg²
pub const EARTH_MASS: f64 = 5.972e24; // kg
pub const EARTH_RADIUS: f64 = 6_371_000.0; // meters
pub const EARTH_MU: f64 = GRAVITATIONAL_CONSTANT * EARTH_MASS; // m³/s²
pub const STANDARD_GRAVITY: f64 = 9.80665; // m/s², used for Isp -> mass flow

// Atmosphere
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225; // kg/m³
pub const SCALE_HEIGHT: f64 = 8_500.0; // m
pub const ATMOSPHERE_CEILING: f64 = 80_000.0; // m, hard vacuum above
pub const SPEED_OF_SOUND: f64 = 340.0; // m/s, constant for Mach number

// Aerodynamic Constants
pub const DRAG_REFERENCE_AREA: f64 = 1.2; // m²
pub const DRAG_COEFFICIENT_SUBSONIC: f64 = 0.35;
pub const DRAG_COEFFICIENT_SUPERSONIC: f64 = 0.55;
pub const TRANSONIC_MACH_START: f64 = 0.8;
pub const TRANSONIC_MACH_END: f64 = 1.2;
pub const DRAG_MIN_SPEED: f64 = 0.1; // m/s, below this drag is not applied

// Propulsion Constants
pub const ISP_BLEND_ALTITUDE: f64 = 50_000.0; // m, Isp reaches vacuum value here

// Autopilot
pub const GRAVITY_TURN_START_ALTITUDE: f64 = 500.0; // m
pub const GRAVITY_TURN_RATE: f64 = 1.0 / 700.0; // degrees of pitch per meter climbed
pub const GRAVITY_TURN_MAX_PITCH: f64 = 90.0; // degrees
pub const GRAVITY_TURN_GAIN: f64 = 0.8; // 1/s
pub const PROGRADE_MIN_SPEED: f64 = 20.0; // m/s
pub const PROGRADE_GAIN: f64 = 2.0; // 1/s

// Ground contact
pub const HARD_LANDING_SPEED: f64 = 10.0; // m/s

// Simulation Parameters
pub const TIME_STEP: f64 = 1.0 / 60.0; // s
pub const MAX_SIMULATION_TIME: f64 = 900.0; // s
