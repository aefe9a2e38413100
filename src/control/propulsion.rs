use crate::constants::{ISP_BLEND_ALTITUDE, STANDARD_GRAVITY};

use super::launch_stages::RocketStage;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PropulsionOutput {
    pub thrust_n: f64,
    pub isp_s: f64,
    pub mass_flow_kg_s: f64,
}

impl PropulsionOutput {
    pub fn idle() -> Self {
        PropulsionOutput::default()
    }
}

pub fn atmospheric_factor(altitude: f64) -> f64 {
    (altitude / ISP_BLEND_ALTITUDE).clamp(0.0, 1.0)
}

pub fn effective_isp(stage: &RocketStage, altitude: f64) -> f64 {
    stage.isp_sl_s + (stage.isp_vac_s - stage.isp_sl_s) * atmospheric_factor(altitude)
}

pub fn evaluate(stage: Option<&RocketStage>, throttle: f64, altitude: f64) -> PropulsionOutput {
    let Some(stage) = stage.filter(|stage| stage.can_burn()) else {
        return PropulsionOutput::idle();
    };

    let isp_s = effective_isp(stage, altitude);
    let thrust_n = stage.max_thrust_n * throttle;

    PropulsionOutput {
        thrust_n,
        isp_s,
        mass_flow_kg_s: thrust_n / (isp_s * STANDARD_GRAVITY),
    }
}
