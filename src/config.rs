use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::constants::TIME_STEP;
use crate::control::guidance::AutoPilotMode;
use crate::control::launch_stages::RocketStage;
use crate::errors::SimulationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageConfig {
    pub name: String,
    pub dry_mass_kg: f64,
    pub fuel_mass_kg: f64,
    /// Tank capacity. Defaults to the initial fuel load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fuel_kg: Option<f64>,
    pub max_thrust_n: f64,
    pub isp_sl_s: f64,
    pub isp_vac_s: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    #[serde(default = "default_dt")]
    pub dt_s: f64,
    #[serde(default)]
    pub throttle: f64,
    #[serde(default)]
    pub rotation_deg: f64,
    #[serde(default)]
    pub autopilot: AutoPilotMode,
    #[serde(default = "default_start_paused")]
    pub start_paused: bool,
    pub stages: Vec<StageConfig>,
}

fn default_dt() -> f64 {
    TIME_STEP
}

fn default_start_paused() -> bool {
    true
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            dt_s: TIME_STEP,
            throttle: 0.0,
            rotation_deg: 0.0,
            autopilot: AutoPilotMode::Off,
            start_paused: true,
            stages: vec![
                StageConfig {
                    name: "S-IC Booster".to_string(),
                    dry_mass_kg: 2_000.0,
                    fuel_mass_kg: 8_000.0,
                    max_fuel_kg: None,
                    max_thrust_n: 800_000.0,
                    isp_sl_s: 300.0,
                    isp_vac_s: 320.0,
                },
                StageConfig {
                    name: "S-IVB Upper".to_string(),
                    dry_mass_kg: 1_000.0,
                    fuel_mass_kg: 3_500.0,
                    max_fuel_kg: None,
                    max_thrust_n: 200_000.0,
                    isp_sl_s: 280.0,
                    isp_vac_s: 340.0,
                },
            ],
        }
    }
}

impl SimulationConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), stages = config.stages.len(), "Loaded vehicle config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SimulationError> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, SimulationError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.dt_s.is_finite() && self.dt_s > 0.0) {
            return Err(SimulationError::InitializationError(format!(
                "dt_s must be positive, got {}",
                self.dt_s
            )));
        }

        if self.stages.is_empty() {
            return Err(SimulationError::InitializationError(
                "config defines no stages".to_string(),
            ));
        }

        self.build_stages()
            .iter()
            .try_for_each(|stage| stage.validate())
    }

    pub fn build_stages(&self) -> Vec<RocketStage> {
        self.stages
            .iter()
            .enumerate()
            .map(|(id, stage)| {
                let mut built = RocketStage::new(
                    id,
                    stage.name.clone(),
                    stage.dry_mass_kg,
                    stage.fuel_mass_kg,
                    stage.max_thrust_n,
                    stage.isp_sl_s,
                    stage.isp_vac_s,
                );
                if let Some(max_fuel) = stage.max_fuel_kg {
                    built.max_fuel_kg = max_fuel;
                }
                built
            })
            .collect()
    }
}
