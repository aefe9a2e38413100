use serde::Serialize;
use tracing::info;

use super::launch_stages::RocketStage;
use crate::errors::SimulationError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Structure {
    stages: Vec<RocketStage>,
    current_stage_index: usize,
}

impl Structure {
    pub fn new(mut stages: Vec<RocketStage>) -> Result<Self, SimulationError> {
        if stages.is_empty() {
            return Err(SimulationError::InitializationError(
                "vehicle needs at least one stage".to_string(),
            ));
        }

        for (index, stage) in stages.iter_mut().enumerate() {
            stage.validate()?;
            stage.is_active = index == 0;
            stage.has_separated = false;
        }

        Ok(Structure {
            stages,
            current_stage_index: 0,
        })
    }

    /// Rebuilds a stack mid-flight, e.g. from a saved state. Stages below
    /// `current_stage_index` must have separated, and the stage at the index is
    /// either the single active stage or, on the last stage only, a separated one.
    pub fn from_parts(
        stages: Vec<RocketStage>,
        current_stage_index: usize,
    ) -> Result<Self, SimulationError> {
        if current_stage_index >= stages.len() {
            return Err(SimulationError::InitializationError(format!(
                "stage index {} out of range for {} stages",
                current_stage_index,
                stages.len()
            )));
        }

        for stage in &stages {
            stage.validate()?;
        }

        for (index, stage) in stages.iter().enumerate() {
            let consistent = match index.cmp(&current_stage_index) {
                std::cmp::Ordering::Less => stage.has_separated && !stage.is_active,
                std::cmp::Ordering::Equal if index + 1 == stages.len() => {
                    stage.is_active != stage.has_separated
                }
                std::cmp::Ordering::Equal => stage.is_active && !stage.has_separated,
                std::cmp::Ordering::Greater => !stage.has_separated && !stage.is_active,
            };
            if !consistent {
                return Err(SimulationError::InitializationError(format!(
                    "stage {} ({}) has flags inconsistent with current stage {}",
                    stage.id, stage.name, current_stage_index
                )));
            }
        }

        Ok(Structure {
            stages,
            current_stage_index,
        })
    }

    pub fn stages(&self) -> &[RocketStage] {
        &self.stages
    }

    pub fn current_stage_index(&self) -> usize {
        self.current_stage_index
    }

    pub fn is_last_stage(&self) -> bool {
        self.current_stage_index + 1 >= self.stages.len()
    }

    pub fn active_stage(&self) -> Option<&RocketStage> {
        self.stages
            .get(self.current_stage_index)
            .filter(|stage| !stage.has_separated)
    }

    pub(crate) fn active_stage_mut(&mut self) -> Option<&mut RocketStage> {
        self.stages
            .get_mut(self.current_stage_index)
            .filter(|stage| !stage.has_separated)
    }

    pub fn get_total_mass(&self) -> f64 {
        self.stages.iter().map(|stage| stage.get_total_mass()).sum()
    }

    pub fn get_total_fuel(&self) -> f64 {
        self.stages
            .iter()
            .filter(|stage| !stage.has_separated)
            .map(|stage| stage.fuel_mass_kg)
            .sum()
    }

    pub fn all_separated(&self) -> bool {
        self.stages.iter().all(|stage| stage.has_separated)
    }

    pub fn separate(&mut self) -> Option<usize> {
        if self.is_last_stage() {
            return None;
        }

        let index = self.current_stage_index;
        let spent = &mut self.stages[index];
        spent.is_active = false;
        spent.has_separated = true;
        info!(
            stage = spent.id,
            name = %spent.name,
            residual_fuel_kg = spent.fuel_mass_kg,
            "Stage separated"
        );

        let next = &mut self.stages[index + 1];
        next.is_active = true;
        info!(stage = next.id, name = %next.name, "Stage activated");

        self.current_stage_index = index + 1;
        Some(self.current_stage_index)
    }
}
