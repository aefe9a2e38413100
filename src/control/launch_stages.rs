use serde::{Deserialize, Serialize};

use crate::errors::SimulationError;

/// One detachable propulsion unit. Masses in kg, thrust in N, Isp in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketStage {
    pub id: usize,
    pub name: String,
    pub dry_mass_kg: f64,
    pub fuel_mass_kg: f64,
    pub max_fuel_kg: f64,
    pub max_thrust_n: f64,
    pub isp_sl_s: f64,
    pub isp_vac_s: f64,
    pub is_active: bool,
    pub has_separated: bool,
}

impl RocketStage {
    pub fn new(
        id: usize,
        name: impl Into<String>,
        dry_mass_kg: f64,
        fuel_mass_kg: f64,
        max_thrust_n: f64,
        isp_sl_s: f64,
        isp_vac_s: f64,
    ) -> Self {
        RocketStage {
            id,
            name: name.into(),
            dry_mass_kg,
            fuel_mass_kg,
            max_fuel_kg: fuel_mass_kg,
            max_thrust_n,
            isp_sl_s,
            isp_vac_s,
            is_active: false,
            has_separated: false,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let fields = [
            ("dry mass", self.dry_mass_kg),
            ("fuel mass", self.fuel_mass_kg),
            ("max fuel", self.max_fuel_kg),
            ("max thrust", self.max_thrust_n),
        ];
        for (label, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InitializationError(format!(
                    "stage {} ({}): {} must be finite and non-negative, got {}",
                    self.id, self.name, label, value
                )));
            }
        }

        if self.fuel_mass_kg > self.max_fuel_kg {
            return Err(SimulationError::InitializationError(format!(
                "stage {} ({}): fuel mass {} kg exceeds capacity {} kg",
                self.id, self.name, self.fuel_mass_kg, self.max_fuel_kg
            )));
        }

        if !(self.isp_sl_s > 0.0 && self.isp_vac_s > 0.0) {
            return Err(SimulationError::InitializationError(format!(
                "stage {} ({}): specific impulse must be positive",
                self.id, self.name
            )));
        }

        Ok(())
    }

    pub fn can_burn(&self) -> bool {
        self.is_active && !self.has_separated && self.fuel_mass_kg > 0.0
    }

    pub fn is_depleted(&self) -> bool {
        self.fuel_mass_kg <= 0.0
    }

    pub fn get_total_mass(&self) -> f64 {
        if self.has_separated {
            0.0
        } else {
            self.dry_mass_kg + self.fuel_mass_kg
        }
    }

    pub fn fuel_percent(&self) -> f64 {
        if self.max_fuel_kg > 0.0 {
            self.fuel_mass_kg / self.max_fuel_kg * 100.0
        } else {
            0.0
        }
    }

    pub fn consume_fuel(&mut self, amount: f64) -> f64 {
        let before = self.fuel_mass_kg;
        self.fuel_mass_kg = (self.fuel_mass_kg - amount).max(0.0);
        before - self.fuel_mass_kg
    }
}
