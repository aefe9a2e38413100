use crate::constants::{
    DRAG_COEFFICIENT_SUBSONIC, DRAG_COEFFICIENT_SUPERSONIC, DRAG_MIN_SPEED, DRAG_REFERENCE_AREA,
    SPEED_OF_SOUND, TRANSONIC_MACH_END, TRANSONIC_MACH_START,
};
use crate::utils::vector2d::Vector2D;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aerodynamics {
    pub drag_coefficient_subsonic: f64,
    pub drag_coefficient_supersonic: f64,
    pub surface_area: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub mach: f64,
    pub drag_coefficient: f64,
    pub dynamic_pressure: f64,
    pub magnitude: f64,
    pub force: Vector2D,
}

impl Default for Aerodynamics {
    fn default() -> Self {
        Aerodynamics::new(
            DRAG_COEFFICIENT_SUBSONIC,
            DRAG_COEFFICIENT_SUPERSONIC,
            DRAG_REFERENCE_AREA,
        )
    }
}

impl Aerodynamics {
    pub fn new(
        drag_coefficient_subsonic: f64,
        drag_coefficient_supersonic: f64,
        surface_area: f64,
    ) -> Self {
        Aerodynamics {
            drag_coefficient_subsonic,
            drag_coefficient_supersonic,
            surface_area,
        }
    }

    pub fn drag_coefficient(&self, mach: f64) -> f64 {
        if mach < TRANSONIC_MACH_START {
            self.drag_coefficient_subsonic
        } else if mach > TRANSONIC_MACH_END {
            self.drag_coefficient_supersonic
        } else {
            let blend = (mach - TRANSONIC_MACH_START) / (TRANSONIC_MACH_END - TRANSONIC_MACH_START);
            self.drag_coefficient_subsonic
                + (self.drag_coefficient_supersonic - self.drag_coefficient_subsonic) * blend
        }
    }

    pub fn calculate_drag(&self, velocity: Vector2D, air_density: f64) -> DragState {
        let speed = velocity.magnitude();
        let mach = speed / SPEED_OF_SOUND;
        let drag_coefficient = self.drag_coefficient(mach);
        let dynamic_pressure = calculate_dynamic_pressure(speed, air_density);
        let magnitude = dynamic_pressure * drag_coefficient * self.surface_area;

        let force = if speed > DRAG_MIN_SPEED {
            -velocity.normalize() * magnitude
        } else {
            Vector2D::ZERO
        };

        DragState {
            mach,
            drag_coefficient,
            dynamic_pressure,
            magnitude,
            force,
        }
    }
}

pub fn calculate_dynamic_pressure(speed: f64, air_density: f64) -> f64 {
    0.5 * air_density * speed.powi(2)
}
