pub mod aerodynamics;
pub mod forces;
pub mod kinematics;
pub mod orbit;
