pub mod environment;
pub mod guidance;
pub mod launch_stages;
pub mod propulsion;
pub mod rocket;
pub mod structure;
