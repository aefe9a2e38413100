use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Initialization error: {0}")]
    InitializationError(String),

    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("Config serialization error: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
