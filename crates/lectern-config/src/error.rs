use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] serde_yml::Error),
    #[error(transparent)]
    Schema(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
