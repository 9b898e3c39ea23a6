use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("num conversion failed")]
    NumConversion,
    #[error("stored question options are invalid")]
    InvalidOptions(#[from] serde_json::Error),
}
