use crate::error::ConfigError;
use crate::v01::config::LecternConfigV01;
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::Path;

pub mod concurrency;
pub mod error;
pub mod grading;
pub mod reviews;
pub mod v01;

pub use concurrency::ConcurrencyConfig;
pub use grading::GradingConfig;
pub use reviews::ReviewConfig;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
#[serde(tag = "version")]
pub enum VersionConfig {
    #[serde(rename = "0.1")]
    V01 { lectern: LecternConfigV01 },
}

/// Policy settings of the learning core.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LecternConfig {
    pub grading: GradingConfig,
    pub concurrency: ConcurrencyConfig,
    pub reviews: ReviewConfig,
}

impl From<LecternConfigV01> for LecternConfig {
    fn from(value: LecternConfigV01) -> Self {
        Self {
            grading: value.grading,
            concurrency: value.concurrency,
            reviews: value.reviews,
        }
    }
}

impl LecternConfig {
    #[must_use]
    pub fn grading(&self) -> &GradingConfig {
        &self.grading
    }

    #[must_use]
    pub fn concurrency(&self) -> &ConcurrencyConfig {
        &self.concurrency
    }

    #[must_use]
    pub fn reviews(&self) -> &ReviewConfig {
        &self.reviews
    }

    pub fn from_yaml(content: &[u8]) -> Result<Self, ConfigError> {
        let VersionConfig::V01 { lectern } = serde_yml::from_slice::<VersionConfig>(content)?;
        let config: Self = lectern.into();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.grading.default_passing_score > 100 {
            return Err(ConfigError::Invalid(format!(
                "default-passing-score must be at most 100, got {}",
                self.grading.default_passing_score
            )));
        }
        if self.concurrency.max_retries == 0 {
            return Err(ConfigError::Invalid("max-retries must be at least 1".to_owned()));
        }
        Ok(())
    }
}

pub async fn load(path: impl AsRef<Path>) -> Result<LecternConfig, ConfigError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Loading config");
    let content = tokio::fs::read(path).await?;
    LecternConfig::from_yaml(&content)
}

/// JSON schema of the configuration file.
pub fn schema() -> Result<String, ConfigError> {
    let schema = schemars::schema_for!(VersionConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}
