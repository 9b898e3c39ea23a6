use crate::{ConcurrencyConfig, GradingConfig, ReviewConfig};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug, Default, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LecternConfigV01 {
    #[serde(default)]
    /// # Quiz grading defaults
    pub(crate) grading: GradingConfig,
    #[serde(default)]
    /// # Retries of concurrent writes
    pub(crate) concurrency: ConcurrencyConfig,
    #[serde(default)]
    /// # Course reviews
    pub(crate) reviews: ReviewConfig,
}
