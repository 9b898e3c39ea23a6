use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const fn default_max_retries() -> u32 {
    5
}

/// Handling of writes that race with other requests on the same rows.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ConcurrencyConfig {
    #[serde(default = "default_max_retries")]
    /// # Retries for concurrent updates
    /// How often a progress update, enrollment status change or quiz submission is retried after losing a race
    pub max_retries: u32,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
        }
    }
}
