use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const fn default_passing_score() -> u8 {
    70
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct GradingConfig {
    #[serde(default = "default_passing_score")]
    /// # Passing score for new quizzes
    /// Percentage (0-100) used when a quiz is created without one
    pub default_passing_score: u8,
    #[serde(default)]
    /// # Attempt limit for quizzes without their own limit
    /// Unset means unlimited
    pub default_max_attempts: Option<u32>,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            default_passing_score: default_passing_score(),
            default_max_attempts: None,
        }
    }
}

impl GradingConfig {
    /// The attempt limit that applies to a quiz, `None` if unlimited.
    #[must_use]
    pub fn attempt_limit(&self, quiz_limit: Option<u32>) -> Option<u32> {
        quiz_limit.or(self.default_max_attempts).filter(|limit| *limit > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_limit() {
        let unlimited = GradingConfig::default();
        assert_eq!(unlimited.attempt_limit(None), None);
        assert_eq!(unlimited.attempt_limit(Some(2)), Some(2));

        let limited = GradingConfig {
            default_max_attempts: Some(5),
            ..Default::default()
        };
        assert_eq!(limited.attempt_limit(None), Some(5));
        assert_eq!(limited.attempt_limit(Some(1)), Some(1));

        let zero = GradingConfig {
            default_max_attempts: Some(0),
            ..Default::default()
        };
        assert_eq!(zero.attempt_limit(None), None);
    }
}
