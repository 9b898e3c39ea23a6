//! Bounded retries for writes that lose a race against another request.

use crate::error::LearningError;
use lectern_config::LecternConfig;
use std::time::Duration;

const BACKOFF_STEP: Duration = Duration::from_millis(5);

/// Result of one transaction round of an optimistic write.
pub(crate) enum Round<T> {
    Done(T),
    /// Another request changed the rows in between, nothing was written.
    Lost,
}

pub(crate) struct Retry {
    max_retries: u32,
    retries: u32,
}

impl Retry {
    pub(crate) fn new(config: &LecternConfig) -> Self {
        Self {
            max_retries: config.concurrency().max_retries,
            retries: 0,
        }
    }

    pub(crate) fn retries(&self) -> u32 {
        self.retries
    }

    /// Records a lost round and waits before the next one.
    ///
    /// Fails with `Conflict` once the configured retries are used up.
    pub(crate) async fn lost(&mut self) -> Result<(), LearningError> {
        if self.retries >= self.max_retries {
            return Err(LearningError::Conflict { retries: self.retries });
        }
        self.retries += 1;
        tokio::time::sleep(BACKOFF_STEP * self.retries).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_config::ConcurrencyConfig;

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let config = LecternConfig {
            concurrency: ConcurrencyConfig { max_retries: 2 },
            ..Default::default()
        };
        let mut retry = Retry::new(&config);

        assert!(retry.lost().await.is_ok());
        assert!(retry.lost().await.is_ok());
        assert_eq!(retry.retries(), 2);
        assert!(matches!(retry.lost().await, Err(LearningError::Conflict { retries: 2 })));
    }
}
