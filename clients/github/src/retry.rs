use crate::GithubError;
use backon::{ExponentialBuilder, Retryable};
use log::warn;
use std::future::Future;
use std::time::Duration;

/// Backoff applied to every request sent to GitHub.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub max_retries: usize,
    pub with_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(10),
            max_retries: 3,
            with_jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn new(min_delay: Duration, max_delay: Duration, max_retries: usize) -> Self {
        Self {
            min_delay,
            max_delay,
            max_retries,
            with_jitter: true,
        }
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.with_jitter = jitter;
        self
    }

    fn backoff(&self) -> ExponentialBuilder {
        let builder = ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries);
        if self.with_jitter {
            builder.with_jitter()
        } else {
            builder
        }
    }
}

/// Runs `operation` until it succeeds, fails with a non retryable error or runs out of retries.
///
/// The error of the last attempt is returned as is.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, operation: F) -> Result<T, GithubError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GithubError>>,
{
    operation
        .retry(config.backoff())
        .when(GithubError::is_retryable)
        .notify(|err, delay| warn!("Retrying GitHub request in {:?}: {}", delay, err))
        .await
}
