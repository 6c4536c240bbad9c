//! Rate limiting and retry policy for transcript sources.

use super::TranscriptSource;
use crate::config::TranscriptSettings;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Pacing and retry limits applied around a transcript source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Minimum time between the end of one fetch and the start of the next.
    pub min_interval: Duration,
    /// Retries for transient failures.
    pub max_retries: u32,
    /// Delay before the first retry; doubled on each further retry.
    pub initial_backoff: Duration,
}

impl RateLimitPolicy {
    /// No pacing and no retries.
    pub fn none() -> Self {
        Self {
            min_interval: Duration::ZERO,
            max_retries: 0,
            initial_backoff: Duration::ZERO,
        }
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::from(&TranscriptSettings::default())
    }
}

impl From<&TranscriptSettings> for RateLimitPolicy {
    fn from(settings: &TranscriptSettings) -> Self {
        Self {
            min_interval: Duration::from_millis(settings.min_interval_ms),
            max_retries: settings.max_retries,
            initial_backoff: Duration::from_millis(settings.initial_backoff_ms),
        }
    }
}

/// Wraps a source so fetches are spaced out and transient failures retried.
///
/// Fetches through the same wrapper are serialized.
pub struct RateLimitedSource {
    inner: Arc<dyn TranscriptSource>,
    policy: RateLimitPolicy,
    last_fetch: Mutex<Option<Instant>>,
}

impl RateLimitedSource {
    pub fn new(inner: Arc<dyn TranscriptSource>, policy: RateLimitPolicy) -> Self {
        Self {
            inner,
            policy,
            last_fetch: Mutex::new(None),
        }
    }

    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }
}

#[async_trait]
impl TranscriptSource for RateLimitedSource {
    async fn fetch(&self, video_id: &str, language: &str) -> Result<String> {
        let mut last_fetch = self.last_fetch.lock().await;

        if let Some(last) = *last_fetch {
            let ready_at = last + self.policy.min_interval;
            if ready_at > Instant::now() {
                debug!("Waiting {:?} before next transcript fetch", ready_at - Instant::now());
                tokio::time::sleep_until(ready_at).await;
            }
        }

        let mut backoff = self.policy.initial_backoff;
        let mut attempt = 0;

        loop {
            let result = self.inner.fetch(video_id, language).await;
            *last_fetch = Some(Instant::now());

            match result {
                Err(e) if e.is_transient() && attempt < self.policy.max_retries => {
                    attempt += 1;
                    warn!(
                        "Transcript fetch failed ({}), retry {}/{} in {:?}",
                        e, attempt, self.policy.max_retries, backoff
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
                other => return other,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TldwError;
    use crate::testing::StaticSource;

    fn quick_policy(max_retries: u32) -> RateLimitPolicy {
        RateLimitPolicy {
            min_interval: Duration::ZERO,
            max_retries,
            initial_backoff: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_policy_from_settings() {
        let policy = RateLimitPolicy::from(&TranscriptSettings::default());
        assert_eq!(policy.min_interval, Duration::from_secs(10));
        assert_eq!(policy.max_retries, 2);
        assert_eq!(RateLimitPolicy::none().max_retries, 0);
    }

    #[tokio::test]
    async fn test_retries_transient_failures() {
        let inner = Arc::new(
            StaticSource::new()
                .with_transcript("abcdefghijk", "en", "hello")
                .with_transient_failures(2),
        );
        let source = RateLimitedSource::new(inner.clone(), quick_policy(2));

        let text = source.fetch("abcdefghijk", "en").await.unwrap();
        assert_eq!(text, "hello");
        assert_eq!(inner.calls(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let inner = Arc::new(
            StaticSource::new()
                .with_transcript("abcdefghijk", "en", "hello")
                .with_transient_failures(5),
        );
        let source = RateLimitedSource::new(inner.clone(), quick_policy(1));

        let err = source.fetch("abcdefghijk", "en").await.unwrap_err();
        assert!(matches!(err, TldwError::ToolFailed(_)));
        assert_eq!(inner.calls(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_is_not_retried() {
        let inner = Arc::new(StaticSource::new());
        let source = RateLimitedSource::new(inner.clone(), quick_policy(3));

        let err = source.fetch("abcdefghijk", "fr").await.unwrap_err();
        assert!(matches!(err, TldwError::TranscriptUnavailable(_)));
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test]
    async fn test_min_interval_between_fetches() {
        let inner = Arc::new(StaticSource::new().with_transcript("abcdefghijk", "en", "hello"));
        let policy = RateLimitPolicy {
            min_interval: Duration::from_millis(50),
            ..quick_policy(0)
        };
        let source = RateLimitedSource::new(inner, policy);

        let started = std::time::Instant::now();
        source.fetch("abcdefghijk", "en").await.unwrap();
        source.fetch("abcdefghijk", "en").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
