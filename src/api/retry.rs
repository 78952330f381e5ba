//! Retry policy for resource calls
//!
//! Transient statuses are retried with exponential backoff. The policy is
//! immutable once built.

use super::request::Method;
use crate::config::Config;
use std::collections::HashSet;
use std::time::Duration;

/// Statuses worth another attempt
pub const RETRYABLE_STATUS_CODES: &[u16] = &[408, 425, 429, 500, 502, 503, 504];

/// Statuses whose `Retry-After` header is honoured
const RETRY_AFTER_STATUS_CODES: &[u16] = &[413, 429, 503];

/// Default total attempts per call
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// First backoff interval
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(100);

/// Upper bound for any single wait
const MAX_BACKOFF: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base: Duration,
    retryable_status_codes: HashSet<u16>,
    retryable_methods: HashSet<Method>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_BACKOFF_BASE)
    }
}

impl RetryPolicy {
    /// Policy with the standard status and verb sets.
    /// POST is retried too, which assumes create/start/stop calls are idempotent.
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts,
            backoff_base,
            retryable_status_codes: RETRYABLE_STATUS_CODES.iter().copied().collect(),
            retryable_methods: [Method::Get, Method::Put, Method::Post, Method::Delete]
                .into_iter()
                .collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.retries(), DEFAULT_BACKOFF_BASE)
    }

    /// Replace the verbs eligible for retry
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.retryable_methods = methods.into_iter().collect();
        self
    }

    /// Replace the statuses eligible for retry
    pub fn with_status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.retryable_status_codes = codes.into_iter().collect();
        self
    }

    /// Total tries per call; a configured 0 still makes one attempt
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    pub fn backoff_base(&self) -> Duration {
        self.backoff_base
    }

    pub fn is_retryable_method(&self, method: Method) -> bool {
        self.retryable_methods.contains(&method)
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_status_codes.contains(&status)
    }

    /// Whether `attempt` (1-based) may be followed by another try
    pub fn should_retry(&self, method: Method, attempt: u32) -> bool {
        self.is_retryable_method(method) && attempt < self.max_attempts()
    }

    /// Wait before retry number `retry` (1-based): base * 2^(retry-1), capped
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let shift = retry.saturating_sub(1).min(16);
        self.backoff_base
            .saturating_mul(1u32 << shift)
            .min(MAX_BACKOFF)
    }

    /// Server-requested wait, when the status allows one
    pub fn retry_after(&self, status: u16, header: Option<&str>) -> Option<Duration> {
        if !RETRY_AFTER_STATUS_CODES.contains(&status) {
            return None;
        }
        let seconds = header?.trim().parse::<u64>().ok()?;
        Some(Duration::from_secs(seconds).min(MAX_BACKOFF))
    }
}
