// Copyright (c) 2025 - Cowboy AI, Inc.
//! Engine parameters shared by every scenario configuration run

use std::env;
use std::time::Duration;

/// Backoff parameters for the consumer-side poll-until-state helper.
///
/// The stub engine itself never retries; a failed admin call aborts the
/// scenario setup. These values are carried here so the test layer that
/// polls resources for a target state reads them from one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryParams {
    /// Delay before the first poll
    pub base_delay: Duration,
    /// Interval between subsequent polls
    pub base_interval: Duration,
    /// Maximum number of polls before giving up
    pub max_attempts: u32,
}

impl Default for RetryParams {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(1),
            base_interval: Duration::from_secs(2),
            max_attempts: 30,
        }
    }
}

/// Configuration for one mock scenario run
#[derive(Debug, Clone)]
pub struct MockParams {
    /// Base URL of the mock server (admin API lives under `/__admin`)
    pub mock_url: String,
    /// Bearer token every registered stub requires on incoming requests
    pub auth_token: String,
    /// Tenant all resource URLs are rooted under
    pub tenant: String,
    /// Region stamped into resource metadata
    pub region: String,
    /// Admin API request timeout
    pub timeout: Duration,
    /// Poll backoff for the consumer-side wait helper
    pub retry: RetryParams,
}

impl Default for MockParams {
    fn default() -> Self {
        Self {
            mock_url: "http://localhost:8080".to_string(),
            auth_token: "test-token".to_string(),
            tenant: "tenant-default".to_string(),
            region: "eu-central-1".to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryParams::default(),
        }
    }
}

impl MockParams {
    /// Load parameters from the environment, falling back to defaults.
    ///
    /// Recognized variables: `SECAPI_MOCK_URL`, `SECAPI_AUTH_TOKEN`,
    /// `SECAPI_TENANT`, `SECAPI_REGION`, `SECAPI_RETRY_MAX_ATTEMPTS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let mut retry = defaults.retry.clone();
        if let Some(attempts) = env::var("SECAPI_RETRY_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            retry.max_attempts = attempts;
        }

        Self {
            mock_url: env::var("SECAPI_MOCK_URL").unwrap_or(defaults.mock_url),
            auth_token: env::var("SECAPI_AUTH_TOKEN").unwrap_or(defaults.auth_token),
            tenant: env::var("SECAPI_TENANT").unwrap_or(defaults.tenant),
            region: env::var("SECAPI_REGION").unwrap_or(defaults.region),
            timeout: defaults.timeout,
            retry,
        }
    }
}
