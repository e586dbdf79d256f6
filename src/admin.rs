// Copyright (c) 2025 - Cowboy AI, Inc.
//! Mock server admin API client
//!
//! The engine talks to a WireMock-compatible admin API with three
//! requests: register one stub mapping, reset all scenario states, and a
//! full reset (stubs plus scenarios) for suite teardown. Registration is
//! a synchronous round-trip per rule; a failure aborts the scenario
//! setup with no retry.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::MockParams;
use crate::errors::{MockError, MockResult};
use crate::stub::StubMapping;

/// Admin-side operations a stub registration target must support.
///
/// `MockServerClient` is the real implementation; tests substitute
/// recording fakes.
#[async_trait]
pub trait StubBackend: Send + Sync {
    /// Register one stub rule
    async fn register(&self, mapping: &StubMapping) -> MockResult<()>;

    /// Reset every scenario to its initial state. Idempotent.
    async fn reset_scenarios(&self) -> MockResult<()>;

    /// Remove all stubs and scenario state (suite teardown)
    async fn reset(&self) -> MockResult<()>;
}

/// HTTP client for the mock server's admin API
#[derive(Debug, Clone)]
pub struct MockServerClient {
    base_url: String,
    client: Client,
}

impl MockServerClient {
    /// Create a client for the admin API at `params.mock_url`
    pub fn new(params: &MockParams) -> MockResult<Self> {
        let client = Client::builder()
            .timeout(params.timeout)
            .build()
            .map_err(|e| MockError::Admin(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: params.mock_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Verify the admin API is reachable
    pub async fn health_check(&self) -> MockResult<()> {
        let url = format!("{}/__admin/mappings", self.base_url);
        let response = self.client.get(&url).send().await?;
        if response.status().is_success() {
            debug!("mock server admin API reachable");
            Ok(())
        } else {
            Err(MockError::Admin(format!(
                "mock server returned status: {}",
                response.status()
            )))
        }
    }

    async fn post_admin(&self, path: &str) -> MockResult<()> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(MockError::Admin(format!(
                "admin API returned {} for {}: {}",
                status, path, body
            )))
        }
    }
}

#[async_trait]
impl StubBackend for MockServerClient {
    async fn register(&self, mapping: &StubMapping) -> MockResult<()> {
        let url = format!("{}/__admin/mappings", self.base_url);
        let response = self.client.post(&url).json(mapping).send().await?;

        if response.status().is_success() {
            debug!(
                scenario = %mapping.scenario_name,
                method = %mapping.request.method,
                url = %mapping.request.url_path_pattern,
                "registered stub"
            );
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(MockError::Admin(format!(
                "stub registration rejected with {}: {}",
                status, body
            )))
        }
    }

    async fn reset_scenarios(&self) -> MockResult<()> {
        self.post_admin("/__admin/scenarios/reset").await?;
        info!("all mock scenarios reset");
        Ok(())
    }

    async fn reset(&self) -> MockResult<()> {
        self.post_admin("/__admin/reset").await?;
        info!("mock server fully reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let params = MockParams {
            mock_url: "http://localhost:8080/".to_string(),
            timeout: Duration::from_secs(5),
            ..MockParams::default()
        };
        let client = MockServerClient::new(&params).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}
