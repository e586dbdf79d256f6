// Copyright (c) 2025 - Cowboy AI, Inc.
//! Stub Rule Wire Model
//!
//! Serde types for the mock server's stub registration payload, matching
//! the WireMock admin JSON (`POST /__admin/mappings`): a request pattern
//! (method, URL path pattern, query-parameter and header matchers), a
//! response definition (status, headers, body), and the scenario fields
//! that make a rule conditional on server-side scenario state.
//!
//! A rule with both `required_scenario_state` and `new_scenario_state`
//! set is *state-threaded*: it only matches while its scenario sits in
//! the required state, and matching moves the scenario to the new state.
//! A rule with neither is unconditional and is disambiguated from its
//! siblings by query matchers and priority (list endpoints).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::errors::MockResult;

/// Default rule priority. Lower numbers are evaluated first.
pub const DEFAULT_PRIORITY: i32 = 5;

/// Priority for a list rule with `matcher_count` query matchers.
///
/// More specific variants must out-rank less specific ones at the same
/// URL, so a `limit=1&labels=...` request resolves to the combined rule
/// and never to the unfiltered catch-all.
pub fn list_priority(matcher_count: usize) -> i32 {
    DEFAULT_PRIORITY - matcher_count as i32
}

/// HTTP method of a stubbed interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Put,
    Post,
    Get,
    Delete,
}

impl HttpMethod {
    /// Status code the mock returns for a successful stub of this verb
    pub fn success_status(self) -> u16 {
        match self {
            HttpMethod::Put => 201,
            HttpMethod::Post => 202,
            HttpMethod::Get => 200,
            HttpMethod::Delete => 202,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Get => "GET",
            HttpMethod::Delete => "DELETE",
        };
        write!(f, "{}", s)
    }
}

/// A match expression for one header or query parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Matcher {
    /// Exact string equality
    EqualTo(String),
}

/// Conditions an incoming request must satisfy to match a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPattern {
    pub method: HttpMethod,

    /// Path pattern, regex-capable on the server side
    pub url_path_pattern: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query_parameters: BTreeMap<String, Matcher>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, Matcher>,
}

impl RequestPattern {
    pub fn new(method: HttpMethod, url_path_pattern: impl Into<String>) -> Self {
        Self {
            method,
            url_path_pattern: url_path_pattern.into(),
            query_parameters: BTreeMap::new(),
            headers: BTreeMap::new(),
        }
    }

    /// Require an exact `Authorization: Bearer <token>` header
    pub fn with_bearer_auth(mut self, token: &str) -> Self {
        self.headers.insert(
            "Authorization".to_string(),
            Matcher::EqualTo(format!("Bearer {}", token)),
        );
        self
    }

    /// Require a query parameter to equal the given value
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_parameters
            .insert(name.into(), Matcher::EqualTo(value.into()));
        self
    }
}

/// What the mock server sends back when a rule matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDefinition {
    pub status: u16,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ResponseDefinition {
    /// A JSON response with the serialized payload and content-type header
    pub fn json<T: Serialize>(status: u16, payload: &T) -> MockResult<Self> {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Ok(Self {
            status,
            headers,
            body: Some(serde_json::to_string(payload)?),
        })
    }

    /// A bodiless response (DELETE acknowledgements, 404s)
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: None,
        }
    }
}

/// One conditional HTTP responder, as submitted to the admin API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StubMapping {
    pub priority: i32,

    pub scenario_name: String,

    /// Scenario state this rule requires; `None` means unconditional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_scenario_state: Option<String>,

    /// Scenario state matching this rule moves the scenario to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_scenario_state: Option<String>,

    pub request: RequestPattern,

    pub response: ResponseDefinition,
}

impl StubMapping {
    /// Whether this rule participates in the scenario state chain
    pub fn is_state_threaded(&self) -> bool {
        self.required_scenario_state.is_some()
    }
}
