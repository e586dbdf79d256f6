// Copyright (c) 2025 - Cowboy AI, Inc.
//! Dry-Run Validation and Request Simulation
//!
//! A miswired stub sequence does not fail loudly at test-run time: the
//! mock server just falls through to its default 404 and the test sees a
//! confusing assertion failure. This module catches that class before
//! anything is registered:
//!
//! - `check_script` verifies chain continuity: the state-threaded rules
//!   of a script form one unbroken chain per scenario name (the main
//!   chain plus any per-item bulk chains), each rooted at the initial
//!   state, and unconditional list rules for the same URL carry
//!   distinct query matcher sets.
//! - `Simulator` evaluates a script against a sequence of simulated
//!   requests using the mock server's matching order (URL, scenario
//!   state, matchers, priority, first match wins), advancing scenario
//!   state exactly as the server would.

use regex::Regex;
use std::collections::{BTreeMap, HashMap};

use crate::errors::{MockError, MockResult};
use crate::sequence::{ScenarioScript, INITIAL_STATE};
use crate::stub::{HttpMethod, Matcher, StubMapping};

/// Validate one scenario script before submission
pub fn check_script(script: &ScenarioScript) -> MockResult<()> {
    check_chain(script)?;
    check_list_distinctness(script)
}

fn check_chain(script: &ScenarioScript) -> MockResult<()> {
    // Expected next required state, per scenario name
    let mut expected: HashMap<&str, String> = HashMap::new();
    for (index, rule) in script.rules().iter().enumerate() {
        match (&rule.required_scenario_state, &rule.new_scenario_state) {
            (Some(required), Some(new)) => {
                let slot = expected
                    .entry(rule.scenario_name.as_str())
                    .or_insert_with(|| INITIAL_STATE.to_string());
                if *required != *slot {
                    return Err(MockError::ChainBroken {
                        scenario: rule.scenario_name.clone(),
                        index,
                        expected: slot.clone(),
                        found: required.clone(),
                    });
                }
                *slot = new.clone();
            }
            (None, None) => {} // unconditional list rule, outside the chains
            _ => {
                return Err(MockError::Configuration(format!(
                    "rule {} in scenario '{}' is half-threaded: required and new \
                     scenario state must be set together",
                    index, rule.scenario_name
                )));
            }
        }
    }
    Ok(())
}

fn check_list_distinctness(script: &ScenarioScript) -> MockResult<()> {
    let mut seen: HashMap<(String, HttpMethod), Vec<&BTreeMap<String, Matcher>>> = HashMap::new();
    for rule in script.rules().iter().filter(|r| !r.is_state_threaded()) {
        let key = (rule.request.url_path_pattern.clone(), rule.request.method);
        let sets = seen.entry(key).or_default();
        if sets.contains(&&rule.request.query_parameters) {
            return Err(MockError::Configuration(format!(
                "duplicate unconditional rule for {} {} with identical query matchers",
                rule.request.method, rule.request.url_path_pattern
            )));
        }
        sets.push(&rule.request.query_parameters);
    }
    Ok(())
}

/// A request as the test traffic would issue it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
}

impl SimulatedRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            headers: BTreeMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn with_bearer_auth(mut self, token: &str) -> Self {
        self.headers
            .insert("Authorization".to_string(), format!("Bearer {}", token));
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }
}

/// What the mock server would answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedResponse {
    pub status: u16,
    pub body: Option<String>,
}

impl SimulatedResponse {
    /// The server's default fallback for unmatched requests
    fn fallback() -> Self {
        Self {
            status: 404,
            body: None,
        }
    }
}

/// In-process evaluation of scripts against simulated traffic
#[derive(Debug)]
pub struct Simulator {
    rules: Vec<StubMapping>,
    /// Current state per scenario name
    states: HashMap<String, String>,
}

impl Simulator {
    pub fn new(script: &ScenarioScript) -> Self {
        Self::from_scripts(std::slice::from_ref(script))
    }

    pub fn from_scripts(scripts: &[ScenarioScript]) -> Self {
        Self {
            rules: scripts
                .iter()
                .flat_map(|s| s.rules().iter().cloned())
                .collect(),
            states: HashMap::new(),
        }
    }

    /// Reset every scenario to its initial state. Idempotent.
    pub fn reset_scenarios(&mut self) {
        self.states.clear();
    }

    /// Evaluate one request, advancing scenario state on a match
    pub fn handle(&mut self, request: &SimulatedRequest) -> SimulatedResponse {
        let mut candidates: Vec<(usize, &StubMapping)> = self
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| self.matches(rule, request))
            .collect();
        // Priority first, registration order among equals
        candidates.sort_by_key(|(index, rule)| (rule.priority, *index));

        match candidates.first() {
            Some((_, rule)) => {
                let response = SimulatedResponse {
                    status: rule.response.status,
                    body: rule.response.body.clone(),
                };
                if let Some(new_state) = &rule.new_scenario_state {
                    self.states
                        .insert(rule.scenario_name.clone(), new_state.clone());
                }
                response
            }
            None => SimulatedResponse::fallback(),
        }
    }

    fn matches(&self, rule: &StubMapping, request: &SimulatedRequest) -> bool {
        if rule.request.method != request.method {
            return false;
        }
        if !url_matches(&rule.request.url_path_pattern, &request.path) {
            return false;
        }
        if let Some(required) = &rule.required_scenario_state {
            let current = self
                .states
                .get(&rule.scenario_name)
                .map(String::as_str)
                .unwrap_or(INITIAL_STATE);
            if current != required {
                return false;
            }
        }
        let query_ok = rule.request.query_parameters.iter().all(|(name, matcher)| {
            matcher_matches(matcher, request.query.get(name))
        });
        let headers_ok = rule.request.headers.iter().all(|(name, matcher)| {
            matcher_matches(matcher, request.headers.get(name))
        });
        query_ok && headers_ok
    }
}

fn matcher_matches(matcher: &Matcher, value: Option<&String>) -> bool {
    match matcher {
        Matcher::EqualTo(expected) => value.map(String::as_str) == Some(expected.as_str()),
    }
}

fn url_matches(pattern: &str, path: &str) -> bool {
    if pattern == path {
        return true;
    }
    Regex::new(&format!("^{}$", pattern))
        .map(|re| re.is_match(path))
        .unwrap_or(false)
}
