// Copyright (c) 2025 - Cowboy AI, Inc.
//! Scenario Sequencing
//!
//! One `StubConfigurator` per test scenario. Each state-threaded
//! configuration call stamps the HTTP verb onto the response body's
//! metadata, threads the current/next scenario state pair into the rule,
//! and advances an explicit `SequenceCursor`. Rules accumulate in a
//! `ScenarioScript` as pure data; nothing touches the network until the
//! script is validated and submitted.
//!
//! State-threaded rules must be configured in the exact order the test
//! will issue the real calls. Two kinds of rule sit outside the main
//! chain: list rules are unconditional (no scenario state, no cursor
//! advance) and are disambiguated by query matchers and priority; bulk
//! per-item rules thread a separate `<scenario>-<item>` chain per
//! resource, so ordering among distinct items never matters, only the
//! order of operations against the same URL.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::admin::StubBackend;
use crate::config::MockParams;
use crate::errors::MockResult;
use crate::resources::{naming, Resource, ResourceList};
use crate::stub::{
    list_priority, HttpMethod, RequestPattern, ResponseDefinition, StubMapping, DEFAULT_PRIORITY,
};
use crate::validate;

/// Scenario state every chain starts from
pub const INITIAL_STATE: &str = "Started";

/// Label of the state reached after `state_id` transitions
pub fn state_label(state_id: u32) -> String {
    if state_id == 0 {
        INITIAL_STATE.to_string()
    } else {
        format!("State.{}", state_id)
    }
}

/// Position in a scenario's state chain, passed by value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceCursor {
    scenario: String,
    state_id: u32,
    current_state: String,
}

impl SequenceCursor {
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            state_id: 0,
            current_state: INITIAL_STATE.to_string(),
        }
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn state_id(&self) -> u32 {
        self.state_id
    }

    pub fn current_state(&self) -> &str {
        &self.current_state
    }

    /// The cursor one transition further down the chain
    pub fn advanced(&self) -> Self {
        let state_id = self.state_id + 1;
        Self {
            scenario: self.scenario.clone(),
            state_id,
            current_state: state_label(state_id),
        }
    }
}

/// Ordered stub registration intents for one scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioScript {
    scenario: String,
    rules: Vec<StubMapping>,
}

impl ScenarioScript {
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            rules: Vec::new(),
        }
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn rules(&self) -> &[StubMapping] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn push(&mut self, rule: StubMapping) {
        self.rules.push(rule);
    }

    /// Splice a raw rule in, bypassing the configurator. Validation
    /// tests need malformed scripts a configurator can never produce.
    #[cfg(test)]
    pub(crate) fn push_for_tests(&mut self, rule: StubMapping) {
        self.push(rule);
    }

    /// Check state-chain continuity and list-matcher distinctness
    pub fn validate(&self) -> MockResult<()> {
        validate::check_script(self)
    }

    /// Validate, then register every rule in order.
    ///
    /// All-or-nothing: the first admin failure aborts the remainder.
    pub async fn submit<B: StubBackend + ?Sized>(&self, backend: &B) -> MockResult<()> {
        self.validate()?;
        for rule in &self.rules {
            backend.register(rule).await?;
        }
        info!(
            scenario = %self.scenario,
            rules = self.rules.len(),
            "scenario script registered"
        );
        Ok(())
    }
}

/// Per-scenario sequencer building a script of stub rules
#[derive(Debug)]
pub struct StubConfigurator {
    cursor: SequenceCursor,
    /// One independent cursor per bulk item chain
    item_cursors: HashMap<String, SequenceCursor>,
    auth_token: String,
    script: ScenarioScript,
}

impl StubConfigurator {
    pub fn new(scenario: impl Into<String>, auth_token: impl Into<String>) -> Self {
        let scenario = scenario.into();
        Self {
            cursor: SequenceCursor::new(scenario.clone()),
            item_cursors: HashMap::new(),
            auth_token: auth_token.into(),
            script: ScenarioScript::new(scenario),
        }
    }

    /// A configurator with a fresh random scenario name
    pub fn for_params(prefix: &str, params: &MockParams) -> Self {
        Self::new(naming::scenario_name(prefix), &params.auth_token)
    }

    pub fn scenario(&self) -> &str {
        self.script.scenario()
    }

    pub fn cursor(&self) -> &SequenceCursor {
        &self.cursor
    }

    /// Consume the configurator, yielding the accumulated script
    pub fn into_script(self) -> ScenarioScript {
        self.script
    }

    /// PUT returning 201 with the resource as body
    pub fn configure_put<S: Serialize>(
        &mut self,
        url: &str,
        resource: &mut Resource<S>,
    ) -> MockResult<()> {
        resource.metadata.verb = Some(HttpMethod::Put);
        let response = ResponseDefinition::json(HttpMethod::Put.success_status(), resource)?;
        self.push_state_threaded(HttpMethod::Put, url, response)
    }

    /// POST returning 202 with the resource as body (instance actions)
    pub fn configure_post<S: Serialize>(
        &mut self,
        url: &str,
        resource: &mut Resource<S>,
    ) -> MockResult<()> {
        resource.metadata.verb = Some(HttpMethod::Post);
        let response = ResponseDefinition::json(HttpMethod::Post.success_status(), resource)?;
        self.push_state_threaded(HttpMethod::Post, url, response)
    }

    /// GET returning 200 with the resource as body
    pub fn configure_get<S: Serialize>(
        &mut self,
        url: &str,
        resource: &mut Resource<S>,
    ) -> MockResult<()> {
        resource.metadata.verb = Some(HttpMethod::Get);
        let response = ResponseDefinition::json(HttpMethod::Get.success_status(), resource)?;
        self.push_state_threaded(HttpMethod::Get, url, response)
    }

    /// GET returning 404 with no body
    pub fn configure_get_not_found(&mut self, url: &str) -> MockResult<()> {
        self.push_state_threaded(HttpMethod::Get, url, ResponseDefinition::empty(404))
    }

    /// DELETE returning 202 with no body
    pub fn configure_delete(&mut self, url: &str) -> MockResult<()> {
        self.push_state_threaded(
            HttpMethod::Delete,
            url,
            ResponseDefinition::empty(HttpMethod::Delete.success_status()),
        )
    }

    /// GET returning 200 with the resource as body, threaded on the
    /// item's own chain.
    ///
    /// Bulk rules for distinct resources are distinguished by URL, not
    /// by a shared scenario state: each item carries a separate
    /// `<scenario>-<item>` chain, so reads against different items can
    /// arrive in any order.
    pub fn configure_item_get<S: Serialize>(
        &mut self,
        item: &str,
        url: &str,
        resource: &mut Resource<S>,
    ) -> MockResult<()> {
        resource.metadata.verb = Some(HttpMethod::Get);
        let response = ResponseDefinition::json(HttpMethod::Get.success_status(), resource)?;
        self.push_item_threaded(item, HttpMethod::Get, url, response)
    }

    /// DELETE returning 202 with no body, threaded on the item's own chain
    pub fn configure_item_delete(&mut self, item: &str, url: &str) -> MockResult<()> {
        self.push_item_threaded(
            item,
            HttpMethod::Delete,
            url,
            ResponseDefinition::empty(HttpMethod::Delete.success_status()),
        )
    }

    /// GET returning 404 with no body, threaded on the item's own chain
    pub fn configure_item_get_not_found(&mut self, item: &str, url: &str) -> MockResult<()> {
        self.push_item_threaded(item, HttpMethod::Get, url, ResponseDefinition::empty(404))
    }

    /// GET returning 200 with a collection body, matched by query params.
    ///
    /// Unconditional: does not read or advance scenario state. Variants
    /// for the same URL must carry distinct query matcher sets.
    pub fn configure_get_list<S: Serialize>(
        &mut self,
        url: &str,
        query_params: &[(&str, &str)],
        list: &mut ResourceList<S>,
    ) -> MockResult<()> {
        for item in &mut list.items {
            item.metadata.verb = Some(HttpMethod::Get);
        }
        self.configure_get_json(url, query_params, list)
    }

    /// GET returning 200 with an arbitrary JSON body, matched by query
    /// params (catalog endpoints with static fixtures)
    pub fn configure_get_json<T: Serialize>(
        &mut self,
        url: &str,
        query_params: &[(&str, &str)],
        body: &T,
    ) -> MockResult<()> {
        let mut request = RequestPattern::new(HttpMethod::Get, url).with_bearer_auth(&self.auth_token);
        for (name, value) in query_params {
            request = request.with_query_param(*name, *value);
        }
        let rule = StubMapping {
            priority: list_priority(query_params.len()),
            scenario_name: self.scenario().to_string(),
            required_scenario_state: None,
            new_scenario_state: None,
            request,
            response: ResponseDefinition::json(HttpMethod::Get.success_status(), body)?,
        };
        debug!(scenario = %self.scenario(), url, params = query_params.len(), "configured list stub");
        self.script.push(rule);
        Ok(())
    }

    fn push_state_threaded(
        &mut self,
        method: HttpMethod,
        url: &str,
        response: ResponseDefinition,
    ) -> MockResult<()> {
        let next = self.cursor.advanced();
        let rule = StubMapping {
            priority: DEFAULT_PRIORITY,
            scenario_name: self.scenario().to_string(),
            required_scenario_state: Some(self.cursor.current_state().to_string()),
            new_scenario_state: Some(next.current_state().to_string()),
            request: RequestPattern::new(method, url).with_bearer_auth(&self.auth_token),
            response,
        };
        debug!(
            scenario = %self.scenario(),
            %method,
            url,
            from = %self.cursor.current_state(),
            to = %next.current_state(),
            "configured stub"
        );
        self.script.push(rule);
        self.cursor = next;
        Ok(())
    }

    fn push_item_threaded(
        &mut self,
        item: &str,
        method: HttpMethod,
        url: &str,
        response: ResponseDefinition,
    ) -> MockResult<()> {
        let scenario = format!("{}-{}", self.script.scenario(), item);
        let cursor = self
            .item_cursors
            .entry(scenario)
            .or_insert_with_key(|key| SequenceCursor::new(key.clone()));
        let next = cursor.advanced();
        let rule = StubMapping {
            priority: DEFAULT_PRIORITY,
            scenario_name: cursor.scenario().to_string(),
            required_scenario_state: Some(cursor.current_state().to_string()),
            new_scenario_state: Some(next.current_state().to_string()),
            request: RequestPattern::new(method, url).with_bearer_auth(&self.auth_token),
            response,
        };
        debug!(
            scenario = %rule.scenario_name,
            %method,
            url,
            from = %cursor.current_state(),
            to = %next.current_state(),
            "configured item stub"
        );
        *cursor = next;
        self.script.push(rule);
        Ok(())
    }
}
