// Copyright (c) 2025 - Cowboy AI, Inc.
//! Lifecycle Stub Configurators
//!
//! One function per canonical lifecycle transition, generic over the
//! kind-specific spec type. Each call mutates the resource exactly as
//! the faked backend would have after processing the verb (timestamps,
//! resource version, status transition with one appended condition) and
//! then registers the corresponding stub rule.
//!
//! Status transitions are set here and only here. A scenario that will
//! issue create, get, update, get must invoke exactly those four
//! configurator calls in that order; any reordering desyncs the
//! scenario state chain from the calls the test makes.

use chrono::Utc;
use serde::Serialize;

use crate::errors::MockResult;
use crate::resources::kinds::Instance;
use crate::resources::{Resource, ResourceList, ResourceState};
use crate::sequence::StubConfigurator;

/// Instance action verbs stubbed as POST operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceOperation {
    Start,
    Stop,
    Restart,
}

impl InstanceOperation {
    pub fn segment(self) -> &'static str {
        match self {
            InstanceOperation::Start => "start",
            InstanceOperation::Stop => "stop",
            InstanceOperation::Restart => "restart",
        }
    }
}

/// Stub the creation PUT: fresh timestamps, version 1, status `Creating`
pub fn configure_create_stub<S: Serialize>(
    cfg: &mut StubConfigurator,
    resource: &mut Resource<S>,
) -> MockResult<()> {
    let now = Utc::now();
    resource.metadata.created_at = Some(now);
    resource.metadata.last_modified_at = Some(now);
    resource.metadata.resource_version = 1;
    resource.status.transition_to(ResourceState::Creating, now)?;
    let url = resource.metadata.resource_path()?;
    cfg.configure_put(&url, resource)
}

/// Stub the update PUT: bumped version and modification time, status
/// `Updating`
pub fn configure_update_stub<S: Serialize>(
    cfg: &mut StubConfigurator,
    resource: &mut Resource<S>,
) -> MockResult<()> {
    let now = Utc::now();
    resource.metadata.last_modified_at = Some(now);
    resource.metadata.resource_version += 1;
    resource.status.transition_to(ResourceState::Updating, now)?;
    let url = resource.metadata.resource_path()?;
    cfg.configure_put(&url, resource)
}

/// Stub a GET that reports the resource settled in the given state.
///
/// No metadata changes; the response reflects the backend having
/// finished whatever the previous verb started.
pub fn configure_get_state_stub<S: Serialize>(
    cfg: &mut StubConfigurator,
    resource: &mut Resource<S>,
    state: ResourceState,
) -> MockResult<()> {
    resource.status.transition_to(state, Utc::now())?;
    let url = resource.metadata.resource_path()?;
    cfg.configure_get(&url, resource)
}

/// Stub a GET reporting the resource `Active`
pub fn configure_get_active_stub<S: Serialize>(
    cfg: &mut StubConfigurator,
    resource: &mut Resource<S>,
) -> MockResult<()> {
    configure_get_state_stub(cfg, resource, ResourceState::Active)
}

/// Stub a list GET from a caller-filtered subset.
///
/// The engine does not compute filtering; `items` must already be the
/// subset the given query parameters are expected to return.
pub fn configure_get_list_stub<S: Serialize + Clone>(
    cfg: &mut StubConfigurator,
    collection_url: &str,
    query_params: &[(&str, &str)],
    items: &[Resource<S>],
) -> MockResult<()> {
    let mut list = ResourceList {
        items: items.to_vec(),
    };
    cfg.configure_get_list(collection_url, query_params, &mut list)
}

/// Stub the deletion DELETE (202, empty body)
pub fn configure_delete_stub<S>(
    cfg: &mut StubConfigurator,
    resource: &Resource<S>,
) -> MockResult<()> {
    let url = resource.metadata.resource_path()?;
    cfg.configure_delete(&url)
}

/// Stub the post-deletion GET (404, empty body)
pub fn configure_get_not_found_stub<S>(
    cfg: &mut StubConfigurator,
    resource: &Resource<S>,
) -> MockResult<()> {
    let url = resource.metadata.resource_path()?;
    cfg.configure_get_not_found(&url)
}

/// Stub an instance action POST (202).
///
/// Leaves metadata and status untouched; the expected terminal state
/// (`Active` after start/restart, `Suspended` after stop) is configured
/// by a following `configure_get_state_stub` call.
pub fn configure_instance_operation_stub(
    cfg: &mut StubConfigurator,
    instance: &mut Instance,
    operation: InstanceOperation,
) -> MockResult<()> {
    let url = format!(
        "{}/{}",
        instance.metadata.resource_path()?,
        operation.segment()
    );
    cfg.configure_post(&url, instance)
}
