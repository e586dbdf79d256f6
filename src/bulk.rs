// Copyright (c) 2025 - Cowboy AI, Inc.
//! Bulk Configurators
//!
//! Apply one lifecycle configurator across a list of pre-built
//! resources, for list-scenario setup. Items must have distinct names.
//! Creation shares the scenario's main chain in input order; get-active
//! and teardown rules thread one chain per item, so bulk stubs are
//! distinguished by URL and reads or deletes against distinct items can
//! arrive in any order. Only the operation order against the same URL
//! is significant.

use chrono::Utc;
use serde::Serialize;

use crate::configurators::configure_create_stub;
use crate::errors::MockResult;
use crate::resources::{Resource, ResourceState};
use crate::sequence::StubConfigurator;

/// Register a create stub for every resource, in input order
pub fn configure_bulk_create_stubs<S: Serialize>(
    cfg: &mut StubConfigurator,
    resources: &mut [Resource<S>],
) -> MockResult<()> {
    for resource in resources.iter_mut() {
        configure_create_stub(cfg, resource)?;
    }
    Ok(())
}

/// Register a get-active stub for every resource, each on its own item
/// chain
pub fn configure_bulk_get_active_stubs<S: Serialize>(
    cfg: &mut StubConfigurator,
    resources: &mut [Resource<S>],
) -> MockResult<()> {
    for resource in resources.iter_mut() {
        resource
            .status
            .transition_to(ResourceState::Active, Utc::now())?;
        let url = resource.metadata.resource_path()?;
        let item = resource.metadata.name.clone();
        cfg.configure_item_get(&item, &url, resource)?;
    }
    Ok(())
}

/// Close out every resource: delete stub then get-not-found stub, as N
/// independent per-item pairs
pub fn configure_bulk_teardown_stubs<S>(
    cfg: &mut StubConfigurator,
    resources: &[Resource<S>],
) -> MockResult<()> {
    for resource in resources {
        let url = resource.metadata.resource_path()?;
        cfg.configure_item_delete(&resource.metadata.name, &url)?;
        cfg.configure_item_get_not_found(&resource.metadata.name, &url)?;
    }
    Ok(())
}
