// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures
//!
//! Deterministic test data shared across the integration test binaries.
//! Timestamps are fixed constants so serialized bodies are reproducible;
//! tests override `mock_url` with the address of an in-process fake
//! admin server.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use secapi_mock::config::MockParams;
use secapi_mock::resources::kinds::{
    BlockStorage, BlockStorageSpec, Instance, InstanceSpec, Network, NetworkSpec, Workspace,
    WorkspaceSpec,
};
use secapi_mock::resources::{Metadata, Resource, ResourceKind};

/// Fixed timestamp for deterministic assertions
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

pub fn fixed_time() -> DateTime<Utc> {
    FIXED_TIMESTAMP.parse().expect("fixed timestamp must parse")
}

pub fn test_params() -> MockParams {
    MockParams {
        tenant: "acme".to_string(),
        auth_token: "test-token".to_string(),
        ..MockParams::default()
    }
}

pub fn params_for(mock_url: &str) -> MockParams {
    MockParams {
        mock_url: mock_url.to_string(),
        ..test_params()
    }
}

pub fn test_workspace(name: &str) -> Workspace {
    let meta = Metadata::tenant_scoped(ResourceKind::Workspace, &test_params(), name)
        .expect("workspace is tenant-scoped");
    Resource::new(meta, WorkspaceSpec::default())
}

pub fn test_instance(workspace: &str, name: &str) -> Instance {
    let meta = Metadata::workspace_scoped(ResourceKind::Instance, &test_params(), workspace, name)
        .expect("instance is workspace-scoped");
    Resource::new(
        meta,
        InstanceSpec {
            profile: "seca.s".to_string(),
            zone: Some("a".to_string()),
            boot_volume: None,
        },
    )
}

pub fn test_storage(workspace: &str, name: &str) -> BlockStorage {
    let meta =
        Metadata::workspace_scoped(ResourceKind::BlockStorage, &test_params(), workspace, name)
            .expect("block storage is workspace-scoped");
    Resource::new(
        meta,
        BlockStorageSpec {
            size_gb: 10,
            storage_class: None,
        },
    )
}

pub fn test_network(workspace: &str, name: &str) -> Network {
    let meta = Metadata::workspace_scoped(ResourceKind::Network, &test_params(), workspace, name)
        .expect("network is workspace-scoped");
    Resource::new(
        meta,
        NetworkSpec {
            cidr: "10.0.0.0/16".to_string(),
        },
    )
}
