// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Domain Model
//!
//! Generic resource shape shared by every kind the conformance suite
//! drives: common `Metadata`, a kind-specific `Spec` payload, a label
//! map, and a `Status` block with lifecycle state plus transition
//! history. Stub response bodies are these values serialized to JSON
//! with `metadata.verb` stamped to the HTTP verb being stubbed.

pub mod kinds;
pub mod naming;
pub mod state;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::MockParams;
use crate::errors::{MockError, MockResult};
use crate::stub::HttpMethod;

pub use kinds::{KindScope, ResourceKind};
pub use state::{ResourceState, Status, StatusCondition};

/// API version every resource URL is rooted under
pub const API_VERSION: &str = "v1";

/// Common metadata block, mirrored into every stub response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub name: String,

    pub provider: String,

    pub api_version: String,

    /// HTTP verb of the operation this response fakes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verb: Option<HttpMethod>,

    pub kind: ResourceKind,

    pub tenant: String,

    /// Owning workspace, for workspace- and network-scoped kinds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,

    /// Owning network, for network-scoped kinds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    pub region: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub resource_version: u64,
}

impl Metadata {
    /// Metadata for a tenant-rooted kind (workspace, role, role assignment)
    pub fn tenant_scoped(
        kind: ResourceKind,
        params: &MockParams,
        name: impl Into<String>,
    ) -> MockResult<Self> {
        if kind.scope() != KindScope::Tenant {
            return Err(MockError::Build(format!(
                "kind {} is not tenant-scoped",
                kind
            )));
        }
        Ok(Self::bare(kind, params, name.into(), None, None))
    }

    /// Metadata for a workspace-scoped kind (instance, network, ...)
    pub fn workspace_scoped(
        kind: ResourceKind,
        params: &MockParams,
        workspace: impl Into<String>,
        name: impl Into<String>,
    ) -> MockResult<Self> {
        if kind.scope() != KindScope::Workspace {
            return Err(MockError::Build(format!(
                "kind {} is not workspace-scoped",
                kind
            )));
        }
        Ok(Self::bare(
            kind,
            params,
            name.into(),
            Some(workspace.into()),
            None,
        ))
    }

    /// Metadata for a network-scoped kind (route table, subnet)
    pub fn network_scoped(
        kind: ResourceKind,
        params: &MockParams,
        workspace: impl Into<String>,
        network: impl Into<String>,
        name: impl Into<String>,
    ) -> MockResult<Self> {
        if kind.scope() != KindScope::Network {
            return Err(MockError::Build(format!(
                "kind {} is not network-scoped",
                kind
            )));
        }
        Ok(Self::bare(
            kind,
            params,
            name.into(),
            Some(workspace.into()),
            Some(network.into()),
        ))
    }

    fn bare(
        kind: ResourceKind,
        params: &MockParams,
        name: String,
        workspace: Option<String>,
        network: Option<String>,
    ) -> Self {
        Self {
            name,
            provider: kind.provider().to_string(),
            api_version: API_VERSION.to_string(),
            verb: None,
            kind,
            tenant: params.tenant.clone(),
            workspace,
            network,
            region: params.region.clone(),
            created_at: None,
            last_modified_at: None,
            resource_version: 0,
        }
    }

    /// URL path of the collection this resource belongs to
    pub fn collection_path(&self) -> MockResult<String> {
        let root = format!(
            "/providers/{}/{}/tenants/{}",
            self.provider, self.api_version, self.tenant
        );
        let path = match self.kind.scope() {
            KindScope::Tenant => format!("{}/{}", root, self.kind.segment()),
            KindScope::Workspace => {
                let ws = self.require_workspace()?;
                format!("{}/workspaces/{}/{}", root, ws, self.kind.segment())
            }
            KindScope::Network => {
                let ws = self.require_workspace()?;
                let net = self.network.as_deref().ok_or_else(|| {
                    MockError::Build(format!("kind {} requires a network reference", self.kind))
                })?;
                format!(
                    "{}/workspaces/{}/networks/{}/{}",
                    root,
                    ws,
                    net,
                    self.kind.segment()
                )
            }
        };
        Ok(path)
    }

    /// URL path of this resource
    pub fn resource_path(&self) -> MockResult<String> {
        Ok(format!("{}/{}", self.collection_path()?, self.name))
    }

    fn require_workspace(&self) -> MockResult<&str> {
        self.workspace.as_deref().ok_or_else(|| {
            MockError::Build(format!("kind {} requires a workspace reference", self.kind))
        })
    }
}

/// A resource of kind-specific spec type `S`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<S> {
    pub metadata: Metadata,

    pub spec: S,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,

    pub status: Status,
}

impl<S> Resource<S> {
    /// Wrap a spec in a fresh resource: no labels, status `Pending`
    pub fn new(metadata: Metadata, spec: S) -> Self {
        Self {
            metadata,
            spec,
            labels: HashMap::new(),
            status: Status::new(),
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn has_label(&self, key: &str, value: &str) -> bool {
        self.labels.get(key).map(String::as_str) == Some(value)
    }
}

/// Collection response body for list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceList<S> {
    pub items: Vec<Resource<S>>,
}
