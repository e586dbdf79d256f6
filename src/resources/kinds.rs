// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Kind Taxonomy
//!
//! The twelve resource kinds the conformance suite drives, their API
//! family (provider), their URL scoping, and the kind-specific spec
//! payloads. Scoping determines how a resource URL is rooted:
//!
//! - Tenant scope: `/providers/<p>/v1/tenants/<t>/<segment>/<name>`
//! - Workspace scope: `.../tenants/<t>/workspaces/<ws>/<segment>/<name>`
//! - Network scope: `.../workspaces/<ws>/networks/<net>/<segment>/<name>`

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Resource;

/// Resource kind, as stamped into metadata and response bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Workspace,
    Instance,
    Network,
    BlockStorage,
    Image,
    RouteTable,
    Subnet,
    Nic,
    PublicIp,
    SecurityGroup,
    Role,
    RoleAssignment,
}

/// URL scoping of a resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindScope {
    /// Rooted directly under the tenant
    Tenant,
    /// Nested under a workspace
    Workspace,
    /// Nested under a network (which is itself workspace-scoped)
    Network,
}

impl ResourceKind {
    /// API family serving this kind
    pub fn provider(self) -> &'static str {
        use ResourceKind::*;
        match self {
            Workspace => "seca.workspace",
            Instance => "seca.compute",
            Network | RouteTable | Subnet | Nic | PublicIp | SecurityGroup => "seca.network",
            BlockStorage | Image => "seca.storage",
            Role | RoleAssignment => "seca.authorization",
        }
    }

    /// Collection path segment for this kind
    pub fn segment(self) -> &'static str {
        use ResourceKind::*;
        match self {
            Workspace => "workspaces",
            Instance => "instances",
            Network => "networks",
            BlockStorage => "block-storages",
            Image => "images",
            RouteTable => "route-tables",
            Subnet => "subnets",
            Nic => "nics",
            PublicIp => "public-ips",
            SecurityGroup => "security-groups",
            Role => "roles",
            RoleAssignment => "role-assignments",
        }
    }

    /// Where in the URL hierarchy this kind lives
    pub fn scope(self) -> KindScope {
        use ResourceKind::*;
        match self {
            Workspace | Role | RoleAssignment => KindScope::Tenant,
            Instance | Network | BlockStorage | Image | Nic | PublicIp | SecurityGroup => {
                KindScope::Workspace
            }
            RouteTable | Subnet => KindScope::Network,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segment())
    }
}

// Kind-specific spec payloads. Specs are caller-supplied and copied
// verbatim into stub response bodies; the engine never interprets them.

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSpec {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSpec {
    /// Machine size profile, e.g. "seca.s"
    pub profile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot_volume: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub cidr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStorageSpec {
    pub size_gb: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub destination: String,
    pub next_hop: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTableSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetSpec {
    pub cidr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicSpec {
    pub subnet: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicIpSpec {
    /// IP version, 4 or 6
    pub version: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRule {
    pub direction: String,
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_range: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroupSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<SecurityRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub provider: String,
    pub resources: Vec<String>,
    pub verbs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignmentSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<String>,
}

pub type Workspace = Resource<WorkspaceSpec>;
pub type Instance = Resource<InstanceSpec>;
pub type Network = Resource<NetworkSpec>;
pub type BlockStorage = Resource<BlockStorageSpec>;
pub type Image = Resource<ImageSpec>;
pub type RouteTable = Resource<RouteTableSpec>;
pub type Subnet = Resource<SubnetSpec>;
pub type Nic = Resource<NicSpec>;
pub type PublicIp = Resource<PublicIpSpec>;
pub type SecurityGroup = Resource<SecurityGroupSpec>;
pub type Role = Resource<RoleSpec>;
pub type RoleAssignment = Resource<RoleAssignmentSpec>;
