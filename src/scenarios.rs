// Copyright (c) 2025 - Cowboy AI, Inc.
//! Scenario Orchestrators
//!
//! One function per logical conformance test case. Each composes the
//! lifecycle and bulk configurators in the exact order the test will
//! exercise the API and returns a chain-validated `ScenarioScript`.
//! The ordering encoded here is the state machine the mock server will
//! enforce: creation runs parent before child, deletion runs in the
//! exact reverse, and every deleted resource is closed out with a
//! get-not-found stub.
//!
//! Cross-resource deletion ordering is not enforced server-side; only
//! same-URL state chains are. The orchestrators are the single place
//! that discipline lives.

use serde::Serialize;
use serde_json::json;

use crate::bulk::{
    configure_bulk_create_stubs, configure_bulk_get_active_stubs, configure_bulk_teardown_stubs,
};
use crate::config::MockParams;
use crate::configurators::{
    configure_create_stub, configure_delete_stub, configure_get_active_stub,
    configure_get_list_stub, configure_get_not_found_stub, configure_get_state_stub,
    configure_instance_operation_stub, configure_update_stub, InstanceOperation,
};
use crate::errors::{MockError, MockResult};
use crate::resources::kinds::{BlockStorage, Instance, Network, RouteTable, Subnet, Workspace};
use crate::resources::{Resource, ResourceState};
use crate::sequence::{ScenarioScript, StubConfigurator};

/// Register the four list variants for one collection endpoint:
/// unfiltered, `limit=1`, label-equality filter, and both combined.
///
/// Filtering happens here, in process; the mock server only
/// discriminates by query matchers. The subsets are: all items, the
/// first item, the label-matching items, and the first label match.
pub fn register_list_variants<S: Serialize + Clone>(
    cfg: &mut StubConfigurator,
    collection_url: &str,
    items: &[Resource<S>],
    label: (&str, &str),
) -> MockResult<()> {
    let (key, value) = label;
    let selector = format!("{}={}", key, value);

    configure_get_list_stub(cfg, collection_url, &[], items)?;
    configure_get_list_stub(cfg, collection_url, &[("limit", "1")], first_of(items))?;

    let filtered: Vec<Resource<S>> = items
        .iter()
        .filter(|r| r.has_label(key, value))
        .cloned()
        .collect();
    configure_get_list_stub(cfg, collection_url, &[("labels", &selector)], &filtered)?;
    configure_get_list_stub(
        cfg,
        collection_url,
        &[("labels", &selector), ("limit", "1")],
        first_of(&filtered),
    )?;
    Ok(())
}

fn first_of<S>(items: &[Resource<S>]) -> &[Resource<S>] {
    &items[..items.len().min(1)]
}

/// Workspace lifecycle: create, get-active, update, get-active, delete,
/// get-not-found
pub fn workspace_lifecycle_script(
    params: &MockParams,
    workspace: &mut Workspace,
) -> MockResult<ScenarioScript> {
    let mut cfg = StubConfigurator::for_params("workspace-lifecycle", params);
    configure_create_stub(&mut cfg, workspace)?;
    configure_get_active_stub(&mut cfg, workspace)?;
    configure_update_stub(&mut cfg, workspace)?;
    configure_get_active_stub(&mut cfg, workspace)?;
    configure_delete_stub(&mut cfg, workspace)?;
    configure_get_not_found_stub(&mut cfg, workspace)?;
    finish(cfg)
}

/// Instance lifecycle including its block storage dependency, the
/// stop/start action round-trip, and the instance list variants.
///
/// Deletion runs in reverse creation order: instance, block storage,
/// workspace.
pub fn instance_lifecycle_script(
    params: &MockParams,
    workspace: &mut Workspace,
    storage: &mut BlockStorage,
    instance: &mut Instance,
    label: (&str, &str),
) -> MockResult<ScenarioScript> {
    let mut cfg = StubConfigurator::for_params("instance-lifecycle", params);

    configure_create_stub(&mut cfg, workspace)?;
    configure_get_active_stub(&mut cfg, workspace)?;
    configure_create_stub(&mut cfg, storage)?;
    configure_get_active_stub(&mut cfg, storage)?;
    configure_create_stub(&mut cfg, instance)?;
    configure_get_active_stub(&mut cfg, instance)?;
    configure_update_stub(&mut cfg, instance)?;
    configure_get_active_stub(&mut cfg, instance)?;

    configure_instance_operation_stub(&mut cfg, instance, InstanceOperation::Stop)?;
    configure_get_state_stub(&mut cfg, instance, ResourceState::Suspended)?;
    configure_instance_operation_stub(&mut cfg, instance, InstanceOperation::Start)?;
    configure_get_state_stub(&mut cfg, instance, ResourceState::Active)?;

    let collection = instance.metadata.collection_path()?;
    register_list_variants(&mut cfg, &collection, std::slice::from_ref(instance), label)?;

    configure_delete_stub(&mut cfg, instance)?;
    configure_get_not_found_stub(&mut cfg, instance)?;
    configure_delete_stub(&mut cfg, storage)?;
    configure_get_not_found_stub(&mut cfg, storage)?;
    configure_delete_stub(&mut cfg, workspace)?;
    configure_get_not_found_stub(&mut cfg, workspace)?;
    finish(cfg)
}

/// Network lifecycle with its network-scoped subresources: workspace,
/// network, route table, subnet up; subnet, route table, network,
/// workspace down.
pub fn network_lifecycle_script(
    params: &MockParams,
    workspace: &mut Workspace,
    network: &mut Network,
    route_table: &mut RouteTable,
    subnet: &mut Subnet,
) -> MockResult<ScenarioScript> {
    let mut cfg = StubConfigurator::for_params("network-lifecycle", params);

    configure_create_stub(&mut cfg, workspace)?;
    configure_get_active_stub(&mut cfg, workspace)?;
    configure_create_stub(&mut cfg, network)?;
    configure_get_active_stub(&mut cfg, network)?;
    configure_create_stub(&mut cfg, route_table)?;
    configure_get_active_stub(&mut cfg, route_table)?;
    configure_create_stub(&mut cfg, subnet)?;
    configure_get_active_stub(&mut cfg, subnet)?;

    configure_update_stub(&mut cfg, network)?;
    configure_get_active_stub(&mut cfg, network)?;

    configure_delete_stub(&mut cfg, subnet)?;
    configure_get_not_found_stub(&mut cfg, subnet)?;
    configure_delete_stub(&mut cfg, route_table)?;
    configure_get_not_found_stub(&mut cfg, route_table)?;
    configure_delete_stub(&mut cfg, network)?;
    configure_get_not_found_stub(&mut cfg, network)?;
    configure_delete_stub(&mut cfg, workspace)?;
    configure_get_not_found_stub(&mut cfg, workspace)?;
    finish(cfg)
}

/// List scenario for one collection: bulk create, bulk get-active, the
/// four list variants, then bulk teardown.
pub fn resource_list_script<S: Serialize + Clone>(
    params: &MockParams,
    scenario_prefix: &str,
    resources: &mut Vec<Resource<S>>,
    label: (&str, &str),
) -> MockResult<ScenarioScript> {
    let first = resources.first().ok_or_else(|| {
        MockError::Build("list scenario requires at least one resource".to_string())
    })?;
    let collection = first.metadata.collection_path()?;

    let mut cfg = StubConfigurator::for_params(scenario_prefix, params);
    configure_bulk_create_stubs(&mut cfg, resources)?;
    configure_bulk_get_active_stubs(&mut cfg, resources)?;
    register_list_variants(&mut cfg, &collection, resources, label)?;
    configure_bulk_teardown_stubs(&mut cfg, resources)?;
    finish(cfg)
}

/// Provider catalog queries: static, unconditional fixtures for the
/// region and zone listings
pub fn provider_catalog_script(params: &MockParams) -> MockResult<ScenarioScript> {
    let mut cfg = StubConfigurator::for_params("provider-catalog", params);

    let regions_url = "/providers/seca.region/v1/regions";
    cfg.configure_get_json(
        regions_url,
        &[],
        &json!({
            "items": [
                { "name": params.region, "zones": ["a", "b", "c"] }
            ]
        }),
    )?;
    cfg.configure_get_json(
        &format!("{}/{}", regions_url, params.region),
        &[],
        &json!({ "name": params.region, "zones": ["a", "b", "c"] }),
    )?;
    finish(cfg)
}

fn finish(cfg: StubConfigurator) -> MockResult<ScenarioScript> {
    let script = cfg.into_script();
    script.validate()?;
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::kinds::{
        BlockStorageSpec, InstanceSpec, NetworkSpec, RouteTableSpec, SubnetSpec, WorkspaceSpec,
    };
    use crate::resources::{Metadata, ResourceKind};
    use crate::stub::HttpMethod;
    use crate::validate::{SimulatedRequest, Simulator};
    use pretty_assertions::assert_eq;

    fn params() -> MockParams {
        MockParams::default()
    }

    fn workspace(name: &str) -> Workspace {
        let meta = Metadata::tenant_scoped(ResourceKind::Workspace, &params(), name).unwrap();
        Resource::new(meta, WorkspaceSpec::default())
    }

    fn instance(ws: &str, name: &str) -> Instance {
        let meta =
            Metadata::workspace_scoped(ResourceKind::Instance, &params(), ws, name).unwrap();
        Resource::new(meta, InstanceSpec::default())
    }

    fn storage(ws: &str, name: &str) -> BlockStorage {
        let meta =
            Metadata::workspace_scoped(ResourceKind::BlockStorage, &params(), ws, name).unwrap();
        Resource::new(
            meta,
            BlockStorageSpec {
                size_gb: 10,
                storage_class: None,
            },
        )
    }

    #[test]
    fn test_workspace_lifecycle_script_validates() {
        let mut ws = workspace("ws-1");
        let script = workspace_lifecycle_script(&params(), &mut ws).unwrap();
        assert_eq!(script.len(), 6);
        assert!(script.scenario().starts_with("workspace-lifecycle-"));
    }

    #[test]
    fn test_instance_lifecycle_deletes_in_reverse_creation_order() {
        let mut ws = workspace("ws-1");
        let mut bs = storage("ws-1", "disk-1");
        let mut vm = instance("ws-1", "vm-1").with_label("env", "conformance");
        let script =
            instance_lifecycle_script(&params(), &mut ws, &mut bs, &mut vm, ("env", "conformance"))
                .unwrap();

        let deletes: Vec<_> = script
            .rules()
            .iter()
            .filter(|r| r.request.method == HttpMethod::Delete)
            .map(|r| r.request.url_path_pattern.clone())
            .collect();
        assert_eq!(deletes.len(), 3);
        assert!(deletes[0].contains("/instances/"));
        assert!(deletes[1].contains("/block-storages/"));
        assert!(deletes[2].ends_with("/workspaces/ws-1"));
    }

    #[test]
    fn test_instance_lifecycle_includes_operations_and_list_variants() {
        let mut ws = workspace("ws-1");
        let mut bs = storage("ws-1", "disk-1");
        let mut vm = instance("ws-1", "vm-1").with_label("env", "conformance");
        let script =
            instance_lifecycle_script(&params(), &mut ws, &mut bs, &mut vm, ("env", "conformance"))
                .unwrap();

        let posts: Vec<_> = script
            .rules()
            .iter()
            .filter(|r| r.request.method == HttpMethod::Post)
            .map(|r| r.request.url_path_pattern.clone())
            .collect();
        assert!(posts[0].ends_with("/stop"));
        assert!(posts[1].ends_with("/start"));

        let list_rules = script
            .rules()
            .iter()
            .filter(|r| !r.is_state_threaded())
            .count();
        assert_eq!(list_rules, 4);
    }

    #[test]
    fn test_network_lifecycle_orders_subresources() {
        let mut ws = workspace("ws-1");
        let net_meta =
            Metadata::workspace_scoped(ResourceKind::Network, &params(), "ws-1", "net-1").unwrap();
        let mut net = Resource::new(
            net_meta,
            NetworkSpec {
                cidr: "10.0.0.0/16".to_string(),
            },
        );
        let rt_meta =
            Metadata::network_scoped(ResourceKind::RouteTable, &params(), "ws-1", "net-1", "rt-1")
                .unwrap();
        let mut rt = Resource::new(rt_meta, RouteTableSpec::default());
        let sn_meta =
            Metadata::network_scoped(ResourceKind::Subnet, &params(), "ws-1", "net-1", "sn-1")
                .unwrap();
        let mut sn = Resource::new(
            sn_meta,
            SubnetSpec {
                cidr: "10.0.1.0/24".to_string(),
                zone: None,
            },
        );

        let script =
            network_lifecycle_script(&params(), &mut ws, &mut net, &mut rt, &mut sn).unwrap();

        let puts: Vec<_> = script
            .rules()
            .iter()
            .filter(|r| r.request.method == HttpMethod::Put)
            .map(|r| r.request.url_path_pattern.clone())
            .collect();
        // Creation order: workspace, network, route table, subnet
        assert!(puts[0].ends_with("/workspaces/ws-1"));
        assert!(puts[1].ends_with("/networks/net-1"));
        assert!(puts[2].ends_with("/route-tables/rt-1"));
        assert!(puts[3].ends_with("/subnets/sn-1"));

        let deletes: Vec<_> = script
            .rules()
            .iter()
            .filter(|r| r.request.method == HttpMethod::Delete)
            .map(|r| r.request.url_path_pattern.clone())
            .collect();
        // Deletion order is the exact reverse
        assert!(deletes[0].ends_with("/subnets/sn-1"));
        assert!(deletes[1].ends_with("/route-tables/rt-1"));
        assert!(deletes[2].ends_with("/networks/net-1"));
        assert!(deletes[3].ends_with("/workspaces/ws-1"));
    }

    #[test]
    fn test_list_script_prefilters_label_subsets() {
        let mut items = vec![
            instance("ws-1", "vm-a").with_label("env", "test"),
            instance("ws-1", "vm-b"),
            instance("ws-1", "vm-c").with_label("env", "test"),
        ];
        let script =
            resource_list_script(&params(), "instance-list", &mut items, ("env", "test")).unwrap();

        let label_rule = script
            .rules()
            .iter()
            .find(|r| {
                !r.is_state_threaded()
                    && r.request.query_parameters.len() == 1
                    && r.request.query_parameters.contains_key("labels")
            })
            .unwrap();
        let body: serde_json::Value =
            serde_json::from_str(label_rule.response.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_list_scenario_items_match_in_any_order() {
        let mut items = vec![
            instance("ws-1", "vm-a").with_label("env", "test"),
            instance("ws-1", "vm-b").with_label("env", "test"),
        ];
        let script =
            resource_list_script(&params(), "instance-list", &mut items, ("env", "test")).unwrap();

        let token = params().auth_token;
        let url_a = items[0].metadata.resource_path().unwrap();
        let url_b = items[1].metadata.resource_path().unwrap();
        let mut sim = Simulator::new(&script);

        let put = |url: &str| SimulatedRequest::put(url).with_bearer_auth(&token);
        let get = |url: &str| SimulatedRequest::get(url).with_bearer_auth(&token);
        let del = |url: &str| SimulatedRequest::delete(url).with_bearer_auth(&token);

        assert_eq!(sim.handle(&put(&url_a)).status, 201);
        assert_eq!(sim.handle(&put(&url_b)).status, 201);

        // Reads in reverse creation order still match: bulk stubs are
        // keyed by URL, not by a shared chain
        assert_eq!(sim.handle(&get(&url_b)).status, 200);
        assert_eq!(sim.handle(&get(&url_a)).status, 200);

        // Teardown in reverse order works the same way
        assert_eq!(sim.handle(&del(&url_b)).status, 202);
        assert_eq!(sim.handle(&get(&url_b)).status, 404);
        assert_eq!(sim.handle(&del(&url_a)).status, 202);
        assert_eq!(sim.handle(&get(&url_a)).status, 404);
    }

    #[test]
    fn test_empty_list_scenario_is_a_build_error() {
        let mut items: Vec<Instance> = Vec::new();
        let err = resource_list_script(&params(), "instance-list", &mut items, ("env", "test"))
            .unwrap_err();
        assert!(matches!(err, MockError::Build(_)));
    }

    #[test]
    fn test_provider_catalog_is_unconditional() {
        let script = provider_catalog_script(&params()).unwrap();
        assert_eq!(script.len(), 2);
        assert!(script.rules().iter().all(|r| !r.is_state_threaded()));
    }
}
