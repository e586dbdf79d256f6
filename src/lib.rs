// Copyright (c) 2025 - Cowboy AI, Inc.
//! Scenario-driven stub engine for cloud API conformance tests
//!
//! This crate turns an ordered script of expected REST interactions
//! (create, read, update, action, delete against provider resources)
//! into scenario-state-threaded stub rules on a WireMock-compatible
//! mock server, so a conformance suite can run against a fully faked
//! provider backend.

pub mod admin;
pub mod bulk;
pub mod config;
pub mod configurators;
pub mod errors;
pub mod resources;
pub mod scenarios;
pub mod sequence;
pub mod stub;
pub mod validate;

// Re-export commonly used types
pub use admin::{MockServerClient, StubBackend};
pub use config::{MockParams, RetryParams};
pub use errors::{MockError, MockResult};
pub use resources::{Metadata, Resource, ResourceKind, ResourceList, ResourceState, Status};
pub use sequence::{ScenarioScript, SequenceCursor, StubConfigurator};
pub use stub::{HttpMethod, StubMapping};
