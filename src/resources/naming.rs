// Copyright (c) 2025 - Cowboy AI, Inc.
//! Random scenario and resource names
//!
//! Scenario names key independent state machines on the mock server, and
//! resource names become URL path segments. Both are randomized so
//! scenarios configured against a shared server never collide on either.

use rand::Rng;
use uuid::Uuid;

const NAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const NAME_SUFFIX_LEN: usize = 8;

/// A unique scenario name with a readable prefix
pub fn scenario_name(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::now_v7().simple())
}

/// A DNS-safe resource name with a random suffix
pub fn resource_name(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..NAME_SUFFIX_LEN)
        .map(|_| NAME_CHARSET[rng.gen_range(0..NAME_CHARSET.len())] as char)
        .collect();
    format!("{}-{}", prefix, suffix)
}
