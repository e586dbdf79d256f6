// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Lifecycle State
//!
//! The lifecycle states a stubbed resource passes through, with an
//! explicit allowed-transition table. All transitions are pure checks;
//! `Status::transition_to` is the only mutation point and appends exactly
//! one condition per accepted transition, so a configured create/update
//! sequence leaves an auditable trail in the response body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{MockError, MockResult};

/// Lifecycle status value attached to a resource's status block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceState {
    Pending,
    Creating,
    Active,
    Updating,
    Suspended,
    Deleting,
    Error,
}

impl ResourceState {
    /// Whether the backend being faked would accept this transition.
    ///
    /// Same-state transitions are always allowed (repeated GET stubs for
    /// the same expected state).
    pub fn can_transition_to(self, to: ResourceState) -> bool {
        use ResourceState::*;

        if self == to {
            return true;
        }

        matches!(
            (self, to),
            (Pending, Creating)
                | (Pending, Error)
                | (Creating, Active)
                | (Creating, Updating)
                | (Creating, Deleting)
                | (Creating, Error)
                | (Active, Updating)
                | (Active, Suspended)
                | (Active, Deleting)
                | (Active, Error)
                | (Updating, Active)
                | (Updating, Deleting)
                | (Updating, Error)
                | (Suspended, Active)
                | (Suspended, Deleting)
                | (Suspended, Error)
                | (Deleting, Error)
                | (Error, Deleting)
        )
    }
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One recorded state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCondition {
    pub last_transition_at: DateTime<Utc>,
    pub state: ResourceState,
}

/// Resource status block: current state plus transition history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub state: ResourceState,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<StatusCondition>,
}

impl Status {
    /// Fresh status: `Pending`, no conditions recorded yet
    pub fn new() -> Self {
        Self {
            state: ResourceState::Pending,
            conditions: Vec::new(),
        }
    }

    /// Move to a new state, appending one condition.
    ///
    /// Rejects transitions the faked backend would never produce; hitting
    /// this from a configurator means the stub sequence is miswired.
    pub fn transition_to(&mut self, state: ResourceState, at: DateTime<Utc>) -> MockResult<()> {
        if !self.state.can_transition_to(state) {
            return Err(MockError::Build(format!(
                "invalid status transition {} -> {}",
                self.state, state
            )));
        }
        self.state = state;
        self.conditions.push(StatusCondition {
            last_transition_at: at,
            state,
        });
        Ok(())
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ResourceState::Pending, ResourceState::Creating, true; "pending to creating")]
    #[test_case(ResourceState::Creating, ResourceState::Active, true; "creating to active")]
    #[test_case(ResourceState::Active, ResourceState::Updating, true; "active to updating")]
    #[test_case(ResourceState::Updating, ResourceState::Active, true; "updating back to active")]
    #[test_case(ResourceState::Active, ResourceState::Suspended, true; "active to suspended")]
    #[test_case(ResourceState::Suspended, ResourceState::Active, true; "suspended to active")]
    #[test_case(ResourceState::Active, ResourceState::Active, true; "same state idempotent")]
    #[test_case(ResourceState::Pending, ResourceState::Updating, false; "pending cannot update")]
    #[test_case(ResourceState::Deleting, ResourceState::Active, false; "deleting cannot reactivate")]
    #[test_case(ResourceState::Suspended, ResourceState::Updating, false; "suspended cannot update")]
    fn test_transition_table(from: ResourceState, to: ResourceState, allowed: bool) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn test_each_transition_appends_one_condition() {
        let at = Utc::now();
        let mut status = Status::new();
        assert!(status.conditions.is_empty());

        status.transition_to(ResourceState::Creating, at).unwrap();
        assert_eq!(status.state, ResourceState::Creating);
        assert_eq!(status.conditions.len(), 1);

        status.transition_to(ResourceState::Active, at).unwrap();
        assert_eq!(status.conditions.len(), 2);
        assert_eq!(status.conditions[1].state, ResourceState::Active);
    }

    #[test]
    fn test_invalid_transition_leaves_status_untouched() {
        let mut status = Status::new();
        let err = status
            .transition_to(ResourceState::Updating, Utc::now())
            .unwrap_err();
        assert!(err.to_string().contains("Pending -> Updating"));
        assert_eq!(status.state, ResourceState::Pending);
        assert!(status.conditions.is_empty());
    }
}
