//! Projection of remote container metadata into host-visible attributes

use std::collections::HashMap;

use crate::gateway::RemoteContainerState;

/// Computed attribute map exposed back to the host
pub type OutputAttributes = HashMap<String, String>;

/// Flatten a remote snapshot into the declared output attributes.
///
/// Pure field selection; absent values pass through as empty strings.
pub fn project(state: &RemoteContainerState) -> OutputAttributes {
    let mut output = HashMap::new();
    output.insert(
        "last_modified".to_string(),
        state
            .last_modified
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
    );
    output.insert(
        "lease_status".to_string(),
        state.lease_status.as_str().to_string(),
    );
    output.insert(
        "lease_state".to_string(),
        state.lease_state.as_str().to_string(),
    );
    output.insert(
        "lease_duration".to_string(),
        state
            .lease_duration
            .map(|d| d.as_str().to_string())
            .unwrap_or_default(),
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{LeaseDuration, LeaseState, LeaseStatus};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_project_populated_state() {
        let state = RemoteContainerState {
            last_modified: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()),
            lease_status: LeaseStatus::Locked,
            lease_state: LeaseState::Leased,
            lease_duration: Some(LeaseDuration::Infinite),
        };
        let output = project(&state);
        assert_eq!(output["last_modified"], "2024-05-01T12:30:00+00:00");
        assert_eq!(output["lease_status"], "locked");
        assert_eq!(output["lease_state"], "leased");
        assert_eq!(output["lease_duration"], "infinite");
    }

    #[test]
    fn test_project_absent_values_pass_through() {
        let output = project(&RemoteContainerState::default());
        assert_eq!(output["last_modified"], "");
        assert_eq!(output["lease_status"], "unlocked");
        assert_eq!(output["lease_state"], "available");
        assert_eq!(output["lease_duration"], "");
    }

    #[test]
    fn test_project_exposes_exactly_declared_keys() {
        let output = project(&RemoteContainerState::default());
        let mut keys: Vec<_> = output.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["last_modified", "lease_duration", "lease_state", "lease_status"]
        );
    }
}
