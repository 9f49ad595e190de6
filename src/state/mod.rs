//! Tracked-state schema and legacy migration
//!
//! The host persists one record per tracked container. Schema v0 stored
//! the bare container name as the id; v1 stores the canonical URI
//! identity. Migration is one-way.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::environment::Environment;
use crate::error::{Result, StratoformError};
use crate::identity::ContainerIdentity;

/// Current tracked-state schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Persisted record for one tracked container, as the host stores it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedState {
    pub schema_version: u32,
    pub id: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

/// Bring a persisted record up to the current schema version.
pub fn migrate_state(state: TrackedState, environment: &Environment) -> Result<TrackedState> {
    match state.schema_version {
        0 => {
            info!("found storage container state v0, migrating to v1");
            migrate_v0_to_v1(state, environment)
        }
        SCHEMA_VERSION => Ok(state),
        version => Err(StratoformError::migration(format!(
            "unexpected schema version {version} in storage container state"
        ))),
    }
}

/// v0 kept the container name as the id; rebuild the URI identity from
/// the recorded storage account name.
fn migrate_v0_to_v1(mut state: TrackedState, environment: &Environment) -> Result<TrackedState> {
    let account_name = state.attributes.get("storage_account_name").ok_or_else(|| {
        StratoformError::migration(
            "v0 state is missing `storage_account_name`, cannot rebuild identity".to_string(),
        )
    })?;

    let identity = ContainerIdentity::new(account_name.as_str(), state.id.as_str());
    let id = identity.encode(environment);
    info!(old_id = %state.id, new_id = %id, "rewrote container identity");

    state.attributes.insert("id".to_string(), id.clone());
    state.id = id;
    state.schema_version = 1;
    Ok(state)
}
