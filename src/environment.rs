//! Resolved cloud environment inputs
//!
//! The host resolves which cloud it is talking to (public, sovereign,
//! emulator) before the reconciliation core runs; the core only needs
//! the storage endpoint suffix for identity encoding.

use serde::{Deserialize, Serialize};

/// Endpoint configuration injected by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub storage_endpoint_suffix: String,
}

impl Environment {
    pub fn new<S: Into<String>>(storage_endpoint_suffix: S) -> Self {
        Self {
            storage_endpoint_suffix: storage_endpoint_suffix.into(),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        // Azure public cloud
        Self {
            storage_endpoint_suffix: "core.windows.net".to_string(),
        }
    }
}
