//! Durable container identity
//!
//! A container's persisted identifier is the canonical blob URI
//! `https://{account}.{endpoint_suffix}/{container}`. This module
//! round-trips that string to and from its structured form; the string
//! shape is load-bearing because previously created resources were
//! tracked under it.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::environment::Environment;
use crate::error::{Result, StratoformError};

/// Structured identity of a tracked storage container
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerIdentity {
    pub account_name: String,
    pub container_name: String,
}

impl ContainerIdentity {
    pub fn new<S: Into<String>>(account_name: S, container_name: S) -> Self {
        Self {
            account_name: account_name.into(),
            container_name: container_name.into(),
        }
    }

    /// Render the canonical URI form of this identity.
    pub fn encode(&self, environment: &Environment) -> String {
        format!(
            "https://{}.{}/{}",
            self.account_name, environment.storage_endpoint_suffix, self.container_name
        )
    }

    /// Parse a persisted identity string back into its components.
    ///
    /// The account name is the URI host with the first `.{suffix}`
    /// occurrence removed; the container name is the first path segment.
    pub fn decode(input: &str, environment: &Environment) -> Result<Self> {
        let uri = Url::parse(input).map_err(|e| {
            StratoformError::malformed_identity(format!("error parsing \"{input}\" as URI: {e}"))
        })?;

        let host = uri.host_str().ok_or_else(|| {
            StratoformError::malformed_identity(format!("identity \"{input}\" has no host"))
        })?;

        let suffix = format!(".{}", environment.storage_endpoint_suffix);
        let account_name = host.replacen(&suffix, "", 1);

        let container_name = uri
            .path()
            .trim_start_matches('/')
            .split('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| {
                StratoformError::malformed_identity(format!(
                    "identity \"{input}\" has no container path segment"
                ))
            })?;

        Ok(Self {
            account_name,
            container_name: container_name.to_string(),
        })
    }
}

impl std::fmt::Display for ContainerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.account_name, self.container_name)
    }
}
