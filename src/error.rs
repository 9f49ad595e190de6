use std::time::Duration;
use thiserror::Error;

use crate::gateway::GatewayError;

/// Main error type for stratoform operations
#[derive(Debug, Error)]
pub enum StratoformError {
    #[error("invalid value for `{field}`: {}", .violations.join("; "))]
    Validation {
        field: String,
        violations: Vec<String>,
    },

    #[error("{resource} \"{name}\" not found")]
    DependencyMissing { resource: String, name: String },

    #[error("error creating container \"{container}\" in storage account \"{account}\": {source}")]
    CreateFailed {
        container: String,
        account: String,
        #[source]
        source: Box<StratoformError>,
    },

    #[error("error setting access policy for container \"{container}\" in storage account \"{account}\": {detail}")]
    PolicyApplyFailed {
        container: String,
        account: String,
        detail: String,
    },

    #[error("malformed container identity: {0}")]
    MalformedIdentity(String),

    #[error("storage gateway error: {0}")]
    GatewayFailure(String),

    #[error("operation timed out after {after:?}: {detail}")]
    Timeout { after: Duration, detail: String },

    #[error("state migration failed: {0}")]
    MigrationError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl StratoformError {
    pub fn validation<S: Into<String>>(field: S, violations: Vec<String>) -> Self {
        Self::Validation {
            field: field.into(),
            violations,
        }
    }

    pub fn dependency_missing<S: Into<String>>(resource: S, name: S) -> Self {
        Self::DependencyMissing {
            resource: resource.into(),
            name: name.into(),
        }
    }

    pub fn create_failed<S: Into<String>>(container: S, account: S, source: StratoformError) -> Self {
        Self::CreateFailed {
            container: container.into(),
            account: account.into(),
            source: Box::new(source),
        }
    }

    pub fn policy_apply_failed<S: Into<String>>(container: S, account: S, detail: S) -> Self {
        Self::PolicyApplyFailed {
            container: container.into(),
            account: account.into(),
            detail: detail.into(),
        }
    }

    pub fn malformed_identity<S: Into<String>>(msg: S) -> Self {
        Self::MalformedIdentity(msg.into())
    }

    pub fn gateway<S: Into<String>>(msg: S) -> Self {
        Self::GatewayFailure(msg.into())
    }

    pub fn timeout<S: Into<String>>(after: Duration, detail: S) -> Self {
        Self::Timeout {
            after,
            detail: detail.into(),
        }
    }

    pub fn migration<S: Into<String>>(msg: S) -> Self {
        Self::MigrationError(msg.into())
    }
}

/// Result type alias for stratoform operations
pub type Result<T> = std::result::Result<T, StratoformError>;

/// Convert gateway errors to StratoformError where no extra context is needed
impl From<GatewayError> for StratoformError {
    fn from(error: GatewayError) -> Self {
        Self::GatewayFailure(error.to_string())
    }
}
