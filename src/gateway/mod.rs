//! Remote storage gateway contract
//!
//! The convergence engine never talks to the cloud directly; it goes
//! through this capability trait. Production hosts back it with their
//! storage SDK client, tests back it with an in-memory fake. Account and
//! resource-group resolution may be cached underneath, so callers
//! re-resolve on every operation and tolerate stale answers.

pub mod models;

use async_trait::async_trait;
use thiserror::Error;

pub use models::{
    AccountHandle, LeaseDuration, LeaseState, LeaseStatus, RemoteContainer, RemoteContainerState,
};

use crate::validate::AccessType;

/// Failure classification for gateway calls
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Retryable failure (eventual-consistency lag, throttling)
    #[error("transient: {0}")]
    Transient(String),

    /// Non-retryable failure, surfaced immediately
    #[error("{0}")]
    Fatal(String),
}

impl GatewayError {
    pub fn transient<S: Into<String>>(msg: S) -> Self {
        Self::Transient(msg.into())
    }

    pub fn fatal<S: Into<String>>(msg: S) -> Self {
        Self::Fatal(msg.into())
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Result type for gateway calls
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Capability interface over the remote storage service
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Resolve a storage account within a resource group. `None` means
    /// the account does not exist; that is an answer, not an error.
    async fn resolve_account(
        &self,
        resource_group: &str,
        account_name: &str,
    ) -> GatewayResult<Option<AccountHandle>>;

    /// Locate the resource group owning an account, or `None` if it
    /// cannot be found.
    async fn resolve_resource_group(&self, account_name: &str) -> GatewayResult<Option<String>>;

    /// Create the container unless it already exists. Success when the
    /// container was already present.
    async fn create_if_not_exists(
        &self,
        account: &AccountHandle,
        container_name: &str,
    ) -> GatewayResult<()>;

    /// Apply the public-access policy to an existing container.
    async fn set_access_policy(
        &self,
        account: &AccountHandle,
        container_name: &str,
        access: AccessType,
    ) -> GatewayResult<()>;

    /// List containers whose names start with `prefix`. The service only
    /// supports prefix filtering; exact lookup is the caller's job.
    async fn list_containers(
        &self,
        account: &AccountHandle,
        prefix: &str,
    ) -> GatewayResult<Vec<RemoteContainer>>;

    /// Whether the named container exists in the account.
    async fn exists(&self, account: &AccountHandle, container_name: &str) -> GatewayResult<bool>;

    /// Delete the container if present; absence is success.
    async fn delete_if_exists(
        &self,
        account: &AccountHandle,
        container_name: &str,
    ) -> GatewayResult<()>;
}
