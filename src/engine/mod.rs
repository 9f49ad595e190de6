//! Convergence engine for storage containers
//!
//! Orchestrates Create/Read/Exists/Delete against the storage gateway:
//! validates declared input before any remote call, retries eventually
//! consistent creation under a deadline, and reports external drift
//! (container or parent gone) as a removal instead of an error.
//!
//! The engine holds no per-resource state; identity and configuration
//! are passed into every call, so the host may reconcile different
//! containers concurrently over one engine.

pub mod projector;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use projector::{project, OutputAttributes};

use crate::environment::Environment;
use crate::error::{Result, StratoformError};
use crate::gateway::{AccountHandle, StorageGateway};
use crate::identity::ContainerIdentity;
use crate::utils::retry::{retry_until, RetryOptions, CREATE_TIMEOUT};
use crate::validate::{check_container_name, AccessType};

/// Declared configuration for a single container.
///
/// Every field forces replacement: a change means destroy and recreate,
/// never in-place update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConfig {
    pub name: String,
    pub resource_group_name: String,
    pub storage_account_name: String,
    #[serde(default)]
    pub container_access_type: AccessType,
}

impl ContainerConfig {
    /// Validate the declared fields; runs before any remote call.
    pub fn validate(&self) -> Result<()> {
        check_container_name(&self.name)
    }

    /// Whether converging from `self` to `desired` requires destroying
    /// and recreating the container.
    pub fn requires_replacement(&self, desired: &ContainerConfig) -> bool {
        self != desired
    }
}

/// Result of a reconcile operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The remote container exists under the tracked identity
    InSync {
        identity: ContainerIdentity,
        properties: OutputAttributes,
    },
    /// The tracked resource (or a required parent) no longer exists
    /// remotely; the caller should drop it from tracked state
    Removed,
}

impl ReconcileOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed)
    }
}

/// Reconciles declared container configuration against the remote
/// service through an injected [`StorageGateway`].
pub struct Reconciler<G> {
    gateway: G,
    environment: Environment,
    retry: RetryOptions,
}

impl<G: StorageGateway> Reconciler<G> {
    pub fn new(gateway: G, environment: Environment) -> Self {
        Self {
            gateway,
            environment,
            retry: RetryOptions::default(),
        }
    }

    pub fn with_retry_options(mut self, retry: RetryOptions) -> Self {
        self.retry = retry;
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Create the declared container and converge its access policy.
    ///
    /// Safe to call again for the same name: the gateway treats an
    /// already existing container as created, and the policy is
    /// reapplied. Finishes with a fresh read so the outcome carries
    /// current remote properties.
    pub async fn create(&self, config: &ContainerConfig) -> Result<ReconcileOutcome> {
        config.validate()?;

        let account = self
            .gateway
            .resolve_account(&config.resource_group_name, &config.storage_account_name)
            .await?
            .ok_or_else(|| {
                StratoformError::dependency_missing(
                    "storage account",
                    config.storage_account_name.as_str(),
                )
            })?;

        info!(
            container = %config.name,
            account = %config.storage_account_name,
            "creating storage container"
        );

        retry_until(
            || self.gateway.create_if_not_exists(&account, &config.name),
            CREATE_TIMEOUT,
            self.retry.clone(),
        )
        .await
        .map_err(|e| {
            StratoformError::create_failed(
                config.name.as_str(),
                config.storage_account_name.as_str(),
                e,
            )
        })?;

        // The container exists but may be misconfigured if this fails;
        // surfaced as fatal rather than retried, since a rejected policy
        // call would fail the same way every time.
        self.gateway
            .set_access_policy(&account, &config.name, config.container_access_type)
            .await
            .map_err(|e| {
                StratoformError::policy_apply_failed(
                    config.name.as_str(),
                    config.storage_account_name.as_str(),
                    e.to_string().as_str(),
                )
            })?;

        let identity = ContainerIdentity::new(
            config.storage_account_name.as_str(),
            config.name.as_str(),
        );
        self.read(&identity.encode(&self.environment)).await
    }

    /// Refresh the tracked container from the remote service.
    ///
    /// A missing resource group, account, or container is drift, not an
    /// error: the outcome is [`ReconcileOutcome::Removed`] and the
    /// caller clears its tracked state.
    pub async fn read(&self, id: &str) -> Result<ReconcileOutcome> {
        let identity = ContainerIdentity::decode(id, &self.environment)?;

        let Some(account) = self.resolve_tracked_account(&identity).await? else {
            return Ok(ReconcileOutcome::Removed);
        };

        let containers = self
            .gateway
            .list_containers(&account, &identity.container_name)
            .await
            .map_err(|e| {
                StratoformError::gateway(format!(
                    "failed to retrieve storage containers in account \"{}\": {e}",
                    identity.account_name
                ))
            })?;

        // The listing is prefix-filtered and may include siblings such as
        // "logs-archive" when looking for "logs"; only an exact name
        // match counts.
        let Some(container) = containers
            .into_iter()
            .find(|c| c.name == identity.container_name)
        else {
            info!(
                container = %identity.container_name,
                account = %identity.account_name,
                "storage container no longer exists, removing from state"
            );
            return Ok(ReconcileOutcome::Removed);
        };

        Ok(ReconcileOutcome::InSync {
            properties: project(&container.state),
            identity,
        })
    }

    /// Probe whether the tracked container still exists.
    ///
    /// Unlike [`Reconciler::read`], a missing parent yields `false`
    /// without signalling removal; this is a non-destructive check and
    /// state clearing stays with the full reconcile path.
    pub async fn exists(&self, id: &str) -> Result<bool> {
        let identity = ContainerIdentity::decode(id, &self.environment)?;

        let Some(account) = self.resolve_tracked_account(&identity).await? else {
            return Ok(false);
        };

        debug!(
            container = %identity.container_name,
            account = %identity.account_name,
            "checking existence of storage container"
        );

        self.gateway
            .exists(&account, &identity.container_name)
            .await
            .map_err(|e| {
                StratoformError::gateway(format!(
                    "error querying existence of storage container \"{}\" in storage account \"{}\": {e}",
                    identity.container_name, identity.account_name
                ))
            })
    }

    /// Delete the tracked container. Idempotent: a container or parent
    /// that is already gone counts as deleted.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let identity = ContainerIdentity::decode(id, &self.environment)?;

        let Some(account) = self.resolve_tracked_account(&identity).await? else {
            info!(
                account = %identity.account_name,
                "storage account doesn't exist so the container won't exist"
            );
            return Ok(());
        };

        info!(
            container = %identity.container_name,
            account = %identity.account_name,
            "deleting storage container"
        );

        self.gateway
            .delete_if_exists(&account, &identity.container_name)
            .await
            .map_err(|e| {
                StratoformError::gateway(format!(
                    "error deleting storage container \"{}\" from storage account \"{}\": {e}",
                    identity.container_name, identity.account_name
                ))
            })
    }

    /// Re-resolve the resource group and account for a tracked identity.
    ///
    /// Resolution runs on every call; the gateway may cache underneath
    /// and accounts can disappear between calls. `None` means a parent
    /// is gone.
    async fn resolve_tracked_account(
        &self,
        identity: &ContainerIdentity,
    ) -> Result<Option<AccountHandle>> {
        let Some(resource_group) = self
            .gateway
            .resolve_resource_group(&identity.account_name)
            .await?
        else {
            info!(
                account = %identity.account_name,
                "cannot locate resource group for storage account, presuming it's gone"
            );
            return Ok(None);
        };

        let Some(account) = self
            .gateway
            .resolve_account(&resource_group, &identity.account_name)
            .await?
        else {
            debug!(
                account = %identity.account_name,
                "storage account not found"
            );
            return Ok(None);
        };

        Ok(Some(account))
    }
}
