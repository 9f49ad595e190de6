//! Data models for the storage gateway
//!
//! Remote snapshots are recomputed on every read and never cached
//! across reconcile calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Routing handle for a resolved storage account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountHandle {
    pub resource_group: String,
    pub account_name: String,
}

impl AccountHandle {
    pub fn new<S: Into<String>>(resource_group: S, account_name: S) -> Self {
        Self {
            resource_group: resource_group.into(),
            account_name: account_name.into(),
        }
    }
}

/// Lease status of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaseStatus {
    Locked,
    #[default]
    Unlocked,
}

impl LeaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
        }
    }
}

/// Lease state of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaseState {
    #[default]
    Available,
    Leased,
    Expired,
    Breaking,
    Broken,
}

impl LeaseState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Leased => "leased",
            Self::Expired => "expired",
            Self::Breaking => "breaking",
            Self::Broken => "broken",
        }
    }
}

/// Duration class of an active lease; unset when the container holds no
/// lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaseDuration {
    Infinite,
    Fixed,
}

impl LeaseDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Infinite => "infinite",
            Self::Fixed => "fixed",
        }
    }
}

/// Point-in-time snapshot of a remote container's metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteContainerState {
    pub last_modified: Option<DateTime<Utc>>,
    pub lease_status: LeaseStatus,
    pub lease_state: LeaseState,
    pub lease_duration: Option<LeaseDuration>,
}

/// Listing entry: a container's name plus its metadata snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteContainer {
    pub name: String,
    pub state: RemoteContainerState,
}

impl RemoteContainer {
    pub fn new<S: Into<String>>(name: S, state: RemoteContainerState) -> Self {
        Self {
            name: name.into(),
            state,
        }
    }
}
