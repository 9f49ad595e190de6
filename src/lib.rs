//! stratoform - storage container reconciliation core
//!
//! Convergence engine for a provisioning tool that reconciles declared
//! Azure storage containers against the live service: durable identity
//! encoding, pre-flight validation, retrying creation, drift detection,
//! and legacy state migration. The remote service is reached through the
//! [`gateway::StorageGateway`] capability trait supplied by the host.

pub mod engine;
pub mod environment;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod state;
pub mod utils;
pub mod validate;

// Re-export commonly used types
pub use engine::{ContainerConfig, OutputAttributes, ReconcileOutcome, Reconciler};
pub use environment::Environment;
pub use error::{Result, StratoformError};
pub use gateway::{GatewayError, StorageGateway};
pub use identity::ContainerIdentity;
pub use validate::AccessType;
