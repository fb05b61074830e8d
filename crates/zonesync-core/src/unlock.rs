//! Account unlock workflow
//!
//! While an owner is suspended, every remote write for its domains is
//! suppressed, so local state silently drifts from the remote zones. Lifting
//! the suspension therefore forces an unconditional resync of every owned
//! domain; the dirty flag cannot be trusted after a suppression window.
//!
//! Ordering matters: the suspension is cleared in memory first (the resync
//! path deliberately bypasses the write-path suppression gate anyway), the
//! domains are resynced one by one, and the cleared owner is persisted
//! *last*. A failure mid-loop leaves the suspension durable, so the unlock
//! is simply run again; each domain resync is independently idempotent.

use std::sync::Arc;
use tracing::info;

use crate::domain::Owner;
use crate::engine::SyncEngine;
use crate::error::Result;
use crate::traits::DomainStore;

/// Workflow reactivating a suspended account
pub struct UnlockWorkflow {
    engine: Arc<SyncEngine>,
    store: Arc<dyn DomainStore>,
}

impl UnlockWorkflow {
    /// Create the unlock workflow
    pub fn new(engine: Arc<SyncEngine>, store: Arc<dyn DomainStore>) -> Self {
        Self { engine, store }
    }

    /// Lift the owner's suspension and resync every owned domain
    pub async fn unlock(&self, owner: &mut Owner) -> Result<()> {
        owner.suspended = false;

        let domains = self.store.domains_for_owner(&owner.id).await?;
        info!(
            "unlocking owner {}: resyncing {} domain(s)",
            owner.id,
            domains.len()
        );

        for mut domain in domains {
            self.engine.resync(&mut domain).await?;
        }

        self.store.save_owner(owner).await?;
        Ok(())
    }
}
