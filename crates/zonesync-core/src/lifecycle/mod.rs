//! Domain lifecycle hooks
//!
//! Explicit create/update/delete entry points for the service layer. Each
//! hook persists the triggering change locally first and only then talks to
//! the remote server, so a crash between the two leaves local state (the
//! source of truth) committed. Remote I/O is never hidden inside a generic
//! persistence interface; every failure point is visible here.
//!
//! ## Delete cascade
//!
//! Deleting a domain removes its remote zone and, when the name is a
//! subdomain of the configured managed parent zone, the DS and NS delegation
//! record sets for that name inside the parent zone. Delegation glue must
//! not outlive the child zone, or the parent keeps pointing at an
//! authoritative server that no longer exists.
//!
//! Remote failures after the local delete committed are propagated to the
//! caller, never swallowed: the orphaned remote zone is a known
//! reconciliation gap and the caller owns the retry strategy.

use std::sync::Arc;
use tracing::info;

use crate::domain::{self, Domain, Owner};
use crate::engine::{SyncEngine, SyncEvent};
use crate::error::Result;
use crate::traits::{DomainStore, RecordType, ZoneClient};

/// Lifecycle hooks wiring domain mutations to the sync engine
pub struct DomainLifecycle {
    engine: Arc<SyncEngine>,
    client: Arc<dyn ZoneClient>,
    store: Arc<dyn DomainStore>,

    /// Managed parent zone for delegation cleanup; `None` disables the cascade
    parent_zone: Option<String>,
}

impl DomainLifecycle {
    /// Create the lifecycle hooks
    ///
    /// `parent_zone` is the configured zone under which managed subdomains
    /// are delegated (e.g. `"dyn.example.org"`).
    pub fn new(
        engine: Arc<SyncEngine>,
        client: Arc<dyn ZoneClient>,
        store: Arc<dyn DomainStore>,
        parent_zone: Option<String>,
    ) -> Self {
        Self {
            engine,
            client,
            store,
            parent_zone,
        }
    }

    /// Handle creation of a domain
    ///
    /// Validates the zone name, persists the record, then lets the engine
    /// create the zone and push initial records if any address is set.
    pub async fn create(&self, domain: &mut Domain, owner: &Owner) -> Result<()> {
        domain::validate_zone_name(&domain.name)?;

        self.store.save_domain(domain).await?;
        info!("domain {} created for owner {}", domain.name, owner.id);

        self.engine.sync_on_write(domain, owner, true).await
    }

    /// Handle an update to a domain
    ///
    /// Stamps the update time, persists the record, then lets the engine
    /// decide whether a remote write is needed.
    pub async fn update(&self, domain: &mut Domain, owner: &Owner) -> Result<()> {
        domain.touch();
        self.store.save_domain(domain).await?;

        self.engine.sync_on_write(domain, owner, false).await
    }

    /// Handle deletion of a domain
    ///
    /// The local record is removed first; the remote zone and any delegation
    /// glue in the parent zone are removed afterwards. A missing remote zone
    /// is tolerated by the client, but genuine remote failures propagate.
    pub async fn delete(&self, domain: &Domain) -> Result<()> {
        self.store.delete_domain(&domain.name).await?;
        info!("domain {} deleted locally", domain.name);

        self.client.delete_zone(&domain.name).await?;
        self.engine.emit_event(SyncEvent::ZoneDeleted {
            zone: domain.name.clone(),
        });

        if let Some(parent) = self.delegation_parent(&domain.name) {
            self.client
                .set_record_set(&parent, &domain.name, RecordType::Ds, "")
                .await?;
            self.client
                .set_record_set(&parent, &domain.name, RecordType::Ns, "")
                .await?;
            info!("removed delegation for {} from {}", domain.name, parent);
            self.engine.emit_event(SyncEvent::DelegationRemoved {
                zone: domain.name.clone(),
                parent,
            });
        }

        Ok(())
    }

    /// The parent zone holding delegation glue for `name`, if any
    fn delegation_parent(&self, name: &str) -> Option<String> {
        let parent = self.parent_zone.as_deref()?;
        if name.len() > parent.len() + 1 && name.ends_with(parent) {
            let prefix = &name[..name.len() - parent.len()];
            if prefix.ends_with('.') {
                return Some(parent.to_string());
            }
        }
        None
    }
}
