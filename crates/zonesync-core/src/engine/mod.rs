//! Core sync decision engine
//!
//! The SyncEngine decides whether a save needs a remote write at all and
//! issues the required calls in dependency order, keeping the local domain
//! catalog and the authoritative server converged while minimizing remote
//! traffic.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐  create/update  ┌──────────────┐
//! │ DomainLifecycle │────────────────▶│              │
//! └─────────────────┘                 │  SyncEngine  │
//! ┌─────────────────┐  unlock resync  │              │
//! │ UnlockWorkflow  │────────────────▶│              │
//! └─────────────────┘                 └──────────────┘
//!                                            │
//!            ┌───────────────────────────────┼───────────────────────┐
//!            ▼                               ▼                       ▼
//!    ┌─────────────┐                 ┌──────────────┐         ┌─────────────┐
//!    │ DomainStore │                 │  ZoneClient  │         │   Events    │
//!    │ (re-read)   │                 │  (write)     │         │  (notify)   │
//!    └─────────────┘                 └──────────────┘         └─────────────┘
//! ```
//!
//! ## Decision rules
//!
//! 1. A suspended owner suppresses every remote write; the dirty flag is
//!    left set so the change is picked up after unlock.
//! 2. Zone creation always precedes any record write (writing records into
//!    a zone that does not exist fails upstream).
//! 3. A record write only happens when the domain is dirty; metadata-only
//!    saves are free.
//! 4. The dirty flag is cleared only after the remote accepted the write;
//!    any failure propagates with the flag still set, so the next save
//!    retries.
//!
//! Re-syncing is relatively expensive and should not happen routinely; the
//! dirty flag exists purely to avoid redundant remote calls.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::domain::{Domain, Owner};
use crate::error::Result;
use crate::traits::{DomainStore, ZoneClient};

/// Events emitted by the SyncEngine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A zone was created on the remote server
    ZoneCreated {
        zone: String,
    },

    /// The zone's address record sets were replaced
    RecordsPushed {
        zone: String,
        ipv4: String,
        ipv6: String,
    },

    /// A save needed no remote write (not dirty)
    SyncSkipped {
        zone: String,
    },

    /// A remote write was deferred because the owner is suspended
    SyncSuppressed {
        zone: String,
        owner: String,
    },

    /// A zone was deleted from the remote server
    ZoneDeleted {
        zone: String,
    },

    /// Delegation record sets for a subdomain were removed from the parent zone
    DelegationRemoved {
        zone: String,
        parent: String,
    },
}

/// Core sync decision engine
///
/// The engine is invoked by the lifecycle hooks on every domain save and by
/// the unlock workflow for unconditional resyncs. It spawns no tasks of its
/// own and is safe to invoke concurrently for different domains; syncs for
/// the *same* zone name are serialized internally.
pub struct SyncEngine {
    /// Client against the authoritative server
    client: Arc<dyn ZoneClient>,

    /// Local catalog, consulted at write time for the freshest committed values
    store: Arc<dyn DomainStore>,

    /// Per-zone-name locks serializing the check-decide-write-clear sequence.
    /// Entries are never removed; the map is bounded by the number of zones
    /// this process has synced.
    locks: std::sync::Mutex<HashMap<String, Arc<Mutex<()>>>>,

    /// Event sender for external monitoring
    event_tx: mpsc::Sender<SyncEvent>,
}

impl SyncEngine {
    /// Create a new sync engine
    ///
    /// # Returns
    ///
    /// A tuple of (engine, event_receiver) where event_receiver yields sync
    /// events for monitoring/logging.
    pub fn new(
        client: Arc<dyn ZoneClient>,
        store: Arc<dyn DomainStore>,
        config: SyncConfig,
    ) -> Result<(Self, mpsc::Receiver<SyncEvent>)> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(config.event_channel_capacity);

        let engine = Self {
            client,
            store,
            locks: std::sync::Mutex::new(HashMap::new()),
            event_tx: tx,
        };

        Ok((engine, rx))
    }

    /// Unconditionally push the domain's current state to the remote server
    ///
    /// Used by the account-unlock workflow and by any caller that cannot
    /// trust the dirty flag. Creates the zone if it is missing, then always
    /// replaces the address record sets. Carries no suspension logic; the
    /// caller already filters by account state.
    pub async fn resync(&self, domain: &mut Domain) -> Result<()> {
        let lock = self.zone_lock(&domain.name);
        let _guard = lock.lock().await;

        if !self.client.zone_exists(&domain.name).await? {
            self.client.create_zone(&domain.name).await?;
            info!("created missing zone {}", domain.name);
            self.emit_event(SyncEvent::ZoneCreated {
                zone: domain.name.clone(),
            });
        }

        self.client
            .set_address_records(&domain.name, domain.address_v4(), domain.address_v6())
            .await?;
        self.emit_event(SyncEvent::RecordsPushed {
            zone: domain.name.clone(),
            ipv4: domain.address_v4().to_string(),
            ipv6: domain.address_v6().to_string(),
        });

        domain.set_dirty(false);
        Ok(())
    }

    /// Sync a domain after its creation or update was persisted locally
    ///
    /// Callers must have committed the triggering change to the store before
    /// invoking this; the engine pushes the *committed* values, not unsaved
    /// field state.
    ///
    /// # Parameters
    ///
    /// - `domain`: The saved domain instance carrying the dirty flag
    /// - `owner`: The owning account, used for the suspension gate
    /// - `newly_created`: True when this save created the domain
    pub async fn sync_on_write(
        &self,
        domain: &mut Domain,
        owner: &Owner,
        newly_created: bool,
    ) -> Result<()> {
        if owner.suspended {
            // Suspend all updates; the dirty flag stays set so the change is
            // queued for the unlock resync.
            debug!(
                "owner {} is suspended, deferring sync for {}",
                owner.id, domain.name
            );
            self.emit_event(SyncEvent::SyncSuppressed {
                zone: domain.name.clone(),
                owner: owner.id.clone(),
            });
            return Ok(());
        }

        let lock = self.zone_lock(&domain.name);
        let _guard = lock.lock().await;

        // If this zone is new, create it and derive the dirty flag from
        // whether there is anything to write at all.
        if newly_created {
            self.client.create_zone(&domain.name).await?;
            info!("created zone {}", domain.name);
            self.emit_event(SyncEvent::ZoneCreated {
                zone: domain.name.clone(),
            });
            domain.set_dirty(domain.has_addresses());
        }

        if domain.is_dirty() {
            // Re-read the committed record: if a later update already landed
            // in the store, its values win over this instance's snapshot.
            match self.store.get_domain(&domain.name).await? {
                Some(committed) => {
                    self.client
                        .set_address_records(
                            &domain.name,
                            committed.address_v4(),
                            committed.address_v6(),
                        )
                        .await?;
                    self.emit_event(SyncEvent::RecordsPushed {
                        zone: domain.name.clone(),
                        ipv4: committed.address_v4().to_string(),
                        ipv6: committed.address_v6().to_string(),
                    });
                }
                None => {
                    // Row deleted between commit and sync; the delete cascade
                    // owns zone removal.
                    debug!("domain {} removed before sync, skipping write", domain.name);
                }
            }
        } else if !newly_created {
            debug!("domain {} not dirty, skipping remote write", domain.name);
            self.emit_event(SyncEvent::SyncSkipped {
                zone: domain.name.clone(),
            });
        }

        domain.set_dirty(false);
        Ok(())
    }

    /// Get or create the lock guarding a zone name
    fn zone_lock(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Emit a sync event
    pub(crate) fn emit_event(&self, event: SyncEvent) {
        // Send event, logging a warning if the channel is full (backpressure).
        // Dropping events bounds memory when nobody drains the receiver.
        if self.event_tx.try_send(event).is_err() {
            warn!("sync event channel full, dropping event");
        }
    }
}
