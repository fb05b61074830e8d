//! Minimal embedding example for zonesync-core
//!
//! This example demonstrates using zonesync-core as a library in a custom
//! application: an in-memory zone client stands in for the authoritative
//! server, and one domain is walked through creation, updates, suspension,
//! unlock and deletion.

use std::sync::Arc;
use std::sync::Mutex;

use zonesync_core::traits::{DomainStore, RecordType, ZoneClient};
use zonesync_core::{
    Domain, DomainLifecycle, MemoryDomainStore, Owner, Result, SyncConfig, SyncEngine,
    UnlockWorkflow,
};

/// In-memory zone server used instead of a real PowerDNS
#[derive(Default)]
struct InMemoryZoneServer {
    zones: Mutex<std::collections::HashMap<String, (String, String)>>,
    log: Mutex<Vec<String>>,
}

impl InMemoryZoneServer {
    fn dump(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ZoneClient for InMemoryZoneServer {
    async fn zone_exists(&self, name: &str) -> Result<bool> {
        Ok(self.zones.lock().unwrap().contains_key(name))
    }

    async fn create_zone(&self, name: &str) -> Result<()> {
        self.log.lock().unwrap().push(format!("create-zone {}", name));
        self.zones
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_default();
        Ok(())
    }

    async fn delete_zone(&self, name: &str) -> Result<()> {
        self.log.lock().unwrap().push(format!("delete-zone {}", name));
        self.zones.lock().unwrap().remove(name);
        Ok(())
    }

    async fn set_address_records(&self, name: &str, ipv4: &str, ipv6: &str) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("set-addresses {} A={:?} AAAA={:?}", name, ipv4, ipv6));
        if let Some(zone) = self.zones.lock().unwrap().get_mut(name) {
            *zone = (ipv4.to_string(), ipv6.to_string());
        }
        Ok(())
    }

    async fn set_record_set(
        &self,
        zone: &str,
        record_name: &str,
        record_type: RecordType,
        value: &str,
    ) -> Result<()> {
        self.log.lock().unwrap().push(format!(
            "set-record-set {} {} {} value={:?}",
            zone, record_name, record_type, value
        ));
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let server = Arc::new(InMemoryZoneServer::default());
    let store = Arc::new(MemoryDomainStore::new());

    let config = SyncConfig::new().with_parent_zone("dyn.example.org");
    let (engine, mut events) = SyncEngine::new(server.clone(), store.clone(), config)?;
    let engine = Arc::new(engine);

    let lifecycle = DomainLifecycle::new(
        engine.clone(),
        server.clone(),
        store.clone(),
        Some("dyn.example.org".to_string()),
    );
    let unlock = UnlockWorkflow::new(engine, store.clone());

    let mut owner = Owner::new("owner-1", "user@example.org");
    store.save_owner(&owner).await?;

    // Create a managed subdomain with an IPv4 target
    let mut domain = Domain::new("home.dyn.example.org", "owner-1");
    domain.set_address_v4("203.0.113.7");
    lifecycle.create(&mut domain, &owner).await?;

    // A save without address changes costs nothing
    domain.set_address_v4("203.0.113.7");
    lifecycle.update(&mut domain, &owner).await?;

    // Suspend the owner; this update is deferred
    owner.suspended = true;
    domain.set_address_v4("203.0.113.99");
    lifecycle.update(&mut domain, &owner).await?;

    // Unlock forces the queued value out
    unlock.unlock(&mut owner).await?;

    // Deleting the subdomain also removes its delegation glue
    lifecycle.delete(&domain).await?;

    println!("remote operations, in order:");
    for line in server.dump() {
        println!("  {}", line);
    }

    println!("sync events:");
    while let Ok(event) = events.try_recv() {
        println!("  {:?}", event);
    }

    Ok(())
}
