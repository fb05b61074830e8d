//! Sync Contract Test: End-to-End Domain Lifetime
//!
//! Walks one domain through its whole life (creation with an address,
//! a no-op save, an address change, a suppressed update under suspension,
//! the unlock resync, and finally deletion with delegation cleanup),
//! asserting the exact remote traffic at every step.

mod common;

use common::*;
use std::sync::Arc;
use tokio_test::assert_ok;
use zonesync_core::traits::DomainStore;
use zonesync_core::{Domain, DomainLifecycle, Owner, SyncEngine, SyncEvent, UnlockWorkflow};

const PARENT: &str = "managed.example";

#[tokio::test]
async fn full_domain_lifetime() {
    let (client, store) = client_and_store();
    let (engine, mut events) =
        SyncEngine::new(client.clone(), store.clone(), sync_config(Some(PARENT)))
            .expect("engine builds");
    let engine = Arc::new(engine);
    let lifecycle = DomainLifecycle::new(
        engine.clone(),
        client.clone(),
        store.clone(),
        Some(PARENT.to_string()),
    );
    let unlock = UnlockWorkflow::new(engine, store.clone());

    let mut owner = Owner::new("owner-1", "user@example.org");
    store.save_owner(&owner).await.unwrap();

    // Create with IPv4: zone create plus exactly one address write
    let mut domain = Domain::new("d.managed.example", "owner-1");
    domain.set_address_v4("1.2.3.4");
    assert_ok!(lifecycle.create(&mut domain, &owner).await);

    assert!(client.has_zone("d.managed.example"));
    assert_eq!(client.address_write_count("d.managed.example"), 1);
    assert_eq!(
        client.last_address_write("d.managed.example"),
        Some(("1.2.3.4".to_string(), String::new()))
    );

    // Save with the same value: no further remote calls
    domain.set_address_v4("1.2.3.4");
    assert_ok!(lifecycle.update(&mut domain, &owner).await);
    assert_eq!(client.address_write_count("d.managed.example"), 1);

    // Save with a new value: exactly one more address write
    domain.set_address_v4("5.6.7.8");
    assert_ok!(lifecycle.update(&mut domain, &owner).await);
    assert_eq!(client.address_write_count("d.managed.example"), 2);
    assert_eq!(
        client.last_address_write("d.managed.example"),
        Some(("5.6.7.8".to_string(), String::new()))
    );

    // Suspend the owner; the next update is suppressed entirely
    owner.suspended = true;
    store.save_owner(&owner).await.unwrap();

    domain.set_address_v4("9.9.9.9");
    assert_ok!(lifecycle.update(&mut domain, &owner).await);
    assert_eq!(client.address_write_count("d.managed.example"), 2);
    assert!(domain.is_dirty());

    // Unlock: one unconditional resync carrying the suppressed value
    assert_ok!(unlock.unlock(&mut owner).await);
    assert_eq!(client.address_write_count("d.managed.example"), 3);
    assert_eq!(
        client.last_address_write("d.managed.example"),
        Some(("9.9.9.9".to_string(), String::new()))
    );
    assert!(!store.get_owner("owner-1").await.unwrap().unwrap().suspended);

    // Delete: zone removal plus delegation cleanup in the parent zone
    let stored = store
        .get_domain("d.managed.example")
        .await
        .unwrap()
        .expect("domain still in catalog");
    assert_ok!(lifecycle.delete(&stored).await);

    assert!(!client.has_zone("d.managed.example"));
    assert!(store.get_domain("d.managed.example").await.unwrap().is_none());

    let delegation_deletes = client
        .calls()
        .iter()
        .filter(|c| matches!(c, ZoneCall::SetRecordSet { zone, value, .. }
            if zone == PARENT && value.is_empty()))
        .count();
    assert_eq!(delegation_deletes, 2, "DS and NS glue must be removed");

    // The event stream saw the whole story in order for this zone
    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert!(seen.contains(&SyncEvent::ZoneCreated {
        zone: "d.managed.example".to_string()
    }));
    assert!(seen.contains(&SyncEvent::SyncSuppressed {
        zone: "d.managed.example".to_string(),
        owner: "owner-1".to_string()
    }));
    assert!(seen.contains(&SyncEvent::ZoneDeleted {
        zone: "d.managed.example".to_string()
    }));
    assert!(seen.contains(&SyncEvent::DelegationRemoved {
        zone: "d.managed.example".to_string(),
        parent: PARENT.to_string()
    }));
}
