//! Sync Contract Test: Suspension Suppression & Unlock Resync
//!
//! Verifies the account-level write gate:
//! - While an owner is suspended, any number of domain saves produce zero
//!   remote calls
//! - Unlocking forces exactly one address-record write per owned domain,
//!   regardless of prior dirty state
//! - A failed unlock leaves the suspension persisted so it can be re-run
//!
//! If this test fails, suspended accounts leak remote writes or unlocked
//! accounts stay divergent.

mod common;

use common::*;
use std::sync::Arc;
use zonesync_core::traits::DomainStore;
use zonesync_core::{Domain, DomainLifecycle, Owner, SyncEngine, UnlockWorkflow};

fn harness() -> (
    Arc<RecordingZoneClient>,
    Arc<zonesync_core::MemoryDomainStore>,
    DomainLifecycle,
    UnlockWorkflow,
) {
    let (client, store) = client_and_store();
    let (engine, _events) =
        SyncEngine::new(client.clone(), store.clone(), sync_config(None)).expect("engine builds");
    let engine = Arc::new(engine);
    let lifecycle = DomainLifecycle::new(engine.clone(), client.clone(), store.clone(), None);
    let unlock = UnlockWorkflow::new(engine, store.clone());
    (client, store, lifecycle, unlock)
}

#[tokio::test]
async fn suspended_owner_suppresses_all_remote_calls() {
    let (client, store, lifecycle, _unlock) = harness();

    let mut owner = Owner::new("owner-1", "user@example.org");
    owner.suspended = true;
    store.save_owner(&owner).await.unwrap();

    // Creation while suspended: not even the zone is created yet
    let mut domain = Domain::new("held.example.org", "owner-1");
    domain.set_address_v4("1.2.3.4");
    lifecycle.create(&mut domain, &owner).await.unwrap();

    // Any number of further saves stay silent as well
    domain.set_address_v4("5.6.7.8");
    lifecycle.update(&mut domain, &owner).await.unwrap();
    domain.set_address_v6("2001:db8::1");
    lifecycle.update(&mut domain, &owner).await.unwrap();

    assert!(
        client.calls().is_empty(),
        "a suspended owner must produce zero remote calls, got {:?}",
        client.calls()
    );
    assert!(
        domain.is_dirty(),
        "suppressed updates stay queued via the dirty flag"
    );
}

#[tokio::test]
async fn unlock_resyncs_every_owned_domain_exactly_once() {
    let (client, store, lifecycle, unlock) = harness();

    let mut owner = Owner::new("owner-1", "user@example.org");
    owner.suspended = true;
    store.save_owner(&owner).await.unwrap();

    // Two domains created while suspended: one with addresses, one without
    let mut first = Domain::new("first.example.org", "owner-1");
    first.set_address_v4("9.9.9.9");
    lifecycle.create(&mut first, &owner).await.unwrap();

    let mut second = Domain::new("second.example.org", "owner-1");
    lifecycle.create(&mut second, &owner).await.unwrap();

    // A domain of a different owner must not be touched by the unlock
    let other_owner = Owner::new("owner-2", "other@example.org");
    store.save_owner(&other_owner).await.unwrap();
    let mut foreign = Domain::new("foreign.example.org", "owner-2");
    lifecycle.create(&mut foreign, &other_owner).await.unwrap();

    assert_eq!(client.address_write_count("first.example.org"), 0);

    unlock.unlock(&mut owner).await.unwrap();

    // Exactly one unconditional address write per owned domain,
    // dirty or not
    assert_eq!(client.address_write_count("first.example.org"), 1);
    assert_eq!(client.address_write_count("second.example.org"), 1);
    assert_eq!(client.address_write_count("foreign.example.org"), 0);

    assert_eq!(
        client.last_address_write("first.example.org"),
        Some(("9.9.9.9".to_string(), String::new()))
    );

    // The missing zones were created before the record writes
    assert!(client.has_zone("first.example.org"));
    assert!(client.has_zone("second.example.org"));

    // The cleared suspension was persisted last
    let stored = store.get_owner("owner-1").await.unwrap().unwrap();
    assert!(!stored.suspended);
}

#[tokio::test]
async fn failed_unlock_keeps_suspension_persisted_and_is_retryable() {
    let (client, store, lifecycle, unlock) = harness();

    let mut owner = Owner::new("owner-1", "user@example.org");
    owner.suspended = true;
    store.save_owner(&owner).await.unwrap();

    let mut domain = Domain::new("flaky.example.org", "owner-1");
    domain.set_address_v4("1.2.3.4");
    lifecycle.create(&mut domain, &owner).await.unwrap();

    client.fail_address_writes(true);
    let mut unlocking = store.get_owner("owner-1").await.unwrap().unwrap();
    assert!(unlock.unlock(&mut unlocking).await.is_err());

    // The owner record still carries the suspension, so the workflow can
    // simply be run again
    let stored = store.get_owner("owner-1").await.unwrap().unwrap();
    assert!(stored.suspended);

    client.fail_address_writes(false);
    let mut unlocking = store.get_owner("owner-1").await.unwrap().unwrap();
    unlock.unlock(&mut unlocking).await.unwrap();

    let stored = store.get_owner("owner-1").await.unwrap().unwrap();
    assert!(!stored.suspended);
    assert_eq!(
        client.last_address_write("flaky.example.org"),
        Some(("1.2.3.4".to_string(), String::new()))
    );
}
