//! Test doubles and common utilities for sync contract tests
//!
//! This module provides a recording zone client that tracks every remote
//! call the engine and the lifecycle hooks issue, plus failure injection
//! for the retry-on-next-save paths.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use zonesync_core::config::SyncConfig;
use zonesync_core::error::Result;
use zonesync_core::traits::{RecordType, ZoneClient};
use zonesync_core::{Error, MemoryDomainStore};

/// One recorded remote operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneCall {
    ZoneExists {
        zone: String,
    },
    CreateZone {
        zone: String,
    },
    DeleteZone {
        zone: String,
    },
    SetAddressRecords {
        zone: String,
        ipv4: String,
        ipv6: String,
    },
    SetRecordSet {
        zone: String,
        record: String,
        rtype: RecordType,
        value: String,
    },
}

impl ZoneCall {
    /// Whether this call mutates remote state
    pub fn is_write(&self) -> bool {
        !matches!(self, ZoneCall::ZoneExists { .. })
    }
}

/// A ZoneClient that records every call and simulates zone existence
///
/// Clones share the same call log and zone set, so tests can keep a handle
/// while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingZoneClient {
    calls: Arc<std::sync::Mutex<Vec<ZoneCall>>>,
    zones: Arc<std::sync::Mutex<HashSet<String>>>,
    fail_address_writes: Arc<AtomicBool>,
    fail_zone_deletes: Arc<AtomicBool>,
}

impl RecordingZoneClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded calls, in order
    pub fn calls(&self) -> Vec<ZoneCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded calls that mutate remote state, in order
    pub fn write_calls(&self) -> Vec<ZoneCall> {
        self.calls().into_iter().filter(ZoneCall::is_write).collect()
    }

    /// Number of address-record writes recorded for a zone
    pub fn address_write_count(&self, zone: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ZoneCall::SetAddressRecords { zone: z, .. } if z == zone))
            .count()
    }

    /// The last address-record write recorded for a zone, as (ipv4, ipv6)
    pub fn last_address_write(&self, zone: &str) -> Option<(String, String)> {
        self.calls().into_iter().rev().find_map(|c| match c {
            ZoneCall::SetAddressRecords {
                zone: z,
                ipv4,
                ipv6,
            } if z == zone => Some((ipv4, ipv6)),
            _ => None,
        })
    }

    /// Whether the simulated server currently holds the zone
    pub fn has_zone(&self, zone: &str) -> bool {
        self.zones.lock().unwrap().contains(zone)
    }

    /// Make subsequent set_address_records calls fail
    pub fn fail_address_writes(&self, fail: bool) {
        self.fail_address_writes.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent delete_zone calls fail
    pub fn fail_zone_deletes(&self, fail: bool) {
        self.fail_zone_deletes.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: ZoneCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ZoneClient for RecordingZoneClient {
    async fn zone_exists(&self, name: &str) -> Result<bool> {
        self.record(ZoneCall::ZoneExists {
            zone: name.to_string(),
        });
        Ok(self.has_zone(name))
    }

    async fn create_zone(&self, name: &str) -> Result<()> {
        self.record(ZoneCall::CreateZone {
            zone: name.to_string(),
        });
        // Idempotent: creating an existing zone is success
        self.zones.lock().unwrap().insert(name.to_string());
        Ok(())
    }

    async fn delete_zone(&self, name: &str) -> Result<()> {
        self.record(ZoneCall::DeleteZone {
            zone: name.to_string(),
        });
        if self.fail_zone_deletes.load(Ordering::SeqCst) {
            return Err(Error::zone_client("injected zone delete failure"));
        }
        // Idempotent: deleting a missing zone is success
        self.zones.lock().unwrap().remove(name);
        Ok(())
    }

    async fn set_address_records(&self, name: &str, ipv4: &str, ipv6: &str) -> Result<()> {
        self.record(ZoneCall::SetAddressRecords {
            zone: name.to_string(),
            ipv4: ipv4.to_string(),
            ipv6: ipv6.to_string(),
        });
        if self.fail_address_writes.load(Ordering::SeqCst) {
            return Err(Error::zone_client("injected address write failure"));
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
        self.record(ZoneCall::SetRecordSet {
            zone: zone.to_string(),
            record: record_name.to_string(),
            rtype: record_type,
            value: value.to_string(),
        });
        Ok(())
    }
}

/// Helper to create a SyncConfig for testing
pub fn sync_config(parent_zone: Option<&str>) -> SyncConfig {
    SyncConfig {
        parent_zone: parent_zone.map(String::from),
        event_channel_capacity: 100,
    }
}

/// Helper to create the shared client/store pair used by most tests
pub fn client_and_store() -> (Arc<RecordingZoneClient>, Arc<MemoryDomainStore>) {
    (
        Arc::new(RecordingZoneClient::new()),
        Arc::new(MemoryDomainStore::new()),
    )
}
