// # Zone Client Trait
//
// Defines the interface against the authoritative DNS server.
//
// ## Implementations
//
// - PowerDNS HTTP API: `zonesync-client-powerdns` crate
// - Future: other authoritative servers with zone-level APIs
//
// ## Contract
//
// The sync engine owns all decisions about *when* to call these operations;
// implementations execute exactly one remote operation per call and report
// the outcome. In particular:
//
// - No retry or backoff logic (owned by the callers' retry-on-next-save policy)
// - No caching of zone state (the engine consults the local store)
// - Expected races are absorbed: creating a zone that already exists and
//   deleting a zone that is already gone both succeed
//
// Any returned error means "the remote write did not complete"; the engine
// leaves the domain dirty so a later save retries.

use async_trait::async_trait;

/// DNS record-set types this system touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// IPv4 address record
    A,
    /// IPv6 address record
    Aaaa,
    /// Delegation signer record (parent-zone glue)
    Ds,
    /// Nameserver record (parent-zone glue)
    Ns,
}

impl RecordType {
    /// Wire name of the record type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Ds => "DS",
            RecordType::Ns => "NS",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for authoritative zone server clients
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait ZoneClient: Send + Sync {
    /// Check whether a zone exists on the remote server
    ///
    /// Never mutates remote state; used as a precondition check before
    /// zone creation.
    async fn zone_exists(&self, name: &str) -> Result<bool, crate::Error>;

    /// Create a zone on the remote server
    ///
    /// Idempotent: a zone that already exists is reported as success, not
    /// as an error.
    async fn create_zone(&self, name: &str) -> Result<(), crate::Error>;

    /// Delete a zone from the remote server
    ///
    /// Idempotent: a zone that is already gone is reported as success.
    async fn delete_zone(&self, name: &str) -> Result<(), crate::Error>;

    /// Replace the zone's apex A and AAAA record sets in one logical operation
    ///
    /// An empty string for either address removes that record set.
    async fn set_address_records(
        &self,
        name: &str,
        ipv4: &str,
        ipv6: &str,
    ) -> Result<(), crate::Error>;

    /// Write an arbitrary record set inside a zone
    ///
    /// Used for parent-zone delegation cleanup. An empty `value` deletes
    /// the record set.
    async fn set_record_set(
        &self,
        zone: &str,
        record_name: &str,
        record_type: RecordType,
        value: &str,
    ) -> Result<(), crate::Error>;
}
