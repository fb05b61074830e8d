// # Domain Store Trait
//
// Defines the local persistence boundary for domains and owners.
//
// ## Purpose
//
// The local store is the source of truth for which domains exist and what
// their address targets are. The lifecycle hooks persist every change here
// *before* any remote call is made, so that a crash between local commit and
// remote sync is the only window of divergence. The sync engine additionally
// reads back the committed record at write time so a delayed sync can never
// push stale values.
//
// ## Implementations
//
// - In-memory: `store::MemoryDomainStore` (tests, embedding)
// - File-based: `store::FileDomainStore` (JSON catalog with crash recovery)
// - Deployments typically bridge this trait to their relational store.
//
// All methods must be safe to call concurrently from multiple tasks.

use async_trait::async_trait;

use crate::domain::{Domain, Owner};

/// Trait for domain/owner store implementations
#[async_trait]
pub trait DomainStore: Send + Sync {
    /// Fetch a domain by zone name
    ///
    /// Returns `Ok(None)` if no such domain exists.
    async fn get_domain(&self, name: &str) -> Result<Option<Domain>, crate::Error>;

    /// Create or update a domain record
    async fn save_domain(&self, domain: &Domain) -> Result<(), crate::Error>;

    /// Delete a domain record
    ///
    /// Deleting a domain that does not exist is not an error.
    async fn delete_domain(&self, name: &str) -> Result<(), crate::Error>;

    /// List all domains belonging to an owner
    async fn domains_for_owner(&self, owner_id: &str) -> Result<Vec<Domain>, crate::Error>;

    /// Fetch an owner by id
    async fn get_owner(&self, owner_id: &str) -> Result<Option<Owner>, crate::Error>;

    /// Create or update an owner record
    async fn save_owner(&self, owner: &Owner) -> Result<(), crate::Error>;

    /// Persist any pending changes
    ///
    /// Some implementations may buffer writes. This ensures all changes are
    /// flushed to durable storage.
    async fn flush(&self) -> Result<(), crate::Error>;
}
