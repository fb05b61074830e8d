// # Memory Domain Store
//
// In-memory implementation of DomainStore.
//
// ## Purpose
//
// Provides a simple, fast catalog that doesn't persist across restarts.
// Useful for testing, embedding, and deployments that bridge the real
// relational store through their own DomainStore implementation.
//
// ## Crash Behavior
//
// All state is lost on restart/crash; there is no recovery. Production
// deployments should use FileDomainStore or a database-backed bridge.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Error;
use crate::domain::{Domain, Owner};
use crate::traits::DomainStore;

/// Two-table in-memory catalog
#[derive(Debug, Default)]
struct Tables {
    domains: HashMap<String, Domain>,
    owners: HashMap<String, Owner>,
}

/// In-memory domain store implementation
///
/// All state lives in HashMaps protected by an RwLock; clones share the
/// same underlying tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryDomainStore {
    inner: Arc<RwLock<Tables>>,
}

impl MemoryDomainStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of domains in the store
    pub async fn domain_count(&self) -> usize {
        self.inner.read().await.domains.len()
    }

    /// Check if the store holds no domains
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.domains.is_empty()
    }

    /// Clear all domains and owners
    pub async fn clear(&self) {
        let mut guard = self.inner.write().await;
        guard.domains.clear();
        guard.owners.clear();
    }
}

#[async_trait]
impl DomainStore for MemoryDomainStore {
    async fn get_domain(&self, name: &str) -> Result<Option<Domain>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.domains.get(name).cloned())
    }

    async fn save_domain(&self, domain: &Domain) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.domains.insert(domain.name.clone(), domain.clone());
        Ok(())
    }

    async fn delete_domain(&self, name: &str) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.domains.remove(name);
        Ok(())
    }

    async fn domains_for_owner(&self, owner_id: &str) -> Result<Vec<Domain>, Error> {
        let guard = self.inner.read().await;
        let mut domains: Vec<Domain> = guard
            .domains
            .values()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect();
        domains.sort_by(|a, b| a.created.cmp(&b.created));
        Ok(domains)
    }

    async fn get_owner(&self, owner_id: &str) -> Result<Option<Owner>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.owners.get(owner_id).cloned())
    }

    async fn save_owner(&self, owner: &Owner) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.owners.insert(owner.id.clone(), owner.clone());
        Ok(())
    }

    async fn flush(&self) -> Result<(), Error> {
        // No-op for the memory store
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_basic() {
        let store = MemoryDomainStore::new();

        assert!(store.is_empty().await);

        let domain = Domain::new("foo.example.org", "owner-1");
        store.save_domain(&domain).await.unwrap();

        assert_eq!(store.domain_count().await, 1);
        let retrieved = store.get_domain("foo.example.org").await.unwrap();
        assert_eq!(retrieved.unwrap().owner_id, "owner-1");

        store.delete_domain("foo.example.org").await.unwrap();
        assert!(store.is_empty().await);

        // Deleting again is not an error
        store.delete_domain("foo.example.org").await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_store_owner_roundtrip() {
        let store = MemoryDomainStore::new();

        let mut owner = Owner::new("owner-1", "user@example.org");
        owner.suspended = true;
        store.save_owner(&owner).await.unwrap();

        let retrieved = store.get_owner("owner-1").await.unwrap().unwrap();
        assert!(retrieved.suspended);
        assert_eq!(retrieved.email, "user@example.org");
    }

    #[tokio::test]
    async fn test_domains_for_owner_filters() {
        let store = MemoryDomainStore::new();

        store
            .save_domain(&Domain::new("a.example.org", "owner-1"))
            .await
            .unwrap();
        store
            .save_domain(&Domain::new("b.example.org", "owner-1"))
            .await
            .unwrap();
        store
            .save_domain(&Domain::new("c.example.org", "owner-2"))
            .await
            .unwrap();

        let owned = store.domains_for_owner("owner-1").await.unwrap();
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|d| d.owner_id == "owner-1"));
    }
}
