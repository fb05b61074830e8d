// # Domain Store Implementations
//
// This module provides implementations of the DomainStore trait for
// different persistence strategies.

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::traits::DomainStore;

pub mod file;
pub mod memory;

pub use file::FileDomainStore;
pub use memory::MemoryDomainStore;

/// Construct a store from configuration
pub async fn from_config(config: &StoreConfig) -> Result<Arc<dyn DomainStore>> {
    match config {
        StoreConfig::Memory => Ok(Arc::new(MemoryDomainStore::new())),
        StoreConfig::File { path } => Ok(Arc::new(FileDomainStore::new(path).await?)),
    }
}
