//! Core traits for the zone synchronization system
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`ZoneClient`]: Issue zone-level operations against the authoritative DNS server
//! - [`DomainStore`]: Local persistence boundary for domains and owners

pub mod zone_client;
pub mod domain_store;

pub use zone_client::{ZoneClient, RecordType};
pub use domain_store::DomainStore;
