// # zonesync-core
//
// Core library for the managed-DNS zone synchronization system.
//
// ## Architecture Overview
//
// This library keeps a local catalog of managed domains (each with an
// authoritative IPv4/IPv6 target) converged with an authoritative DNS
// server's zone data:
//
// - **Domain / Owner**: entities; address setters carry the dirty-state
//   tracker deciding whether a save needs a remote write at all
// - **ZoneClient**: trait for zone-level operations against the
//   authoritative server
// - **DomainStore**: trait for the local persistence boundary
// - **SyncEngine**: the sync decision state machine (when to write, what to
//   write, in which order)
// - **DomainLifecycle**: explicit create/update/delete hooks, including the
//   delete cascade for parent-zone delegation records
// - **UnlockWorkflow**: forced resync of all domains of a reactivated account
//
// ## Design Principles
//
// 1. **Local commit first**: local persistence is the source of truth and
//    always commits before remote state is touched
// 2. **Explicit hooks**: remote I/O is never hidden inside a generic
//    persistence interface; every failure point is a visible call site
// 3. **Minimal remote traffic**: the dirty flag gates record writes so
//    metadata-only saves cost nothing
// 4. **Failure leaves retry state**: a failed remote write propagates with
//    the dirty flag still set; the next save retries

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod store;
pub mod traits;
pub mod unlock;

// Re-export core types for convenience
pub use config::{StoreConfig, SyncConfig};
pub use domain::{Domain, Owner};
pub use engine::{SyncEngine, SyncEvent};
pub use error::{Error, Result};
pub use lifecycle::DomainLifecycle;
pub use store::{FileDomainStore, MemoryDomainStore};
pub use traits::{DomainStore, RecordType, ZoneClient};
pub use unlock::UnlockWorkflow;
