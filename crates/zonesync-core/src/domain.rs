// # Domain and Owner entities
//
// A `Domain` is one managed DNS zone: a unique zone name plus the IPv4 and
// IPv6 targets its apex address records should carry. An `Owner` is the
// account a domain belongs to.
//
// ## Dirty tracking
//
// The two address fields are private and only reachable through setter
// methods. A setter compares the incoming value against the currently held
// one *before* overwriting and marks the domain dirty on an actual change.
// No-op writes are free, and mutations of any other field never touch the
// flag.
//
// The dirty flag is ephemeral: it lives for the duration of a
// mutate-then-save sequence, is skipped by serde, and is only cleared by the
// sync engine once the remote zone has received the current values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One managed DNS zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    /// Unique zone name, e.g. `"foo.example.org"`
    pub name: String,

    /// IPv4 target for the apex A record set; empty means "no A record"
    address_v4: String,

    /// IPv6 target for the apex AAAA record set; empty means "no AAAA record"
    address_v6: String,

    /// Owning account; fixed at creation
    pub owner_id: String,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Timestamp of the last persisted update
    pub updated: Option<DateTime<Utc>>,

    /// True iff an address field changed since the last successful sync.
    /// Never persisted.
    #[serde(skip)]
    dirty: bool,
}

impl Domain {
    /// Create a new domain with no address records
    pub fn new(name: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address_v4: String::new(),
            address_v6: String::new(),
            owner_id: owner_id.into(),
            created: Utc::now(),
            updated: None,
            dirty: false,
        }
    }

    /// The IPv4 target, empty if no A record is desired
    pub fn address_v4(&self) -> &str {
        &self.address_v4
    }

    /// The IPv6 target, empty if no AAAA record is desired
    pub fn address_v6(&self) -> &str {
        &self.address_v6
    }

    /// Assign the IPv4 target, marking the domain dirty on an actual change
    pub fn set_address_v4(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value != self.address_v4 {
            self.dirty = true;
        }
        self.address_v4 = value;
    }

    /// Assign the IPv6 target, marking the domain dirty on an actual change
    pub fn set_address_v6(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value != self.address_v6 {
            self.dirty = true;
        }
        self.address_v6 = value;
    }

    /// Whether either address field is non-empty
    pub fn has_addresses(&self) -> bool {
        !self.address_v4.is_empty() || !self.address_v6.is_empty()
    }

    /// Whether the address fields have diverged from the last synced state
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Overwrite the dirty flag; owned by the sync engine
    pub(crate) fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Stamp the update timestamp; called by the update hook before persisting
    pub(crate) fn touch(&mut self) {
        self.updated = Some(Utc::now());
    }
}

/// An account owning zero or more domains
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    /// Stable account identifier
    pub id: String,

    /// Contact address of the account
    pub email: String,

    /// While true, all remote writes for this account's domains are deferred
    /// (e.g., anti-abuse verification is outstanding)
    pub suspended: bool,

    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Owner {
    /// Create a new, unsuspended owner
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            suspended: false,
            created: Utc::now(),
        }
    }
}

/// Validate that a string is a usable DNS zone name
///
/// This implements basic domain name validation per RFC 1035. It's not
/// comprehensive but catches common errors before any remote call is made.
pub fn validate_zone_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_input("zone name cannot be empty"));
    }

    // Total length limit (RFC 1035: 253 chars max)
    if name.len() > 253 {
        return Err(Error::invalid_input(format!(
            "zone name too long: {} chars (max 253)",
            name.len()
        )));
    }

    for label in name.split('.') {
        if label.is_empty() {
            return Err(Error::invalid_input(format!(
                "zone name has empty label: '{}'",
                name
            )));
        }

        if label.len() > 63 {
            return Err(Error::invalid_input(format!(
                "zone label too long: {} chars (max 63): '{}'",
                label.len(),
                label
            )));
        }

        if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return Err(Error::invalid_input(format!(
                "zone label contains invalid characters: '{}'",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::invalid_input(format!(
                "zone label cannot start or end with hyphen: '{}'",
                label
            )));
        }
    }

    Ok(())
}
