// # PowerDNS Zone Client
//
// This crate provides a ZoneClient implementation against the PowerDNS
// authoritative HTTP API.
//
// ## Behavior
//
// - One HTTP request per zone operation; errors propagate to the caller
//   (retry policy is owned by the sync layer, not this client)
// - Expected races are absorbed: HTTP 409 on zone creation and HTTP 404 on
//   zone deletion are reported as success
// - Zone and record names are canonicalized with a trailing dot on the wire
// - The API key NEVER appears in logs or Debug output
//
// ## API Reference
//
// - PowerDNS Authoritative API v1: https://doc.powerdns.com/authoritative/http-api/
// - Zone CRUD: `GET/POST/DELETE /api/v1/servers/:server_id/zones[/:zone_id]`
// - Record sets: `PATCH /api/v1/servers/:server_id/zones/:zone_id` with
//   `rrsets` carrying `changetype: REPLACE` or `DELETE`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use zonesync_core::traits::{RecordType, ZoneClient};
use zonesync_core::{Error, Result};

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the PowerDNS client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerDnsConfig {
    /// Base URL of the PowerDNS API, e.g. `http://127.0.0.1:8081`
    pub api_url: String,

    /// API key sent via the `X-API-Key` header
    /// ⚠️ NEVER log this value
    pub api_key: String,

    /// Server id within the API, almost always `"localhost"`
    #[serde(default = "default_server_id")]
    pub server_id: String,

    /// Kind of created zones (`Native`, `Master`, ...)
    #[serde(default = "default_zone_kind")]
    pub zone_kind: String,

    /// Nameservers written into freshly created zones
    #[serde(default)]
    pub nameservers: Vec<String>,

    /// TTL for record sets written by this client
    #[serde(default = "default_record_ttl")]
    pub record_ttl: u32,
}

impl PowerDnsConfig {
    /// Create a configuration with defaults for everything but the endpoint
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            server_id: default_server_id(),
            zone_kind: default_zone_kind(),
            nameservers: Vec::new(),
            record_ttl: default_record_ttl(),
        }
    }

    /// Set the nameservers written into freshly created zones
    pub fn with_nameservers(mut self, nameservers: Vec<String>) -> Self {
        self.nameservers = nameservers;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            return Err(Error::config("PowerDNS API URL cannot be empty"));
        }
        if self.api_key.is_empty() {
            return Err(Error::config("PowerDNS API key cannot be empty"));
        }
        if self.record_ttl == 0 {
            return Err(Error::config("record TTL must be > 0"));
        }
        Ok(())
    }
}

fn default_server_id() -> String {
    "localhost".to_string()
}

fn default_zone_kind() -> String {
    "Native".to_string()
}

fn default_record_ttl() -> u32 {
    60
}

/// PowerDNS zone client
pub struct PowerDnsClient {
    config: PowerDnsConfig,
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for PowerDnsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerDnsClient")
            .field("api_url", &self.config.api_url)
            .field("api_key", &"<REDACTED>")
            .field("server_id", &self.config.server_id)
            .field("zone_kind", &self.config.zone_kind)
            .finish()
    }
}

/// Zone creation payload
#[derive(Debug, Serialize)]
struct ZoneCreate {
    name: String,
    kind: String,
    nameservers: Vec<String>,
}

/// PATCH payload replacing or deleting record sets
#[derive(Debug, Serialize)]
struct RrsetPatch {
    rrsets: Vec<Rrset>,
}

#[derive(Debug, Serialize)]
struct Rrset {
    name: String,
    #[serde(rename = "type")]
    rtype: String,
    ttl: u32,
    changetype: String,
    records: Vec<Record>,
}

#[derive(Debug, Serialize)]
struct Record {
    content: String,
    disabled: bool,
}

impl PowerDnsClient {
    /// Create a new PowerDNS client
    pub fn new(config: PowerDnsConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Canonical zone/record name: the API expects a trailing dot
    fn canonical(name: &str) -> String {
        if name.ends_with('.') {
            name.to_string()
        } else {
            format!("{}.", name)
        }
    }

    /// URL of the zone collection
    fn zones_url(&self) -> String {
        format!(
            "{}/api/v1/servers/{}/zones",
            self.config.api_url.trim_end_matches('/'),
            self.config.server_id
        )
    }

    /// URL of one zone
    fn zone_url(&self, name: &str) -> String {
        format!("{}/{}", self.zones_url(), Self::canonical(name))
    }

    /// Build one rrset entry; an empty value turns into a DELETE changetype
    fn rrset(&self, name: &str, rtype: RecordType, value: &str) -> Rrset {
        if value.is_empty() {
            Rrset {
                name: Self::canonical(name),
                rtype: rtype.as_str().to_string(),
                ttl: self.config.record_ttl,
                changetype: "DELETE".to_string(),
                records: Vec::new(),
            }
        } else {
            Rrset {
                name: Self::canonical(name),
                rtype: rtype.as_str().to_string(),
                ttl: self.config.record_ttl,
                changetype: "REPLACE".to_string(),
                records: vec![Record {
                    content: value.to_string(),
                    disabled: false,
                }],
            }
        }
    }

    /// PATCH a set of rrsets into a zone
    async fn patch_rrsets(&self, zone: &str, rrsets: Vec<Rrset>) -> Result<()> {
        let response = self
            .client
            .patch(self.zone_url(zone))
            .header("X-API-Key", &self.config.api_key)
            .json(&RrsetPatch { rrsets })
            .send()
            .await
            .map_err(|e| Error::http(format!("PATCH {} failed: {}", zone, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::triage(
            &format!("record-set update for {}", zone),
            status,
            &body,
        ))
    }

    /// Map an unexpected HTTP status to an error
    fn triage(operation: &str, status: reqwest::StatusCode, body: &str) -> Error {
        match status.as_u16() {
            401 | 403 => Error::auth(format!(
                "{}: invalid API key or insufficient permissions (status {})",
                operation, status
            )),
            404 => Error::not_found(format!("{}: {}", operation, body)),
            422 => Error::invalid_input(format!("{}: {}", operation, body)),
            500..=599 => Error::zone_client(format!(
                "{}: transient server error {} - {}",
                operation, status, body
            )),
            _ => Error::http(format!("{}: {} - {}", operation, status, body)),
        }
    }
}

#[async_trait]
impl ZoneClient for PowerDnsClient {
    async fn zone_exists(&self, name: &str) -> Result<bool> {
        let response = self
            .client
            .get(self.zone_url(name))
            .header("X-API-Key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| Error::http(format!("GET {} failed: {}", name, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(false);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::triage(
            &format!("existence check for {}", name),
            status,
            &body,
        ))
    }

    async fn create_zone(&self, name: &str) -> Result<()> {
        tracing::info!("creating zone {}", name);

        let payload = ZoneCreate {
            name: Self::canonical(name),
            kind: self.config.zone_kind.clone(),
            nameservers: self
                .config
                .nameservers
                .iter()
                .map(|ns| Self::canonical(ns))
                .collect(),
        };

        let response = self
            .client
            .post(self.zones_url())
            .header("X-API-Key", &self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::http(format!("POST zone {} failed: {}", name, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // Expected race, not an error: someone created the zone first
        if status == reqwest::StatusCode::CONFLICT {
            tracing::debug!("zone {} already exists", name);
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        if status.as_u16() == 422 && body.contains("already exists") {
            tracing::debug!("zone {} already exists", name);
            return Ok(());
        }

        Err(Self::triage(
            &format!("zone creation for {}", name),
            status,
            &body,
        ))
    }

    async fn delete_zone(&self, name: &str) -> Result<()> {
        tracing::info!("deleting zone {}", name);

        let response = self
            .client
            .delete(self.zone_url(name))
            .header("X-API-Key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| Error::http(format!("DELETE {} failed: {}", name, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // Expected race, not an error: the zone is already gone
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!("zone {} already gone", name);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::triage(
            &format!("zone deletion for {}", name),
            status,
            &body,
        ))
    }

    async fn set_address_records(&self, name: &str, ipv4: &str, ipv6: &str) -> Result<()> {
        tracing::info!(
            "setting address records for {}: A={:?} AAAA={:?}",
            name,
            ipv4,
            ipv6
        );

        // Both apex record sets travel in one PATCH so the zone is updated
        // in one logical operation.
        let rrsets = vec![
            self.rrset(name, RecordType::A, ipv4),
            self.rrset(name, RecordType::Aaaa, ipv6),
        ];
        self.patch_rrsets(name, rrsets).await
    }

    async fn set_record_set(
        &self,
        zone: &str,
        record_name: &str,
        record_type: RecordType,
        value: &str,
    ) -> Result<()> {
        tracing::info!(
            "setting {} record set for {} in zone {}",
            record_type,
            record_name,
            zone
        );

        let rrsets = vec![self.rrset(record_name, record_type, value)];
        self.patch_rrsets(zone, rrsets).await
    }
}
