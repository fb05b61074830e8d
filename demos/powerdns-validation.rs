// # PowerDNS Client Real Environment Validation Tool
//
// Checks the PowerDNS zone client against a real PowerDNS authoritative
// server in a controlled environment.
//
// ## Usage
//
// ```bash
// # Dry-run mode (default - read-only)
// PDNS_API_URL=http://127.0.0.1:8081 \
// PDNS_API_KEY=your_key \
// ZONESYNC_TEST_ZONE=zonesync-test.example.org \
// cargo run --bin powerdns_validation
//
// # Live mode (creates, writes and deletes the test zone!)
// ZONESYNC_MODE=live \
// PDNS_API_URL=http://127.0.0.1:8081 \
// PDNS_API_KEY=your_key \
// ZONESYNC_TEST_ZONE=zonesync-test.example.org \
// ZONESYNC_TEST_IPV4=192.0.2.1 \
// cargo run --bin powerdns_validation
// ```
//
// ## Environment Variables
//
// Required:
// - `PDNS_API_URL`: Base URL of the PowerDNS API
// - `PDNS_API_KEY`: API key
// - `ZONESYNC_TEST_ZONE`: Zone name used for the validation run
//
// Optional:
// - `ZONESYNC_TEST_IPV4`: IPv4 target written in live mode (default 192.0.2.1)
// - `ZONESYNC_NAMESERVERS`: Comma-separated nameservers for zone creation
// - `ZONESYNC_MODE`: "dry-run" or "live" (default: dry-run)

use std::env;

use anyhow::Context;
use zonesync_client_powerdns::{PowerDnsClient, PowerDnsConfig};
use zonesync_core::traits::ZoneClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let api_url = env::var("PDNS_API_URL").context("PDNS_API_URL is required")?;
    let api_key = env::var("PDNS_API_KEY").context("PDNS_API_KEY is required")?;
    let zone = env::var("ZONESYNC_TEST_ZONE").context("ZONESYNC_TEST_ZONE is required")?;
    let ipv4 = env::var("ZONESYNC_TEST_IPV4").unwrap_or_else(|_| "192.0.2.1".to_string());
    let live = env::var("ZONESYNC_MODE")
        .map(|m| m.eq_ignore_ascii_case("live"))
        .unwrap_or(false);

    let nameservers: Vec<String> = env::var("ZONESYNC_NAMESERVERS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let client =
        PowerDnsClient::new(PowerDnsConfig::new(api_url, api_key).with_nameservers(nameservers))?;

    tracing::info!(
        "validating PowerDNS client against zone {} [mode: {}]",
        zone,
        if live { "LIVE" } else { "DRY-RUN" }
    );

    let exists = client.zone_exists(&zone).await?;
    tracing::info!("zone_exists({}) = {}", zone, exists);

    if !live {
        tracing::info!("dry-run mode: skipping zone creation, record write and deletion");
        tracing::info!("would create zone {}, set A={} and delete it again", zone, ipv4);
        return Ok(());
    }

    client.create_zone(&zone).await?;
    tracing::info!("created zone {}", zone);

    // Creating again must be tolerated (idempotency contract)
    client.create_zone(&zone).await?;
    tracing::info!("second create_zone absorbed as expected");

    client.set_address_records(&zone, &ipv4, "").await?;
    tracing::info!("set A record of {} to {}", zone, ipv4);

    client.set_address_records(&zone, "", "").await?;
    tracing::info!("cleared address records of {}", zone);

    client.delete_zone(&zone).await?;
    tracing::info!("deleted zone {}", zone);

    // Deleting again must be tolerated (idempotency contract)
    client.delete_zone(&zone).await?;
    tracing::info!("second delete_zone absorbed as expected");

    tracing::info!("validation completed successfully");
    Ok(())
}
