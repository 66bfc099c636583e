// Empty-on-failure fetchers
//
// Callers that only want "whatever the Dashboard returned" use these:
// every failure is logged at `warn` and collapses to an empty list. Use
// `DashboardClient` directly to tell "no results" apart from "request
// failed".

use secrecy::SecretString;
use tracing::warn;

use crate::config::Config;
use crate::dashboard::{AccessPoint, DashboardClient, Essid};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Fetch the SSIDs of `network_id`; empty on any failure.
pub async fn fetch_essids(
    config: &Config,
    api_key: &SecretString,
    network_id: &str,
) -> Vec<Essid> {
    let result = match client(config, api_key) {
        Ok(client) => client.list_ssids(network_id).await,
        Err(e) => Err(e),
    };
    or_empty("ssids", network_id, result)
}

/// Fetch the `MR` access points of `network_id`; empty on any failure.
pub async fn fetch_access_points(
    config: &Config,
    api_key: &SecretString,
    network_id: &str,
) -> Vec<AccessPoint> {
    let result = match client(config, api_key) {
        Ok(client) => client.list_access_points(network_id).await,
        Err(e) => Err(e),
    };
    or_empty("access points", network_id, result)
}

fn client(config: &Config, api_key: &SecretString) -> Result<DashboardClient, Error> {
    DashboardClient::from_api_key(&config.api_url, api_key, &TransportConfig::default())
}

fn or_empty<T>(resource: &str, network_id: &str, result: Result<Vec<T>, Error>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(
            resource,
            network_id,
            status = ?e.status(),
            error = %e,
            "fetch failed, returning empty list"
        );
        Vec::new()
    })
}
