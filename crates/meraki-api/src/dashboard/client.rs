// Dashboard API HTTP client
//
// Wraps `reqwest::Client` with API-key header injection, network-scoped URL
// construction, and strict `200 OK` response handling. Endpoint methods live
// in `ssids.rs` and `devices.rs` as inherent impls.

use reqwest::StatusCode;
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::api_key_headers;
use crate::error::Error;
use crate::transport::TransportConfig;

// ── Error response shape from the Dashboard API ──────────────────────

/// Dashboard errors arrive as `{"errors": ["message", ...]}`.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Meraki Dashboard API.
///
/// Redirects are followed by reqwest (the public endpoint may hand a
/// request off to a regional shard); the API-key header is a default
/// header, so every hop carries it.
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DashboardClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config.
    ///
    /// `base_url` is the API root, e.g. `https://api.meraki.com/api/v0`.
    pub fn from_api_key(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let headers = api_key_headers(api_key)?;
        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the API root, dropping any trailing slash so segment pushes
    /// don't produce `//`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&path);
        Ok(url)
    }

    /// The API root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build `{base}/networks/{network_id}/{resource}`.
    ///
    /// The network id is pushed as a single percent-encoded segment. A blank
    /// id is rejected before any request goes out.
    pub(crate) fn network_url(&self, network_id: &str, resource: &str) -> Result<Url, Error> {
        if network_id.trim().is_empty() {
            return Err(Error::EmptyNetworkId);
        }

        let mut url = self.base_url.clone();
        // Infallible: `normalize_base_url` rejected cannot-be-a-base URLs.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("networks")
                .push(network_id)
                .push(resource);
        }
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url.clone()).send().await?;
        if resp.url() != &url {
            debug!(final_url = %resp.url(), "followed redirect");
        }
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Only `200 OK` counts as success; anything else becomes an error
    /// carrying the status and the Dashboard's message.
    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
        if status == StatusCode::UNAUTHORIZED {
            return Error::InvalidApiKey;
        }

        let raw = resp.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(err) if !err.errors.is_empty() => err.errors.join("; "),
            _ if raw.is_empty() => status.to_string(),
            _ => raw,
        };

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
