use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Header carrying the Dashboard API key on every request.
pub const API_KEY_HEADER: &str = "X-Cisco-Meraki-API-Key";

/// Build the default header map for API-key authentication.
///
/// The value is flagged sensitive so it never shows up in reqwest's
/// `Debug` output or in logged request dumps.
pub fn api_key_headers(api_key: &SecretString) -> Result<HeaderMap, Error> {
    let mut value =
        HeaderValue::from_str(api_key.expose_secret()).map_err(|e| Error::InvalidHeader {
            message: e.to_string(),
        })?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static("x-cisco-meraki-api-key"), value);
    Ok(headers)
}
