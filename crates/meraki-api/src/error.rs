use thiserror::Error;

/// Top-level error type for the `meraki-api` crate.
///
/// Covers every failure mode of the Dashboard client and the CMX codec:
/// transport, HTTP status, payload decoding, and codec configuration.
/// The `compat` adapters collapse all of these into an empty result.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The Dashboard rejected the API key (HTTP 401).
    #[error("Invalid API key")]
    InvalidApiKey,

    /// The API key can't be carried in an HTTP header.
    #[error("Invalid API key header value: {message}")]
    InvalidHeader { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, body read).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Dashboard API ───────────────────────────────────────────────
    /// Network-scoped endpoints need a non-empty network id.
    #[error("Network id must not be empty")]
    EmptyNetworkId,

    /// Any response other than `200 OK`.
    #[error("Dashboard API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Timestamp codec ─────────────────────────────────────────────
    /// The configured reference time zone is not in the tz database.
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    /// A `seenTime` value could not be parsed.
    #[error("Invalid timestamp {value:?}: {message}")]
    InvalidTimestamp { value: String, message: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the network (or endpoint) does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// The HTTP status behind this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidApiKey => Some(401),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_status_classification() {
        let not_found = Error::Api {
            status: 404,
            message: "Not Found".into(),
        };
        assert!(not_found.is_not_found());
        assert!(!not_found.is_transient());
        assert_eq!(not_found.status(), Some(404));

        let upstream = Error::Api {
            status: 502,
            message: "Bad Gateway".into(),
        };
        assert!(upstream.is_transient());
        assert_eq!(Error::InvalidApiKey.status(), Some(401));
    }

    #[test]
    fn codec_errors_carry_no_status() {
        let err = Error::UnknownTimeZone("Mars/Olympus_Mons".into());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Unknown time zone: Mars/Olympus_Mons");
    }

    #[test]
    fn empty_network_id_is_not_transient() {
        assert!(!Error::EmptyNetworkId.is_transient());
        assert!(!Error::EmptyNetworkId.is_not_found());
        assert_eq!(Error::EmptyNetworkId.status(), None);
    }
}
