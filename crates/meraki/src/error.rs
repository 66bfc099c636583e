//! CLI error types with miette diagnostics.
//!
//! Maps `meraki_api::Error` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use meraki_config::ConfigError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Dashboard at {url}")]
    #[diagnostic(
        code(meraki::connection_failed),
        help(
            "Check network access to the Dashboard API.\n\
             URL: {url}\n\
             Override the API root with --api-url if your organization is sharded."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {reason}")]
    #[diagnostic(
        code(meraki::tls_error),
        help("Check the ca_cert path configured in your profile.")
    )]
    TlsError { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(meraki::timeout),
        help("Increase timeout with --timeout or check Dashboard responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(meraki::auth_failed),
        help(
            "The Dashboard rejected the API key.\n\
             Generate a key under My Profile > API access, then pass it with\n\
             --api-key or MERAKI_API_KEY."
        )
    )]
    AuthFailed,

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(meraki::no_credentials),
        help(
            "Pass --api-key, set MERAKI_API_KEY, or add api_key_env to the profile.\n\
             Keyring entries are looked up as service 'meraki', user '{profile}/api-key'."
        )
    )]
    NoCredentials { profile: String },

    // ── Dashboard ────────────────────────────────────────────────────
    #[error("Not found: {message}")]
    #[diagnostic(
        code(meraki::not_found),
        help("Check the network identifier (--network or network_id in the profile).")
    )]
    NotFound { message: String },

    #[error("Dashboard API error (HTTP {status}): {message}")]
    #[diagnostic(code(meraki::api_error))]
    ApiError { status: u16, message: String },

    #[error("Unexpected response from the Dashboard: {message}")]
    #[diagnostic(
        code(meraki::unexpected_response),
        help("Run with -vv to log request URLs.")
    )]
    UnexpectedResponse { message: String },

    // ── CMX ──────────────────────────────────────────────────────────
    #[error("Scanning payload secret does not match the configured cmx_secret")]
    #[diagnostic(
        code(meraki::secret_mismatch),
        help("The payload was not sent by the Meraki receiver registered for this profile.")
    )]
    SecretMismatch,

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(meraki::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(meraki::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Config file: {path}"
        )
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error(transparent)]
    #[diagnostic(
        code(meraki::config),
        help("Fix the file reported above; `meraki config path` prints its location.")
    )]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(meraki::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(meraki::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed | Self::NoCredentials { .. } | Self::SecretMismatch => {
                exit_code::AUTH
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ProfileNotFound { .. } | Self::Config(_) => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── meraki_api::Error → CliError ─────────────────────────────────────

impl From<meraki_api::Error> for CliError {
    fn from(err: meraki_api::Error) -> Self {
        use meraki_api::Error as E;

        match err {
            E::InvalidApiKey => Self::AuthFailed,

            E::InvalidHeader { message } => Self::Validation {
                field: "api_key".into(),
                reason: message,
            },

            E::Transport(e) if e.is_timeout() => Self::Timeout,

            E::Transport(e) => Self::ConnectionFailed {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
                source: Box::new(e),
            },

            E::InvalidUrl(e) => Self::Validation {
                field: "api_url".into(),
                reason: e.to_string(),
            },

            E::Tls(reason) => Self::TlsError { reason },

            E::EmptyNetworkId => Self::Validation {
                field: "network".into(),
                reason: "network id must not be empty".into(),
            },

            E::Api { status: 404, message } => Self::NotFound { message },

            E::Api { status, message } => Self::ApiError { status, message },

            E::Deserialization { message, .. } => Self::UnexpectedResponse { message },

            E::UnknownTimeZone(zone) => Self::Validation {
                field: "zone".into(),
                reason: format!("unknown time zone '{zone}'"),
            },

            E::InvalidTimestamp { value, message } => Self::Validation {
                field: "seenTime".into(),
                reason: format!("{value:?}: {message}"),
            },
        }
    }
}

// ── ConfigError → CliError ───────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}
