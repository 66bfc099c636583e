//! Shared configuration for Meraki tools.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `meraki_api::Config` / `TransportConfig`. The CLI
//! layers its flag overrides on top of this crate.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use meraki_api::config::DEFAULT_API_URL;
use meraki_api::{TimestampCodec, TlsMode, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API key configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named network profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Reference zone for re-encoding CMX `seenTime` values.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            time_zone: default_time_zone(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_time_zone() -> String {
    "America/Mexico_City".into()
}

/// A named network profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Dashboard API root (e.g., "https://api.meraki.com/api/v0").
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Network identifier (e.g., "N_24329156").
    #[serde(default)]
    pub network_id: String,

    /// API key (plaintext -- prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Validator string the CMX receiver answers with.
    pub cmx_validator: Option<String>,

    /// Shared secret expected in CMX POSTs.
    pub cmx_secret: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Override the CMX reference zone.
    pub time_zone: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            network_id: String::new(),
            api_key: None,
            api_key_env: None,
            cmx_validator: None,
            cmx_secret: None,
            ca_cert: None,
            timeout: None,
            time_zone: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "meraki", "meraki").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("meraki");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, layered as defaults → file → `MERAKI_*` env.
///
/// Nested keys use a double underscore: `MERAKI_DEFAULTS__TIMEOUT=10`.
/// A missing file yields the defaults; a file that fails to parse is an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("MERAKI_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Profile lookup ──────────────────────────────────────────────────

impl Config {
    /// The profile name to use when none is given explicitly.
    pub fn active_profile_name(&self) -> String {
        self.default_profile
            .clone()
            .unwrap_or_else(|| "default".into())
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound { name: name.into() })
    }
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve an API key from the credential chain (no CLI flag step).
pub fn resolve_api_key(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's api_key_env → env var lookup
    if let Some(ref env_name) = profile.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new("meraki", &format!("{profile_name}/api-key")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref key) = profile.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

// ── Translation into meraki-api types ───────────────────────────────

/// Build a `meraki_api::Config` from a profile.
///
/// `api_key` short-circuits the credential chain (e.g. a `--api-key` flag);
/// otherwise the key comes from [`resolve_api_key`].
pub fn profile_to_api_config(
    profile: &Profile,
    profile_name: &str,
    api_key: Option<SecretString>,
) -> Result<meraki_api::Config, ConfigError> {
    url::Url::parse(&profile.api_url).map_err(|_| ConfigError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {}", profile.api_url),
    })?;

    if profile.network_id.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "network".into(),
            reason: format!(
                "no network id; pass --network or set network_id in profile '{profile_name}'"
            ),
        });
    }

    let api_key = match api_key {
        Some(key) => key,
        None => resolve_api_key(profile, profile_name)?,
    };

    let mut config = meraki_api::Config::new(&profile.api_url, api_key, &profile.network_id);
    config.cmx_validator.clone_from(&profile.cmx_validator);
    config.cmx_secret = profile.cmx_secret.clone().map(SecretString::from);
    Ok(config)
}

/// Transport settings for a profile; profile values beat global defaults.
pub fn profile_transport(profile: &Profile, defaults: &Defaults) -> TransportConfig {
    let tls = profile
        .ca_cert
        .as_ref()
        .map_or(TlsMode::System, |path| TlsMode::CustomCa(path.clone()));

    TransportConfig {
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        ..TransportConfig::default()
    }
}

/// CMX timestamp codec for a profile's reference zone.
pub fn profile_codec(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<TimestampCodec, ConfigError> {
    let zone = profile.time_zone.as_deref().unwrap_or(&defaults.time_zone);
    TimestampCodec::from_zone_name(zone).map_err(|e| ConfigError::Validation {
        field: "time_zone".into(),
        reason: e.to_string(),
    })
}
