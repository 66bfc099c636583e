//! Flag-aware configuration: layers `--profile`, `--api-url`, `--api-key`,
//! `--network` and `--timeout` over the profile loaded by `meraki-config`.

use std::time::Duration;

use secrecy::SecretString;

use meraki_api::{TimestampCodec, TransportConfig};
use meraki_config::{Config, Profile};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use meraki_config::config_path;

/// Load the config file plus `MERAKI_*` overrides.
///
/// A missing file is fine; one that fails to parse stops the command.
pub fn load() -> Result<Config, CliError> {
    Ok(meraki_config::load_config()?)
}

/// Everything a Dashboard command needs.
#[derive(Debug)]
pub struct Session {
    pub api: meraki_api::Config,
    pub transport: TransportConfig,
}

/// Profile name from `--profile`, falling back to the config's default.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| cfg.active_profile_name())
}

/// Look up the active profile.
///
/// An explicitly requested profile must exist. Without `--profile`, a
/// missing default profile yields built-in defaults so flags alone suffice.
pub fn active_profile(global: &GlobalOpts, cfg: &Config) -> Result<(String, Profile), CliError> {
    let name = active_profile_name(global, cfg);

    match cfg.profile(&name) {
        Ok(profile) => Ok((name, profile.clone())),
        Err(_) if global.profile.is_none() => Ok((name, Profile::default())),
        Err(_) => {
            let mut available: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            Err(CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
                path: config_path().display().to_string(),
            })
        }
    }
}

/// Resolve the Dashboard session for the active profile plus flag overrides.
pub fn resolve_session(global: &GlobalOpts, cfg: &Config) -> Result<Session, CliError> {
    let (profile_name, mut profile) = active_profile(global, cfg)?;

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if let Some(ref network) = global.network {
        profile.network_id.clone_from(network);
    }

    let api_key = global.api_key.clone().map(SecretString::from);
    let api = meraki_config::profile_to_api_config(&profile, &profile_name, api_key)?;

    let mut transport = meraki_config::profile_transport(&profile, &cfg.defaults);
    if let Some(secs) = global.timeout {
        transport.timeout = Duration::from_secs(secs);
    }

    Ok(Session { api, transport })
}

/// Timestamp codec: `--zone` beats the profile, which beats the defaults.
pub fn resolve_codec(
    zone: Option<&str>,
    profile: &Profile,
    cfg: &Config,
) -> Result<TimestampCodec, CliError> {
    match zone {
        Some(name) => Ok(TimestampCodec::from_zone_name(name)?),
        None => Ok(meraki_config::profile_codec(profile, &cfg.defaults)?),
    }
}
