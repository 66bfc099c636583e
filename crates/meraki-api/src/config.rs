// Connection configuration handed to the fetchers.
//
// Field names follow the JSON config file deployed alongside the CMX
// receiver (`MerakiAPI`, `MerakiKey`, ...), so an existing file decodes
// straight into this struct.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

/// Public Dashboard API root used when a profile doesn't set one.
pub const DEFAULT_API_URL: &str = "https://api.meraki.com/api/v0";

/// Connection settings for one Meraki network.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Dashboard API root, e.g. `https://api.meraki.com/api/v0`.
    #[serde(rename = "MerakiAPI", default = "default_api_url")]
    pub api_url: String,

    #[serde(rename = "MerakiKey", deserialize_with = "secret")]
    pub api_key: SecretString,

    #[serde(rename = "NetworkID", default)]
    pub network_id: String,

    /// Validator string the CMX receiver echoes back on `GET`.
    #[serde(rename = "MerakiCMXValidator", default)]
    pub cmx_validator: Option<String>,

    /// Shared secret the CMX feed embeds in every POST.
    #[serde(rename = "MerakiCMXSecret", default, deserialize_with = "optional_secret")]
    pub cmx_secret: Option<SecretString>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

fn secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

fn optional_secret<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<SecretString>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

impl Config {
    pub fn new(
        api_url: impl Into<String>,
        api_key: SecretString,
        network_id: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_key,
            network_id: network_id.into(),
            cmx_validator: None,
            cmx_secret: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn decodes_legacy_json_config() {
        let raw = r#"{
            "MerakiAPI": "https://n42.meraki.com/api/v0",
            "MerakiKey": "abc123",
            "NetworkID": "N_24329156",
            "MerakiCMXValidator": "da6a17c407bb11dfeec7392a5042be0a4cc034b6",
            "MerakiCMXSecret": "s3cr3t"
        }"#;

        let config: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(config.api_url, "https://n42.meraki.com/api/v0");
        assert_eq!(config.api_key.expose_secret(), "abc123");
        assert_eq!(config.network_id, "N_24329156");
        assert_eq!(
            config.cmx_validator.as_deref(),
            Some("da6a17c407bb11dfeec7392a5042be0a4cc034b6")
        );
        assert_eq!(config.cmx_secret.unwrap().expose_secret(), "s3cr3t");
    }

    #[test]
    fn optional_fields_default() {
        let config: Config = serde_json::from_str(r#"{ "MerakiKey": "k" }"#).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.network_id.is_empty());
        assert!(config.cmx_validator.is_none());
        assert!(config.cmx_secret.is_none());
    }

    #[test]
    fn debug_redacts_secrets() {
        let key = SecretString::from("topsecret".to_string());
        let config = Config::new(DEFAULT_API_URL, key, "N_1");
        assert!(!format!("{config:?}").contains("topsecret"));
    }
}
