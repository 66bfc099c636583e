// Dashboard API response types
//
// Models for `/networks/{id}/ssids` and `/networks/{id}/devices`. Fields use
// `#[serde(default)]` liberally: device records differ per product family
// and API version, and unset attributes come back as `null`.

use serde::{Deserialize, Deserializer, Serialize};

// ── SSID ─────────────────────────────────────────────────────────────

/// One of the (up to 15) SSID slots of a wireless network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Essid {
    /// Slot index, 0-based.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    /// e.g. `open`, `psk`, `8021x-meraki`, `8021x-radius`.
    #[serde(default)]
    pub auth_mode: String,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Device ───────────────────────────────────────────────────────────

/// Product family, taken from the first two characters of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DeviceFamily {
    /// `MR` access points.
    Wireless,
    /// `MS` switches.
    Switch,
    /// `MX` security appliances.
    Appliance,
    /// `MV` cameras.
    Camera,
    /// `MG` cellular gateways.
    Cellular,
    /// `MT` sensors.
    Sensor,
    Other,
}

impl DeviceFamily {
    pub fn from_model(model: &str) -> Self {
        // `get` is bounds- and char-boundary-checked, so short or
        // non-ASCII models land in `Other`.
        match model.get(..2) {
            Some("MR") => Self::Wireless,
            Some("MS") => Self::Switch,
            Some("MX") => Self::Appliance,
            Some("MV") => Self::Camera,
            Some("MG") => Self::Cellular,
            Some("MT") => Self::Sensor,
            _ => Self::Other,
        }
    }
}

/// Device object from `/networks/{id}/devices`.
///
/// Every family comes back from that endpoint; the access-point fetchers
/// keep only [`DeviceFamily::Wireless`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub mac: String,
    #[serde(default)]
    pub model: String,
    /// Street address of the device placement.
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub lan_ip: Option<String>,
    /// v0 returns a space-separated string, v1 an array. Both land here.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub network_id: String,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Device {
    pub fn family(&self) -> DeviceFamily {
        DeviceFamily::from_model(&self.model)
    }

    pub fn is_wireless(&self) -> bool {
        self.family() == DeviceFamily::Wireless
    }

    /// Name, or serial when the device was never named.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.serial)
    }
}

/// A [`Device`] that passed the `MR` filter.
pub type AccessPoint = Device;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTags {
    Joined(String),
    List(Vec<String>),
}

fn deserialize_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<RawTags>::deserialize(deserializer)? {
        Some(RawTags::Joined(s)) => s.split_whitespace().map(str::to_owned).collect(),
        Some(RawTags::List(list)) => list,
        None => Vec::new(),
    })
}
