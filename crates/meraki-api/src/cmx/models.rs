// CMX scanning API payload types
//
// Shape of the location-analytics POSTs Meraki sends to a registered
// receiver. Field names follow the feed's camelCase keys. Optional
// attributes are `null` whenever the AP couldn't resolve them.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::timestamp::{Timestamp, TimestampCodec};

/// Message type for WiFi scanning payloads.
pub const TYPE_DEVICES_SEEN: &str = "DevicesSeen";

/// Message type for Bluetooth scanning payloads.
pub const TYPE_BLUETOOTH_DEVICES_SEEN: &str = "BluetoothDevicesSeen";

// ── Envelope ─────────────────────────────────────────────────────────

/// Outer wrapper of every scanning POST.
///
/// ```json
/// { "version": "2.0", "secret": "...", "type": "DevicesSeen", "data": { ... } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanningEnvelope {
    pub version: String,
    #[serde(default)]
    pub secret: String,
    #[serde(rename = "type")]
    pub message_type: String,
    pub data: ScanningData,
}

impl ScanningEnvelope {
    /// Check the embedded secret against the one configured for the receiver.
    pub fn verify_secret(&self, expected: &SecretString) -> bool {
        self.secret == expected.expose_secret()
    }

    pub fn is_wifi(&self) -> bool {
        self.message_type == TYPE_DEVICES_SEEN
    }

    /// Re-encode every `seenTime` through `codec` on the next serialization.
    pub fn rezone(&mut self, codec: &TimestampCodec) {
        for obs in &mut self.data.observations {
            obs.seen_time = obs.seen_time.in_zone(codec.zone());
        }
    }
}

// ── Payload ──────────────────────────────────────────────────────────

/// Observations reported by a single access point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanningData {
    pub ap_mac: String,
    #[serde(default)]
    pub ap_tags: Vec<String>,
    #[serde(default)]
    pub ap_floors: Vec<String>,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

/// One wireless client seen by the AP at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub client_mac: String,
    #[serde(default)]
    pub ipv4: Option<String>,
    #[serde(default)]
    pub ipv6: Option<String>,
    #[serde(default)]
    pub seen_time: Timestamp,
    /// Seconds since the Unix epoch.
    #[serde(default)]
    pub seen_epoch: i64,
    #[serde(default)]
    pub ssid: Option<String>,
    #[serde(default)]
    pub rssi: i32,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl Observation {
    /// `true` when `seenTime` and `seenEpoch` name the same second.
    pub fn times_agree(&self) -> bool {
        self.seen_time.instant().timestamp() == self.seen_epoch
    }
}

/// Position estimate for an observed client.
///
/// `x` and `y` are parallel arrays of floor-plan coordinates, one pair
/// per floor plan the AP is placed on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    /// Uncertainty radius in meters.
    #[serde(default)]
    pub unc: f64,
    #[serde(default)]
    pub x: Vec<f64>,
    #[serde(default)]
    pub y: Vec<f64>,
}

impl Location {
    /// Floor-plan coordinates as `(x, y)` pairs; extra entries on the longer
    /// side are dropped.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample() -> serde_json::Value {
        json!({
            "version": "2.0",
            "secret": "s3cr3t",
            "type": "DevicesSeen",
            "data": {
                "apMac": "00:18:0a:13:dd:b0",
                "apTags": ["dev", "home", "test"],
                "apFloors": ["Floor 1"],
                "observations": [
                    {
                        "clientMac": "00:26:ab:b8:a9:a4",
                        "ipv4": "/192.168.0.15",
                        "ipv6": null,
                        "seenTime": "2016-09-24T00:06:42Z",
                        "seenEpoch": 1_474_675_602,
                        "ssid": "Cisco WiFi",
                        "rssi": 24,
                        "manufacturer": "Seiko Epson",
                        "os": null,
                        "location": {
                            "lat": 37.770_412_8,
                            "lng": -122.387_727_1,
                            "unc": 15.491_933_384_829_668,
                            "x": [10.5],
                            "y": [4.25]
                        }
                    },
                    {
                        "clientMac": "98:5a:eb:00:11:22",
                        "ipv4": null,
                        "ipv6": null,
                        "seenTime": "not a time",
                        "seenEpoch": 1_474_675_610,
                        "ssid": null,
                        "rssi": 11,
                        "manufacturer": "Apple",
                        "os": null,
                        "location": null
                    }
                ]
            }
        })
    }

    #[test]
    fn decodes_scanning_envelope() {
        let envelope: ScanningEnvelope = serde_json::from_value(sample()).unwrap();

        assert_eq!(envelope.version, "2.0");
        assert!(envelope.is_wifi());
        assert_eq!(envelope.data.ap_mac, "00:18:0a:13:dd:b0");
        assert_eq!(envelope.data.ap_tags, vec!["dev", "home", "test"]);
        assert_eq!(envelope.data.ap_floors, vec!["Floor 1"]);
        assert_eq!(envelope.data.observations.len(), 2);

        let first = &envelope.data.observations[0];
        assert_eq!(first.client_mac, "00:26:ab:b8:a9:a4");
        assert_eq!(first.ipv4.as_deref(), Some("/192.168.0.15"));
        assert_eq!(first.ipv6, None);
        assert_eq!(
            first.seen_time.instant(),
            Utc.with_ymd_and_hms(2016, 9, 24, 0, 6, 42).unwrap()
        );
        assert!(first.times_agree());
        let loc = first.location.as_ref().unwrap();
        assert_eq!(loc.points().collect::<Vec<_>>(), vec![(10.5, 4.25)]);

        let second = &envelope.data.observations[1];
        assert!(second.seen_time.is_fallback());
        assert!(second.location.is_none());
    }

    #[test]
    fn encodes_seen_time_in_fixed_layout() {
        let envelope: ScanningEnvelope = serde_json::from_value(sample()).unwrap();
        let encoded = serde_json::to_value(&envelope).unwrap();

        // 00:06:42Z is 19:06:42 the previous day in Mexico City (CDT, UTC-5).
        assert_eq!(
            encoded["data"]["observations"][0]["seenTime"],
            "2016-09-23T19:06:42.000Z"
        );
        assert_eq!(encoded["type"], "DevicesSeen");
        assert_eq!(encoded["data"]["apMac"], "00:18:0a:13:dd:b0");
    }

    #[test]
    fn rezone_changes_encoding_not_instant() {
        let mut envelope: ScanningEnvelope = serde_json::from_value(sample()).unwrap();
        let before = envelope.data.observations[0].seen_time.instant();

        envelope.rezone(&TimestampCodec::new(chrono_tz::UTC));
        let encoded = serde_json::to_value(&envelope).unwrap();

        assert_eq!(envelope.data.observations[0].seen_time.instant(), before);
        assert_eq!(
            encoded["data"]["observations"][0]["seenTime"],
            "2016-09-24T00:06:42.000Z"
        );
    }

    #[test]
    fn bluetooth_payload_is_not_wifi() {
        let mut raw = sample();
        raw["type"] = json!(TYPE_BLUETOOTH_DEVICES_SEEN);
        let envelope: ScanningEnvelope = serde_json::from_value(raw).unwrap();
        assert!(!envelope.is_wifi());
    }

    #[test]
    fn verifies_shared_secret() {
        let envelope: ScanningEnvelope = serde_json::from_value(sample()).unwrap();
        assert!(envelope.verify_secret(&SecretString::from("s3cr3t".to_string())));
        assert!(!envelope.verify_secret(&SecretString::from("other".to_string())));
    }

    #[test]
    fn uneven_coordinate_arrays_pair_up_to_shorter() {
        let loc = Location {
            x: vec![1.0, 2.0, 3.0],
            y: vec![4.0, 5.0],
            ..Location::default()
        };
        assert_eq!(loc.points().count(), 2);
    }
}
