// `seenTime` codec for CMX observations.
//
// The scanning feed emits RFC 3339 instants. Downstream receivers expect
// the re-encoded form `YYYY-MM-DDTHH:MM:SS.sssZ` rendered as wall-clock
// time of a reference zone (the `Z` is part of the layout, not an offset).

use std::fmt;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::error::Error;

/// Wire layout for encoded timestamps.
pub const LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Reference zone used when none is configured.
pub const DEFAULT_ZONE: Tz = chrono_tz::America::Mexico_City;

/// Value substituted for a `seenTime` that can't be parsed.
pub const FALLBACK: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

// ── Codec ────────────────────────────────────────────────────────────

/// Converts between instants and the fixed `seenTime` layout.
///
/// The reference zone is chosen when the codec is built. Resolving it from
/// a name happens once, up front, so a bad zone fails configuration rather
/// than the first encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampCodec {
    zone: Tz,
}

impl Default for TimestampCodec {
    fn default() -> Self {
        Self::new(DEFAULT_ZONE)
    }
}

impl TimestampCodec {
    pub const fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// Build a codec from an IANA zone name such as `"America/Mexico_City"`.
    pub fn from_zone_name(name: &str) -> Result<Self, Error> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| Error::UnknownTimeZone(name.to_owned()))
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Render `instant` as wall-clock time of the reference zone.
    pub fn encode(&self, instant: &DateTime<Utc>) -> String {
        instant.with_timezone(&self.zone).format(LAYOUT).to_string()
    }

    /// Parse an RFC 3339 value, surrounding JSON quotes allowed.
    pub fn try_decode(&self, raw: &str) -> Result<DateTime<Utc>, Error> {
        let value = strip_quotes(raw);
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| Error::InvalidTimestamp {
                value: value.to_owned(),
                message: e.to_string(),
            })
    }

    /// Like [`try_decode`](Self::try_decode), but an unparseable value
    /// yields [`FALLBACK`].
    pub fn decode(&self, raw: &str) -> DateTime<Utc> {
        self.try_decode(raw).unwrap_or_else(|e| {
            warn!(error = %e, "unparseable seenTime, using epoch");
            FALLBACK
        })
    }

    /// Parse a value produced by [`encode`](Self::encode), reading it as
    /// wall-clock time of the reference zone.
    ///
    /// Recovers the original instant. During a DST fold the earlier
    /// instant wins.
    pub fn decode_local(&self, raw: &str) -> Result<DateTime<Utc>, Error> {
        let value = strip_quotes(raw);
        let naive =
            NaiveDateTime::parse_from_str(value, LAYOUT).map_err(|e| Error::InvalidTimestamp {
                value: value.to_owned(),
                message: e.to_string(),
            })?;

        match self.zone.from_local_datetime(&naive) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
            LocalResult::None => Err(Error::InvalidTimestamp {
                value: value.to_owned(),
                message: format!("does not exist in {}", self.zone.name()),
            }),
        }
    }

    /// Wrap an instant so it serializes through this codec.
    pub fn stamp(&self, instant: DateTime<Utc>) -> Timestamp {
        Timestamp {
            instant,
            zone: self.zone,
        }
    }
}

fn strip_quotes(raw: &str) -> &str {
    raw.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw)
}

// ── Timestamp ────────────────────────────────────────────────────────

/// An instant plus the zone it is encoded in.
///
/// Serializes via [`TimestampCodec::encode`]. Deserializing never fails:
/// strings go through [`TimestampCodec::decode`], anything else (null,
/// numbers) becomes [`FALLBACK`]. Decoded values carry [`DEFAULT_ZONE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    instant: DateTime<Utc>,
    zone: Tz,
}

impl Timestamp {
    pub fn new(instant: DateTime<Utc>) -> Self {
        TimestampCodec::default().stamp(instant)
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// The same instant, encoded in `zone` from now on.
    pub fn in_zone(self, zone: Tz) -> Self {
        Self { zone, ..self }
    }

    /// Wall-clock reading in the encoding zone.
    pub fn local(&self) -> DateTime<Tz> {
        self.instant.with_timezone(&self.zone)
    }

    /// `true` when the wire value could not be parsed.
    pub fn is_fallback(&self) -> bool {
        self.instant == FALLBACK
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::new(FALLBACK)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::new(instant)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TimestampCodec::new(self.zone).encode(&self.instant))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl TimestampVisitor {
    fn fallback(kind: &str) -> Timestamp {
        warn!(kind, "non-string seenTime, using epoch");
        Timestamp::default()
    }
}

impl Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC 3339 timestamp string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
        Ok(Timestamp::new(TimestampCodec::default().decode(v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Timestamp, E> {
        Ok(Self::fallback("null"))
    }

    fn visit_none<E: de::Error>(self) -> Result<Timestamp, E> {
        Ok(Self::fallback("null"))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Timestamp, E> {
        Ok(Self::fallback("bool"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Timestamp, E> {
        Ok(Self::fallback("integer"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Timestamp, E> {
        Ok(Self::fallback("integer"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Timestamp, E> {
        Ok(Self::fallback("float"))
    }
}
