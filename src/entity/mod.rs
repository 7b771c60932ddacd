mod item;
mod kind;

pub use item::{normalize_title, Collection, Item, ItemUpdate, UNTITLED};
pub use kind::{ItemStatus, ItemType};

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A UTC instant kept in its stored text form.
///
/// Values minted by the engine are RFC 3339 with microseconds and a `Z`
/// suffix, so they sort lexically. Values read back from disk are kept
/// verbatim even when they no longer parse; decay treats those as expired.
/// Non-string values (numbers, `null` where a date is required) are kept as
/// their JSON text, which never parses.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the stored text. Accepts any RFC 3339 offset and naive ISO
    /// date-times, which are read as UTC.
    pub fn parse(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.0) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.0, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// The `YYYY-MM-DD` prefix used on board cards.
    pub fn date(&self) -> &str {
        self.0.get(..10).unwrap_or(&self.0)
    }

    #[cfg(test)]
    pub(crate) fn raw(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => Self(text),
            Value::Null => Self::default(),
            other => Self(other.to_string()),
        })
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
