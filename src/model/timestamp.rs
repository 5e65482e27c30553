use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// `YYYY-MM-DDTHH:MM:SS±HHMM` — the document store's fixed timestamp format
/// (`2006-01-02T15:04:05-0700` in the original's notation). Deliberately not
/// RFC 3339: no colon in the offset.
const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub DateTime<FixedOffset>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Local::now().fixed_offset())
    }

    pub fn to_fixed_string(self) -> String {
        self.0.format(FORMAT).to_string()
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self(value)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_fixed_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_str(&raw, FORMAT)
            .map(Timestamp)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_fixed_format() {
        let ts = Timestamp::now();
        let formatted = ts.to_fixed_string();
        let parsed = DateTime::parse_from_str(&formatted, FORMAT).unwrap();
        assert_eq!(ts.0.timestamp(), parsed.timestamp());
        assert!(!formatted.is_empty());
        let offset_part = &formatted[formatted.len() - 5..];
        assert!(offset_part.starts_with('+') || offset_part.starts_with('-'));
        assert!(!offset_part.contains(':'));
    }
}
