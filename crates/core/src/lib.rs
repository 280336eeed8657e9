use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Payload prefix a sender uses to declare how many events it generated.
pub const END_MARKER: &str = "---end---";

/// Passthrough value stored under `fields`; null, bool, number, string,
/// array or nested object.
pub type FieldValue = serde_json::Value;

/// One record of the collector intake protocol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Epoch seconds, accepted on the wire as a number or a numeric string.
    #[serde(
        default,
        deserialize_with = "deserialize_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub host: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub source: String,
    #[serde(
        default,
        rename = "sourcetype",
        alias = "sourceType",
        deserialize_with = "deserialize_nullable_string"
    )]
    pub source_type: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub index: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, FieldValue>>,
}

impl Event {
    pub fn new(source: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            event: event.into(),
            ..Self::default()
        }
    }
}

fn deserialize_time<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTime {
        Number(f64),
        Text(String),
    }

    match Option::<RawTime>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawTime::Number(value)) => Ok(Some(value)),
        Some(RawTime::Text(raw)) => raw
            .parse::<f64>()
            .map(Some)
            .map_err(|_| DeError::custom(format!("invalid time value {raw:?}"))),
    }
}

fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Running counters for one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStat {
    pub events_received: u64,
    pub bytes_received: u64,
    pub begin_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub generated_count: u64,
}

impl SourceStat {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            events_received: 0,
            bytes_received: 0,
            begin_time: now,
            end_time: now,
            generated_count: 1,
        }
    }

    /// Seconds between the first and the latest event, with microsecond
    /// resolution.
    pub fn elapsed_seconds(&self) -> f64 {
        let elapsed = self.end_time - self.begin_time;
        match elapsed.num_microseconds() {
            Some(micros) => micros as f64 / 1_000_000.0,
            None => elapsed.num_milliseconds() as f64 / 1_000.0,
        }
    }
}

/// Per-source report row returned by the summary query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    pub source: String,
    #[serde(serialize_with = "serialize_metric")]
    pub eps: f64,
    pub events_received: u64,
    pub bytes_received: u64,
    /// Bytes received in mebibytes (bytes / 1024 / 1024).
    #[serde(rename = "throughputMB", serialize_with = "serialize_metric")]
    pub throughput_mb: f64,
    /// Fraction of the declared generated count that arrived, not a percentage.
    #[serde(serialize_with = "serialize_metric")]
    pub data_ingest_ratio: f64,
    pub generated_count: u64,
    pub begin_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Writes finite floats as JSON numbers and everything else as
/// `"Inf"`, `"-Inf"` or `"NaN"`; JSON has no literal for those.
pub fn serialize_metric<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if value.is_sign_positive() {
        serializer.serialize_str("Inf")
    } else {
        serializer.serialize_str("-Inf")
    }
}
