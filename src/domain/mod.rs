// Domain layer - Transient view models shared by every panel
pub mod company;
pub mod envelope;
pub mod flow;
pub mod hotspot;
pub mod industry;
pub mod market_index;
pub mod ranking;
pub mod rotation;
pub mod stock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Wall-clock timestamps without an offset are Beijing time.
const BACKEND_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Epoch values below this are seconds, above it milliseconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Backend ids and stock codes arrive either as JSON strings or numbers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Epoch(i64),
    EpochFloat(f64),
    Text(String),
}

fn from_epoch(value: i64) -> Option<DateTime<Utc>> {
    if value.abs() < EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp(value, 0)
    } else {
        DateTime::from_timestamp_millis(value)
    }
}

fn epoch(value: i64) -> Result<Option<DateTime<Utc>>, String> {
    from_epoch(value)
        .map(Some)
        .ok_or_else(|| format!("epoch out of range: {value}"))
}

fn from_backend_local(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    FixedOffset::east_opt(BACKEND_UTC_OFFSET_SECS)?
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse the timestamp shapes the backend is known to emit. `Ok(None)` is a
/// blank value.
fn parse_timestamp(raw: RawTimestamp) -> Result<Option<DateTime<Utc>>, String> {
    let text = match raw {
        RawTimestamp::Epoch(n) => return epoch(n),
        RawTimestamp::EpochFloat(f) => return epoch(f as i64),
        RawTimestamp::Text(text) => text,
    };

    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return from_backend_local(naive)
                .map(Some)
                .ok_or_else(|| format!("invalid local time: {text}"));
        }
    }
    if let Some(naive) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return from_backend_local(naive)
            .map(Some)
            .ok_or_else(|| format!("invalid local time: {text}"));
    }
    if let Ok(n) = text.parse::<i64>() {
        return epoch(n);
    }
    Err(format!("unrecognised timestamp: {text}"))
}

/// Timestamp that may be missing, null or blank.
pub(crate) fn optional_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawTimestamp>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(raw).map_err(D::Error::custom),
        None => Ok(None),
    }
}

/// Timestamp of a record; a null or blank value means "now".
pub(crate) fn datetime_or_now<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_datetime(deserializer)?.unwrap_or_else(Utc::now))
}
