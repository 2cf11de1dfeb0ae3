//! Timestamp parsing helpers.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),
}

/// Parse a UTC timestamp from campaign metadata.
///
/// Accepts RFC 3339 ("2025-05-04T15:00:00Z"), a naive datetime assumed UTC
/// ("2025-05-04T15:00:00"), or a bare date (midnight UTC).
pub fn parse_utc(s: &str) -> Result<DateTime<Utc>, TimeParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(&format!("{}T00:00:00", s), "%Y-%m-%dT%H:%M:%S")
    {
        return Ok(Utc.from_utc_datetime(&ndt));
    }

    Err(TimeParseError::InvalidFormat(s.to_string()))
}

/// Serde helper: deserialize a `DateTime<Utc>` through [`parse_utc`], so
/// campaign YAML may omit the timezone suffix.
pub fn deserialize_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = serde::Deserialize::deserialize(deserializer)?;
    parse_utc(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_utc("2025-05-04T15:30:00Z").unwrap();
        assert_eq!(dt.hour(), 15);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn test_parse_naive_assumes_utc() {
        let with_z = parse_utc("2025-05-04T15:30:00Z").unwrap();
        let without = parse_utc("2025-05-04T15:30:00").unwrap();
        assert_eq!(with_z, without);
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_utc("2025-05-04").unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_utc("not a time").is_err());
    }
}
