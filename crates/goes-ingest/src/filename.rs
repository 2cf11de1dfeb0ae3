//! ABI file name parsing.
//!
//! Operational ABI products follow the NOAA naming convention, e.g.
//! `OR_ABI-L2-CMIPF-M6C13_G19_s20251241500204_e20251241509512_c20251241509586.nc`.
//! The `_s` field encodes the scan start time as `YYYYJJJHHMMSSd` (Julian
//! day of year, tenths of a second). Parsing the name is enough to build a
//! scene catalog without opening each file.

use crate::error::{LoadError, LoadResult};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::path::Path;

/// Fields extracted from an ABI product file name.
#[derive(Debug, Clone, PartialEq)]
pub struct AbiFilename {
    /// Satellite identifier, e.g. "G19"
    pub satellite: String,
    /// ABI band (1-16), when the product name carries one
    pub band: Option<u8>,
    /// Scan sector, e.g. "FullDisk", "CONUS", "Mesoscale"
    pub sector: Option<&'static str>,
    /// Scan start time from the `_s` field
    pub start: DateTime<Utc>,
}

impl AbiFilename {
    /// Parse an ABI file name (path or bare name).
    pub fn parse<P: AsRef<Path>>(path: P) -> LoadResult<Self> {
        let name = path
            .as_ref()
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| LoadError::Filename(path.as_ref().display().to_string()))?;

        let tokens: Vec<&str> = name.trim_end_matches(".nc").split('_').collect();

        let start = tokens
            .iter()
            .find_map(|t| parse_start_field(t))
            .ok_or_else(|| LoadError::Filename(name.to_string()))?;

        let satellite = tokens
            .iter()
            .find(|t| t.len() == 3 && t.starts_with('G') && t[1..].chars().all(|c| c.is_ascii_digit()))
            .map(|t| t.to_string())
            .unwrap_or_else(|| "GOES".to_string());

        let product = tokens.iter().find(|t| t.contains("ABI"));

        let band = product.and_then(|t| parse_band(t));
        let sector = product.and_then(|t| {
            if t.contains("CMIPF") {
                Some("FullDisk")
            } else if t.contains("CMIPC") {
                Some("CONUS")
            } else if t.contains("CMIPM") {
                Some("Mesoscale")
            } else {
                None
            }
        });

        Ok(AbiFilename {
            satellite,
            band,
            sector,
            start,
        })
    }
}

/// Decode `sYYYYJJJHHMMSSd` (d = tenths of a second).
fn parse_start_field(token: &str) -> Option<DateTime<Utc>> {
    let digits = token.strip_prefix('s')?;
    if digits.len() != 14 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let year: i32 = digits[0..4].parse().ok()?;
    let doy: u32 = digits[4..7].parse().ok()?;
    let hour: u32 = digits[7..9].parse().ok()?;
    let minute: u32 = digits[9..11].parse().ok()?;
    let second: u32 = digits[11..13].parse().ok()?;
    let tenths: i64 = digits[13..14].parse().ok()?;

    let date = NaiveDate::from_yo_opt(year, doy)?;
    let naive = date.and_hms_opt(hour, minute, second)?;
    Some(Utc.from_utc_datetime(&naive) + Duration::milliseconds(tenths * 100))
}

/// Band number from the mode/channel suffix, e.g. "...-M6C13" -> 13.
fn parse_band(product: &str) -> Option<u8> {
    let idx = product.rfind('C')?;
    let digits = &product[idx + 1..];
    if digits.len() == 2 && digits.chars().all(|c| c.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    const FULL_DISK: &str =
        "OR_ABI-L2-CMIPF-M6C13_G19_s20251241500204_e20251241509512_c20251241509586.nc";

    #[test]
    fn test_parse_full_disk_name() {
        let parsed = AbiFilename::parse(FULL_DISK).unwrap();

        assert_eq!(parsed.satellite, "G19");
        assert_eq!(parsed.band, Some(13));
        assert_eq!(parsed.sector, Some("FullDisk"));

        // 2025 day-of-year 124 = May 4
        let start = parsed.start;
        assert_eq!(start.format("%Y-%m-%d").to_string(), "2025-05-04");
        assert_eq!(start.hour(), 15);
        assert_eq!(start.minute(), 0);
        assert_eq!(start.second(), 20);
    }

    #[test]
    fn test_parse_with_directory() {
        let parsed = AbiFilename::parse(format!("/data/raw/{}", FULL_DISK)).unwrap();
        assert_eq!(parsed.satellite, "G19");
    }

    #[test]
    fn test_parse_mesoscale_sector() {
        let name = "OR_ABI-L2-CMIPM1-M6C13_G19_s20251241500204_e20251241500521_c20251241500587.nc";
        let parsed = AbiFilename::parse(name).unwrap();
        assert_eq!(parsed.sector, Some("Mesoscale"));
        assert_eq!(parsed.band, Some(13));
    }

    #[test]
    fn test_reject_non_abi_name() {
        assert!(matches!(
            AbiFilename::parse("random_file.nc"),
            Err(LoadError::Filename(_))
        ));
    }

    #[test]
    fn test_reject_malformed_start_field() {
        // 13 digits instead of 14
        let name = "OR_ABI-L2-CMIPF-M6C13_G19_s2025124150020_e20251241509512_c20251241509586.nc";
        assert!(AbiFilename::parse(name).is_err());
    }
}
