//! Catalog of available scene times.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use goes_ingest::AbiFilename;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::CatalogError;

/// One available scene: its observation time and where to load it from.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub time: DateTime<Utc>,
    pub path: PathBuf,
}

/// The set of scene times available to the temporal selector, sorted by
/// time.
#[derive(Debug, Clone, Default)]
pub struct SceneCatalog {
    entries: Vec<CatalogEntry>,
}

impl SceneCatalog {
    /// Build a catalog from explicit entries (sorted on construction).
    pub fn new(mut entries: Vec<CatalogEntry>) -> Self {
        entries.sort_by_key(|e| e.time);
        Self { entries }
    }

    /// Scan a directory tree for ABI files of the given band.
    ///
    /// Files whose names don't parse as ABI products, or that carry a
    /// different band, are skipped with a warning; they are not errors.
    pub fn scan_dir<P: AsRef<Path>>(dir: P, band: u8) -> Result<Self, CatalogError> {
        let mut entries = Vec::new();

        for entry in WalkDir::new(dir.as_ref()) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("nc") {
                continue;
            }

            match AbiFilename::parse(path) {
                Ok(parsed) => {
                    if parsed.band == Some(band) {
                        entries.push(CatalogEntry {
                            time: parsed.start,
                            path: path.to_path_buf(),
                        });
                    } else {
                        debug!(path = %path.display(), band = ?parsed.band, "Skipping other-band file");
                    }
                }
                Err(_) => {
                    warn!(path = %path.display(), "Skipping file with unrecognized ABI name");
                }
            }
        }

        debug!(count = entries.len(), "Scanned scene directory");
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry closest in time to `target`. Equidistant neighbors
    /// resolve to the earlier scene.
    pub fn nearest(&self, target: DateTime<Utc>) -> Option<&CatalogEntry> {
        let mut best: Option<(&CatalogEntry, chrono::Duration)> = None;
        for entry in &self.entries {
            let distance = (entry.time - target).abs();
            match best {
                // strict comparison keeps the earlier entry on ties
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((entry, distance)),
            }
        }
        best.map(|(entry, _)| entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::fs::File;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 4, 15, 0, 0).unwrap()
    }

    fn entry(minutes: i64) -> CatalogEntry {
        CatalogEntry {
            time: t0() + Duration::minutes(minutes),
            path: PathBuf::from(format!("scene_{minutes}.nc")),
        }
    }

    #[test]
    fn test_entries_sorted() {
        let catalog = SceneCatalog::new(vec![entry(30), entry(0), entry(10)]);
        let times: Vec<_> = catalog.entries().iter().map(|e| e.time).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_nearest_prefers_earlier_on_tie() {
        let catalog = SceneCatalog::new(vec![entry(0), entry(20)]);
        // target at +10 min is equidistant from both
        let picked = catalog.nearest(t0() + Duration::minutes(10)).unwrap();
        assert_eq!(picked.time, t0());
    }

    #[test]
    fn test_nearest_empty() {
        assert!(SceneCatalog::default().nearest(t0()).is_none());
    }

    #[test]
    fn test_scan_missing_directory_fails() {
        let err = SceneCatalog::scan_dir("/nonexistent/archive", 13).unwrap_err();
        assert!(matches!(err, CatalogError::Walk(_)));
    }

    #[test]
    fn test_scan_dir_filters_band_and_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let names = [
            // band 13, should be kept
            "OR_ABI-L2-CMIPF-M6C13_G19_s20251241500204_e20251241509512_c20251241509586.nc",
            // band 2, skipped
            "OR_ABI-L2-CMIPF-M6C02_G19_s20251241500204_e20251241509512_c20251241509586.nc",
            // not an ABI name, skipped
            "notes.nc",
            // wrong extension, skipped
            "OR_ABI-L2-CMIPF-M6C13_G19_s20251241510204_e20251241519512_c20251241519586.txt",
        ];
        for name in names {
            File::create(dir.path().join(name)).unwrap();
        }

        let catalog = SceneCatalog::scan_dir(dir.path(), 13).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.entries()[0]
            .path
            .to_string_lossy()
            .contains("M6C13"));
    }
}
