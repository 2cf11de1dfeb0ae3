//! Temporal selection of before/during/after scenes for a flight.

use campaign_common::{FlightTrack, Phase};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::catalog::{CatalogEntry, SceneCatalog};
use crate::error::SelectError;

/// Lead/lag offsets defining the phase target times relative to a flight.
#[derive(Debug, Clone, Copy)]
pub struct PhaseOffsets {
    /// How long before takeoff the "before" frame should be
    pub before_lead: Duration,
    /// How long after landing the "after" frame should be
    pub after_lag: Duration,
}

impl Default for PhaseOffsets {
    fn default() -> Self {
        Self {
            before_lead: Duration::minutes(60),
            after_lag: Duration::minutes(60),
        }
    }
}

impl PhaseOffsets {
    /// The target observation time for one phase of a flight.
    ///
    /// before = takeoff - lead, during = flight midpoint,
    /// after = landing + lag.
    pub fn target(&self, track: &FlightTrack, phase: Phase) -> DateTime<Utc> {
        match phase {
            Phase::Before => track.takeoff() - self.before_lead,
            Phase::During => track.midpoint(),
            Phase::After => track.landing() + self.after_lag,
        }
    }
}

/// The scene chosen for each phase of one flight.
#[derive(Debug, Clone)]
pub struct PhaseSelection {
    pub before: CatalogEntry,
    pub during: CatalogEntry,
    pub after: CatalogEntry,
}

impl PhaseSelection {
    /// Entries in comparison order, paired with their phase.
    pub fn in_order(&self) -> [(Phase, &CatalogEntry); 3] {
        [
            (Phase::Before, &self.before),
            (Phase::During, &self.during),
            (Phase::After, &self.after),
        ]
    }
}

/// Select the nearest available scene for each phase of a flight.
///
/// The tolerance boundary is inclusive: a scene exactly `tolerance` away
/// from the target still qualifies. Every phase must resolve; a single gap
/// fails the whole selection, because an incomplete before/during/after
/// set invalidates the comparison.
pub fn select_phases(
    track: &FlightTrack,
    offsets: &PhaseOffsets,
    tolerance: Duration,
    catalog: &SceneCatalog,
) -> Result<PhaseSelection, SelectError> {
    if catalog.is_empty() {
        return Err(SelectError::EmptyCatalog);
    }

    let pick = |phase: Phase| -> Result<CatalogEntry, SelectError> {
        let target = offsets.target(track, phase);
        let entry = catalog
            .nearest(target)
            .filter(|e| (e.time - target).abs() <= tolerance)
            .ok_or(SelectError::NoScenesAvailable {
                phase,
                target,
                tolerance_minutes: tolerance.num_minutes(),
            })?;

        debug!(
            %phase,
            %target,
            scene_time = %entry.time,
            offset_s = (entry.time - target).num_seconds(),
            "Selected scene for phase"
        );
        Ok(entry.clone())
    };

    Ok(PhaseSelection {
        before: pick(Phase::Before)?,
        during: pick(Phase::During)?,
        after: pick(Phase::After)?,
    })
}

/// Select scenes for the phases that have one, skipping gaps.
///
/// Same targets and tolerance as [`select_phases`], but a phase without a
/// qualifying scene is dropped instead of failing the flight. The result
/// keeps before/during/after order and may be empty.
pub fn select_available(
    track: &FlightTrack,
    offsets: &PhaseOffsets,
    tolerance: Duration,
    catalog: &SceneCatalog,
) -> Result<Vec<(Phase, CatalogEntry)>, SelectError> {
    if catalog.is_empty() {
        return Err(SelectError::EmptyCatalog);
    }

    let mut picked = Vec::with_capacity(3);
    for &phase in Phase::all() {
        let target = offsets.target(track, phase);
        match catalog
            .nearest(target)
            .filter(|e| (e.time - target).abs() <= tolerance)
        {
            Some(entry) => picked.push((phase, entry.clone())),
            None => warn!(%phase, %target, "No scene within tolerance, dropping phase"),
        }
    }
    Ok(picked)
}
