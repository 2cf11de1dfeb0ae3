//! Per-flight processing: scene selection, cropping, reprojection,
//! rendering and figure assembly.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use campaign_common::{FlightTrack, Phase};
use compositor::{
    compose, encode_gif, encode_png, render_frame, AssemblyStyle, Sequence, SequenceMode,
};
use goes_ingest::load_scene;
use scene_ops::{
    crop_to_region, reproject, select_available, select_phases, CatalogEntry, SceneCatalog,
};
use tracing::info;

use crate::config::{CampaignConfig, FlightConfig};

/// Files produced for one flight.
#[derive(Debug)]
pub struct FlightOutput {
    pub id: String,
    pub figure: PathBuf,
    pub animation: Option<PathBuf>,
}

/// Run the whole pipeline for one flight and write its outputs.
pub fn run_flight(
    config: &CampaignConfig,
    catalog: &SceneCatalog,
    flight: &FlightConfig,
) -> Result<FlightOutput> {
    let track = FlightTrack::new(flight.track.clone())
        .with_context(|| format!("invalid track for flight {}", flight.id))?;

    let picks: Vec<(Phase, CatalogEntry)> = if config.allow_partial {
        select_available(&track, &config.offsets(), config.tolerance(), catalog)?
    } else {
        select_phases(&track, &config.offsets(), config.tolerance(), catalog)?
            .in_order()
            .iter()
            .map(|(phase, entry)| (*phase, (*entry).clone()))
            .collect()
    };

    let extent = config.region.bbox();
    let style = config.frame_style();
    let mut frames = Vec::with_capacity(picks.len());

    for (phase, entry) in &picks {
        let scene = load_scene(&entry.path, config.band)
            .with_context(|| format!("loading {}", entry.path.display()))?;
        let cropped = crop_to_region(&scene, &config.region)?;
        let raster = reproject(
            &cropped,
            &extent,
            config.output.width,
            config.output.height,
            config.resampling,
        )?;

        info!(
            flight = %flight.id,
            %phase,
            scene_time = %raster.time,
            "Rendered phase frame"
        );
        frames.push(render_frame(
            &raster,
            *phase,
            Some(&track),
            Some(&config.region),
            &style,
        ));
    }

    let mode = if config.allow_partial {
        SequenceMode::AllowPartial
    } else {
        SequenceMode::Strict
    };
    let sequence = Sequence::new(frames, mode)?;

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    let figure = compose(&sequence, &AssemblyStyle::default());
    let figure_path = config.output_dir.join(format!("{}.png", flight.id));
    fs::write(&figure_path, encode_png(&figure)?)
        .with_context(|| format!("writing {}", figure_path.display()))?;

    let animation = if config.output.animation {
        let gif_path = config.output_dir.join(format!("{}.gif", flight.id));
        fs::write(&gif_path, encode_gif(&sequence, config.output.gif_delay_ms)?)
            .with_context(|| format!("writing {}", gif_path.display()))?;
        Some(gif_path)
    } else {
        None
    };

    Ok(FlightOutput {
        id: flight.id.clone(),
        figure: figure_path,
        animation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_common::TrackPoint;
    use chrono::{TimeZone, Utc};

    fn minimal_config(dir: &std::path::Path) -> CampaignConfig {
        serde_yaml::from_str(&format!(
            r#"
name: test
scene_dir: {0}
output_dir: {0}
region:
  type: bbox
  min_lon: -80.0
  min_lat: -3.0
  max_lon: -76.0
  max_lat: 1.0
flights:
  - id: f1
    track:
      - {{ time: "2025-05-04T14:30:00Z", lon: -79.0, lat: -1.0 }}
      - {{ time: "2025-05-04T15:10:00Z", lon: -78.5, lat: -1.5 }}
"#,
            dir.display()
        ))
        .unwrap()
    }

    #[test]
    fn test_empty_catalog_fails_flight() {
        let dir = tempfile::tempdir().unwrap();
        let config = minimal_config(dir.path());
        let catalog = SceneCatalog::default();

        let err = run_flight(&config, &catalog, &config.flights[0]).unwrap_err();
        assert!(err.to_string().contains("catalog is empty"));
    }

    #[test]
    fn test_invalid_track_fails_flight() {
        let dir = tempfile::tempdir().unwrap();
        let config = minimal_config(dir.path());
        let t = Utc.with_ymd_and_hms(2025, 5, 4, 15, 0, 0).unwrap();
        let flight = FlightConfig {
            id: "bad".to_string(),
            track: vec![
                TrackPoint { time: t, lon: -79.0, lat: -1.0 },
                TrackPoint { time: t, lon: -78.9, lat: -1.1 },
            ],
        };

        let err = run_flight(&config, &SceneCatalog::default(), &flight).unwrap_err();
        assert!(err.to_string().contains("invalid track"));
    }
}
