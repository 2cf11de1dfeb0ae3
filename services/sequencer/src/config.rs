//! Campaign configuration file.
//!
//! One YAML file describes a campaign: where the scene archive lives, the
//! region of interest, phase timing, output settings, and the flights to
//! process.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use campaign_common::{Region, TrackPoint};
use chrono::Duration;
use compositor::{ColorRamp, ColorStop, FrameStyle};
use scene_ops::{PhaseOffsets, Resampling};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CampaignConfig {
    /// Campaign name, used in log output only.
    pub name: String,
    /// Directory tree holding the downloaded ABI NetCDF files.
    pub scene_dir: PathBuf,
    /// Where figures are written.
    pub output_dir: PathBuf,
    /// ABI band to process.
    #[serde(default = "default_band")]
    pub band: u8,
    /// Region of interest drawn on every frame and used as the crop extent.
    pub region: Region,
    #[serde(default)]
    pub phases: PhaseTimingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub resampling: Resampling,
    /// Override of the default IR color ramp: at least two stops mapping a
    /// brightness temperature (Kelvin) to a color.
    #[serde(default)]
    pub color_ramp: Option<Vec<ColorStop>>,
    /// Accept flights for which not all three phases have a scene.
    #[serde(default)]
    pub allow_partial: bool,
    pub flights: Vec<FlightConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlightConfig {
    /// Flight identifier, used as the output file stem.
    pub id: String,
    pub track: Vec<TrackPoint>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseTimingConfig {
    #[serde(default = "default_lead_lag")]
    pub before_lead_minutes: i64,
    #[serde(default = "default_lead_lag")]
    pub after_lag_minutes: i64,
    #[serde(default = "default_tolerance")]
    pub tolerance_minutes: i64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    /// Also write an animated GIF next to each comparison figure.
    #[serde(default)]
    pub animation: bool,
    #[serde(default = "default_gif_delay")]
    pub gif_delay_ms: u32,
}

fn default_band() -> u8 {
    goes_ingest::BAND_13
}

fn default_lead_lag() -> i64 {
    60
}

fn default_tolerance() -> i64 {
    15
}

fn default_width() -> usize {
    640
}

fn default_height() -> usize {
    480
}

fn default_gif_delay() -> u32 {
    500
}

impl Default for PhaseTimingConfig {
    fn default() -> Self {
        Self {
            before_lead_minutes: default_lead_lag(),
            after_lag_minutes: default_lead_lag(),
            tolerance_minutes: default_tolerance(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            animation: false,
            gif_delay_ms: default_gif_delay(),
        }
    }
}

impl CampaignConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: CampaignConfig = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.region
            .validate()
            .context("invalid region definition")?;

        if self.flights.is_empty() {
            bail!("config lists no flights");
        }
        let mut ids: Vec<&str> = self.flights.iter().map(|f| f.id.as_str()).collect();
        ids.sort_unstable();
        for window in ids.windows(2) {
            if window[0] == window[1] {
                bail!("duplicate flight id {:?}", window[0]);
            }
        }

        if self.phases.tolerance_minutes <= 0 {
            bail!("tolerance_minutes must be positive");
        }
        if let Some(stops) = &self.color_ramp {
            if stops.len() < 2 {
                bail!("color_ramp needs at least 2 stops, got {}", stops.len());
            }
        }
        if self.output.width == 0 || self.output.height == 0 {
            bail!("output dimensions must be non-zero");
        }
        Ok(())
    }

    pub fn offsets(&self) -> PhaseOffsets {
        PhaseOffsets {
            before_lead: Duration::minutes(self.phases.before_lead_minutes),
            after_lag: Duration::minutes(self.phases.after_lag_minutes),
        }
    }

    pub fn tolerance(&self) -> Duration {
        Duration::minutes(self.phases.tolerance_minutes)
    }

    /// Frame style with the configured color ramp applied, defaults
    /// otherwise.
    pub fn frame_style(&self) -> FrameStyle {
        let mut style = FrameStyle::default();
        if let Some(ramp) = self
            .color_ramp
            .as_ref()
            .and_then(|stops| ColorRamp::new(stops.clone()))
        {
            style.ramp = ramp;
        }
        style
    }
}
