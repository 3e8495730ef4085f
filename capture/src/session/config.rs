use anyhow::Context;
use gesturecore::params::RadarParameters;
use gesturecore::prelude::{PipelineConfig, TriggerConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SPEED_OF_LIGHT: f32 = 3.0e8;

/// Fatal configuration failures. A capture session never starts without
/// valid derived radar parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("radar configuration is missing a {0} directive")]
    MissingDirective(&'static str),
    #[error("malformed {directive} directive: {reason}")]
    Malformed {
        directive: &'static str,
        reason: String,
    },
    #[error("no chirpCfg directives found; transmit antenna count is zero")]
    NoTransmitAntennas,
}

/// Capture session settings, loaded from YAML or assembled from CLI flags.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Radar configuration file to derive physical parameters from.
    #[serde(default)]
    pub radar_config: Option<PathBuf>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_base_name")]
    pub base_name: String,
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default = "default_pretrigger_len")]
    pub pretrigger_len: usize,
    #[serde(default = "default_ring_capacity")]
    pub ring_capacity: usize,
    #[serde(default)]
    pub trigger: TriggerConfig,
    /// Bytes requested from the source per read.
    #[serde(default = "default_chunk_len")]
    pub chunk_len: usize,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("gesture_data")
}

fn default_base_name() -> String {
    "gesture".to_string()
}

fn default_window_size() -> usize {
    25
}

fn default_pretrigger_len() -> usize {
    10
}

fn default_ring_capacity() -> usize {
    1 << 15
}

fn default_chunk_len() -> usize {
    4096
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            radar_config: None,
            output_dir: default_output_dir(),
            base_name: default_base_name(),
            window_size: default_window_size(),
            pretrigger_len: default_pretrigger_len(),
            ring_capacity: default_ring_capacity(),
            trigger: TriggerConfig::default(),
            chunk_len: default_chunk_len(),
        }
    }
}

impl CaptureConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading session config {}", path_ref.display()))?;
        let config: CaptureConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing session config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            ring_capacity: self.ring_capacity,
            window_size: self.window_size,
            pretrigger_len: self.pretrigger_len,
            trigger: self.trigger,
        }
    }
}

/// Reads a radar `.cfg` file and derives the physical parameters.
pub fn load_radar_parameters<P: AsRef<Path>>(path: P) -> anyhow::Result<RadarParameters> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading radar config {}", path_ref.display()))?;
    parse_radar_config(contents.lines()).map_err(Into::into)
}

struct ProfileCfg {
    start_freq_ghz: f32,
    idle_time_us: f32,
    ramp_end_time_us: f32,
    freq_slope_mhz_per_us: f32,
    num_adc_samples: usize,
    sample_rate_ksps: f32,
}

struct FrameCfg {
    chirp_start_idx: f32,
    chirp_end_idx: f32,
    num_loops: f32,
    periodicity_ms: f32,
}

/// Derives `RadarParameters` from the line-oriented configuration sent to
/// the sensor's control channel. Only `profileCfg`, `frameCfg`, and
/// `chirpCfg` matter here; every other directive passes through untouched.
pub fn parse_radar_config<'a, I>(lines: I) -> Result<RadarParameters, ConfigError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut profile: Option<ProfileCfg> = None;
    let mut frame: Option<FrameCfg> = None;
    let mut num_tx_antennas = 0usize;

    for line in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.first().copied() {
            Some("profileCfg") => {
                profile = Some(ProfileCfg {
                    // The sensor accepts fractional start frequencies but the
                    // derivation uses the integer part, as the demo firmware does.
                    start_freq_ghz: field::<f32>(&tokens, 2, "profileCfg")?.trunc(),
                    idle_time_us: field(&tokens, 3, "profileCfg")?,
                    ramp_end_time_us: field(&tokens, 5, "profileCfg")?,
                    freq_slope_mhz_per_us: field(&tokens, 8, "profileCfg")?,
                    num_adc_samples: field(&tokens, 10, "profileCfg")?,
                    sample_rate_ksps: field(&tokens, 11, "profileCfg")?,
                });
            }
            Some("frameCfg") => {
                frame = Some(FrameCfg {
                    chirp_start_idx: field(&tokens, 1, "frameCfg")?,
                    chirp_end_idx: field(&tokens, 2, "frameCfg")?,
                    num_loops: field(&tokens, 3, "frameCfg")?,
                    periodicity_ms: field(&tokens, 5, "frameCfg")?,
                });
            }
            Some("chirpCfg") => num_tx_antennas += 1,
            _ => {}
        }
    }

    let profile = profile.ok_or(ConfigError::MissingDirective("profileCfg"))?;
    let frame = frame.ok_or(ConfigError::MissingDirective("frameCfg"))?;
    if num_tx_antennas == 0 {
        return Err(ConfigError::NoTransmitAntennas);
    }
    let num_tx = num_tx_antennas as f32;

    let num_chirps_per_frame =
        (frame.chirp_end_idx - frame.chirp_start_idx + 1.0) * frame.num_loops;
    let num_doppler_bins = num_chirps_per_frame / num_tx;
    let chirp_cycle_s = (profile.idle_time_us + profile.ramp_end_time_us) * 1e-6;
    let start_freq_hz = profile.start_freq_ghz * 1e9;

    Ok(RadarParameters {
        num_range_bins: profile.num_adc_samples.next_power_of_two(),
        num_doppler_bins,
        range_resolution_meters: (SPEED_OF_LIGHT * profile.sample_rate_ksps * 1e3)
            / (2.0 * profile.freq_slope_mhz_per_us * 1e12 * profile.num_adc_samples as f32),
        doppler_resolution_mps: SPEED_OF_LIGHT
            / (2.0 * start_freq_hz * chirp_cycle_s * num_doppler_bins * num_tx),
        max_range: (300.0 * 0.9 * profile.sample_rate_ksps)
            / (2.0 * profile.freq_slope_mhz_per_us * 1e3),
        max_velocity: SPEED_OF_LIGHT / (4.0 * start_freq_hz * chirp_cycle_s * num_tx),
        frame_periodicity_ms: frame.periodicity_ms,
    })
}

fn field<T: std::str::FromStr>(
    tokens: &[&str],
    index: usize,
    directive: &'static str,
) -> Result<T, ConfigError> {
    let raw = tokens.get(index).ok_or(ConfigError::Malformed {
        directive,
        reason: format!("missing field {}", index),
    })?;
    raw.parse().map_err(|_| ConfigError::Malformed {
        directive,
        reason: format!("field {} ({:?}) is not numeric", index, raw),
    })
}
