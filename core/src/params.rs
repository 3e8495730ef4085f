use serde::{Deserialize, Serialize};

/// Physical-unit scalars derived once from the radar configuration profile.
///
/// The TLV decoder does not need these for detected points or side info;
/// they exist for consumers converting raw bins to meters and m/s, and are
/// produced by the driver's config parser at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarParameters {
    pub num_range_bins: usize,
    pub num_doppler_bins: f32,
    pub range_resolution_meters: f32,
    pub doppler_resolution_mps: f32,
    pub max_range: f32,
    pub max_velocity: f32,
    pub frame_periodicity_ms: f32,
}
