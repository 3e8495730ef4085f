use serde::{Deserialize, Serialize};

use crate::decode::frame::FrameDetection;

/// Scalar channels carried per aggregated point, in sample-column order.
pub const CHANNELS: usize = 8;

/// Mean feature point for one frame, stamped with its receive time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AveragePoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub doppler: f32,
    pub range: f32,
    pub snr: f32,
    pub azimuth: f32,
    pub elevation: f32,
    pub timestamp: f64,
}

impl AveragePoint {
    pub fn zero(timestamp: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            doppler: 0.0,
            range: 0.0,
            snr: 0.0,
            azimuth: 0.0,
            elevation: 0.0,
            timestamp,
        }
    }

    /// Channel values in `(x, y, z, doppler, range, snr, azimuth, elevation)`
    /// order.
    pub fn channels(&self) -> [f32; CHANNELS] {
        [
            self.x,
            self.y,
            self.z,
            self.doppler,
            self.range,
            self.snr,
            self.azimuth,
            self.elevation,
        ]
    }
}

/// Reduces a frame's point cloud to one representative point.
pub struct PointAggregator;

impl PointAggregator {
    /// Arithmetic mean over the nonzero-Doppler points, rejecting stationary
    /// clutter. An empty filtered set collapses to an all-zero point carrying
    /// `timestamp`, which interpolation later treats as a dropped row.
    pub fn aggregate(frame: &FrameDetection, timestamp: f64) -> AveragePoint {
        let Some(points) = frame.points.as_ref() else {
            return AveragePoint::zero(timestamp);
        };
        let mut sums = [0.0f32; CHANNELS];
        let mut count = 0usize;
        for point in points.iter().filter(|p| p.doppler != 0.0) {
            sums[0] += point.x;
            sums[1] += point.y;
            sums[2] += point.z;
            sums[3] += point.doppler;
            sums[4] += point.range;
            sums[5] += point.snr_db;
            sums[6] += point.azimuth_deg;
            sums[7] += point.elevation_deg;
            count += 1;
        }
        if count == 0 {
            return AveragePoint::zero(timestamp);
        }
        let n = count as f32;
        AveragePoint {
            x: sums[0] / n,
            y: sums[1] / n,
            z: sums[2] / n,
            doppler: sums[3] / n,
            range: sums[4] / n,
            snr: sums[5] / n,
            azimuth: sums[6] / n,
            elevation: sums[7] / n,
            timestamp,
        }
    }
}
