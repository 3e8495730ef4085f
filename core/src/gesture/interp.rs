use ndarray::Array2;

use crate::gesture::aggregate::{AveragePoint, CHANNELS};

/// One finished gesture sample: a dense `window_size x 8` channel matrix in
/// `(x, y, z, doppler, range, snr, azimuth, elevation)` column order. The
/// timestamp channel is dropped at this stage.
#[derive(Debug, Clone)]
pub struct GestureSample {
    pub index: u64,
    pub data: Array2<f32>,
}

impl GestureSample {
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }
}

/// Builds the dense sample from a completed window, filling dropped-frame
/// holes by per-channel linear interpolation.
///
/// Exact zeros are treated as missing observations. Gaps between two real
/// observations are filled linearly; zero runs before the first or after
/// the last real observation are left untouched since there is nothing to
/// interpolate from, and an entirely empty channel stays zero.
pub fn finalize(window: &[AveragePoint], index: u64) -> GestureSample {
    let mut data = Array2::<f32>::zeros((window.len(), CHANNELS));
    for (row, point) in window.iter().enumerate() {
        for (col, value) in point.channels().into_iter().enumerate() {
            data[[row, col]] = value;
        }
    }
    for col in 0..CHANNELS {
        let channel: Vec<f32> = data.column(col).to_vec();
        for (row, value) in interpolate_channel(&channel).into_iter().enumerate() {
            data[[row, col]] = value;
        }
    }
    GestureSample { index, data }
}

/// Linear fill over interior zero runs of one channel.
fn interpolate_channel(values: &[f32]) -> Vec<f32> {
    let mut out = values.to_vec();
    let observed: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v != 0.0)
        .map(|(i, _)| i)
        .collect();
    for pair in observed.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if hi - lo < 2 {
            continue;
        }
        let span = (hi - lo) as f32;
        for row in lo + 1..hi {
            let t = (row - lo) as f32 / span;
            out[row] = values[lo] + (values[hi] - values[lo]) * t;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_gap_is_linearly_filled() {
        assert_eq!(
            interpolate_channel(&[0.0, 0.0, 5.0, 0.0, 10.0, 0.0, 0.0]),
            vec![0.0, 0.0, 5.0, 7.5, 10.0, 0.0, 0.0]
        );
    }

    #[test]
    fn multi_row_gap_interpolates_evenly() {
        assert_eq!(
            interpolate_channel(&[2.0, 0.0, 0.0, 0.0, 10.0]),
            vec![2.0, 4.0, 6.0, 8.0, 10.0]
        );
    }

    #[test]
    fn empty_channel_stays_zero() {
        assert_eq!(interpolate_channel(&[0.0; 5]), vec![0.0; 5]);
    }

    #[test]
    fn single_observation_fills_nothing() {
        assert_eq!(
            interpolate_channel(&[0.0, 3.0, 0.0]),
            vec![0.0, 3.0, 0.0]
        );
    }

    #[test]
    fn finalize_builds_dense_channel_matrix() {
        let mut window = vec![AveragePoint::zero(0.0); 5];
        window[1].range = 5.0;
        window[3].range = 10.0;
        window[1].doppler = 1.0;
        window[3].doppler = -1.0;

        let sample = finalize(&window, 4);
        assert_eq!(sample.index, 4);
        assert_eq!(sample.data.dim(), (5, CHANNELS));
        // range column: leading/trailing holes kept, interior gap filled.
        assert_eq!(sample.data[[0, 4]], 0.0);
        assert_eq!(sample.data[[2, 4]], 7.5);
        assert_eq!(sample.data[[4, 4]], 0.0);
        // doppler crosses zero halfway; the 0.0 midpoint is a hole that
        // interpolates to an exact zero again.
        assert_eq!(sample.data[[2, 3]], 0.0);
    }
}
