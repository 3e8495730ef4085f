use std::collections::VecDeque;

use crate::prelude::TriggerConfig;

/// State change reported by one trigger update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEdge {
    /// Rising edge: gesture onset.
    Onset,
    /// Falling edge: motion energy has decayed back to the background.
    Offset,
}

/// STA/LTA hysteresis detector over the per-frame mean SNR.
///
/// The long-term window freezes while a gesture is active so the background
/// estimate is not contaminated by motion energy; the short-term window
/// keeps tracking live energy so the falling-edge test can fire once the
/// motion decays. Between the two ratio thresholds the state holds, which
/// suppresses chatter.
pub struct TriggerDetector {
    config: TriggerConfig,
    sta: VecDeque<f32>,
    lta: VecDeque<f32>,
    active: bool,
}

impl TriggerDetector {
    pub fn new(config: TriggerConfig) -> Self {
        Self {
            sta: VecDeque::with_capacity(config.sta_len),
            lta: VecDeque::with_capacity(config.lta_len),
            config,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Feeds one frame's mean SNR and returns the edge if the state flipped.
    ///
    /// The ratio test runs against the windows as they stood before this
    /// sample; the sample is folded in afterwards.
    pub fn update(&mut self, snr_mean: f32) -> Option<TriggerEdge> {
        let was_active = self.active;

        if !self.sta.is_empty() && !self.lta.is_empty() {
            let ratio = mean(&self.sta) / mean(&self.lta);
            if ratio > self.config.rise_ratio {
                self.active = true;
            } else if ratio < self.config.fall_ratio {
                self.active = false;
            }
        }

        let energy = snr_mean + self.config.energy_offset;
        push_bounded(&mut self.sta, energy, self.config.sta_len);
        if !self.active {
            push_bounded(&mut self.lta, energy, self.config.lta_len);
        }

        match (was_active, self.active) {
            (false, true) => Some(TriggerEdge::Onset),
            (true, false) => Some(TriggerEdge::Offset),
            _ => None,
        }
    }

    /// Clears both windows and the active flag, e.g. after a gesture window
    /// completes.
    pub fn reset(&mut self) {
        self.sta.clear();
        self.lta.clear();
        self.active = false;
    }
}

fn mean(samples: &VecDeque<f32>) -> f32 {
    samples.iter().sum::<f32>() / samples.len() as f32
}

fn push_bounded(queue: &mut VecDeque<f32>, value: f32, cap: usize) {
    queue.push_back(value);
    if queue.len() > cap {
        queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> TriggerDetector {
        TriggerDetector::new(TriggerConfig::default())
    }

    #[test]
    fn quiet_stream_never_arms() {
        let mut trigger = detector();
        for _ in 0..100 {
            assert_eq!(trigger.update(0.0), None);
        }
        assert!(!trigger.is_active());
    }

    #[test]
    fn burst_then_decay_yields_one_onset_and_one_offset() {
        let mut trigger = detector();
        let mut onsets = 0;
        let mut offsets = 0;
        let mut feed = |trigger: &mut TriggerDetector, snr: f32, frames: usize| {
            for _ in 0..frames {
                match trigger.update(snr) {
                    Some(TriggerEdge::Onset) => onsets += 1,
                    Some(TriggerEdge::Offset) => offsets += 1,
                    None => {}
                }
            }
        };

        // Establish the background, then a strong burst, then decay.
        feed(&mut trigger, 0.0, 40);
        feed(&mut trigger, 300.0, 20);
        feed(&mut trigger, 0.0, 40);

        assert_eq!(onsets, 1);
        assert_eq!(offsets, 1);
        assert!(!trigger.is_active());
    }

    #[test]
    fn ratio_inside_hysteresis_band_holds_state() {
        let config = TriggerConfig::default();
        let mut trigger = TriggerDetector::new(config);
        for _ in 0..config.lta_len {
            trigger.update(0.0);
        }
        // Energy lift of ~20% keeps the ratio between 1.10 and 1.35.
        let lifted = config.energy_offset * 0.2;
        for _ in 0..config.sta_len {
            assert_eq!(trigger.update(lifted), None);
        }
        assert!(!trigger.is_active());
    }

    #[test]
    fn background_window_freezes_while_active() {
        let mut trigger = detector();
        for _ in 0..40 {
            trigger.update(0.0);
        }
        let mut frozen_mean = None;
        for _ in 0..10 {
            if trigger.update(300.0) == Some(TriggerEdge::Onset) {
                frozen_mean = Some(mean(&trigger.lta));
            }
        }
        assert!(trigger.is_active());
        // Burst energy after the onset must not leak into the background.
        trigger.update(300.0);
        trigger.update(300.0);
        assert_eq!(mean(&trigger.lta), frozen_mean.unwrap());
    }

    #[test]
    fn no_update_before_both_windows_fill() {
        let mut trigger = detector();
        // The very first sample sees empty windows: no ratio, no edge.
        assert_eq!(trigger.update(500.0), None);
        assert!(!trigger.is_active());
    }

    #[test]
    fn reset_clears_state() {
        let mut trigger = detector();
        for _ in 0..40 {
            trigger.update(0.0);
        }
        for _ in 0..10 {
            trigger.update(300.0);
        }
        assert!(trigger.is_active());
        trigger.reset();
        assert!(!trigger.is_active());
        assert_eq!(trigger.update(0.0), None);
    }
}
