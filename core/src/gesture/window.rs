use std::collections::VecDeque;

use crate::gesture::aggregate::AveragePoint;

/// Collects one fixed-length gesture window, seeded from a rolling
/// pre-trigger history so the sample includes the frames just before the
/// onset was recognized.
pub struct WindowRecorder {
    history: VecDeque<AveragePoint>,
    window: Vec<AveragePoint>,
    history_len: usize,
    window_size: usize,
    recording: bool,
}

impl WindowRecorder {
    pub fn new(history_len: usize, window_size: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(history_len),
            window: Vec::with_capacity(window_size),
            history_len,
            window_size,
            recording: false,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Rolls the pre-trigger history forward; called once per frame,
    /// regardless of trigger state.
    pub fn push_history(&mut self, point: AveragePoint) {
        self.history.push_back(point);
        if self.history.len() > self.history_len {
            self.history.pop_front();
        }
    }

    /// Starts a recording on an onset edge, replaying the pre-trigger
    /// history (oldest first) into the window. Early in a session the
    /// history may hold fewer than its capacity; whatever exists is seeded.
    pub fn begin(&mut self) {
        if self.recording {
            return;
        }
        self.recording = true;
        self.window.extend(self.history.iter().copied());
        self.window.truncate(self.window_size);
    }

    /// Appends one live point while recording; returns the finished window
    /// once it holds exactly `window_size` entries. Recording, once begun,
    /// runs to completion regardless of later trigger state.
    pub fn record(&mut self, point: AveragePoint) -> Option<Vec<AveragePoint>> {
        if !self.recording {
            return None;
        }
        if self.window.len() < self.window_size {
            self.window.push(point);
        }
        if self.window.len() >= self.window_size {
            self.recording = false;
            self.history.clear();
            return Some(std::mem::take(&mut self.window));
        }
        None
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.window.clear();
        self.recording = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(tag: f32) -> AveragePoint {
        let mut p = AveragePoint::zero(0.0);
        p.x = tag;
        p
    }

    #[test]
    fn window_is_seeded_history_plus_live_frames() {
        let mut recorder = WindowRecorder::new(10, 25);
        for i in 0..10 {
            recorder.push_history(point(i as f32));
        }
        recorder.begin();

        let mut finished = None;
        for i in 0..15 {
            assert!(finished.is_none());
            finished = recorder.record(point(100.0 + i as f32));
        }
        let window = finished.expect("window must complete on the 15th live frame");
        assert_eq!(window.len(), 25);
        // Ten seeded frames, oldest first, then the live frames.
        assert_eq!(window[0].x, 0.0);
        assert_eq!(window[9].x, 9.0);
        assert_eq!(window[10].x, 100.0);
        assert_eq!(window[24].x, 114.0);
        assert!(!recorder.is_recording());
    }

    #[test]
    fn short_history_at_startup_seeds_what_exists() {
        let mut recorder = WindowRecorder::new(10, 25);
        for i in 0..3 {
            recorder.push_history(point(i as f32));
        }
        recorder.begin();

        let mut finished = None;
        let mut live = 0;
        while finished.is_none() {
            finished = recorder.record(point(50.0));
            live += 1;
        }
        assert_eq!(live, 22);
        assert_eq!(finished.unwrap().len(), 25);
    }

    #[test]
    fn history_stays_bounded() {
        let mut recorder = WindowRecorder::new(10, 25);
        for i in 0..50 {
            recorder.push_history(point(i as f32));
        }
        recorder.begin();
        let finished = (0..15)
            .filter_map(|_| recorder.record(point(0.0)))
            .next()
            .unwrap();
        // Only the ten most recent frames were seeded.
        assert_eq!(finished[0].x, 40.0);
        assert_eq!(finished[9].x, 49.0);
    }

    #[test]
    fn record_is_inert_while_idle() {
        let mut recorder = WindowRecorder::new(10, 25);
        assert!(recorder.record(point(1.0)).is_none());
        assert!(!recorder.is_recording());
    }

    #[test]
    fn begin_during_recording_does_not_reseed() {
        let mut recorder = WindowRecorder::new(10, 25);
        recorder.push_history(point(1.0));
        recorder.begin();
        recorder.record(point(2.0));
        recorder.begin();
        let finished = (0..25)
            .filter_map(|_| recorder.record(point(3.0)))
            .next()
            .unwrap();
        assert_eq!(finished.len(), 25);
        assert_eq!(finished[0].x, 1.0);
        assert_eq!(finished[1].x, 2.0);
    }
}
