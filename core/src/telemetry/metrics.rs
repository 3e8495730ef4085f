use std::sync::Mutex;

/// Counters for the transient conditions the pipeline absorbs without
/// interrupting the loop.
pub struct MetricsRecorder {
    inner: Mutex<Counters>,
}

#[derive(Default)]
struct Counters {
    bytes_dropped: usize,
    packets_decoded: usize,
    decode_errors: usize,
    gestures_captured: usize,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub bytes_dropped: usize,
    pub packets_decoded: usize,
    pub decode_errors: usize,
    pub gestures_captured: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counters::default()),
        }
    }

    pub fn record_dropped_bytes(&self, count: usize) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.bytes_dropped += count;
        }
    }

    pub fn record_packet(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.packets_decoded += 1;
        }
    }

    pub fn record_decode_error(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.decode_errors += 1;
        }
    }

    pub fn record_gesture(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.gestures_captured += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(counters) = self.inner.lock() {
            MetricsSnapshot {
                bytes_dropped: counters.bytes_dropped,
                packets_decoded: counters.packets_decoded,
                decode_errors: counters.decode_errors,
                gestures_captured: counters.gestures_captured,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
