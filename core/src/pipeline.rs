use crate::decode::frame::decode_packet;
use crate::framing::{ByteRing, FrameSynchronizer, SyncStatus};
use crate::gesture::aggregate::{AveragePoint, PointAggregator};
use crate::gesture::interp::{self, GestureSample};
use crate::gesture::trigger::{TriggerDetector, TriggerEdge};
use crate::gesture::window::WindowRecorder;
use crate::prelude::PipelineConfig;
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};

/// Events published by one ingest cycle, in occurrence order.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// One decoded frame reduced to its average feature point.
    Frame(AveragePoint),
    /// Rising trigger edge; a gesture window has begun recording.
    GestureStart,
    /// A finished, interpolated gesture sample.
    GestureComplete(GestureSample),
}

/// Single-threaded capture pipeline: serial bytes in, events out.
///
/// One instance owns the byte buffer, trigger state, and window recorder
/// exclusively; callers on other threads receive immutable event values
/// only. Overflow, sync loss, and decode failures are absorbed locally and
/// never interrupt processing.
pub struct Pipeline {
    ring: ByteRing,
    trigger: TriggerDetector,
    recorder: WindowRecorder,
    metrics: MetricsRecorder,
    logger: LogManager,
    sample_index: u64,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            ring: ByteRing::with_capacity(config.ring_capacity),
            trigger: TriggerDetector::new(config.trigger),
            recorder: WindowRecorder::new(config.pretrigger_len, config.window_size),
            metrics: MetricsRecorder::new(),
            logger: LogManager::new(),
            sample_index: 0,
        }
    }

    /// Feeds one chunk of serial bytes stamped with its receive time and
    /// drains every complete packet currently buffered.
    pub fn ingest(&mut self, bytes: &[u8], timestamp: f64) -> Vec<PipelineEvent> {
        let mut events = Vec::new();

        if let Err(err) = self.ring.append(bytes) {
            self.metrics.record_dropped_bytes(bytes.len());
            self.logger.record_warning(&format!("{}; dropping chunk", err));
        }

        loop {
            match FrameSynchronizer::synchronize(&mut self.ring) {
                SyncStatus::NoSync | SyncStatus::NeedMoreData => break,
                SyncStatus::PacketReady(total) => {
                    let decoded = decode_packet(&self.ring.as_bytes()[..total]);
                    // Advance past the declared length even when the packet
                    // is malformed so it cannot wedge the stream.
                    self.ring.compact_to(total);
                    match decoded {
                        Ok(frame) => {
                            self.metrics.record_packet();
                            let point = PointAggregator::aggregate(&frame, timestamp);
                            self.process_point(point, &mut events);
                        }
                        Err(err) => {
                            self.metrics.record_decode_error();
                            self.logger.record_warning(&format!("discarding packet: {}", err));
                        }
                    }
                }
            }
        }
        events
    }

    fn process_point(&mut self, point: AveragePoint, events: &mut Vec<PipelineEvent>) {
        events.push(PipelineEvent::Frame(point));
        self.recorder.push_history(point);

        if self.trigger.update(point.snr) == Some(TriggerEdge::Onset) {
            self.logger.record("gesture onset detected");
            self.recorder.begin();
            events.push(PipelineEvent::GestureStart);
        }

        if let Some(window) = self.recorder.record(point) {
            let sample = interp::finalize(&window, self.sample_index);
            self.sample_index += 1;
            self.metrics.record_gesture();
            self.logger
                .record(&format!("gesture sample {} complete", sample.index));
            self.trigger.reset();
            self.recorder.reset();
            events.push(PipelineEvent::GestureComplete(sample));
        }
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
