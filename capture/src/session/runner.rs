use crate::source::ByteSource;
use crossbeam_channel::{bounded, Receiver, Sender};
use gesturecore::telemetry::MetricsSnapshot;
use gesturecore::{Pipeline, PipelineEvent};
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{SystemTime, UNIX_EPOCH};

/// Runs the ingest loop on its own thread and streams pipeline events to
/// the caller over a bounded channel.
pub struct SessionRunner {
    handle: JoinHandle<MetricsSnapshot>,
    events: Receiver<PipelineEvent>,
}

impl SessionRunner {
    /// Spawns the processing thread. The session ends when the source is
    /// exhausted, the stop flag is raised, `frame_limit` decoded frames
    /// have been seen, or the event receiver is dropped.
    pub fn spawn<S>(
        mut source: S,
        mut pipeline: Pipeline,
        chunk_len: usize,
        stop: Arc<AtomicBool>,
        frame_limit: Option<u64>,
    ) -> Self
    where
        S: ByteSource + 'static,
    {
        let (tx, rx) = bounded::<PipelineEvent>(64);
        let handle = thread::spawn(move || {
            run_loop(&mut source, &mut pipeline, chunk_len, &stop, frame_limit, &tx);
            pipeline.metrics()
        });
        Self { handle, events: rx }
    }

    pub fn events(&self) -> Receiver<PipelineEvent> {
        self.events.clone()
    }

    /// Waits for the processing thread and returns its final counters.
    pub fn join(self) -> MetricsSnapshot {
        drop(self.events);
        self.handle.join().unwrap_or_default()
    }
}

fn run_loop<S: ByteSource>(
    source: &mut S,
    pipeline: &mut Pipeline,
    chunk_len: usize,
    stop: &AtomicBool,
    frame_limit: Option<u64>,
    tx: &Sender<PipelineEvent>,
) {
    let mut buf = vec![0u8; chunk_len.max(1)];
    let mut frames_seen: u64 = 0;

    while !stop.load(Ordering::SeqCst) {
        let read = match source.read_chunk(&mut buf) {
            Ok(0) => {
                info!("byte source exhausted after {} frames", frames_seen);
                return;
            }
            Ok(n) => n,
            Err(err) => {
                info!("byte source error, ending session: {}", err);
                return;
            }
        };

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        for event in pipeline.ingest(&buf[..read], timestamp) {
            if matches!(event, PipelineEvent::Frame(_)) {
                frames_seen += 1;
            }
            if tx.send(event).is_err() {
                debug!("event consumer gone, ending session");
                return;
            }
        }

        if frame_limit.is_some_and(|limit| frames_seen >= limit) {
            info!("frame limit {} reached", frames_seen);
            return;
        }
    }
    info!("stop requested, ending session after {} frames", frames_seen);
}
