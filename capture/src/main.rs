use anyhow::Context;
use clap::Parser;
use gesturecore::{Pipeline, PipelineEvent};
use log::info;
use session::config::{self, CaptureConfig};
use session::runner::SessionRunner;
use sink::{JsonSampleSink, SampleSink};
use source::synthetic::SyntheticSource;
use source::{ByteSource, FileReplaySource};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;

mod session;
mod sink;
mod source;

#[derive(Parser)]
#[command(author, version, about = "mmWave radar gesture capture driver")]
struct Args {
    /// Load a capture session config from YAML
    #[arg(long)]
    session: Option<PathBuf>,
    /// Radar .cfg file to derive physical parameters from
    #[arg(long)]
    radar_config: Option<PathBuf>,
    /// Replay a recorded byte dump instead of generating synthetic frames
    #[arg(long)]
    replay: Option<PathBuf>,
    /// Seed for the synthetic frame source
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Stop after this many decoded frames
    #[arg(long)]
    frames: Option<u64>,
    /// Directory to persist gesture samples into
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// File-name prefix for persisted samples
    #[arg(long)]
    base_name: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut capture_config = if let Some(path) = &args.session {
        CaptureConfig::load(path)?
    } else {
        CaptureConfig::default()
    };
    if let Some(dir) = args.output_dir {
        capture_config.output_dir = dir;
    }
    if let Some(name) = args.base_name {
        capture_config.base_name = name;
    }

    // Radar parameters are derived up front so a bad sensor config fails
    // the session before any bytes flow.
    let radar_config_path = args.radar_config.or(capture_config.radar_config.clone());
    if let Some(path) = radar_config_path {
        let params = config::load_radar_parameters(&path)?;
        info!(
            "radar parameters: {} range bins, {:.4} m resolution, {:.2} m max range, {:.1} ms frame period",
            params.num_range_bins,
            params.range_resolution_meters,
            params.max_range,
            params.frame_periodicity_ms
        );
    }

    let mut sink = JsonSampleSink::new(&capture_config.output_dir, &capture_config.base_name)?;
    let pipeline = Pipeline::new(capture_config.pipeline_config());

    let source: Box<dyn ByteSource> = match &args.replay {
        Some(path) => Box::new(
            FileReplaySource::open(path)
                .with_context(|| format!("opening replay file {}", path.display()))?,
        ),
        None => Box::new(SyntheticSource::new(args.seed)),
    };

    let stop = Arc::new(AtomicBool::new(false));
    spawn_ctrl_c_watcher(stop.clone())?;

    let runner = SessionRunner::spawn(
        source,
        pipeline,
        capture_config.chunk_len,
        stop,
        args.frames,
    );

    let mut frames = 0u64;
    for event in runner.events() {
        match event {
            PipelineEvent::Frame(_) => frames += 1,
            PipelineEvent::GestureStart => info!("recording gesture window"),
            PipelineEvent::GestureComplete(sample) => sink.persist(&sample)?,
        }
    }

    let metrics = runner.join();
    println!(
        "Session -> frames {}, gestures {}, decode errors {}, bytes dropped {}",
        frames, metrics.gestures_captured, metrics.decode_errors, metrics.bytes_dropped
    );
    Ok(())
}

/// Raises the stop flag on Ctrl+C without putting the processing loop on
/// an async runtime.
fn spawn_ctrl_c_watcher(stop: Arc<AtomicBool>) -> anyhow::Result<()> {
    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for signal handling")?;
    thread::spawn(move || {
        let result = runtime.block_on(signal::ctrl_c());
        if result.is_ok() {
            info!("Ctrl+C received, stopping session");
        }
        stop.store(true, Ordering::SeqCst);
    });
    Ok(())
}
