use anyhow::Context;
use gesturecore::gesture::interp::GestureSample;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for finished gesture samples.
pub trait SampleSink {
    fn persist(&mut self, sample: &GestureSample) -> anyhow::Result<()>;
}

/// Writes each sample as a JSON array of per-frame feature rows, one file
/// per gesture, named `<base>_<index>.json`.
pub struct JsonSampleSink {
    dir: PathBuf,
    base_name: String,
}

impl JsonSampleSink {
    pub fn new<P: AsRef<Path>>(dir: P, base_name: &str) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
        Ok(Self {
            dir,
            base_name: base_name.to_string(),
        })
    }

    fn path_for(&self, index: u64) -> PathBuf {
        self.dir.join(format!("{}_{}.json", self.base_name, index))
    }
}

impl SampleSink for JsonSampleSink {
    fn persist(&mut self, sample: &GestureSample) -> anyhow::Result<()> {
        let rows: Vec<Vec<f32>> = sample
            .data
            .outer_iter()
            .map(|row| row.to_vec())
            .collect();
        let path = self.path_for(sample.index);
        let json = serde_json::to_string(&rows).context("serializing gesture sample")?;
        fs::write(&path, json)
            .with_context(|| format!("writing gesture sample {}", path.display()))?;
        info!("persisted gesture sample to {}", path.display());
        Ok(())
    }
}
