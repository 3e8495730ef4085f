//! Stream framing, packet decoding, and gesture segmentation for the
//! mmWave radar capture platform.
//!
//! The modules mirror the sensor's demo output path while providing
//! safe abstractions, bounded buffers, and well-defined pipeline stages.

pub mod decode;
pub mod framing;
pub mod gesture;
pub mod params;
pub mod pipeline;
pub mod prelude;
pub mod telemetry;

pub use pipeline::{Pipeline, PipelineEvent};
pub use prelude::{PipelineConfig, TriggerConfig};

#[cfg(test)]
pub(crate) mod testutil;
