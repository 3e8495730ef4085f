use serde::{Deserialize, Serialize};

/// Shared configuration for one capture pipeline instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Capacity of the unparsed-byte buffer.
    pub ring_capacity: usize,
    /// Frames per finished gesture sample.
    pub window_size: usize,
    /// Frames of pre-trigger history replayed into each sample.
    pub pretrigger_len: usize,
    pub trigger: TriggerConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ring_capacity: 1 << 15,
            window_size: 25,
            pretrigger_len: 10,
            trigger: TriggerConfig::default(),
        }
    }
}

/// Tuning for the STA/LTA onset detector.
///
/// The defaults are the empirically chosen values from the field trials;
/// they are parameters here rather than literals so a deployment can retune
/// them without a rebuild.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Short-term window length in frames.
    pub sta_len: usize,
    /// Long-term window length in frames.
    pub lta_len: usize,
    /// STA/LTA ratio above which the detector arms.
    pub rise_ratio: f32,
    /// STA/LTA ratio below which the detector disarms.
    pub fall_ratio: f32,
    /// Offset added to the mean SNR so the ratio test stays well-conditioned
    /// around zero-valued quiet frames.
    pub energy_offset: f32,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            sta_len: 15,
            lta_len: 35,
            rise_ratio: 1.35,
            fall_ratio: 1.10,
            energy_offset: 150.0,
        }
    }
}

/// Failure while decoding one complete packet.
///
/// Never fatal to the stream: the caller discards the packet, advances past
/// its declared length, and keeps reading.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("packet truncated: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },
    #[error("packet does not begin with the magic word")]
    BadMagic,
    #[error("tlv type {tlv_type} declares {declared} bytes, expected {expected}")]
    LengthMismatch {
        tlv_type: u32,
        declared: usize,
        expected: usize,
    },
}

pub type DecodeResult<T> = Result<T, DecodeError>;

/// Rejected append against the fixed-capacity byte buffer. The incoming
/// bytes are dropped; the buffer is left untouched.
#[derive(thiserror::Error, Debug)]
#[error("ring buffer full: capacity {capacity}, {buffered} buffered, {incoming} incoming")]
pub struct RingOverflow {
    pub capacity: usize,
    pub buffered: usize,
    pub incoming: usize,
}
