use crate::decode::header::read_u32;
use crate::prelude::{DecodeError, DecodeResult};

/// Record types defined by the demo output format. Only detected points
/// (type 1) and per-point side info (type 7) feed the pipeline; the rest
/// are skipped by their declared length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlvType {
    DetectedPoints,
    RangeProfile,
    NoiseProfile,
    AzimuthStaticHeatmap,
    RangeDopplerHeatmap,
    Statistics,
    SideInfo,
    AzimuthElevationHeatmap,
    TemperatureStatistics,
    Unknown(u32),
}

impl TlvType {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Self::DetectedPoints,
            2 => Self::RangeProfile,
            3 => Self::NoiseProfile,
            4 => Self::AzimuthStaticHeatmap,
            5 => Self::RangeDopplerHeatmap,
            6 => Self::Statistics,
            7 => Self::SideInfo,
            8 => Self::AzimuthElevationHeatmap,
            9 => Self::TemperatureStatistics,
            other => Self::Unknown(other),
        }
    }

    pub fn raw(&self) -> u32 {
        match self {
            Self::DetectedPoints => 1,
            Self::RangeProfile => 2,
            Self::NoiseProfile => 3,
            Self::AzimuthStaticHeatmap => 4,
            Self::RangeDopplerHeatmap => 5,
            Self::Statistics => 6,
            Self::SideInfo => 7,
            Self::AzimuthElevationHeatmap => 8,
            Self::TemperatureStatistics => 9,
            Self::Unknown(raw) => *raw,
        }
    }
}

/// Eight-byte `(type, length)` tag preceding each TLV payload.
#[derive(Debug, Clone, Copy)]
pub struct TlvHeader {
    pub tlv_type: TlvType,
    pub length: usize,
}

impl TlvHeader {
    pub const LEN: usize = 8;

    pub fn parse(data: &[u8], offset: usize) -> DecodeResult<Self> {
        if data.len() < offset + Self::LEN {
            return Err(DecodeError::Truncated {
                needed: offset + Self::LEN,
                available: data.len(),
            });
        }
        Ok(Self {
            tlv_type: TlvType::from_raw(read_u32(data, offset)),
            length: read_u32(data, offset + 4) as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_round_trips_for_known_and_unknown_types() {
        for raw in 1..=9u32 {
            assert_eq!(TlvType::from_raw(raw).raw(), raw);
        }
        assert_eq!(TlvType::from_raw(200), TlvType::Unknown(200));
        assert_eq!(TlvType::Unknown(200).raw(), 200);
    }

    #[test]
    fn parse_reads_tag_at_offset() {
        let mut bytes = vec![0xAA; 4];
        bytes.extend_from_slice(&7u32.to_le_bytes());
        bytes.extend_from_slice(&12u32.to_le_bytes());
        let tag = TlvHeader::parse(&bytes, 4).unwrap();
        assert_eq!(tag.tlv_type, TlvType::SideInfo);
        assert_eq!(tag.length, 12);
    }

    #[test]
    fn parse_rejects_truncated_tag() {
        assert!(matches!(
            TlvHeader::parse(&[0u8; 6], 0),
            Err(DecodeError::Truncated { .. })
        ));
    }
}
