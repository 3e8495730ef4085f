use crate::prelude::{DecodeError, DecodeResult};

/// Magic word opening every packet on the data channel.
pub const MAGIC_WORD: [u8; 8] = [2, 1, 4, 3, 6, 5, 8, 7];

/// Fixed 40-byte header preceding the TLV records.
///
/// All fields are little-endian u32 on the wire, laid out directly after
/// the eight magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    pub version: u32,
    pub total_packet_len: u32,
    pub platform: u32,
    pub frame_number: u32,
    pub time_cpu_cycles: u32,
    pub num_detected_obj: u32,
    pub num_tlv: u32,
    pub sub_frame_number: u32,
}

impl PacketHeader {
    pub const LEN: usize = 40;

    pub fn parse(data: &[u8]) -> DecodeResult<Self> {
        if data.len() < Self::LEN {
            return Err(DecodeError::Truncated {
                needed: Self::LEN,
                available: data.len(),
            });
        }
        if data[..MAGIC_WORD.len()] != MAGIC_WORD {
            return Err(DecodeError::BadMagic);
        }
        Ok(Self {
            version: read_u32(data, 8),
            total_packet_len: read_u32(data, 12),
            platform: read_u32(data, 16),
            frame_number: read_u32(data, 20),
            time_cpu_cycles: read_u32(data, 24),
            num_detected_obj: read_u32(data, 28),
            num_tlv: read_u32(data, 32),
            sub_frame_number: read_u32(data, 36),
        })
    }
}

pub(crate) fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

pub(crate) fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

pub(crate) fn read_f32(data: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
