//! Hand-rolled packet encoding for unit tests.

use crate::decode::header::{PacketHeader, MAGIC_WORD};

/// Encodes one complete packet: fixed header, a type-1 record for `points`
/// (`[x, y, z, doppler]` each, omitted when empty), an optional type-7 record of raw
/// `(snr, noise)` u16 pairs, and any extra opaque TLVs appended verbatim.
pub(crate) fn encode_packet(
    frame_number: u32,
    points: &[[f32; 4]],
    side_info: Option<&[(u16, u16)]>,
    extra_tlvs: &[(u32, Vec<u8>)],
) -> Vec<u8> {
    let mut tlvs: Vec<(u32, Vec<u8>)> = Vec::new();

    if !points.is_empty() {
        let mut point_payload = Vec::with_capacity(points.len() * 16);
        for point in points {
            for value in point {
                point_payload.extend_from_slice(&value.to_le_bytes());
            }
        }
        tlvs.push((1, point_payload));
    }

    if let Some(info) = side_info {
        let mut info_payload = Vec::with_capacity(info.len() * 4);
        for (snr, noise) in info {
            info_payload.extend_from_slice(&snr.to_le_bytes());
            info_payload.extend_from_slice(&noise.to_le_bytes());
        }
        tlvs.push((7, info_payload));
    }
    tlvs.extend(extra_tlvs.iter().cloned());

    let total = PacketHeader::LEN + tlvs.iter().map(|(_, p)| 8 + p.len()).sum::<usize>();

    let mut packet = Vec::with_capacity(total);
    packet.extend_from_slice(&MAGIC_WORD);
    packet.extend_from_slice(&0x0304_0006u32.to_le_bytes()); // version
    packet.extend_from_slice(&(total as u32).to_le_bytes());
    packet.extend_from_slice(&0xA6843u32.to_le_bytes()); // platform
    packet.extend_from_slice(&frame_number.to_le_bytes());
    packet.extend_from_slice(&0u32.to_le_bytes()); // time cpu cycles
    packet.extend_from_slice(&(points.len() as u32).to_le_bytes());
    packet.extend_from_slice(&(tlvs.len() as u32).to_le_bytes());
    packet.extend_from_slice(&0u32.to_le_bytes()); // sub frame

    for (tlv_type, payload) in &tlvs {
        packet.extend_from_slice(&tlv_type.to_le_bytes());
        packet.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        packet.extend_from_slice(payload);
    }
    packet
}
