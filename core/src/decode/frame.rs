use serde::{Deserialize, Serialize};

use crate::decode::header::{read_f32, read_u16, PacketHeader};
use crate::decode::tlv::{TlvHeader, TlvType};
use crate::prelude::{DecodeError, DecodeResult};

/// One detected point with its radial Doppler, merged type-7 side info,
/// and the derived polar measures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub doppler: f32,
    pub range: f32,
    pub azimuth_deg: f32,
    pub elevation_deg: f32,
    pub snr_db: f32,
    pub noise_db: f32,
}

impl DetectedPoint {
    /// Wire size of one type-1 entry: four little-endian f32 values.
    pub const WIRE_LEN: usize = 16;
    /// Wire size of one type-7 entry: two u16 values at 0.1 dB scale.
    pub const SIDE_INFO_WIRE_LEN: usize = 4;

    /// Builds a point from its Cartesian wire fields, deriving range,
    /// azimuth, and elevation. Side info is zero until merged.
    pub fn from_cartesian(x: f32, y: f32, z: f32, doppler: f32) -> Self {
        let range = (x * x + y * y + z * z).sqrt();
        let azimuth_deg = if y == 0.0 {
            if x >= 0.0 {
                90.0
            } else {
                -90.0
            }
        } else {
            x.atan2(y).to_degrees()
        };
        let elevation_deg = if x == 0.0 && y == 0.0 {
            if z >= 0.0 {
                90.0
            } else {
                -90.0
            }
        } else {
            z.atan2((x * x + y * y).sqrt()).to_degrees()
        };
        Self {
            x,
            y,
            z,
            doppler,
            range,
            azimuth_deg,
            elevation_deg,
            snr_db: 0.0,
            noise_db: 0.0,
        }
    }
}

/// Structured report decoded from one complete packet.
///
/// The point list stays `None` when the packet carried no type-1 record, so
/// absence is typed rather than a missing key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameDetection {
    pub frame_number: u32,
    pub sub_frame_number: u32,
    pub num_obj: usize,
    pub points: Option<Vec<DetectedPoint>>,
}

/// Decodes exactly one complete packet.
///
/// On failure the caller must still advance the stream past the declared
/// packet length so a malformed-but-length-valid packet cannot wedge it.
pub fn decode_packet(data: &[u8]) -> DecodeResult<FrameDetection> {
    let header = PacketHeader::parse(data)?;
    let total = header.total_packet_len as usize;
    if data.len() < total {
        return Err(DecodeError::Truncated {
            needed: total,
            available: data.len(),
        });
    }
    let packet = &data[..total];
    let num_obj = header.num_detected_obj as usize;

    let mut points: Option<Vec<DetectedPoint>> = None;
    let mut side_info: Option<Vec<(f32, f32)>> = None;
    let mut cursor = PacketHeader::LEN;

    for _ in 0..header.num_tlv {
        let tag = TlvHeader::parse(packet, cursor)?;
        cursor += TlvHeader::LEN;
        if cursor + tag.length > total {
            return Err(DecodeError::Truncated {
                needed: cursor + tag.length,
                available: total,
            });
        }
        let payload = &packet[cursor..cursor + tag.length];
        match tag.tlv_type {
            TlvType::DetectedPoints => {
                let expected = num_obj * DetectedPoint::WIRE_LEN;
                if tag.length != expected {
                    return Err(DecodeError::LengthMismatch {
                        tlv_type: tag.tlv_type.raw(),
                        declared: tag.length,
                        expected,
                    });
                }
                let mut decoded = Vec::with_capacity(num_obj);
                for i in 0..num_obj {
                    let base = i * DetectedPoint::WIRE_LEN;
                    decoded.push(DetectedPoint::from_cartesian(
                        read_f32(payload, base),
                        read_f32(payload, base + 4),
                        read_f32(payload, base + 8),
                        read_f32(payload, base + 12),
                    ));
                }
                points = Some(decoded);
            }
            TlvType::SideInfo => {
                let expected = num_obj * DetectedPoint::SIDE_INFO_WIRE_LEN;
                if tag.length != expected {
                    return Err(DecodeError::LengthMismatch {
                        tlv_type: tag.tlv_type.raw(),
                        declared: tag.length,
                        expected,
                    });
                }
                let mut decoded = Vec::with_capacity(num_obj);
                for i in 0..num_obj {
                    let base = i * DetectedPoint::SIDE_INFO_WIRE_LEN;
                    decoded.push((
                        f32::from(read_u16(payload, base)) * 0.1,
                        f32::from(read_u16(payload, base + 2)) * 0.1,
                    ));
                }
                side_info = Some(decoded);
            }
            // Heatmaps, profiles, and statistics are not consumed here;
            // skip them by their declared length.
            _ => {}
        }
        cursor += tag.length;
    }

    if let (Some(points), Some(info)) = (points.as_mut(), side_info.as_ref()) {
        for (point, &(snr_db, noise_db)) in points.iter_mut().zip(info) {
            point.snr_db = snr_db;
            point.noise_db = noise_db;
        }
    }

    Ok(FrameDetection {
        frame_number: header.frame_number,
        sub_frame_number: header.sub_frame_number,
        num_obj,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::encode_packet;

    #[test]
    fn decodes_points_with_derived_measures() {
        let packet = encode_packet(
            3,
            &[[3.0, 4.0, 0.0, 1.5], [0.0, 0.0, 2.0, -0.5]],
            Some(&[(100, 30), (80, 25)]),
            &[],
        );
        let frame = decode_packet(&packet).unwrap();
        assert_eq!(frame.frame_number, 3);
        assert_eq!(frame.num_obj, 2);

        let points = frame.points.unwrap();
        assert_eq!(points[0].x, 3.0);
        assert_eq!(points[0].doppler, 1.5);
        assert!((points[0].range - 5.0).abs() < 1e-6);
        assert!((points[0].azimuth_deg - 36.869_896).abs() < 1e-3);
        assert!((points[0].elevation_deg).abs() < 1e-6);
        assert!((points[0].snr_db - 10.0).abs() < 1e-6);
        assert!((points[0].noise_db - 3.0).abs() < 1e-6);

        // Directly overhead: azimuth pinned at +90, elevation at +90.
        assert_eq!(points[1].azimuth_deg, 90.0);
        assert_eq!(points[1].elevation_deg, 90.0);
        assert!((points[1].snr_db - 8.0).abs() < 1e-6);
    }

    #[test]
    fn unrecognized_tlvs_are_skipped() {
        let packet = encode_packet(
            1,
            &[[1.0, 1.0, 0.0, 2.0]],
            None,
            &[(5, vec![0xAB; 32]), (9, vec![0x01; 28])],
        );
        let frame = decode_packet(&packet).unwrap();
        assert_eq!(frame.points.unwrap().len(), 1);
    }

    #[test]
    fn missing_point_tlv_leaves_points_none() {
        let packet = encode_packet(1, &[], None, &[(6, vec![0u8; 24])]);
        let frame = decode_packet(&packet).unwrap();
        assert!(frame.points.is_none());
    }

    #[test]
    fn truncated_tlv_payload_is_an_error() {
        let mut packet = encode_packet(1, &[[1.0, 1.0, 0.0, 2.0]], None, &[]);
        // Shrink the buffer but leave the declared lengths alone.
        packet.truncate(packet.len() - 8);
        assert!(matches!(
            decode_packet(&packet),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn point_count_mismatch_is_an_error() {
        // Declares two objects but carries a single 16-byte point entry.
        let mut packet = encode_packet(1, &[[1.0, 1.0, 0.0, 2.0]], None, &[]);
        packet[28..32].copy_from_slice(&2u32.to_le_bytes());
        assert!(matches!(
            decode_packet(&packet),
            Err(DecodeError::LengthMismatch { tlv_type: 1, .. })
        ));
    }

    #[test]
    fn side_info_alignment_mismatch_is_an_error() {
        let packet = encode_packet(
            1,
            &[[1.0, 1.0, 0.0, 2.0]],
            Some(&[(100, 30), (90, 20)]),
            &[],
        );
        assert!(matches!(
            decode_packet(&packet),
            Err(DecodeError::LengthMismatch { tlv_type: 7, .. })
        ));
    }
}
