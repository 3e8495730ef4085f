//! Deterministic stand-in for the sensor, for exercising the capture
//! session without hardware. Emits well-formed output packets that
//! alternate between quiet background and strong motion bursts, so a
//! full run produces real gesture samples.

use super::ByteSource;
use gesturecore::decode::header::MAGIC_WORD;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;

const VERSION: u32 = 0x0304_0006;
const PLATFORM: u32 = 0x000A_6843;

const TLV_DETECTED_POINTS: u32 = 1;
const TLV_SIDE_INFO: u32 = 7;

/// How many quiet frames precede each motion burst, and how long the
/// burst lasts. Forty burst frames comfortably covers one 25-frame
/// gesture window.
const QUIET_FRAMES: u32 = 40;
const BURST_FRAMES: u32 = 40;

pub struct SyntheticSource {
    rng: StdRng,
    frame_number: u32,
    pending: Vec<u8>,
}

impl SyntheticSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            frame_number: 0,
            pending: Vec::new(),
        }
    }

    fn next_packet(&mut self) -> Vec<u8> {
        let cycle = self.frame_number % (QUIET_FRAMES + BURST_FRAMES);
        self.frame_number += 1;

        if cycle < QUIET_FRAMES {
            return encode_packet(self.frame_number, &[], &[]);
        }

        // A small cluster of moving reflectors in front of the sensor.
        let num_points = self.rng.gen_range(2..=5);
        let mut points = Vec::with_capacity(num_points);
        let mut side_info = Vec::with_capacity(num_points);
        for _ in 0..num_points {
            let x = self.rng.gen_range(-0.3..0.3f32);
            let y = self.rng.gen_range(0.2..0.6f32);
            let z = self.rng.gen_range(-0.2..0.2f32);
            let doppler = self.rng.gen_range(0.5..2.5f32);
            points.push([x, y, z, doppler]);
            // Side info carries centi-dB units on the wire.
            side_info.push((self.rng.gen_range(2500..3500u16), self.rng.gen_range(80..120u16)));
        }
        encode_packet(self.frame_number, &points, &side_info)
    }
}

impl ByteSource for SyntheticSource {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pending.is_empty() {
            self.pending = self.next_packet();
        }
        let take = self.pending.len().min(buf.len());
        buf[..take].copy_from_slice(&self.pending[..take]);
        self.pending.drain(..take);
        Ok(take)
    }
}

/// Serializes one output packet: magic word, 40-byte header, then a
/// detected-points TLV and a side-info TLV when points are present.
fn encode_packet(frame_number: u32, points: &[[f32; 4]], side_info: &[(u16, u16)]) -> Vec<u8> {
    let mut body = Vec::new();
    let mut num_tlv = 0u32;

    if !points.is_empty() {
        num_tlv += 1;
        body.extend_from_slice(&TLV_DETECTED_POINTS.to_le_bytes());
        body.extend_from_slice(&((points.len() * 16) as u32).to_le_bytes());
        for point in points {
            for component in point {
                body.extend_from_slice(&component.to_le_bytes());
            }
        }
    }
    if !side_info.is_empty() {
        num_tlv += 1;
        body.extend_from_slice(&TLV_SIDE_INFO.to_le_bytes());
        body.extend_from_slice(&((side_info.len() * 4) as u32).to_le_bytes());
        for (snr, noise) in side_info {
            body.extend_from_slice(&snr.to_le_bytes());
            body.extend_from_slice(&noise.to_le_bytes());
        }
    }

    let total_len = 40 + body.len() as u32;
    let mut packet = Vec::with_capacity(total_len as usize);
    packet.extend_from_slice(&MAGIC_WORD);
    packet.extend_from_slice(&VERSION.to_le_bytes());
    packet.extend_from_slice(&total_len.to_le_bytes());
    packet.extend_from_slice(&PLATFORM.to_le_bytes());
    packet.extend_from_slice(&frame_number.to_le_bytes());
    packet.extend_from_slice(&(frame_number.wrapping_mul(200_000)).to_le_bytes());
    packet.extend_from_slice(&(points.len() as u32).to_le_bytes());
    packet.extend_from_slice(&num_tlv.to_le_bytes());
    packet.extend_from_slice(&0u32.to_le_bytes());
    packet.extend_from_slice(&body);
    packet
}
