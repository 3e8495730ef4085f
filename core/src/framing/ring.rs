use crate::decode::header::MAGIC_WORD;
use crate::prelude::RingOverflow;

/// Fixed-capacity store for not-yet-parsed serial bytes.
///
/// Bytes beyond `len` are zeroed and never inspected. The buffer never
/// grows; an append that does not fit is rejected wholesale so a stalled
/// parser cannot exhaust memory.
pub struct ByteRing {
    data: Vec<u8>,
    len: usize,
}

impl ByteRing {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Valid prefix of buffered bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Copies `bytes` onto the tail of the valid prefix.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), RingOverflow> {
        if self.len + bytes.len() >= self.data.len() {
            return Err(RingOverflow {
                capacity: self.data.len(),
                buffered: self.len,
                incoming: bytes.len(),
            });
        }
        self.data[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
        Ok(())
    }

    /// First offset whose next eight bytes equal the magic word.
    pub fn find_sync(&self) -> Option<usize> {
        self.data[..self.len]
            .windows(MAGIC_WORD.len())
            .position(|window| window == MAGIC_WORD)
    }

    /// Drops every byte before `offset`, shifting the remainder to index 0
    /// and zero-filling the freed tail. Overshooting the valid prefix clamps
    /// to an empty buffer instead of underflowing.
    pub fn compact_to(&mut self, offset: usize) {
        if offset == 0 {
            return;
        }
        if offset >= self.len {
            self.data[..self.len].fill(0);
            self.len = 0;
            return;
        }
        let remaining = self.len - offset;
        self.data.copy_within(offset..self.len, 0);
        self.data[remaining..self.len].fill(0);
        self.len = remaining;
    }

    /// Little-endian total packet length read from bytes 12..16, available
    /// once the length field is buffered.
    pub fn total_packet_len(&self) -> Option<u32> {
        if self.len < 16 {
            return None;
        }
        Some(u32::from_le_bytes([
            self.data[12],
            self.data[13],
            self.data[14],
            self.data[15],
        ]))
    }
}
