use crate::decode::header::{PacketHeader, MAGIC_WORD};
use crate::framing::ring::ByteRing;

/// Outcome of one synchronization pass over the buffered bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// No magic word anywhere in the buffer; keep waiting for bytes.
    NoSync,
    /// Aligned on a magic word but the declared packet is incomplete.
    NeedMoreData,
    /// A complete packet of the given length starts at offset zero.
    PacketReady(usize),
}

/// Aligns the ring buffer on packet boundaries.
pub struct FrameSynchronizer;

impl FrameSynchronizer {
    /// Discards garbage ahead of the first magic word, then reports whether
    /// the packet declared by the header's length field is fully buffered.
    ///
    /// A magic word followed by an implausible length (shorter than the
    /// fixed header) is treated as a false sync: the word is skipped and the
    /// scan restarts.
    pub fn synchronize(ring: &mut ByteRing) -> SyncStatus {
        loop {
            let Some(start) = ring.find_sync() else {
                return SyncStatus::NoSync;
            };
            if start > 0 {
                ring.compact_to(start);
            }
            let Some(total) = ring.total_packet_len() else {
                return SyncStatus::NeedMoreData;
            };
            let total = total as usize;
            if total < PacketHeader::LEN {
                ring.compact_to(MAGIC_WORD.len());
                continue;
            }
            if ring.len() >= total {
                return SyncStatus::PacketReady(total);
            }
            return SyncStatus::NeedMoreData;
        }
    }
}
