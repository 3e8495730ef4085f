pub mod frame;
pub mod header;
pub mod tlv;

pub use frame::{decode_packet, DetectedPoint, FrameDetection};
pub use header::{PacketHeader, MAGIC_WORD};
pub use tlv::{TlvHeader, TlvType};
