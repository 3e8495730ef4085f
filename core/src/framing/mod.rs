pub mod ring;
pub mod sync;

pub use ring::ByteRing;
pub use sync::{FrameSynchronizer, SyncStatus};
