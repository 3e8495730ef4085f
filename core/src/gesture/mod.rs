pub mod aggregate;
pub mod interp;
pub mod trigger;
pub mod window;

pub use aggregate::{AveragePoint, PointAggregator};
pub use interp::{finalize, GestureSample};
pub use trigger::{TriggerDetector, TriggerEdge};
pub use window::WindowRecorder;
