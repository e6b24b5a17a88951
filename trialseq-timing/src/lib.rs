pub mod stats;
pub mod timer;

pub use stats::{WaitRecorder, WaitStats};
pub use timer::{HighPrecisionTimer, ManualTimer, Timer};
