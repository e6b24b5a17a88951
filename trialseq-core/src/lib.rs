pub mod condition;
pub mod event;
pub mod state;
pub mod stimulus;
pub mod trial;

pub use condition::{position_index, Condition, Context, PositionName, POSITION_COUNT};
pub use event::{DisplaySelector, Event, EventKind};
pub use state::RunnerState;
pub use stimulus::{Frame, FrameKind, Layer, Shape, ShapeGroup};
pub use trial::{Accuracy, SimulatedResponse, TrialRecord};
