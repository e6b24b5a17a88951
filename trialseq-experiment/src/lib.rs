pub mod autorun;
pub mod config;
pub mod design;
pub mod error;
pub mod io;
pub mod state;
pub mod timeline;
pub mod trial;

pub use autorun::{AutorunSimulator, ContextProfile};
pub use config::{Instructions, ResponseMap, RunConfiguration};
pub use design::DesignTable;
pub use error::ConfigError;
pub use io::{InputSource, KeyPress, NullInput, Presenter, ResultSink};
pub use state::{RunOutcome, TrialRunner};
pub use timeline::EventTimeline;
pub use trial::TrialList;
