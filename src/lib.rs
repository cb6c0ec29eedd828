pub mod algorithms;
pub mod config;
pub mod error;
pub mod registry;
pub mod runner;
pub mod sink;
pub mod trace;
pub mod ui;
pub mod utils;

pub use config::StepperConfig;
pub use error::{StepperError, StepperResult};
pub use registry::{Completion, Layout, Params, Topic, TopicSpec};
pub use runner::{Pacer, Phase, RunControl, RunReport, RunStatus, Session};
pub use sink::{SharedState, VizState};
pub use trace::{Mutation, Outcome, Recorder, Step, StepKind, Trace};
pub use ui::{Visualizer, WebVisualizer};
pub use utils::serialization::{load_trace, save_trace, RecordedTrace};
