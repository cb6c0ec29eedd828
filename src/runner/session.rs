use crate::config::StepperConfig;
use crate::error::StepperResult;
use crate::registry::{Params, Topic, TopicSpec};
use crate::runner::control::RunControl;
use crate::runner::pacer::{Pacer, RunReport};
use crate::sink::{read_state, snapshot, write_state, SharedState, VizState};
use crate::trace::Trace;
use crate::utils::random_collection::collection_rng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::fmt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Running,
    /// Stop requested; the pacer has not yet observed it.
    Stopping,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Stopping => "stopping",
        })
    }
}

/// `start` spawns onto the ambient tokio runtime.
pub struct Session {
    topic: Topic,
    params: Params,
    state: SharedState,
    control: RunControl,
    task: Option<JoinHandle<RunReport>>,
    rng: StdRng,
    collection_size: usize,
    /// User-supplied collection restored on reset; random or canned otherwise.
    fixed: Option<Vec<i64>>,
}

impl Session {
    pub fn new(topic: Topic, params: Params, config: &StepperConfig) -> Self {
        Self::build(topic, params, config, None)
    }

    pub fn with_collection(
        topic: Topic,
        params: Params,
        config: &StepperConfig,
        collection: Vec<i64>,
    ) -> Self {
        let collection = topic.spec().prepare_collection(collection);
        Self::build(topic, params, config, Some(collection))
    }

    fn build(
        topic: Topic,
        params: Params,
        config: &StepperConfig,
        fixed: Option<Vec<i64>>,
    ) -> Self {
        let params = params.clamped(topic);
        let control = RunControl::new(config.speed);
        let mut rng = collection_rng(config.seed);
        let collection_size = config.collection_size;
        let collection = match &fixed {
            Some(collection) => collection.clone(),
            None => seed(topic.spec(), &params, &mut rng, collection_size),
        };
        let state = VizState::new(topic, collection, control.speed()).shared();
        info!(topic = %topic, "session created");
        Session {
            topic,
            params,
            state,
            control,
            task: None,
            rng,
            collection_size,
            fixed,
        }
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    pub fn control(&self) -> &RunControl {
        &self.control
    }

    pub fn snapshot(&self) -> VizState {
        snapshot(&self.state)
    }

    pub fn phase(&self) -> Phase {
        match &self.task {
            Some(task) if !task.is_finished() => {
                if self.control.is_running() {
                    Phase::Running
                } else {
                    Phase::Stopping
                }
            }
            _ => Phase::Idle,
        }
    }

    /// Computes the trace from the collection as it is now and spawns the
    /// pacer. Does nothing unless the session is idle.
    pub fn start(&mut self) -> bool {
        if self.phase() != Phase::Idle {
            debug!(topic = %self.topic, "start ignored, run in progress");
            return false;
        }
        if !self.control.try_start() {
            return false;
        }
        self.task = None;

        let spec = self.topic.spec();
        let collection = read_state(&self.state).collection.clone();
        let trace = spec.generate(&collection, &self.params);
        write_state(&self.state).begin_run(trace.len());
        info!(topic = %self.topic, steps = trace.len(), "run started");

        let pacer = Pacer::new(spec, self.control.clone(), self.state.clone());
        self.task = Some(tokio::spawn(pacer.drive(trace)));
        true
    }

    pub fn stop(&self) {
        if self.phase() != Phase::Running {
            return;
        }
        self.control.request_stop();
        let mut state = write_state(&self.state);
        state.phase = Phase::Stopping.to_string();
        state.log("stop requested");
        info!(topic = %self.topic, "stop requested");
    }

    pub async fn wait(&mut self) -> StepperResult<Option<RunReport>> {
        match self.task.take() {
            Some(task) => Ok(Some(task.await?)),
            None => Ok(None),
        }
    }

    /// Stops any run, waits for the pacer to exit, then reseeds the
    /// collection. Safe to call in any phase.
    pub async fn reset(&mut self) -> StepperResult<()> {
        self.control.request_stop();
        self.wait().await?;
        let collection = match &self.fixed {
            Some(collection) => collection.clone(),
            None => seed(
                self.topic.spec(),
                &self.params,
                &mut self.rng,
                self.collection_size,
            ),
        };
        write_state(&self.state).reset(collection);
        info!(topic = %self.topic, "session reset");
        Ok(())
    }

    pub fn set_speed(&self, speed: u32) -> u32 {
        let speed = self.control.set_speed(speed);
        let mut state = write_state(&self.state);
        state.speed = speed;
        state.log(format!("speed set to {speed}"));
        speed
    }

    pub fn preview(&self) -> Trace {
        let collection = read_state(&self.state).collection.clone();
        self.topic.spec().generate(&collection, &self.params)
    }
}

fn seed(spec: &TopicSpec, params: &Params, rng: &mut StdRng, size: usize) -> Vec<i64> {
    let collection = spec.seed_collection(params, rng, size);
    spec.prepare_collection(collection)
}
