use crate::registry::{Layout, Topic};
use crate::trace::{Outcome, Step, StepKind};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub const LOG_LIMIT: usize = 64;

pub type SharedState = Arc<RwLock<VizState>>;

#[derive(Clone, Debug, Serialize)]
pub struct VizState {
    pub topic: Topic,
    pub title: String,
    pub time: String,
    pub space: String,
    pub layout: Layout,
    pub collection: Vec<i64>,
    pub highlight: Vec<usize>,
    /// Settled indices in the order they were resolved. Never shrinks during a run.
    pub resolved: Vec<usize>,
    pub visited: Vec<i64>,
    pub comparisons: u64,
    pub accesses: u64,
    pub step_index: usize,
    pub steps_total: usize,
    pub narration: String,
    pub outcome: Option<Outcome>,
    pub banner: Option<String>,
    pub solutions: Vec<Vec<i64>>,
    pub phase: String,
    pub speed: u32,
    pub logs: VecDeque<String>,
}

impl VizState {
    pub fn new(topic: Topic, collection: Vec<i64>, speed: u32) -> Self {
        let spec = topic.spec();
        VizState {
            topic,
            title: spec.title.to_string(),
            time: spec.time.to_string(),
            space: spec.space.to_string(),
            layout: spec.layout,
            collection,
            highlight: Vec::new(),
            resolved: Vec::new(),
            visited: Vec::new(),
            comparisons: 0,
            accesses: 0,
            step_index: 0,
            steps_total: 0,
            narration: String::new(),
            outcome: None,
            banner: None,
            solutions: Vec::new(),
            phase: "idle".to_string(),
            speed,
            logs: VecDeque::with_capacity(LOG_LIMIT),
        }
    }

    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    /// Applies every effect of `step`. Callers hold the write lock for the
    /// whole call, so readers never observe a partially applied step.
    pub fn apply(&mut self, step: &Step) {
        self.highlight.clone_from(&step.highlight);
        if let Some(mutation) = &step.mutation {
            mutation.apply(&mut self.collection);
        }
        for &index in &step.resolved {
            self.mark_resolved(index);
        }
        if let Some(value) = step.visited {
            self.visited.push(value);
        }
        self.comparisons += u64::from(step.comparisons);
        self.accesses += u64::from(step.accesses);
        self.step_index += 1;
        self.narration.clone_from(&step.note);
        if step.kind == StepKind::Solution {
            self.solutions.push(self.collection.clone());
        }
        if let Some(outcome) = &step.outcome {
            self.set_outcome(outcome.clone());
        }
        if step.kind != StepKind::Compare && step.kind != StepKind::Probe {
            push_log(&mut self.logs, format!("[{}] {}", step.kind.label(), step.note));
        }
    }

    /// Clears per-run progress but keeps the collection, since a run always
    /// starts from whatever the collection currently holds.
    pub fn begin_run(&mut self, steps_total: usize) {
        self.highlight.clear();
        self.resolved.clear();
        self.visited.clear();
        self.comparisons = 0;
        self.accesses = 0;
        self.step_index = 0;
        self.steps_total = steps_total;
        self.outcome = None;
        self.banner = None;
        self.solutions.clear();
        self.narration = "running".to_string();
        self.phase = "running".to_string();
        push_log(&mut self.logs, format!("run started ({steps_total} steps)"));
    }

    pub fn resolve_all(&mut self) {
        for index in 0..self.collection.len() {
            self.mark_resolved(index);
        }
    }

    pub fn complete(&mut self) {
        self.highlight.clear();
        self.phase = "idle".to_string();
        push_log(&mut self.logs, "run completed".to_string());
    }

    pub fn cancelled(&mut self) {
        self.highlight.clear();
        self.narration = "stopped".to_string();
        self.phase = "idle".to_string();
        push_log(&mut self.logs, format!("run stopped after {} steps", self.step_index));
    }

    pub fn reset(&mut self, collection: Vec<i64>) {
        self.collection = collection;
        self.highlight.clear();
        self.resolved.clear();
        self.visited.clear();
        self.comparisons = 0;
        self.accesses = 0;
        self.step_index = 0;
        self.steps_total = 0;
        self.narration.clear();
        self.outcome = None;
        self.banner = None;
        self.solutions.clear();
        self.phase = "idle".to_string();
        push_log(&mut self.logs, "reset".to_string());
    }

    pub fn set_outcome(&mut self, outcome: Outcome) {
        self.banner = Some(outcome.banner());
        self.outcome = Some(outcome);
    }

    pub fn log<S: Into<String>>(&mut self, entry: S) {
        push_log(&mut self.logs, entry.into());
    }

    fn mark_resolved(&mut self, index: usize) {
        if !self.resolved.contains(&index) {
            self.resolved.push(index);
        }
    }
}

pub fn read_state(state: &SharedState) -> RwLockReadGuard<'_, VizState> {
    state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn write_state(state: &SharedState) -> RwLockWriteGuard<'_, VizState> {
    state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn snapshot(state: &SharedState) -> VizState {
    read_state(state).clone()
}

pub fn push_log(logs: &mut VecDeque<String>, entry: String) {
    if logs.len() == LOG_LIMIT {
        logs.pop_front();
    }
    logs.push_back(entry);
}
