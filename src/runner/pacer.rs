use crate::registry::{Completion, TopicSpec};
use crate::runner::control::RunControl;
use crate::sink::{write_state, SharedState};
use crate::trace::{Outcome, Trace};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub status: RunStatus,
    pub applied: usize,
    pub total: usize,
}

pub struct Pacer {
    control: RunControl,
    state: SharedState,
    completion: Completion,
    search: bool,
}

impl Pacer {
    pub fn new(spec: &TopicSpec, control: RunControl, state: SharedState) -> Self {
        Pacer {
            control,
            state,
            completion: spec.completion,
            search: spec.search,
        }
    }

    /// The flag is checked before each step, never in the middle of one, so a
    /// stop always lands between two fully applied steps.
    pub async fn drive(self, trace: Trace) -> RunReport {
        let total = trace.len();
        let mut applied = 0;

        for step in &trace {
            if !self.control.is_running() {
                write_state(&self.state).cancelled();
                info!(applied, total, "run cancelled");
                return RunReport {
                    status: RunStatus::Cancelled,
                    applied,
                    total,
                };
            }

            write_state(&self.state).apply(step);
            applied += 1;
            debug!(step = applied, kind = step.kind.label(), note = %step.note, "step applied");

            if applied < total {
                tokio::time::sleep(self.control.delay()).await;
            }
        }

        self.control.finish();
        {
            let mut state = write_state(&self.state);
            if self.completion == Completion::ResolveAll {
                state.resolve_all();
            }
            if self.search && trace.is_empty() {
                state.set_outcome(Outcome::NotFound);
            }
            state.complete();
        }
        info!(applied, total, "run completed");
        RunReport {
            status: RunStatus::Completed,
            applied,
            total,
        }
    }
}
