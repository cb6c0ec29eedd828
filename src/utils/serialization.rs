use crate::error::{StepperError, StepperResult};
use crate::registry::{Params, Topic};
use crate::trace::Trace;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

/// A generated trace together with everything needed to replay it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedTrace {
    pub topic: Topic,
    pub params: Params,
    pub collection: Vec<i64>,
    pub trace: Trace,
}

impl RecordedTrace {
    pub fn record(topic: Topic, params: Params, collection: Vec<i64>) -> Self {
        let params = params.clamped(topic);
        let collection = topic.spec().prepare_collection(collection);
        let trace = topic.spec().generate(&collection, &params);
        RecordedTrace {
            topic,
            params,
            collection,
            trace,
        }
    }

    /// Collection after every step has been applied.
    pub fn final_collection(&self) -> Vec<i64> {
        self.trace.replay_onto(&self.collection)
    }
}

pub fn save_trace<P: AsRef<Path>>(path: P, recorded: &RecordedTrace) -> StepperResult<()> {
    let bytes =
        bincode::serialize(recorded).map_err(|err| StepperError::Encode(err.to_string()))?;
    let mut file = fs::File::create(path)?;
    file.write_all(&bytes)?;
    Ok(())
}

/// Decodes a recorded trace and rejects any whose mutations would step
/// outside the collection it was recorded against.
pub fn load_trace<P: AsRef<Path>>(path: P) -> StepperResult<RecordedTrace> {
    let bytes = fs::read(path)?;
    let recorded: RecordedTrace = bincode::deserialize(&bytes)?;
    check_replayable(&recorded)?;
    Ok(recorded)
}

fn check_replayable(recorded: &RecordedTrace) -> StepperResult<()> {
    let mut len = recorded.collection.len();
    for (idx, step) in recorded.trace.iter().enumerate() {
        let Some(mutation) = &step.mutation else {
            continue;
        };
        if !mutation.fits(len) {
            return Err(StepperError::Decode(format!(
                "step {} ({mutation:?}) is out of bounds for a collection of {len}",
                idx + 1
            )));
        }
        len = mutation.len_after(len);
    }
    Ok(())
}

pub fn trace_to_json(recorded: &RecordedTrace) -> StepperResult<String> {
    Ok(serde_json::to_string_pretty(recorded)?)
}

pub fn export_json<P: AsRef<Path>>(path: P, recorded: &RecordedTrace) -> StepperResult<()> {
    fs::write(path, trace_to_json(recorded)?)?;
    Ok(())
}
