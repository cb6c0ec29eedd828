pub mod recorder;
pub mod step;

pub use recorder::Recorder;
pub use step::{Mutation, Outcome, Step, StepKind};

use crate::registry::Params;
use serde::{Deserialize, Serialize};

/// Computes a complete trace from the given collection. Each call starts from
/// the collection it is handed, so a generator can be re-run at any time.
pub type StepGenerator = fn(&[i64], &Params) -> Trace;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    pub fn new(steps: Vec<Step>) -> Self {
        Trace { steps }
    }

    pub fn empty() -> Self {
        Trace::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn comparisons(&self) -> u64 {
        self.steps.iter().map(|step| u64::from(step.comparisons)).sum()
    }

    pub fn accesses(&self) -> u64 {
        self.steps.iter().map(|step| u64::from(step.accesses)).sum()
    }

    pub fn count(&self, kind: StepKind) -> usize {
        self.steps.iter().filter(|step| step.kind == kind).count()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.steps.last().and_then(|step| step.outcome.as_ref())
    }

    pub fn visit_order(&self) -> Vec<i64> {
        self.steps.iter().filter_map(|step| step.visited).collect()
    }

    pub fn replay_onto(&self, collection: &[i64]) -> Vec<i64> {
        let mut data = collection.to_vec();
        for step in &self.steps {
            if let Some(mutation) = &step.mutation {
                mutation.apply(&mut data);
            }
        }
        data
    }
}

impl IntoIterator for Trace {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
