use crate::trace::{Mutation, Outcome, Step, StepKind, Trace};
use std::cmp::Ordering;

/// Mutations hit the scratch copy as they are recorded, so the algorithm
/// always reads post-step state.
pub struct Recorder {
    data: Vec<i64>,
    steps: Vec<Step>,
}

impl Recorder {
    pub fn new(collection: &[i64]) -> Self {
        Recorder {
            data: collection.to_vec(),
            steps: Vec::new(),
        }
    }

    pub fn data(&self) -> &[i64] {
        &self.data
    }

    pub fn get(&self, index: usize) -> i64 {
        self.data[index]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn compare(&mut self, i: usize, j: usize) -> Ordering {
        let (a, b) = (self.data[i], self.data[j]);
        self.steps.push(
            Step::new(StepKind::Compare, format!("compare [{i}]={a} with [{j}]={b}"))
                .highlight(vec![i, j])
                .counts(1, 2),
        );
        a.cmp(&b)
    }

    pub fn probe(&mut self, highlight: Vec<usize>, index: usize, note: impl Into<String>) -> i64 {
        self.steps.push(
            Step::new(StepKind::Probe, note)
                .highlight(highlight)
                .counts(1, 1),
        );
        self.data[index]
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        let (a, b) = (self.data[i], self.data[j]);
        self.record(
            Step::new(StepKind::Swap, format!("swap [{i}]={a} and [{j}]={b}"))
                .highlight(vec![i, j])
                .mutation(Mutation::Swap(i, j)),
        );
    }

    pub fn rewrite(&mut self, start: usize, values: Vec<i64>, highlight: Vec<usize>) {
        let end = start + values.len();
        self.record(
            Step::new(StepKind::Write, format!("rewrite range [{start}..{end})"))
                .highlight(highlight)
                .mutation(Mutation::Rewrite { start, values }),
        );
    }

    pub fn assign(&mut self, index: usize, value: i64, kind: StepKind, note: impl Into<String>) {
        self.record(
            Step::new(kind, note)
                .highlight(vec![index])
                .mutation(Mutation::Assign { index, value }),
        );
    }

    pub fn push(&mut self, value: i64) {
        let index = self.data.len();
        self.record(
            Step::new(StepKind::Write, format!("append {value} at [{index}]"))
                .highlight(vec![index])
                .mutation(Mutation::Push(value)),
        );
    }

    pub fn pop(&mut self) -> Option<i64> {
        let value = *self.data.last()?;
        self.record(Step::new(StepKind::Write, format!("remove last ({value})")).mutation(Mutation::Pop));
        Some(value)
    }

    pub fn resolve(&mut self, indices: Vec<usize>) {
        let note = format!("resolved {indices:?}");
        self.steps
            .push(Step::new(StepKind::Resolve, note).highlight(indices.clone()).resolve(indices));
    }

    pub fn visit(&mut self, index: usize, value: i64, note: impl Into<String>) {
        self.steps.push(
            Step::new(StepKind::Visit, note)
                .highlight(vec![index])
                .resolve(vec![index])
                .visited(value)
                .counts(0, 1),
        );
    }

    pub fn record(&mut self, step: Step) {
        if let Some(mutation) = &step.mutation {
            mutation.apply(&mut self.data);
        }
        self.steps.push(step);
    }

    pub fn finish(mut self, outcome: Outcome) -> Trace {
        let note = outcome.banner();
        self.steps
            .push(Step::new(StepKind::Terminal, note).outcome(outcome));
        Trace::new(self.steps)
    }
}
