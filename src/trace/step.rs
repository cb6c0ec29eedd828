use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    Swap(usize, usize),
    /// Replace `values.len()` elements starting at `start`.
    Rewrite { start: usize, values: Vec<i64> },
    Assign { index: usize, value: i64 },
    Push(i64),
    Pop,
}

impl Mutation {
    pub fn apply(&self, collection: &mut Vec<i64>) {
        match self {
            Mutation::Swap(i, j) => collection.swap(*i, *j),
            Mutation::Rewrite { start, values } => {
                collection[*start..*start + values.len()].copy_from_slice(values);
            }
            Mutation::Assign { index, value } => collection[*index] = *value,
            Mutation::Push(value) => collection.push(*value),
            Mutation::Pop => {
                collection.pop();
            }
        }
    }

    pub fn fits(&self, len: usize) -> bool {
        match self {
            Mutation::Swap(i, j) => *i < len && *j < len,
            Mutation::Rewrite { start, values } => start
                .checked_add(values.len())
                .is_some_and(|end| end <= len),
            Mutation::Assign { index, .. } => *index < len,
            Mutation::Push(_) | Mutation::Pop => true,
        }
    }

    pub fn len_after(&self, len: usize) -> usize {
        match self {
            Mutation::Push(_) => len + 1,
            Mutation::Pop => len.saturating_sub(1),
            _ => len,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    Compare,
    Probe,
    Swap,
    Write,
    Resolve,
    Visit,
    CacheHit,
    Place,
    Reject,
    Backtrack,
    Solution,
    Terminal,
}

impl StepKind {
    pub fn label(self) -> &'static str {
        match self {
            StepKind::Compare => "compare",
            StepKind::Probe => "probe",
            StepKind::Swap => "swap",
            StepKind::Write => "write",
            StepKind::Resolve => "resolve",
            StepKind::Visit => "visit",
            StepKind::CacheHit => "cache hit",
            StepKind::Place => "place",
            StepKind::Reject => "reject",
            StepKind::Backtrack => "backtrack",
            StepKind::Solution => "solution",
            StepKind::Terminal => "done",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Found { index: usize },
    NotFound,
    Pair { left: usize, right: usize },
    Value(i64),
    Solutions(usize),
    Words(Vec<String>),
    Entry { bucket: usize, value: String },
    Removed { bucket: usize, value: String },
    Completed,
}

impl Outcome {
    /// Negative results render the same way as positive ones.
    pub fn banner(&self) -> String {
        match self {
            Outcome::Found { index } => format!("found at index {index}"),
            Outcome::NotFound => "not found".to_string(),
            Outcome::Pair { left, right } => format!("pair at indices [{left}, {right}]"),
            Outcome::Value(value) => format!("result = {value}"),
            Outcome::Solutions(0) => "no solution".to_string(),
            Outcome::Solutions(count) => format!("{count} solution(s)"),
            Outcome::Words(words) if words.is_empty() => "no matching words".to_string(),
            Outcome::Words(words) => words.join(", "),
            Outcome::Entry { bucket, value } => format!("'{value}' in bucket {bucket}"),
            Outcome::Removed { bucket, value } => format!("removed '{value}' from bucket {bucket}"),
            Outcome::Completed => "completed".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub highlight: Vec<usize>,
    pub mutation: Option<Mutation>,
    pub resolved: Vec<usize>,
    pub visited: Option<i64>,
    pub comparisons: u32,
    pub accesses: u32,
    pub outcome: Option<Outcome>,
    pub note: String,
}

impl Step {
    pub fn new(kind: StepKind, note: impl Into<String>) -> Self {
        Step {
            kind,
            highlight: Vec::new(),
            mutation: None,
            resolved: Vec::new(),
            visited: None,
            comparisons: 0,
            accesses: 0,
            outcome: None,
            note: note.into(),
        }
    }

    pub fn highlight(mut self, indices: impl Into<Vec<usize>>) -> Self {
        self.highlight = indices.into();
        self
    }

    pub fn mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = Some(mutation);
        self
    }

    pub fn resolve(mut self, indices: impl Into<Vec<usize>>) -> Self {
        self.resolved = indices.into();
        self
    }

    pub fn visited(mut self, value: i64) -> Self {
        self.visited = Some(value);
        self
    }

    pub fn counts(mut self, comparisons: u32, accesses: u32) -> Self {
        self.comparisons = comparisons;
        self.accesses = accesses;
        self
    }

    pub fn outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }
}
