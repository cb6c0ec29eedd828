use crate::registry::Params;
use crate::trace::{Outcome, Recorder, Trace};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeapOrder {
    #[default]
    Max,
    Min,
}

impl HeapOrder {
    /// Whether a node ordered `child_vs_parent` relative to its parent must
    /// move above it.
    fn violates(self, child_vs_parent: Ordering) -> bool {
        match self {
            HeapOrder::Max => child_vs_parent == Ordering::Greater,
            HeapOrder::Min => child_vs_parent == Ordering::Less,
        }
    }
}

impl FromStr for HeapOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "max" => Ok(HeapOrder::Max),
            "min" => Ok(HeapOrder::Min),
            other => Err(format!("unknown heap order '{other}' (max, min)")),
        }
    }
}

impl fmt::Display for HeapOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HeapOrder::Max => "max",
            HeapOrder::Min => "min",
        })
    }
}

pub fn is_heap(values: &[i64], order: HeapOrder) -> bool {
    (1..values.len()).all(|i| !order.violates(values[i].cmp(&values[(i - 1) / 2])))
}

pub fn insert(collection: &[i64], params: &Params) -> Trace {
    let mut rec = Recorder::new(collection);
    rec.push(params.value);
    let last = rec.len() - 1;
    sift_up(&mut rec, last, params.heap_order);
    rec.finish(Outcome::Completed)
}

pub fn extract_root(collection: &[i64], params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let mut rec = Recorder::new(collection);
    let last = rec.len() - 1;
    if last > 0 {
        rec.swap(0, last);
    }
    let root = rec.pop().unwrap_or_default();
    if !rec.is_empty() {
        let size = rec.len();
        sift_down(&mut rec, 0, size, params.heap_order);
    }
    rec.finish(Outcome::Value(root))
}

pub fn build(collection: &[i64], params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let mut rec = Recorder::new(collection);
    let size = rec.len();
    for i in (0..size / 2).rev() {
        sift_down(&mut rec, i, size, params.heap_order);
    }
    rec.finish(Outcome::Completed)
}

fn sift_up(rec: &mut Recorder, mut index: usize, order: HeapOrder) {
    while index > 0 {
        let parent = (index - 1) / 2;
        if !order.violates(rec.compare(index, parent)) {
            break;
        }
        rec.swap(index, parent);
        index = parent;
    }
}

fn sift_down(rec: &mut Recorder, mut index: usize, size: usize, order: HeapOrder) {
    loop {
        let left = 2 * index + 1;
        let right = left + 1;
        let mut target = index;
        if left < size && order.violates(rec.compare(left, target)) {
            target = left;
        }
        if right < size && order.violates(rec.compare(right, target)) {
            target = right;
        }
        if target == index {
            break;
        }
        rec.swap(index, target);
        index = target;
    }
}
