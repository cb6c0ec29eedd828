use crate::registry::Params;
use crate::trace::{Outcome, Recorder, Trace};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PivotStrategy {
    #[default]
    Last,
    First,
    Middle,
}

impl FromStr for PivotStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "last" => Ok(PivotStrategy::Last),
            "first" => Ok(PivotStrategy::First),
            "middle" | "mid" => Ok(PivotStrategy::Middle),
            other => Err(format!("unknown pivot strategy '{other}' (last, first, middle)")),
        }
    }
}

impl fmt::Display for PivotStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PivotStrategy::Last => "last",
            PivotStrategy::First => "first",
            PivotStrategy::Middle => "middle",
        };
        f.write_str(name)
    }
}

pub fn bubble_sort(collection: &[i64], _params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let mut rec = Recorder::new(collection);
    let n = rec.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            if rec.compare(j, j + 1) == Ordering::Greater {
                rec.swap(j, j + 1);
            }
        }
        rec.resolve(vec![n - i - 1]);
    }
    rec.resolve(vec![0]);
    rec.finish(Outcome::Completed)
}

pub fn selection_sort(collection: &[i64], _params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let mut rec = Recorder::new(collection);
    let n = rec.len();
    for i in 0..n.saturating_sub(1) {
        let mut min_idx = i;
        for j in i + 1..n {
            if rec.compare(j, min_idx) == Ordering::Less {
                min_idx = j;
            }
        }
        if min_idx != i {
            rec.swap(i, min_idx);
        }
        rec.resolve(vec![i]);
    }
    rec.resolve(vec![n - 1]);
    rec.finish(Outcome::Completed)
}

/// Insertion expressed as adjacent swaps so the collection stays a
/// permutation of its input after every step.
pub fn insertion_sort(collection: &[i64], _params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let mut rec = Recorder::new(collection);
    let n = rec.len();
    rec.resolve(vec![0]);
    for i in 1..n {
        let mut j = i;
        while j > 0 && rec.compare(j - 1, j) == Ordering::Greater {
            rec.swap(j - 1, j);
            j -= 1;
        }
        rec.resolve(vec![i]);
    }
    rec.finish(Outcome::Completed)
}

pub fn quick_sort(collection: &[i64], params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let mut rec = Recorder::new(collection);
    let high = rec.len() - 1;
    quick_sort_range(&mut rec, 0, high, params.pivot);
    rec.finish(Outcome::Completed)
}

fn quick_sort_range(rec: &mut Recorder, low: usize, high: usize, pivot: PivotStrategy) {
    match low.cmp(&high) {
        Ordering::Less => {
            let p = partition(rec, low, high, pivot);
            if p > low {
                quick_sort_range(rec, low, p - 1, pivot);
            }
            quick_sort_range(rec, p + 1, high, pivot);
        }
        Ordering::Equal => rec.resolve(vec![low]),
        Ordering::Greater => {}
    }
}

/// Lomuto partition around `rec[high]` after moving the chosen pivot there.
fn partition(rec: &mut Recorder, low: usize, high: usize, pivot: PivotStrategy) -> usize {
    let chosen = match pivot {
        PivotStrategy::Last => high,
        PivotStrategy::First => low,
        PivotStrategy::Middle => low + (high - low) / 2,
    };
    if chosen != high {
        rec.swap(chosen, high);
    }

    // `boundary` is one past the last element known to be below the pivot.
    let mut boundary = low;
    for j in low..high {
        if rec.compare(j, high) == Ordering::Less {
            if boundary != j {
                rec.swap(boundary, j);
            }
            boundary += 1;
        }
    }
    if boundary != high {
        rec.swap(boundary, high);
    }
    rec.resolve(vec![boundary]);
    boundary
}

pub fn merge_sort(collection: &[i64], _params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let mut rec = Recorder::new(collection);
    let right = rec.len() - 1;
    merge_sort_range(&mut rec, 0, right);
    rec.resolve((0..=right).collect());
    rec.finish(Outcome::Completed)
}

fn merge_sort_range(rec: &mut Recorder, left: usize, right: usize) {
    if left < right {
        let mid = (left + right) / 2;
        merge_sort_range(rec, left, mid);
        merge_sort_range(rec, mid + 1, right);
        merge(rec, left, mid, right);
    }
}

/// After `k` placements the range reads `merged ++ left_rest ++ right_rest`,
/// so each rewrite is a permutation of the range.
fn merge(rec: &mut Recorder, left: usize, mid: usize, right: usize) {
    let left_run = rec.data()[left..=mid].to_vec();
    let right_run = rec.data()[mid + 1..=right].to_vec();
    let (n1, n2) = (left_run.len(), right_run.len());
    let mut merged = Vec::with_capacity(n1 + n2);
    let (mut i, mut j) = (0, 0);

    while i < n1 && j < n2 {
        let left_pos = left + merged.len();
        let right_pos = left_pos + (n1 - i);
        if rec.compare(left_pos, right_pos) != Ordering::Greater {
            merged.push(left_run[i]);
            i += 1;
        } else {
            merged.push(right_run[j]);
            j += 1;
            let mut values = merged.clone();
            values.extend_from_slice(&left_run[i..]);
            values.extend_from_slice(&right_run[j..]);
            rec.rewrite(left, values, vec![left_pos, right_pos]);
        }
    }
}
