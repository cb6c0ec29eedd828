use crate::registry::Params;
use crate::trace::{Outcome, Recorder, Step, StepKind, Trace};
use std::collections::VecDeque;

/// Undirected example graph; node `i` is drawn at position `i` of the
/// working collection.
pub const ADJACENCY: [&[usize]; 6] = [&[1, 2], &[0, 3, 4], &[0, 5], &[1], &[1, 5], &[2, 4]];

pub const fn node_count() -> usize {
    ADJACENCY.len()
}

pub fn neighbors(node: usize) -> &'static [usize] {
    ADJACENCY.get(node).copied().unwrap_or(&[])
}

pub fn edges() -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for (from, list) in ADJACENCY.iter().enumerate() {
        for &to in list.iter() {
            if from < to {
                edges.push((from, to));
            }
        }
    }
    edges
}

pub fn breadth_first(collection: &[i64], params: &Params) -> Trace {
    let nodes = collection.len().min(node_count());
    if nodes == 0 || params.start >= nodes {
        return Trace::empty();
    }
    let mut rec = Recorder::new(collection);
    let mut seen = vec![false; nodes];
    let mut queue = VecDeque::from([params.start]);
    seen[params.start] = true;

    while let Some(node) = queue.pop_front() {
        let value = rec.get(node);
        rec.visit(node, value, format!("dequeue and visit node {value}"));
        for &next in neighbors(node) {
            if next < nodes && !seen[next] {
                seen[next] = true;
                queue.push_back(next);
                rec.record(
                    Step::new(StepKind::Probe, format!("enqueue neighbor {}", rec.get(next)))
                        .highlight(vec![node, next])
                        .counts(1, 1),
                );
            }
        }
    }
    rec.finish(Outcome::Completed)
}

pub fn depth_first(collection: &[i64], params: &Params) -> Trace {
    let nodes = collection.len().min(node_count());
    if nodes == 0 || params.start >= nodes {
        return Trace::empty();
    }
    let mut rec = Recorder::new(collection);
    let mut seen = vec![false; nodes];
    dfs_visit(&mut rec, params.start, &mut seen);
    rec.finish(Outcome::Completed)
}

fn dfs_visit(rec: &mut Recorder, node: usize, seen: &mut [bool]) {
    seen[node] = true;
    let value = rec.get(node);
    rec.visit(node, value, format!("visit node {value}"));
    for &next in neighbors(node) {
        if next < seen.len() && !seen[next] {
            dfs_visit(rec, next, seen);
        }
    }
}
