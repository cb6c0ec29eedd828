use crate::algorithms::{graph, tree::Bst};
use crate::registry::{Layout, Topic};
use crate::sink::VizState;
use serde::Serialize;
use std::f64::consts::PI;

#[derive(Clone, Debug, Serialize)]
pub struct NodePoint {
    pub idx: usize,
    pub value: i64,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct EdgeSegment {
    pub from: usize,
    pub to: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Node and edge coordinates in [-1, 1] for the canvas layouts.
#[derive(Clone, Debug, Serialize)]
pub struct SceneLayout {
    pub nodes: Vec<NodePoint>,
    pub edges: Vec<EdgeSegment>,
}

impl SceneLayout {
    pub fn for_state(state: &VizState) -> Option<Self> {
        match state.layout {
            Layout::Graph => Some(Self::ring(&state.collection)),
            Layout::Tree if is_heap_topic(state.topic) => Some(Self::implicit_tree(&state.collection)),
            Layout::Tree => Some(Self::search_tree(&state.collection)),
            _ => None,
        }
    }

    fn ring(values: &[i64]) -> Self {
        let count = values.len().max(1);
        let nodes: Vec<NodePoint> = values
            .iter()
            .enumerate()
            .map(|(idx, &value)| {
                let angle = PI / 2.0 - 2.0 * PI * (idx as f64) / (count as f64);
                NodePoint {
                    idx,
                    value,
                    x: angle.cos() * 0.9,
                    y: angle.sin() * 0.9,
                }
            })
            .collect();
        let edges = graph::edges()
            .into_iter()
            .filter(|&(from, to)| from < nodes.len() && to < nodes.len())
            .map(|(from, to)| segment(&nodes, from, to))
            .collect();
        SceneLayout { nodes, edges }
    }

    /// Array-backed binary tree: children of `i` sit at `2i + 1` and `2i + 2`.
    fn implicit_tree(values: &[i64]) -> Self {
        let levels = levels_for(values.len());
        let nodes: Vec<NodePoint> = values
            .iter()
            .enumerate()
            .map(|(idx, &value)| {
                let level = usize::BITS - (idx + 1).leading_zeros() - 1;
                let first = (1usize << level) - 1;
                let slots = 1usize << level;
                let offset = idx - first;
                NodePoint {
                    idx,
                    value,
                    x: spread(offset, slots),
                    y: depth_y(level as usize, levels),
                }
            })
            .collect();
        let edges = (1..nodes.len())
            .map(|child| segment(&nodes, (child - 1) / 2, child))
            .collect();
        SceneLayout { nodes, edges }
    }

    fn search_tree(values: &[i64]) -> Self {
        let tree = Bst::build(values);
        let levels = tree.depth.iter().max().map_or(1, |depth| depth + 1);
        let order = tree.in_order();
        let mut x = vec![0.0; values.len()];
        for (rank, &node) in order.iter().enumerate() {
            x[node] = spread(rank, order.len());
        }
        let nodes: Vec<NodePoint> = values
            .iter()
            .enumerate()
            .map(|(idx, &value)| NodePoint {
                idx,
                value,
                x: x[idx],
                y: depth_y(tree.depth[idx], levels),
            })
            .collect();
        let mut edges = Vec::new();
        for parent in 0..values.len() {
            for child in [tree.left[parent], tree.right[parent]].into_iter().flatten() {
                edges.push(segment(&nodes, parent, child));
            }
        }
        SceneLayout { nodes, edges }
    }
}

pub fn is_heap_topic(topic: Topic) -> bool {
    matches!(
        topic,
        Topic::HeapInsert | Topic::HeapExtract | Topic::HeapBuild
    )
}

fn levels_for(count: usize) -> usize {
    (usize::BITS - count.leading_zeros()).max(1) as usize
}

fn spread(position: usize, slots: usize) -> f64 {
    -0.95 + 1.9 * (position as f64 + 0.5) / (slots.max(1) as f64)
}

fn depth_y(depth: usize, levels: usize) -> f64 {
    if levels <= 1 {
        return 0.8;
    }
    0.8 - 1.6 * (depth as f64) / ((levels - 1) as f64)
}

fn segment(nodes: &[NodePoint], from: usize, to: usize) -> EdgeSegment {
    let (src, dst) = (&nodes[from], &nodes[to]);
    EdgeSegment {
        from,
        to,
        x1: src.x,
        y1: src.y,
        x2: dst.x,
        y2: dst.y,
    }
}
