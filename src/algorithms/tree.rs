use crate::registry::Params;
use crate::trace::{Outcome, Recorder, Trace};
use std::cmp::Ordering;
use std::collections::VecDeque;

/// Binary search tree over the positions of a collection. Node `i` holds
/// `values[i]`; nodes are inserted in collection order, ties go right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bst {
    pub left: Vec<Option<usize>>,
    pub right: Vec<Option<usize>>,
    pub depth: Vec<usize>,
}

impl Bst {
    pub fn build(values: &[i64]) -> Self {
        let n = values.len();
        let mut tree = Bst {
            left: vec![None; n],
            right: vec![None; n],
            depth: vec![0; n],
        };
        for idx in 1..n {
            let mut cur = 0;
            let mut depth = 1;
            loop {
                let slot = if values[idx] < values[cur] {
                    &mut tree.left[cur]
                } else {
                    &mut tree.right[cur]
                };
                match *slot {
                    Some(child) => {
                        cur = child;
                        depth += 1;
                    }
                    None => {
                        *slot = Some(idx);
                        tree.depth[idx] = depth;
                        break;
                    }
                }
            }
        }
        tree
    }

    pub fn root(&self) -> Option<usize> {
        if self.left.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    /// Node positions in in-order sequence; used for horizontal placement.
    pub fn in_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.left.len());
        let mut stack = Vec::new();
        let mut cur = self.root();
        while cur.is_some() || !stack.is_empty() {
            while let Some(node) = cur {
                stack.push(node);
                cur = self.left[node];
            }
            if let Some(node) = stack.pop() {
                order.push(node);
                cur = self.right[node];
            }
        }
        order
    }
}

pub fn in_order(collection: &[i64], _params: &Params) -> Trace {
    traverse(collection, |tree, root, out| in_order_walk(tree, Some(root), out))
}

pub fn pre_order(collection: &[i64], _params: &Params) -> Trace {
    traverse(collection, |tree, root, out| pre_order_walk(tree, Some(root), out))
}

pub fn post_order(collection: &[i64], _params: &Params) -> Trace {
    traverse(collection, |tree, root, out| post_order_walk(tree, Some(root), out))
}

pub fn level_order(collection: &[i64], _params: &Params) -> Trace {
    traverse(collection, |tree, root, out| {
        let mut queue = VecDeque::from([root]);
        while let Some(node) = queue.pop_front() {
            out.push(node);
            queue.extend(tree.left[node]);
            queue.extend(tree.right[node]);
        }
    })
}

pub fn bst_lookup(collection: &[i64], params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let target = params.target;
    let tree = Bst::build(collection);
    let mut rec = Recorder::new(collection);
    let mut cur = tree.root();
    while let Some(node) = cur {
        let value = rec.probe(vec![node], node, format!("at node {} looking for {target}", collection[node]));
        cur = match target.cmp(&value) {
            Ordering::Equal => {
                rec.resolve(vec![node]);
                return rec.finish(Outcome::Found { index: node });
            }
            Ordering::Less => tree.left[node],
            Ordering::Greater => tree.right[node],
        };
    }
    rec.finish(Outcome::NotFound)
}

fn traverse<F>(collection: &[i64], walk: F) -> Trace
where
    F: FnOnce(&Bst, usize, &mut Vec<usize>),
{
    if collection.is_empty() {
        return Trace::empty();
    }
    let tree = Bst::build(collection);
    let mut order = Vec::with_capacity(collection.len());
    walk(&tree, 0, &mut order);

    let mut rec = Recorder::new(collection);
    for node in order {
        let value = collection[node];
        rec.visit(node, value, format!("visit {value} (depth {})", tree.depth[node]));
    }
    rec.finish(Outcome::Completed)
}

fn in_order_walk(tree: &Bst, node: Option<usize>, out: &mut Vec<usize>) {
    if let Some(n) = node {
        in_order_walk(tree, tree.left[n], out);
        out.push(n);
        in_order_walk(tree, tree.right[n], out);
    }
}

fn pre_order_walk(tree: &Bst, node: Option<usize>, out: &mut Vec<usize>) {
    if let Some(n) = node {
        out.push(n);
        pre_order_walk(tree, tree.left[n], out);
        pre_order_walk(tree, tree.right[n], out);
    }
}

fn post_order_walk(tree: &Bst, node: Option<usize>, out: &mut Vec<usize>) {
    if let Some(n) = node {
        post_order_walk(tree, tree.left[n], out);
        post_order_walk(tree, tree.right[n], out);
        out.push(n);
    }
}
