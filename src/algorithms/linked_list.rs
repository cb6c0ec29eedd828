use crate::registry::Params;
use crate::trace::{Outcome, Recorder, Trace};

/// Follows `next` pointers from the head; node `i` sits at position `i`.
pub fn traverse(collection: &[i64], _params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let mut rec = Recorder::new(collection);
    let last = rec.len() - 1;
    for node in 0..rec.len() {
        let value = rec.get(node);
        let note = match node {
            0 if last == 0 => format!("head {value}, next is null"),
            0 => format!("head {value}, follow next"),
            n if n == last => format!("node {n} = {value}, next is null"),
            n => format!("node {n} = {value}, follow next"),
        };
        rec.visit(node, value, note);
    }
    rec.finish(Outcome::Completed)
}
