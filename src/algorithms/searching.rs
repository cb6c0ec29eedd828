use crate::registry::Params;
use crate::trace::{Outcome, Recorder, Step, StepKind, Trace};
use std::cmp::Ordering;

pub fn linear_search(collection: &[i64], params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let target = params.target;
    let mut rec = Recorder::new(collection);
    for i in 0..rec.len() {
        let value = rec.probe(vec![i], i, format!("check [{i}] against {target}"));
        if value == target {
            return found(rec, i);
        }
    }
    rec.finish(Outcome::NotFound)
}

/// Expects `collection` sorted ascending. The registry sorts it first.
pub fn binary_search(collection: &[i64], params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let target = params.target;
    let mut rec = Recorder::new(collection);
    let mut low = 0usize;
    let mut high = rec.len() - 1;
    loop {
        let mid = (low + high) / 2;
        let value = rec.probe(
            vec![low, mid, high],
            mid,
            format!("window [{low}..={high}], mid [{mid}] vs {target}"),
        );
        match value.cmp(&target) {
            Ordering::Equal => return found(rec, mid),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => {
                if mid == 0 {
                    break;
                }
                high = mid - 1;
            }
        }
        if low > high {
            break;
        }
    }
    rec.finish(Outcome::NotFound)
}

/// Two pointers moving inward over a sorted collection looking for a pair
/// that sums to the target.
pub fn pair_sum(collection: &[i64], params: &Params) -> Trace {
    if collection.is_empty() {
        return Trace::empty();
    }
    let target = i128::from(params.target);
    let mut rec = Recorder::new(collection);
    let (mut left, mut right) = (0usize, rec.len() - 1);
    while left < right {
        let (a, b) = (rec.get(left), rec.get(right));
        let sum = i128::from(a) + i128::from(b);
        let verdict = match sum.cmp(&target) {
            Ordering::Equal => "match".to_string(),
            Ordering::Less => format!("< {target}, move left →"),
            Ordering::Greater => format!("> {target}, move right ←"),
        };
        rec.record(
            Step::new(StepKind::Compare, format!("{a} + {b} = {sum} {verdict}"))
                .highlight(vec![left, right])
                .counts(1, 2),
        );
        match sum.cmp(&target) {
            Ordering::Equal => {
                rec.resolve(vec![left, right]);
                return rec.finish(Outcome::Pair { left, right });
            }
            Ordering::Less => left += 1,
            Ordering::Greater => right -= 1,
        }
    }
    rec.finish(Outcome::NotFound)
}

fn found(mut rec: Recorder, index: usize) -> Trace {
    rec.resolve(vec![index]);
    rec.finish(Outcome::Found { index })
}
